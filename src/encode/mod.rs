//! Encoding sinks and encoder-command construction.
//!
//! Sinks consume rendered frames in timeline order; the kernel never touches
//! the filesystem itself.

/// HDR ffmpeg command construction.
pub mod ffmpeg;
/// Numbered frame-file sink (PNG / TIFF).
pub mod frames;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
