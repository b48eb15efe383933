//! The per-frame pixel pipeline.
//!
//! [`kernel::render_frame`] is the sequential reference path; `trajectory`
//! provides a byte-identical opt-in parallel shading path.

/// Frame pixel buffers (BGR channel order, 8- or 16-bit depth).
pub mod buffer;
/// Content fingerprints for determinism and parity checks.
pub mod fingerprint;
/// The spiral recurrence kernel.
pub mod kernel;
/// Tone-mapping strategies.
pub mod tonemap;
/// Two-phase parallel shading.
pub mod trajectory;
