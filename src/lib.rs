//! Spiralux renders procedurally generated spiral animations.
//!
//! Each frame iterates a stateful 2D recurrence n² times, projects every
//! iteration into screen space, colors it with phase-modulated sinusoids, and
//! tone-maps the result into an 8-bit or 16-bit HDR pixel buffer. The carried
//! `(x, u, v)` state is threaded frame-to-frame, so an animation is a single
//! continuous trajectory through the recurrence.
//!
//! The public API is session-oriented:
//!
//! - Load and validate a [`Preset`] (or a [`PresetLibrary`] file)
//! - Create an [`AnimationSession`]
//! - Render single frames or stream the whole animation into a [`FrameSink`]
//!
//! The kernel itself ([`render_frame`]) is a pure function: no I/O, no global
//! state, buffer ownership transfers to the caller on return.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame-file and ffmpeg encoding sinks.
pub mod encode;
/// The per-frame mathematical kernel and pixel pipeline.
pub mod render;
/// Preset configuration model and library.
pub mod scene;
/// Session-oriented animation driver.
pub mod session;

pub use crate::foundation::core::{BitDepth, Canvas, DynamicalState, Fps, FrameIndex};
pub use crate::foundation::error::{SpiraluxError, SpiraluxResult};

pub use crate::encode::ffmpeg::{HdrEncodeConfig, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::frames::{FrameDirLayout, FrameFileSink};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::buffer::{FrameBuffer, PixelData};
pub use crate::render::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use crate::render::kernel::{ColorParams, FrameOutput, FrameParams, render_frame};
pub use crate::render::tonemap::ToneMap;
pub use crate::render::trajectory::render_frame_parallel;
pub use crate::scene::library::PresetLibrary;
pub use crate::scene::preset::{
    ColorConfig, HdrConfig, MathConfig, OutputConfig, Preset, SpiralPulseConfig, VideoConfig,
};
pub use crate::session::driver::{AnimationSession, AnimationSessionOpts, AnimationStats};
