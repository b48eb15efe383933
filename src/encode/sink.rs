use crate::foundation::core::{BitDepth, Canvas, Fps, FrameIndex};
use crate::foundation::error::SpiraluxResult;
use crate::render::buffer::FrameBuffer;

/// Configuration provided to a [`FrameSink`] at the start of an animation run.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Frame dimensions.
    pub canvas: Canvas,
    /// Playback frames-per-second.
    pub fps: Fps,
    /// Channel depth of the incoming buffers.
    pub depth: BitDepth,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// [`FrameIndex`] order within a run.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SpiraluxResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> SpiraluxResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SpiraluxResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameBuffer)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameBuffer)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SpiraluxResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> SpiraluxResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SpiraluxResult<()> {
        Ok(())
    }
}
