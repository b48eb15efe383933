use std::f64::consts::PI;
use std::time::Instant;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{BitDepth, DynamicalState, Fps, FrameIndex};
use crate::foundation::error::SpiraluxResult;
use crate::render::kernel::{FrameOutput, FrameParams, render_frame};
use crate::render::trajectory::render_frame_parallel;
use crate::scene::preset::Preset;

/// Options controlling how a session renders.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationSessionOpts {
    /// Fan the shading stage out across rayon. Output is byte-identical to
    /// the sequential path.
    pub parallel: bool,
}

/// Aggregate statistics for a completed animation run.
#[derive(Clone, Copy, Debug)]
pub struct AnimationStats {
    /// Frames rendered.
    pub frames: u64,
    /// Recurrence iterations executed (frames × n²).
    pub iterations: u64,
    /// Total in-bounds pixel writes across all frames.
    pub pixels_processed: u64,
    /// Wall-clock render time in seconds.
    pub elapsed_secs: f64,
}

/// Drives an animation frame by frame.
///
/// The session owns the carried `(x, u, v)` state: each rendered frame's
/// final state becomes the next frame's initial state, so frames must be
/// rendered strictly in order. Two sessions over the same preset produce
/// identical animations.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    preset: Preset,
    depth: BitDepth,
    opts: AnimationSessionOpts,
    state: DynamicalState,
    next_frame: u64,
}

impl AnimationSession {
    /// Create a session over a validated preset.
    pub fn new(
        preset: Preset,
        depth: BitDepth,
        opts: AnimationSessionOpts,
    ) -> SpiraluxResult<Self> {
        preset.validate()?;
        Ok(Self {
            preset,
            depth,
            opts,
            state: DynamicalState::origin(),
            next_frame: 0,
        })
    }

    /// The preset this session renders.
    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    /// The current carried state.
    pub fn state(&self) -> DynamicalState {
        self.state
    }

    /// Index of the next frame to be rendered.
    pub fn next_frame(&self) -> u64 {
        self.next_frame
    }

    /// Rewind to the animation start: state back to the origin, frame clock
    /// back to zero.
    pub fn reset(&mut self) {
        self.state = DynamicalState::origin();
        self.next_frame = 0;
    }

    /// Spiral size multiplier at time `t`: a sinusoidal pulse between the
    /// preset's `size_min` and `size_max`.
    pub fn spiral_size_multiplier(&self, t: f64) -> f64 {
        let pulse = &self.preset.spiral_pulse;
        let size_base = (pulse.size_max + pulse.size_min) / 2.0;
        let size_variation = (pulse.size_max - pulse.size_min) / 2.0;
        size_base + size_variation * (t * pulse.pulse_speed * 2.0 * PI).sin()
    }

    /// Kernel parameters for frame `frame`.
    pub fn frame_params(&self, frame: u64) -> FrameParams {
        let t = frame as f64 * self.preset.mathematical.time_speed;
        FrameParams {
            grid: self.preset.mathematical.n,
            angular_step: self.preset.angular_step(),
            time: t,
            canvas: self.preset.canvas(),
            scale_factor: self.preset.mathematical.scale_factor,
            spiral_size_multiplier: self.spiral_size_multiplier(t),
            frame,
            color: self.preset.color_params(),
            hdr_boost: self.preset.hdr.hdr_boost,
            core_boost: self.preset.hdr.cosmic_core_boost,
            tone: self.preset.tone_map(self.depth),
        }
    }

    /// Render the next frame, advancing the carried state and frame clock.
    #[tracing::instrument(skip(self), fields(frame = self.next_frame))]
    pub fn render_next(&mut self) -> SpiraluxResult<FrameOutput> {
        let params = self.frame_params(self.next_frame);
        let started = Instant::now();
        let out = if self.opts.parallel {
            render_frame_parallel(&params, self.state)?
        } else {
            render_frame(&params, self.state)?
        };
        self.state = out.state;
        self.next_frame += 1;

        let grid = u64::from(params.grid);
        tracing::debug!(
            iterations = grid * grid,
            pixels_processed = out.pixels_processed,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "frame rendered"
        );
        Ok(out)
    }

    /// Render the whole animation from the start into `sink`, in strictly
    /// increasing frame order.
    pub fn run_into(&mut self, sink: &mut dyn FrameSink) -> SpiraluxResult<AnimationStats> {
        self.reset();
        sink.begin(SinkConfig {
            canvas: self.preset.canvas(),
            fps: Fps::new(self.preset.video.fps, 1)?,
            depth: self.depth,
        })?;

        let started = Instant::now();
        let num_frames = self.preset.video.num_frames;
        let grid = u64::from(self.preset.mathematical.n);
        let mut pixels_processed = 0u64;
        for frame in 0..num_frames {
            let out = self.render_next()?;
            pixels_processed += out.pixels_processed;
            sink.push_frame(FrameIndex(frame), &out.buffer)?;
        }
        sink.end()?;

        let stats = AnimationStats {
            frames: num_frames,
            iterations: num_frames * grid * grid,
            pixels_processed,
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        tracing::info!(
            frames = stats.frames,
            pixels_processed = stats.pixels_processed,
            elapsed_secs = stats.elapsed_secs,
            "animation complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::library::PresetLibrary;

    fn small_preset() -> Preset {
        let mut p = PresetLibrary::builtin().get("deep_space").unwrap().clone();
        p.video.width = 32;
        p.video.height = 32;
        p.video.num_frames = 3;
        p.mathematical.n = 20;
        p.mathematical.scale_factor = 6.0;
        p
    }

    #[test]
    fn pulse_multiplier_hits_base_and_max() {
        let sess = AnimationSession::new(
            small_preset(),
            BitDepth::Eight,
            AnimationSessionOpts::default(),
        )
        .unwrap();
        let pulse = sess.preset().spiral_pulse;
        let base = (pulse.size_max + pulse.size_min) / 2.0;

        assert_eq!(sess.spiral_size_multiplier(0.0), base);
        // A quarter pulse period peaks at size_max.
        let quarter = 0.25 / pulse.pulse_speed;
        let at_peak = sess.spiral_size_multiplier(quarter);
        assert!((at_peak - pulse.size_max).abs() < 1e-9);
    }

    #[test]
    fn state_threads_across_frames() {
        let mut sess = AnimationSession::new(
            small_preset(),
            BitDepth::Eight,
            AnimationSessionOpts::default(),
        )
        .unwrap();
        let first = sess.render_next().unwrap();
        assert_eq!(sess.state(), first.state);

        // The same two frames rendered by hand with threaded state.
        let mut manual = AnimationSession::new(
            small_preset(),
            BitDepth::Eight,
            AnimationSessionOpts::default(),
        )
        .unwrap();
        let p0 = manual.frame_params(0);
        let m0 = render_frame(&p0, DynamicalState::origin()).unwrap();
        let p1 = manual.frame_params(1);
        let m1 = render_frame(&p1, m0.state).unwrap();

        let second = sess.render_next().unwrap();
        assert_eq!(first.buffer, m0.buffer);
        assert_eq!(second.buffer, m1.buffer);
        assert_eq!(second.state, m1.state);
    }

    #[test]
    fn reset_restarts_the_trajectory() {
        let mut sess = AnimationSession::new(
            small_preset(),
            BitDepth::Eight,
            AnimationSessionOpts::default(),
        )
        .unwrap();
        let a = sess.render_next().unwrap();
        sess.reset();
        let b = sess.render_next().unwrap();
        assert_eq!(a.buffer, b.buffer);
        assert_eq!(a.state, b.state);
    }
}
