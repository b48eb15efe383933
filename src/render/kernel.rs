use std::f64::consts::PI;

use crate::foundation::core::{Canvas, DynamicalState};
use crate::foundation::error::{SpiraluxError, SpiraluxResult};
use crate::render::buffer::FrameBuffer;
use crate::render::tonemap::ToneMap;

// Fixed pipeline constants. These are part of the output contract; changing
// any of them changes every rendered frame.
pub(crate) const GAMUT_EXPAND_RED: f64 = 1.2;
pub(crate) const GAMUT_EXPAND_GREEN: f64 = 1.15;
pub(crate) const GAMUT_EXPAND_BLUE: f64 = 1.1;
pub(crate) const CORE_INTENSITY_THRESHOLD: f64 = 2.0;
pub(crate) const AMBIENT_DIMMING: f64 = 0.3;
pub(crate) const PHASE_SCALE: f64 = 0.01;
pub(crate) const LUMA_INDEX_SCALE: f64 = 0.05;

/// Per-channel color synthesis parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorParams {
    /// Phase advance per frame.
    pub speed: f64,
    /// Red channel base level.
    pub red_base: f64,
    /// Red channel modulation amplitude.
    pub red_variation: f64,
    /// Green channel base level.
    pub green_base: f64,
    /// Green channel modulation amplitude.
    pub green_variation: f64,
    /// Blue channel base level.
    pub blue_base: f64,
    /// Blue channel modulation amplitude.
    pub blue_variation: f64,
    /// Saturation factor applied before clamping.
    pub saturation: f64,
}

/// Read-only inputs for one frame of the spiral kernel.
///
/// Assumed well-formed: preset validation rejects out-of-range values before
/// a frame is rendered. The kernel itself only guards the canvas-dimension
/// precondition.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    /// Grid size n; the kernel runs n² iterations.
    pub grid: u32,
    /// Angular step r of the recurrence.
    pub angular_step: f64,
    /// Frame time value t, added into the phase accumulator every iteration.
    pub time: f64,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Projection scale factor.
    pub scale_factor: f64,
    /// Per-frame spiral pulse multiplier applied to projected coordinates.
    pub spiral_size_multiplier: f64,
    /// Frame index, driving color phase.
    pub frame: u64,
    /// Color synthesis parameters.
    pub color: ColorParams,
    /// Global luminance boost.
    pub hdr_boost: f64,
    /// Extra boost applied inside bright-core regions.
    pub core_boost: f64,
    /// Output quantization strategy.
    pub tone: ToneMap,
}

/// Result of rendering one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    /// The rendered pixel buffer; ownership is the caller's.
    pub buffer: FrameBuffer,
    /// Count of in-bounds iterations (0 ..= n²).
    pub pixels_processed: u64,
    /// State after the final (i = n-1, j = n-1) iteration; feed this into the
    /// next frame's render call.
    pub state: DynamicalState,
}

/// Advance the recurrence one step and return the scaled projection inputs.
///
/// The scaled pair is transient: it feeds this iteration's projection only
/// and is never written back into the state.
#[inline]
pub(crate) fn advance_state(
    state: &mut DynamicalState,
    i: f64,
    angular_step: f64,
    time: f64,
    multiplier: f64,
) -> (f64, f64) {
    let u_raw = (i + state.v).sin() + (angular_step * i + state.x).sin();
    let v_raw = (i + state.v).cos() + (angular_step * i + state.x).cos();
    state.x = u_raw + time;
    state.u = u_raw;
    state.v = v_raw;
    (u_raw * multiplier, v_raw * multiplier)
}

/// Map scaled recurrence output to pixel coordinates.
///
/// Coordinates off the canvas return `None`: the iteration contributes no
/// pixel and is not counted. No clamping; this is how spiral density falls
/// off at the frame edges.
#[inline]
pub(crate) fn project(
    canvas: Canvas,
    scale_factor: f64,
    u_scaled: f64,
    v_scaled: f64,
) -> Option<(u32, u32)> {
    let px = (f64::from(canvas.width / 2) + scale_factor * u_scaled).floor();
    let py = (f64::from(canvas.height / 2) + scale_factor * v_scaled).floor();
    if px >= 0.0 && px < f64::from(canvas.width) && py >= 0.0 && py < f64::from(canvas.height) {
        Some((px as u32, py as u32))
    } else {
        None
    }
}

/// Synthesize the base `[r, g, b]` triple for iteration `(i, j)`.
#[inline]
pub(crate) fn synthesize_color(color: &ColorParams, i: u32, j: u32, frame: u64) -> [f64; 3] {
    let phase = (f64::from(i) + f64::from(j) + frame as f64 * color.speed) * PHASE_SCALE;
    let r = color.red_base + color.red_variation * phase.sin();
    let g = color.green_base + color.green_variation * (phase + PI / 3.0).sin();
    let b = color.blue_base + color.blue_variation * (phase + 2.0 * PI / 3.0).sin();

    let r = (r * color.saturation).clamp(0.0, 1.0);
    let g = (g * color.saturation).clamp(0.0, 1.0);
    let b = (b * color.saturation).clamp(0.0, 1.0);

    // Narrow-to-wide gamut expansion; multipliers are fixed constants.
    [
        (r * GAMUT_EXPAND_RED).min(1.0),
        (g * GAMUT_EXPAND_GREEN).min(1.0),
        (b * GAMUT_EXPAND_BLUE).min(1.0),
    ]
}

/// Scalar luminance for iteration `(i, j)` given the post-update state.
///
/// `core_intensity > 2.0` marks bright-core regions; everything else is
/// ambient space dimmed by the fixed 0.3 factor.
#[inline]
pub(crate) fn luminance(
    state: &DynamicalState,
    i: u32,
    j: u32,
    hdr_boost: f64,
    core_boost: f64,
) -> f64 {
    let base = (f64::from(i) * LUMA_INDEX_SCALE + state.v).sin().abs()
        * (f64::from(j) * LUMA_INDEX_SCALE + state.u).cos().abs();
    let core_intensity = state.u.abs() + state.v.abs() + state.x.abs();
    if core_intensity > CORE_INTENSITY_THRESHOLD {
        (base * core_boost * hdr_boost).min(1.0)
    } else {
        base * hdr_boost * AMBIENT_DIMMING
    }
}

/// Shade one in-bounds iteration into final BGR channel values.
#[inline]
pub(crate) fn shade(params: &FrameParams, state: &DynamicalState, i: u32, j: u32) -> [u16; 3] {
    let [r, g, b] = synthesize_color(&params.color, i, j, params.frame);
    let luma = luminance(state, i, j, params.hdr_boost, params.core_boost);
    [
        params.tone.quantize(b * luma),
        params.tone.quantize(g * luma),
        params.tone.quantize(r * luma),
    ]
}

/// Render one frame of the spiral animation.
///
/// Pure and deterministic: the output depends only on `params` and `state`.
/// Runs the recurrence, projection, color, luminance, and tone-map stages
/// n² times in row-major (i outer, j inner) order. State advances every inner
/// iteration and is never reset by `j`; distinct `j` values at the same `i`
/// observe a continuously evolving state. `grid = 0` degrades to an all-zero
/// buffer with the state returned unchanged.
///
/// # Errors
///
/// Returns a validation error when the canvas has a zero dimension. Nothing
/// else is validated here; malformed configuration must be rejected upstream.
#[tracing::instrument(skip(params, state), fields(frame = params.frame, grid = params.grid))]
pub fn render_frame(params: &FrameParams, state: DynamicalState) -> SpiraluxResult<FrameOutput> {
    check_canvas(params.canvas)?;

    let mut buffer = FrameBuffer::zeroed(params.canvas, params.tone.depth());
    let mut state = state;
    let mut pixels_processed = 0u64;

    for i in 0..params.grid {
        for j in 0..params.grid {
            let (u_scaled, v_scaled) = advance_state(
                &mut state,
                f64::from(i),
                params.angular_step,
                params.time,
                params.spiral_size_multiplier,
            );
            let Some((px, py)) = project(params.canvas, params.scale_factor, u_scaled, v_scaled)
            else {
                continue;
            };
            pixels_processed += 1;
            buffer.put_bgr(px, py, shade(params, &state, i, j));
        }
    }

    tracing::debug!(pixels_processed, "frame kernel complete");
    Ok(FrameOutput {
        buffer,
        pixels_processed,
        state,
    })
}

pub(crate) fn check_canvas(canvas: Canvas) -> SpiraluxResult<()> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SpiraluxError::validation(
            "canvas width/height must be > 0",
        ));
    }
    Ok(())
}
