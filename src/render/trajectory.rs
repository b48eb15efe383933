//! Two-phase parallel shading.
//!
//! The recurrence is inherently sequential: state mutates every iteration and
//! is consumed by the next, so the n² loop itself cannot fan out. What can is
//! the shading stage: once the full state trajectory is materialized, every
//! iteration's color, luminance, and quantization depend only on its own
//! snapshot. This module runs phase one (state materialization) serially,
//! phase two (shading) across rayon, and replays the pixel writes in
//! iteration order so collisions stay last-write-wins. Output is
//! byte-identical to [`render_frame`].

use rayon::prelude::*;

use crate::foundation::core::DynamicalState;
use crate::foundation::error::SpiraluxResult;
use crate::render::buffer::FrameBuffer;
use crate::render::kernel::{
    FrameOutput, FrameParams, advance_state, check_canvas, project, render_frame, shade,
};

/// One iteration's inputs to the shading stage.
#[derive(Clone, Copy, Debug)]
struct IterationSnapshot {
    u_scaled: f64,
    v_scaled: f64,
    state: DynamicalState,
}

/// Render one frame with the shading stage fanned out across rayon.
///
/// Materializes all n² state snapshots first (about 40 bytes per iteration),
/// so memory grows with n². For small grids the sequential [`render_frame`]
/// is usually faster; this path pays off when color/luminance/tone-map work
/// dominates.
///
/// # Errors
///
/// Same preconditions as [`render_frame`].
#[tracing::instrument(skip(params, state), fields(frame = params.frame, grid = params.grid))]
pub fn render_frame_parallel(
    params: &FrameParams,
    state: DynamicalState,
) -> SpiraluxResult<FrameOutput> {
    check_canvas(params.canvas)?;

    let n = params.grid as usize;
    if n == 0 {
        return render_frame(params, state);
    }

    let mut snapshots = Vec::with_capacity(n * n);
    let mut state = state;
    for i in 0..params.grid {
        for _j in 0..params.grid {
            let (u_scaled, v_scaled) = advance_state(
                &mut state,
                f64::from(i),
                params.angular_step,
                params.time,
                params.spiral_size_multiplier,
            );
            snapshots.push(IterationSnapshot {
                u_scaled,
                v_scaled,
                state,
            });
        }
    }

    let shaded: Vec<Option<(u32, u32, [u16; 3])>> = snapshots
        .par_iter()
        .enumerate()
        .map(|(idx, snap)| {
            let i = (idx / n) as u32;
            let j = (idx % n) as u32;
            let (px, py) =
                project(params.canvas, params.scale_factor, snap.u_scaled, snap.v_scaled)?;
            Some((px, py, shade(params, &snap.state, i, j)))
        })
        .collect();

    // Serial replay keeps collision order identical to the sequential kernel.
    let mut buffer = FrameBuffer::zeroed(params.canvas, params.tone.depth());
    let mut pixels_processed = 0u64;
    for entry in shaded.into_iter().flatten() {
        let (px, py, bgr) = entry;
        pixels_processed += 1;
        buffer.put_bgr(px, py, bgr);
    }

    tracing::debug!(pixels_processed, "parallel shading complete");
    Ok(FrameOutput {
        buffer,
        pixels_processed,
        state,
    })
}
