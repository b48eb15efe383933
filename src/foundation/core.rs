use crate::foundation::error::{SpiraluxError, SpiraluxResult};

/// Absolute 0-based frame index in animation timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SpiraluxResult<Self> {
        if den == 0 {
            return Err(SpiraluxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SpiraluxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Total pixel count.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Channel bit depth of rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BitDepth {
    /// 8 bits per channel (standard dynamic range).
    Eight,
    /// 16 bits per channel (HDR).
    Sixteen,
}

impl BitDepth {
    /// Maximum representable channel value at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            BitDepth::Eight => 255,
            BitDepth::Sixteen => 65_535,
        }
    }
}

/// The carried recurrence state `(x, u, v)`.
///
/// Owned by the animation driver and threaded frame-to-frame: a frame's final
/// state becomes the next frame's initial state. Within a frame it advances
/// once per inner iteration, so n² times per frame, not n. Losing or reordering
/// it desynchronizes the whole recurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DynamicalState {
    /// Phase accumulator fed back into both trigonometric terms.
    pub x: f64,
    /// Horizontal recurrence output of the previous iteration.
    pub u: f64,
    /// Vertical recurrence output of the previous iteration.
    pub v: f64,
}

impl DynamicalState {
    /// The animation starting state `(0, 0, 0)`.
    pub fn origin() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rejects_zero_terms() {
        assert!(Fps::new(30, 0).is_err());
        assert!(Fps::new(0, 1).is_err());
        assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
    }

    #[test]
    fn bit_depth_max_values() {
        assert_eq!(BitDepth::Eight.max_value(), 255);
        assert_eq!(BitDepth::Sixteen.max_value(), 65_535);
    }

    #[test]
    fn origin_state_is_zero() {
        let s = DynamicalState::origin();
        assert_eq!((s.x, s.u, s.v), (0.0, 0.0, 0.0));
    }
}
