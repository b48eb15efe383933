use crate::foundation::core::BitDepth;

/// Exponent of the simplified inverse-PQ curve used for 16-bit output.
///
/// Approximates perceptual-quantizer decoding; part of the output contract,
/// not a tunable.
pub(crate) const PQ_EXPONENT: f64 = 0.159;

/// Reference peak luminance the PQ curve normalizes against, in nits.
pub(crate) const PQ_REFERENCE_NITS: f64 = 10_000.0;

/// Tone-mapping strategy converting the color × luminance product into final
/// channel integers.
///
/// Both modes share the same recurrence/color/luminance pipeline; only this
/// final quantization step differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToneMap {
    /// 8-bit linear quantization. No nits normalization, no gamma curve.
    Linear8,
    /// 16-bit HDR: normalize by peak brightness, then apply the simplified
    /// inverse-PQ power curve.
    Pq16 {
        /// Peak display brightness in nits.
        max_nits: u32,
    },
}

impl ToneMap {
    /// Bit depth of buffers produced under this strategy.
    pub fn depth(self) -> BitDepth {
        match self {
            ToneMap::Linear8 => BitDepth::Eight,
            ToneMap::Pq16 { .. } => BitDepth::Sixteen,
        }
    }

    /// Quantize one `channel_final = color × luminance` value.
    ///
    /// Inputs in [0, 1] map onto the full output range; the 8-bit path clamps
    /// first so the range guarantee holds even for boost settings that push
    /// ambient luminance above 1.
    pub(crate) fn quantize(self, channel_final: f64) -> u16 {
        match self {
            ToneMap::Linear8 => (channel_final.min(1.0) * 255.0) as u16,
            ToneMap::Pq16 { max_nits } => {
                let normalized = (channel_final * f64::from(max_nits) / PQ_REFERENCE_NITS).min(1.0);
                (normalized.powf(PQ_EXPONENT) * 65_535.0) as u16
            }
        }
    }
}
