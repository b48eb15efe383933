use xxhash_rust::xxh3::Xxh3;

use crate::render::buffer::PixelData;
use crate::render::kernel::FrameOutput;

/// 128-bit content fingerprint of a rendered frame.
///
/// Covers the buffer bytes, dimensions, depth, in-bounds pixel count, and the
/// final recurrence state, so two frames fingerprint equal exactly when a
/// downstream consumer could not tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits of the xxh3-128 digest.
    pub hi: u64,
    /// Low 64 bits of the xxh3-128 digest.
    pub lo: u64,
}

/// Fingerprint one frame output.
pub fn fingerprint_frame(out: &FrameOutput) -> FrameFingerprint {
    let mut h = Xxh3::new();
    let canvas = out.buffer.canvas();
    h.update(&canvas.width.to_le_bytes());
    h.update(&canvas.height.to_le_bytes());
    match out.buffer.data() {
        PixelData::U8(d) => {
            h.update(&[8]);
            h.update(d);
        }
        PixelData::U16(d) => {
            h.update(&[16]);
            for v in d {
                h.update(&v.to_le_bytes());
            }
        }
    }
    h.update(&out.pixels_processed.to_le_bytes());
    h.update(&out.state.x.to_bits().to_le_bytes());
    h.update(&out.state.u.to_bits().to_le_bytes());
    h.update(&out.state.v.to_bits().to_le_bytes());

    let digest = h.digest128();
    FrameFingerprint {
        hi: (digest >> 64) as u64,
        lo: digest as u64,
    }
}
