use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{BitDepth, FrameIndex};
use crate::foundation::error::{SpiraluxError, SpiraluxResult};
use crate::render::buffer::{FrameBuffer, PixelData};

/// Naming scheme for a frame output directory and the matching video tag.
#[derive(Clone, Debug)]
pub struct FrameDirLayout {
    root: PathBuf,
    preset_name: String,
    timestamp: Option<u64>,
}

impl FrameDirLayout {
    /// Layout under `root` for `preset_name`, stamped with the current Unix
    /// time when `timestamped` is set.
    pub fn new(root: impl Into<PathBuf>, preset_name: impl Into<String>, timestamped: bool) -> Self {
        let timestamp = timestamped.then(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        Self {
            root: root.into(),
            preset_name: preset_name.into(),
            timestamp,
        }
    }

    /// The frame directory: `frames_<preset>[_<timestamp>]`.
    pub fn dir(&self) -> PathBuf {
        let name = match self.timestamp {
            Some(ts) => format!("frames_{}_{ts}", self.preset_name),
            None => format!("frames_{}", self.preset_name),
        };
        self.root.join(name)
    }

    /// Tag used in the encoded video filename.
    pub fn tag(&self) -> String {
        match self.timestamp {
            Some(ts) => format!("{}_{ts}", self.preset_name),
            None => format!("{}_output", self.preset_name),
        }
    }
}

/// File name of frame `idx` at `depth`: `frame_%04d.png` or `frame_%04d.tiff`.
pub fn frame_file_name(idx: FrameIndex, depth: BitDepth) -> String {
    format!("frame_{:04}.{}", idx.0, frame_extension(depth))
}

/// File extension used for frames at `depth`.
pub fn frame_extension(depth: BitDepth) -> &'static str {
    match depth {
        BitDepth::Eight => "png",
        BitDepth::Sixteen => "tiff",
    }
}

/// Sink writing numbered image files into one directory.
///
/// 8-bit frames become PNG, 16-bit frames become TIFF. Buffers arrive in BGR
/// channel order and are swapped to RGB at this boundary; the kernel never
/// learns about encoder conventions.
#[derive(Debug)]
pub struct FrameFileSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FrameFileSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            last_idx: None,
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn frame_path(&self, idx: FrameIndex, depth: BitDepth) -> PathBuf {
        self.dir.join(frame_file_name(idx, depth))
    }
}

impl FrameSink for FrameFileSink {
    fn begin(&mut self, cfg: SinkConfig) -> SpiraluxResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SpiraluxError::encode(format!(
                "failed to create frame directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> SpiraluxResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| SpiraluxError::encode("push_frame before begin"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(SpiraluxError::encode(format!(
                "frames must be pushed in strictly increasing order (got {} after {})",
                idx.0, last.0
            )));
        }
        if frame.canvas() != cfg.canvas || frame.depth() != cfg.depth {
            return Err(SpiraluxError::encode(
                "frame dimensions/depth do not match sink configuration",
            ));
        }

        write_image(frame, &self.frame_path(idx, cfg.depth))?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SpiraluxResult<()> {
        Ok(())
    }
}

/// Encode one frame to `path` (PNG for 8-bit buffers, TIFF for 16-bit),
/// swapping BGR to RGB on the way out.
pub fn write_image(frame: &FrameBuffer, path: &Path) -> SpiraluxResult<()> {
    let canvas = frame.canvas();
    match frame.data() {
        PixelData::U8(bgr) => {
            let img = image::RgbImage::from_raw(canvas.width, canvas.height, bgr_to_rgb_u8(bgr))
                .ok_or_else(|| SpiraluxError::encode("frame buffer size mismatch"))?;
            image::DynamicImage::ImageRgb8(img)
                .save_with_format(path, image::ImageFormat::Png)
                .map_err(|e| {
                    SpiraluxError::encode(format!("failed to write frame '{}': {e}", path.display()))
                })
        }
        PixelData::U16(bgr) => {
            let img = image::ImageBuffer::<image::Rgb<u16>, Vec<u16>>::from_raw(
                canvas.width,
                canvas.height,
                bgr_to_rgb_u16(bgr),
            )
            .ok_or_else(|| SpiraluxError::encode("frame buffer size mismatch"))?;
            image::DynamicImage::ImageRgb16(img)
                .save_with_format(path, image::ImageFormat::Tiff)
                .map_err(|e| {
                    SpiraluxError::encode(format!("failed to write frame '{}': {e}", path.display()))
                })
        }
    }
}

fn bgr_to_rgb_u8(bgr: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    rgb
}

fn bgr_to_rgb_u16(bgr: &[u16]) -> Vec<u16> {
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names_follow_the_preset() {
        let fixed = FrameDirLayout {
            root: PathBuf::from("/out"),
            preset_name: "deep_space".to_owned(),
            timestamp: Some(1_700_000_000),
        };
        assert_eq!(
            fixed.dir(),
            PathBuf::from("/out/frames_deep_space_1700000000")
        );
        assert_eq!(fixed.tag(), "deep_space_1700000000");

        let plain = FrameDirLayout::new("/out", "deep_space", false);
        assert_eq!(plain.dir(), PathBuf::from("/out/frames_deep_space"));
        assert_eq!(plain.tag(), "deep_space_output");
    }

    #[test]
    fn frame_file_names_by_depth() {
        assert_eq!(frame_file_name(FrameIndex(7), BitDepth::Eight), "frame_0007.png");
        assert_eq!(
            frame_file_name(FrameIndex(12), BitDepth::Sixteen),
            "frame_0012.tiff"
        );
    }

    #[test]
    fn bgr_swaps_to_rgb() {
        assert_eq!(bgr_to_rgb_u8(&[1, 2, 3, 4, 5, 6]), vec![3, 2, 1, 6, 5, 4]);
        assert_eq!(bgr_to_rgb_u16(&[10, 20, 30]), vec![30, 20, 10]);
    }
}
