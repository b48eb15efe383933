//! HDR encoder-command construction.
//!
//! The renderer writes numbered frame files; turning them into an HDR video
//! is `ffmpeg`'s job. This module only builds the invocation; it never runs
//! it. It targets the system binary rather than FFmpeg bindings to avoid native
//! dev header/lib requirements.

use std::path::{Path, PathBuf};

use crate::foundation::core::BitDepth;
use crate::foundation::error::{SpiraluxError, SpiraluxResult};

/// x265 parameter string carrying the HDR10 metadata flags.
const X265_HDR_PARAMS: &str =
    "hdr-opt=1:repeat-headers=1:colorprim=bt2020:transfer=smpte2084:colormatrix=bt2020nc";

/// Configuration for the HDR x265 encoder invocation.
#[derive(Clone, Debug)]
pub struct HdrEncodeConfig {
    /// Input frame rate.
    pub fps: u32,
    /// Directory holding the numbered frame files.
    pub frames_dir: PathBuf,
    /// Depth of the frame files (selects the input extension).
    pub depth: BitDepth,
    /// Output MP4 path.
    pub out_path: PathBuf,
}

impl HdrEncodeConfig {
    /// Build a config whose output name embeds the run tag:
    /// `hdr_animation_<tag>.mp4` next to `frames_dir`.
    pub fn for_run(fps: u32, frames_dir: impl Into<PathBuf>, depth: BitDepth, tag: &str) -> Self {
        let frames_dir = frames_dir.into();
        let out_path = frames_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("hdr_animation_{tag}.mp4"));
        Self {
            fps,
            frames_dir,
            depth,
            out_path,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SpiraluxResult<()> {
        if self.fps == 0 {
            return Err(SpiraluxError::validation("encode fps must be non-zero"));
        }
        Ok(())
    }

    /// The full argument vector, `ffmpeg` included.
    pub fn command_args(&self) -> Vec<String> {
        let ext = crate::encode::frames::frame_extension(self.depth);
        let input = self.frames_dir.join(format!("frame_%04d.{ext}"));
        vec![
            "ffmpeg".to_owned(),
            "-r".to_owned(),
            self.fps.to_string(),
            "-i".to_owned(),
            input.display().to_string(),
            "-c:v".to_owned(),
            "libx265".to_owned(),
            "-pix_fmt".to_owned(),
            "yuv420p10le".to_owned(),
            "-color_primaries".to_owned(),
            "bt2020".to_owned(),
            "-color_trc".to_owned(),
            "smpte2084".to_owned(),
            "-colorspace".to_owned(),
            "bt2020nc".to_owned(),
            "-x265-params".to_owned(),
            X265_HDR_PARAMS.to_owned(),
            self.out_path.display().to_string(),
        ]
    }

    /// A copy-pasteable shell command, wrapped for readability.
    pub fn command_line(&self) -> String {
        let ext = crate::encode::frames::frame_extension(self.depth);
        let input = self.frames_dir.join(format!("frame_%04d.{ext}"));
        [
            format!("ffmpeg -r {} -i {}", self.fps, input.display()),
            "-c:v libx265".to_owned(),
            "-pix_fmt yuv420p10le".to_owned(),
            "-color_primaries bt2020".to_owned(),
            "-color_trc smpte2084".to_owned(),
            "-colorspace bt2020nc".to_owned(),
            format!("-x265-params '{X265_HDR_PARAMS}'"),
            self.out_path.display().to_string(),
        ]
        .join(" \\\n  ")
    }
}

/// Return `true` when the system `ffmpeg` binary is runnable.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> SpiraluxResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_pins_the_hdr_flag_set() {
        let cfg = HdrEncodeConfig::for_run(
            30,
            "/out/frames_deep_space_1700000000",
            BitDepth::Sixteen,
            "deep_space_1700000000",
        );
        let args = cfg.command_args();
        let joined = args.join(" ");
        assert!(joined.contains("-r 30"));
        assert!(joined.contains("frame_%04d.tiff"));
        assert!(joined.contains("-c:v libx265"));
        assert!(joined.contains("-pix_fmt yuv420p10le"));
        assert!(joined.contains("-color_primaries bt2020"));
        assert!(joined.contains("-color_trc smpte2084"));
        assert!(joined.contains("-colorspace bt2020nc"));
        assert!(joined.contains(
            "hdr-opt=1:repeat-headers=1:colorprim=bt2020:transfer=smpte2084:colormatrix=bt2020nc"
        ));
        assert!(joined.ends_with("hdr_animation_deep_space_1700000000.mp4"));
    }

    #[test]
    fn eight_bit_runs_use_png_inputs() {
        let cfg = HdrEncodeConfig::for_run(24, "/out/frames_x", BitDepth::Eight, "x_output");
        assert!(cfg.command_line().contains("frame_%04d.png"));
    }

    #[test]
    fn zero_fps_is_rejected() {
        let mut cfg = HdrEncodeConfig::for_run(30, "/out/frames_x", BitDepth::Eight, "x");
        cfg.fps = 0;
        assert!(cfg.validate().is_err());
    }
}
