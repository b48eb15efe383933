use std::f64::consts::PI;

use crate::foundation::core::{BitDepth, Canvas};
use crate::foundation::error::{SpiraluxError, SpiraluxResult};
use crate::render::kernel::ColorParams;
use crate::render::tonemap::ToneMap;

/// Video output parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct VideoConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Total frames in the animation.
    pub num_frames: u64,
    /// Playback frames per second.
    pub fps: u32,
}

/// HDR luminance parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct HdrConfig {
    /// Peak display brightness in nits (16-bit output only).
    pub max_nits: u32,
    /// Global luminance boost.
    pub hdr_boost: f64,
    /// Extra boost for bright-core regions.
    pub cosmic_core_boost: f64,
}

/// Recurrence parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct MathConfig {
    /// Grid size; each frame runs n² iterations.
    pub n: u32,
    /// The angular step is `2π / r_denominator`.
    pub r_denominator: f64,
    /// Frame time advance: `t = frame · time_speed`.
    pub time_speed: f64,
    /// Projection scale factor.
    pub scale_factor: f64,
}

/// Spiral pulse oscillation applied to the projected size per frame.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SpiralPulseConfig {
    /// Smallest size multiplier.
    pub size_min: f64,
    /// Largest size multiplier.
    pub size_max: f64,
    /// Pulse cycles per time unit.
    pub pulse_speed: f64,
}

/// Per-channel color synthesis configuration.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColorConfig {
    /// Color phase advance per frame.
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
    /// Saturation factor.
    pub saturation: f64,
}

/// Output options shared by every preset in a library file.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct OutputConfig {
    /// Write 16-bit HDR TIFF frames instead of 8-bit PNG.
    pub use_tiff_16bit: bool,
    /// Put frames in a timestamped directory.
    pub create_timestamped_folder: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_tiff_16bit: true,
            create_timestamped_folder: true,
        }
    }
}

impl OutputConfig {
    /// Channel depth implied by these options.
    pub fn depth(&self) -> BitDepth {
        if self.use_tiff_16bit {
            BitDepth::Sixteen
        } else {
            BitDepth::Eight
        }
    }
}

/// One named animation preset.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Preset {
    /// Human-readable description shown by the preset listing.
    pub description: String,
    /// Video output parameters.
    pub video: VideoConfig,
    /// HDR luminance parameters.
    pub hdr: HdrConfig,
    /// Recurrence parameters.
    pub mathematical: MathConfig,
    /// Spiral pulse oscillation.
    pub spiral_pulse: SpiralPulseConfig,
    /// Color synthesis configuration.
    pub colors: ColorConfig,
}

impl Preset {
    /// Validate every section. Called before any frame is rendered; the
    /// kernel assumes well-formed values.
    pub fn validate(&self) -> SpiraluxResult<()> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err(SpiraluxError::validation(
                "video width/height must be > 0",
            ));
        }
        if self.video.num_frames == 0 {
            return Err(SpiraluxError::validation("video num_frames must be > 0"));
        }
        if self.video.fps == 0 {
            return Err(SpiraluxError::validation("video fps must be > 0"));
        }

        if self.hdr.max_nits == 0 {
            return Err(SpiraluxError::validation("hdr max_nits must be > 0"));
        }
        for (name, v) in [
            ("hdr_boost", self.hdr.hdr_boost),
            ("cosmic_core_boost", self.hdr.cosmic_core_boost),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SpiraluxError::validation(format!(
                    "hdr {name} must be finite and > 0"
                )));
            }
        }

        if !self.mathematical.r_denominator.is_finite() || self.mathematical.r_denominator <= 0.0 {
            return Err(SpiraluxError::validation(
                "mathematical r_denominator must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("time_speed", self.mathematical.time_speed),
            ("scale_factor", self.mathematical.scale_factor),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SpiraluxError::validation(format!(
                    "mathematical {name} must be finite and >= 0"
                )));
            }
        }

        if !self.spiral_pulse.size_min.is_finite()
            || !self.spiral_pulse.size_max.is_finite()
            || !self.spiral_pulse.pulse_speed.is_finite()
        {
            return Err(SpiraluxError::validation(
                "spiral_pulse values must be finite",
            ));
        }
        if self.spiral_pulse.size_min > self.spiral_pulse.size_max {
            return Err(SpiraluxError::validation(
                "spiral_pulse size_min must be <= size_max",
            ));
        }

        let c = &self.colors;
        for (name, v) in [
            ("speed", c.speed),
            ("red_base", c.red_base),
            ("red_variation", c.red_variation),
            ("green_base", c.green_base),
            ("green_variation", c.green_variation),
            ("blue_base", c.blue_base),
            ("blue_variation", c.blue_variation),
        ] {
            if !v.is_finite() {
                return Err(SpiraluxError::validation(format!(
                    "colors {name} must be finite"
                )));
            }
        }
        if !c.saturation.is_finite() || c.saturation <= 0.0 {
            return Err(SpiraluxError::validation(
                "colors saturation must be finite and > 0",
            ));
        }

        Ok(())
    }

    /// Canvas dimensions for this preset.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.video.width,
            height: self.video.height,
        }
    }

    /// Angular step `r = 2π / r_denominator`.
    pub fn angular_step(&self) -> f64 {
        2.0 * PI / self.mathematical.r_denominator
    }

    /// Tone-map strategy for the given output depth.
    pub fn tone_map(&self, depth: BitDepth) -> ToneMap {
        match depth {
            BitDepth::Eight => ToneMap::Linear8,
            BitDepth::Sixteen => ToneMap::Pq16 {
                max_nits: self.hdr.max_nits,
            },
        }
    }

    /// Kernel color parameters for this preset.
    pub fn color_params(&self) -> ColorParams {
        ColorParams {
            speed: self.colors.speed,
            red_base: self.colors.red_base,
            red_variation: self.colors.red_variation,
            green_base: self.colors.green_base,
            green_variation: self.colors.green_variation,
            blue_base: self.colors.blue_base,
            blue_variation: self.colors.blue_variation,
            saturation: self.colors.saturation,
        }
    }
}
