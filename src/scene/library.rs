use std::collections::BTreeMap;
use std::path::Path;

use crate::foundation::error::{SpiraluxError, SpiraluxResult};
use crate::scene::preset::{
    ColorConfig, HdrConfig, MathConfig, OutputConfig, Preset, SpiralPulseConfig, VideoConfig,
};

/// A named collection of presets plus the shared output options.
///
/// Mirrors the on-disk JSON shape:
///
/// ```json
/// {
///   "presets": { "deep_space": { "description": "...", "video": { ... }, ... } },
///   "output": { "use_tiff_16bit": true, "create_timestamped_folder": true }
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PresetLibrary {
    /// Presets keyed by name (stable iteration order).
    pub presets: BTreeMap<String, Preset>,
    /// Output options shared by every preset.
    #[serde(default)]
    pub output: OutputConfig,
}

impl PresetLibrary {
    /// Load and validate a preset library from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SpiraluxResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read_to_string(path).map_err(|e| {
            SpiraluxError::validation(format!(
                "failed to read preset file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&bytes)
    }

    /// Parse and validate a preset library from a JSON string.
    pub fn from_json_str(json: &str) -> SpiraluxResult<Self> {
        let lib: Self = serde_json::from_str(json)
            .map_err(|e| SpiraluxError::validation(format!("invalid preset JSON: {e}")))?;
        for (name, preset) in &lib.presets {
            preset
                .validate()
                .map_err(|e| SpiraluxError::validation(format!("preset '{name}': {e}")))?;
        }
        Ok(lib)
    }

    /// Fetch a preset by name.
    pub fn get(&self, name: &str) -> SpiraluxResult<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| SpiraluxError::validation(format!("preset '{name}' not found")))
    }

    /// Preset names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// The built-in reference library: one preset tuned for a 1000-nit HDR
    /// target, usable without any preset file.
    pub fn builtin() -> Self {
        let deep_space = Preset {
            description: "Slow-pulsing wide-gamut spiral against deep space".to_owned(),
            video: VideoConfig {
                width: 1920,
                height: 1080,
                num_frames: 300,
                fps: 30,
            },
            hdr: HdrConfig {
                max_nits: 1_000,
                hdr_boost: 2.0,
                cosmic_core_boost: 3.0,
            },
            mathematical: MathConfig {
                n: 600,
                r_denominator: 137.5,
                time_speed: 0.01,
                scale_factor: 220.0,
            },
            spiral_pulse: SpiralPulseConfig {
                size_min: 0.85,
                size_max: 1.25,
                pulse_speed: 0.2,
            },
            colors: ColorConfig {
                speed: 2.0,
                red_base: 0.6,
                red_variation: 0.4,
                green_base: 0.5,
                green_variation: 0.5,
                blue_base: 0.7,
                blue_variation: 0.3,
                saturation: 1.3,
            },
        };

        let mut presets = BTreeMap::new();
        presets.insert("deep_space".to_owned(), deep_space);
        Self {
            presets,
            output: OutputConfig::default(),
        }
    }
}
