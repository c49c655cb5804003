//! Demo settings: what a run should synthesize and where output goes.
//!
//! Settings come from three layers: demo defaults, an optional JSON or YAML
//! file, and command-line overrides. Every field is optional until
//! [`DemoSettings::resolve`] fills the gaps from a demo's defaults and
//! validates the result into core types.

use serde::{Deserialize, Serialize};
use spectra_core::{SignalConfig, SignalLength, SpectraError, SynthParams};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] yaml_serde::Error),

    #[error("unknown settings format for {0} (expected .json, .yaml or .yml)")]
    UnknownFormat(PathBuf),

    #[error("could not parse {field} from {input:?}")]
    InputParse { field: &'static str, input: String },

    #[error(transparent)]
    Core(#[from] SpectraError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Option<OutputFormat>,
    pub dir: Option<PathBuf>,
}

impl OutputSettings {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("spectra-out"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Centre frequency in Hz.
    pub f0: Option<f64>,
    pub amplitude: Option<f64>,
    /// Sampling rate in Hz.
    pub sample_rate: Option<f64>,
    pub num_samples: Option<usize>,
    pub noise_std: Option<f64>,
    pub seed: Option<u64>,
    pub output: OutputSettings,
}

/// Signal constants of one demo, used wherever settings leave a gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoDefaults {
    pub f0: f64,
    pub amplitude: f64,
    pub sample_rate: f64,
    pub num_samples: usize,
    pub noise_std: f64,
}

impl DemoSettings {
    /// Overlay every field `other` sets on top of `self`.
    pub fn merge(mut self, other: DemoSettings) -> Self {
        self.f0 = other.f0.or(self.f0);
        self.amplitude = other.amplitude.or(self.amplitude);
        self.sample_rate = other.sample_rate.or(self.sample_rate);
        self.num_samples = other.num_samples.or(self.num_samples);
        self.noise_std = other.noise_std.or(self.noise_std);
        self.seed = other.seed.or(self.seed);
        self.output.format = other.output.format.or(self.output.format);
        self.output.dir = other.output.dir.or(self.output.dir);
        self
    }

    /// Fill gaps from `defaults` and validate into core types.
    pub fn resolve(&self, defaults: &DemoDefaults) -> Result<(SignalConfig, SynthParams), SpectraError> {
        let config = SignalConfig::new(
            self.f0.unwrap_or(defaults.f0),
            self.amplitude.unwrap_or(defaults.amplitude),
        )?;
        let params = SynthParams {
            sample_rate: self.sample_rate.unwrap_or(defaults.sample_rate),
            length: SignalLength::Samples(self.num_samples.unwrap_or(defaults.num_samples)),
            noise_std: self.noise_std.unwrap_or(defaults.noise_std),
            seed: self.seed,
        };
        Ok((config, params))
    }
}

/// Load settings from a `.json`, `.yaml` or `.yml` file.
pub fn load_settings(path: &Path) -> Result<DemoSettings, SettingsError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let settings = match ext.as_deref() {
        Some("json") => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        Some("yaml") | Some("yml") => yaml_serde::from_str(&std::fs::read_to_string(path)?)?,
        _ => return Err(SettingsError::UnknownFormat(path.to_path_buf())),
    };
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse one numeric answer. Surrounding whitespace is ignored.
pub fn parse_prompt_value(field: &'static str, input: &str) -> Result<f64, SettingsError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| SettingsError::InputParse {
            field,
            input: input.trim().to_string(),
        })
}

/// Ask for centre frequency then amplitude, one line each.
///
/// The values are validated into a [`SignalConfig`]; unparsable text or
/// end of input is fatal.
pub fn prompt_signal<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> Result<SignalConfig, SettingsError> {
    let mut ask = |field: &'static str, question: &str| -> Result<f64, SettingsError> {
        write!(prompt, "{question}")?;
        prompt.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        parse_prompt_value(field, &line)
    };
    let f0 = ask("f0", "Enter centre frequency (Hz): ")?;
    let amplitude = ask("amplitude", "Enter amplitude: ")?;
    Ok(SignalConfig::new(f0, amplitude)?)
}
