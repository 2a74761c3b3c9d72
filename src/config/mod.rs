use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::format::DEFAULT_SIG_FIGS;
use crate::model::DEFAULT_SAMPLES;
use crate::params::{FieldId, UpdateMode};

pub mod error;
pub use error::ConfigError;

pub const MAX_SAMPLES: usize = 10_000;
pub const MAX_SIG_FIGS: usize = 15;

/// One scripted edit, replayed through the session as if typed by the user.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParameterEvent {
    pub field: FieldId,
    pub raw: String,
    #[serde(default)]
    pub mode: UpdateMode,
}

impl ParameterEvent {
    /// Parses `field=value` into a committed edit.
    pub fn from_assignment(text: &str) -> Result<Self, ConfigError> {
        let (field, raw) = text
            .split_once('=')
            .ok_or_else(|| ConfigError::Assignment(text.to_string()))?;

        Ok(ParameterEvent {
            field: field.parse()?,
            raw: raw.to_string(),
            mode: UpdateMode::Commit,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    samples: usize,
    significant_figures: usize,
    events: Vec<ParameterEvent>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            significant_figures: DEFAULT_SIG_FIGS,
            events: Vec::new(),
        }
    }
}

fn validate_samples(samples: usize) -> Result<usize, ConfigError> {
    if !(1..=MAX_SAMPLES).contains(&samples) {
        return Err(ConfigError::Samples {
            got: samples,
            max: MAX_SAMPLES,
        });
    }
    Ok(samples)
}

fn validate_sig_figs(sig: usize) -> Result<usize, ConfigError> {
    if !(1..=MAX_SIG_FIGS).contains(&sig) {
        return Err(ConfigError::SignificantFigures {
            got: sig,
            max: MAX_SIG_FIGS,
        });
    }
    Ok(sig)
}

// Deserializes through a helper so that the curve resolution and the number of
// significant figures are range-checked before a Config exists.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            samples: Option<usize>,
            significant_figures: Option<usize>,
            #[serde(default)]
            events: Vec<ParameterEvent>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let samples = validate_samples(helper.samples.unwrap_or(DEFAULT_SAMPLES))
            .map_err(D::Error::custom)?;

        let significant_figures =
            validate_sig_figs(helper.significant_figures.unwrap_or(DEFAULT_SIG_FIGS))
                .map_err(D::Error::custom)?;

        Ok(Config {
            samples,
            significant_figures,
            events: helper.events,
        })
    }
}

impl Config {
    pub fn new(samples: usize, significant_figures: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            samples: validate_samples(samples)?,
            significant_figures: validate_sig_figs(significant_figures)?,
            events: Vec::new(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn significant_figures(&self) -> usize {
        self.significant_figures
    }

    pub fn events(&self) -> &[ParameterEvent] {
        &self.events
    }

    pub fn set_samples(&mut self, samples: usize) -> Result<(), ConfigError> {
        self.samples = validate_samples(samples)?;
        Ok(())
    }

    pub fn set_significant_figures(&mut self, sig: usize) -> Result<(), ConfigError> {
        self.significant_figures = validate_sig_figs(sig)?;
        Ok(())
    }

    /// Appends edits replayed after the ones from the file.
    pub fn push_event(&mut self, event: ParameterEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "samples": 640,
        "significant_figures": 4,
        "events": [
            { "field": "concentration", "raw": "75", "mode": "commit" },
            { "field": "quantumYield", "raw": "0.3", "mode": "preview" },
            { "field": "mol_weight", "raw": "250" }
        ]
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        let config = Config::from_file(file_path).unwrap();

        assert_eq!(config.samples(), 640);
        assert_eq!(config.significant_figures(), 4);
        assert_eq!(config.events().len(), 3);
        assert_eq!(config.events()[1].field, FieldId::QuantumYield);
        assert_eq!(config.events()[1].mode, UpdateMode::Preview);
        assert_eq!(config.events()[2].mode, UpdateMode::Commit);
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_out_of_range_samples() {
        let err = serde_json::from_str::<Config>(r#"{ "samples": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("samples should be between 1 and 10000"));

        assert!(Config::new(MAX_SAMPLES + 1, 3).is_err());
        assert!(Config::new(100, 0).is_err());
    }

    #[test]
    fn test_rejects_unknown_field() {
        let data = r#"{ "events": [ { "field": "thickness", "raw": "1" } ] }"#;
        assert!(serde_json::from_str::<Config>(data).is_err());
    }

    #[test]
    fn test_field_names_match_assignment_parsing() {
        let data = r#"{ "events": [ { "field": "MolWeight", "raw": "250" } ] }"#;
        let config: Config = serde_json::from_str(data).unwrap();
        let assigned = ParameterEvent::from_assignment("MolWeight=250").unwrap();
        assert_eq!(config.events()[0].field, assigned.field);
        assert_eq!(assigned.field, FieldId::MolWeight);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::from_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_event_from_assignment() {
        let event = ParameterEvent::from_assignment("depth=1200").unwrap();
        assert_eq!(event.field, FieldId::Depth);
        assert_eq!(event.raw, "1200");
        assert_eq!(event.mode, UpdateMode::Commit);

        assert!(matches!(
            ParameterEvent::from_assignment("depth"),
            Err(ConfigError::Assignment(_))
        ));
        assert!(matches!(
            ParameterEvent::from_assignment("thickness=3"),
            Err(ConfigError::Field(_))
        ));
    }
}
