// src/config.rs
//
// Run provenance written next to every output table as config.json, and the
// demo configuration that the CLI can read back from JSON.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::cooling::CoolingCycle;
use crate::error::PhysicsError;
use crate::params::SpinParams;
use crate::phonon::{DiatomicChain, MonatomicChain};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] PhysicsError),
}

/// Inputs shared by the demos. Every section falls back to its defaults
/// when missing from the JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub spins: SpinParams,
    pub cooling: CoolingCycle,
    pub monatomic: MonatomicChain,
    pub diatomic: DiatomicChain,
}

impl DemoConfig {
    /// Parse and validate. Rejects the same values the constructors reject.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let cfg: Self = serde_json::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.spins.validate()?;
        self.cooling.validate()?;
        self.monatomic.validate()?;
        self.diatomic.validate()?;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct RunConfig {
    pub spins: Option<SpinParams>,
    pub monatomic: Option<MonatomicChain>,
    pub diatomic: Option<DiatomicChain>,
    pub sampling: SamplingConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct SamplingConfig {
    /// Field values (entropy curves) or empty.
    pub fields: Vec<f64>,
    pub x_min: f64,
    pub x_max: f64,
    pub n_samples: usize,
    pub parallel: bool,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    /// Arguments after the program name, as given.
    pub args: Vec<String>,
}

impl RunInfo {
    pub fn from_env(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
            args: std::env::args().skip(1).collect(),
        }
    }
}

impl RunConfig {
    pub fn write_to_dir(&self, out_dir: &Path) -> std::io::Result<()> {
        let path = out_dir.join("config.json");
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DemoConfig::from_json_str(r#"{ "cooling": { "b_applied": 1.5 }, "diatomic": { "m2": 2.0 } }"#)
            .unwrap();
        assert_eq!(cfg.cooling.b_applied, 1.5);
        assert_eq!(cfg.cooling.t_initial, 2.0);
        assert_eq!(cfg.diatomic.m2, 2.0);
        assert_eq!(cfg.diatomic.n_atoms, 20);
        assert_eq!(cfg.spins, SpinParams::default());
        assert_eq!(cfg.monatomic, MonatomicChain::default());
    }

    #[test]
    fn out_of_range_sections_are_rejected() {
        let err = DemoConfig::from_json_str(r#"{ "diatomic": { "m2": 0.0 } }"#).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::Invalid(PhysicsError::NonPositiveParameter { name: "m2", .. })
            ),
            "unexpected {err:?}"
        );
        for bad in [
            r#"{ "cooling": { "t_floor": -0.1 } }"#,
            r#"{ "spins": { "k_b": 0.0 } }"#,
            r#"{ "monatomic": { "spring": -1.0 } }"#,
        ] {
            assert!(
                matches!(DemoConfig::from_json_str(bad), Err(ConfigError::Invalid(_))),
                "accepted {bad}"
            );
        }
        assert!(matches!(
            DemoConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("solid_state_sim_no_such_config.json");
        assert!(matches!(DemoConfig::from_json_file(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn run_config_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("solid_state_sim_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let rc = RunConfig {
            spins: Some(SpinParams::default()),
            monatomic: None,
            diatomic: None,
            sampling: SamplingConfig {
                fields: vec![0.01, 3.0],
                x_min: 0.0,
                x_max: 3.0,
                n_samples: 10,
                parallel: false,
            },
            run: RunInfo {
                binary: "test".to_string(),
                args: vec!["n=10".to_string()],
            },
        };
        rc.write_to_dir(&dir).unwrap();

        // the spins section of a run record is a valid DemoConfig section
        let text = std::fs::read_to_string(dir.join("config.json")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["sampling"]["n_samples"], 10);
        assert_eq!(v["run"]["args"][0], "n=10");
        let spins: SpinParams = serde_json::from_value(v["spins"].clone()).unwrap();
        assert_eq!(spins, SpinParams::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
