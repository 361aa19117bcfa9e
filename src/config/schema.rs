//! YAML parameter file schema and loader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::error::{ConfigError, Result};

/// Contents of the tuning parameter file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuneParams {
    /// Hyperparameter name -> sampling descriptor.
    pub search_space: BTreeMap<String, SamplingSpec>,
    /// Known-good assignments to enqueue before sampler proposals.
    #[serde(default)]
    pub default_assignments: Vec<BTreeMap<String, ParamLiteral>>,
}

/// Raw sampling descriptor for one hyperparameter.
///
/// The `sampling_type` tag deliberately stays a plain string at the parse
/// boundary: an unrecognized kind must surface as a configuration error
/// naming the hyperparameter when the descriptor is first turned into a
/// domain, not as a YAML parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingSpec {
    pub sampling_type: String,
    /// Enumerated choices (categorical kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Lower bound (numeric kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound (numeric kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl SamplingSpec {
    /// Categorical descriptor over the given choices
    pub fn categorical<S: Into<String>>(choices: Vec<S>) -> Self {
        Self {
            sampling_type: "categorical".to_string(),
            choices: Some(choices.into_iter().map(Into::into).collect()),
            min: None,
            max: None,
        }
    }

    /// Numeric descriptor of the given kind over [min, max]
    pub fn numeric<S: Into<String>>(sampling_type: S, min: f64, max: f64) -> Self {
        Self {
            sampling_type: sampling_type.into(),
            choices: None,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// A literal value appearing in a default assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamLiteral {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Load tuning parameters from a YAML file.
///
/// A missing file is reported as [`ConfigError::NotFound`], malformed
/// content as [`ConfigError::Parse`]. No side effects beyond reading.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<TuneParams> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(serde_yaml::from_str(&text)?)
}
