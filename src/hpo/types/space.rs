//! Hyperparameter search space

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ParamLiteral, SamplingSpec};
use crate::hpo::error::{HpoError, Result};

use super::parameter::{ParamDomain, ParamValue};

/// One concrete sampled hyperparameter set.
pub type Assignment = BTreeMap<String, ParamValue>;

/// Declarative search space: hyperparameter name -> domain.
///
/// Ordered storage on purpose: iteration order feeds a seeded RNG, so it
/// must be stable for run-to-run determinism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    params: BTreeMap<String, ParamDomain>,
}

impl SearchSpace {
    /// Create an empty search space
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a space from raw sampling descriptors.
    ///
    /// This is the dispatch table over the closed set of sampling kinds:
    /// `categorical`, `int`, `float`, `log_float`. An unrecognized kind is
    /// rejected here, before any sampling occurs, naming the offending
    /// hyperparameter and kind.
    pub fn from_specs(specs: &BTreeMap<String, SamplingSpec>) -> Result<Self> {
        let mut space = SearchSpace::new();
        for (name, spec) in specs {
            let domain = match spec.sampling_type.as_str() {
                "categorical" => {
                    let choices = spec.choices.clone().ok_or_else(|| {
                        invalid(name, "categorical descriptor requires `choices`")
                    })?;
                    if choices.is_empty() {
                        return Err(invalid(name, "`choices` must be non-empty"));
                    }
                    ParamDomain::Categorical { choices }
                }
                "int" => {
                    let (low, high) = bounds(name, spec)?;
                    if low.fract() != 0.0 || high.fract() != 0.0 {
                        return Err(invalid(name, "int bounds must be whole numbers"));
                    }
                    ParamDomain::Int {
                        low: low as i64,
                        high: high as i64,
                    }
                }
                "float" => {
                    let (low, high) = bounds(name, spec)?;
                    ParamDomain::Float {
                        low,
                        high,
                        log_scale: false,
                    }
                }
                "log_float" => {
                    let (low, high) = bounds(name, spec)?;
                    if low <= 0.0 {
                        return Err(invalid(name, "log_float requires min > 0"));
                    }
                    ParamDomain::Float {
                        low,
                        high,
                        log_scale: true,
                    }
                }
                other => {
                    return Err(HpoError::UnknownSamplingType {
                        param: name.clone(),
                        sampling_type: other.to_string(),
                    })
                }
            };
            space.add(name, domain);
        }
        Ok(space)
    }

    /// Add a parameter to the search space
    pub fn add(&mut self, name: &str, domain: ParamDomain) {
        self.params.insert(name.to_string(), domain);
    }

    /// Get a parameter domain
    pub fn get(&self, name: &str) -> Option<&ParamDomain> {
        self.params.get(name)
    }

    /// Check if space is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterate over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamDomain)> {
        self.params.iter()
    }

    /// Sample a full random assignment
    pub fn sample_random<R: Rng>(&self, rng: &mut R) -> Assignment {
        self.params
            .iter()
            .map(|(name, domain)| (name.clone(), domain.sample(rng)))
            .collect()
    }

    /// Validate a full assignment against the space
    pub fn validate(&self, assignment: &Assignment) -> Result<()> {
        for (name, domain) in &self.params {
            match assignment.get(name) {
                Some(value) if domain.contains(value) => {}
                Some(value) => {
                    return Err(HpoError::InvalidValue(name.clone(), format!("{value:?}")))
                }
                None => return Err(HpoError::ParamNotFound(name.clone())),
            }
        }
        Ok(())
    }

    /// Convert the literals of one default assignment into typed values.
    ///
    /// The assignment may be partial (a subset of the space); each given
    /// value is coerced to its domain's value kind and checked against the
    /// domain bounds. Keys outside the space are rejected.
    pub fn assignment_from_literals(
        &self,
        literals: &BTreeMap<String, ParamLiteral>,
    ) -> Result<Assignment> {
        let mut assignment = Assignment::new();
        for (name, literal) in literals {
            let domain = self
                .params
                .get(name)
                .ok_or_else(|| HpoError::UnknownHyperparameter(name.clone()))?;
            let value = match (domain, literal) {
                (ParamDomain::Int { .. }, ParamLiteral::Int(v)) => ParamValue::Int(*v),
                (ParamDomain::Float { .. }, ParamLiteral::Float(v)) => ParamValue::Float(*v),
                (ParamDomain::Float { .. }, ParamLiteral::Int(v)) => ParamValue::Float(*v as f64),
                (ParamDomain::Categorical { .. }, ParamLiteral::Str(s)) => {
                    ParamValue::Categorical(s.clone())
                }
                (_, literal) => {
                    return Err(HpoError::InvalidValue(name.clone(), format!("{literal:?}")))
                }
            };
            if !domain.contains(&value) {
                return Err(HpoError::InvalidValue(name.clone(), format!("{value:?}")));
            }
            assignment.insert(name.clone(), value);
        }
        Ok(assignment)
    }
}

fn invalid(name: &str, reason: &str) -> HpoError {
    HpoError::InvalidDescriptor {
        param: name.to_string(),
        reason: reason.to_string(),
    }
}

fn bounds(name: &str, spec: &SamplingSpec) -> Result<(f64, f64)> {
    let low = spec
        .min
        .ok_or_else(|| invalid(name, "numeric descriptor requires `min`"))?;
    let high = spec
        .max
        .ok_or_else(|| invalid(name, "numeric descriptor requires `max`"))?;
    if low > high {
        return Err(invalid(name, "`min` must not exceed `max`"));
    }
    Ok((low, high))
}
