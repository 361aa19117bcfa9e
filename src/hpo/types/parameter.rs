//! Parameter value and domain types

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter value (sampled from a domain)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Categorical(String),
}

impl ParamValue {
    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Categorical(_) => None,
        }
    }

    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(_) | ParamValue::Categorical(_) => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Categorical(s) => f.write_str(s),
        }
    }
}

/// Parameter domain (one entry of the search space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamDomain {
    /// Categorical choices
    Categorical { choices: Vec<String> },
    /// Integer range [low, high], bounds inclusive
    Int { low: i64, high: i64 },
    /// Float range [low, high], optionally log-scaled
    Float { low: f64, high: f64, log_scale: bool },
}

impl ParamDomain {
    /// Sample a random value from this domain
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match self {
            ParamDomain::Categorical { choices } => {
                let idx = (rng.random::<f64>() * choices.len() as f64).floor() as usize;
                let idx = idx.min(choices.len() - 1);
                ParamValue::Categorical(choices[idx].clone())
            }
            ParamDomain::Int { low, high } => {
                let range = (*high - *low + 1) as f64;
                let offset = (rng.random::<f64>() * range).floor() as i64;
                ParamValue::Int((*low + offset).min(*high))
            }
            ParamDomain::Float {
                low,
                high,
                log_scale,
            } => {
                let value = if *log_scale {
                    let log_low = low.ln();
                    let log_high = high.ln();
                    let log_val = log_low + rng.random::<f64>() * (log_high - log_low);
                    log_val.exp()
                } else {
                    low + rng.random::<f64>() * (high - low)
                };
                ParamValue::Float(value)
            }
        }
    }

    /// Check if a value lies in this domain
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParamDomain::Categorical { choices }, ParamValue::Categorical(s)) => {
                choices.contains(s)
            }
            (ParamDomain::Int { low, high }, ParamValue::Int(v)) => *v >= *low && *v <= *high,
            (ParamDomain::Float { low, high, .. }, ParamValue::Float(v)) => {
                *v >= *low && *v <= *high
            }
            _ => false,
        }
    }
}
