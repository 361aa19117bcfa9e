//! Gradient-boosted regressor wrapper

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;

use crate::data::Frame;
use crate::error::Result;
use crate::hpo::{Assignment, HpoError};

use super::encode::Encoder;
use super::metrics::rmse;

/// Loss functions the backend accepts for regression.
const KNOWN_LOSSES: [&str; 2] = ["SquaredError", "LAD"];

/// Hyperparameters consumed by the regressor.
#[derive(Debug, Clone, PartialEq)]
pub struct GbmParams {
    /// Upper bound on boosting iterations.
    pub max_iter: usize,
    /// Shrinkage applied to each tree's contribution.
    pub learning_rate: f64,
    /// Maximum tree depth.
    pub max_depth: u32,
    /// Minimum samples per leaf.
    pub min_leaf_size: usize,
    /// Backend loss function name.
    pub loss: String,
    /// Iterations added per early-stopping round.
    pub early_stopping_step: usize,
    /// Non-improving rounds tolerated before stopping.
    pub patience: usize,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            max_iter: 100,
            learning_rate: 0.1,
            max_depth: 6,
            min_leaf_size: 1,
            loss: "SquaredError".to_string(),
            early_stopping_step: 10,
            patience: 3,
        }
    }
}

impl GbmParams {
    /// Build params from a sampled assignment; unlisted params keep their
    /// defaults, unknown assignment keys are rejected.
    pub fn from_assignment(assignment: &Assignment) -> std::result::Result<Self, HpoError> {
        let mut params = Self::default();
        for (name, value) in assignment {
            match name.as_str() {
                "max_iter" => params.max_iter = int_param(name, value)?.max(1) as usize,
                "learning_rate" => params.learning_rate = float_param(name, value)?,
                "max_depth" => params.max_depth = int_param(name, value)?.max(1) as u32,
                "min_leaf_size" => params.min_leaf_size = int_param(name, value)?.max(1) as usize,
                "loss" => {
                    let loss = value
                        .as_str()
                        .ok_or_else(|| HpoError::InvalidValue(name.clone(), format!("{value:?}")))?;
                    if !KNOWN_LOSSES.contains(&loss) {
                        return Err(HpoError::InvalidValue(name.clone(), loss.to_string()));
                    }
                    params.loss = loss.to_string();
                }
                _ => return Err(HpoError::UnknownHyperparameter(name.clone())),
            }
        }
        Ok(params)
    }
}

fn int_param(name: &str, value: &crate::hpo::ParamValue) -> std::result::Result<i64, HpoError> {
    value
        .as_int()
        .ok_or_else(|| HpoError::InvalidValue(name.to_string(), format!("{value:?}")))
}

fn float_param(name: &str, value: &crate::hpo::ParamValue) -> std::result::Result<f64, HpoError> {
    value
        .as_float()
        .ok_or_else(|| HpoError::InvalidValue(name.to_string(), format!("{value:?}")))
}

/// A fitted gradient-boosted regressor plus its validation score.
pub struct GbmRegressor {
    model: GBDT,
    encoder: Encoder,
    best_iterations: usize,
    validation_rmse: f64,
}

impl GbmRegressor {
    /// Fit on the training split with validation-driven early stopping.
    ///
    /// The backend trains monolithically, so early stopping is expressed
    /// by refitting in rounds of `early_stopping_step` iterations: the
    /// round with the best validation RMSE is kept, and training stops
    /// once `patience` rounds pass without improvement or `max_iter` is
    /// reached. Sub-sampling ratios are pinned to 1.0, which removes the
    /// backend's only source of randomness, so a fit is deterministic for
    /// fixed params and data.
    pub fn fit(
        train_x: &Frame,
        train_y: &[f64],
        val_x: &Frame,
        val_y: &[f64],
        params: &GbmParams,
        categorical_features: &[String],
    ) -> Result<Self> {
        let encoder = Encoder::fit(train_x, categorical_features)?;
        let train_matrix = encoder.transform(train_x)?;
        let val_matrix = encoder.transform(val_x)?;
        let n_features = train_matrix.first().map_or(0, Vec::len);

        let step = params.early_stopping_step.max(1);
        let max_iter = params.max_iter.max(1);

        let mut iterations = step.min(max_iter);
        let mut best_model = fit_once(&train_matrix, train_y, n_features, iterations, params);
        let mut best_rmse = rmse(&predict_matrix(&best_model, &val_matrix), val_y);
        let mut best_iterations = iterations;
        let mut stale = 0usize;

        while iterations < max_iter && stale < params.patience {
            iterations = (iterations + step).min(max_iter);
            let candidate = fit_once(&train_matrix, train_y, n_features, iterations, params);
            let score = rmse(&predict_matrix(&candidate, &val_matrix), val_y);
            if score < best_rmse {
                best_model = candidate;
                best_rmse = score;
                best_iterations = iterations;
                stale = 0;
            } else {
                stale += 1;
            }
        }

        tracing::debug!(
            iterations = best_iterations,
            validation_rmse = best_rmse,
            "gbm fit complete"
        );

        Ok(Self {
            model: best_model,
            encoder,
            best_iterations,
            validation_rmse: best_rmse,
        })
    }

    /// Predict targets for a feature frame
    pub fn predict(&self, x: &Frame) -> Result<Vec<f64>> {
        let matrix = self.encoder.transform(x)?;
        Ok(predict_matrix(&self.model, &matrix))
    }

    /// Boosting iterations of the kept round
    pub fn best_iterations(&self) -> usize {
        self.best_iterations
    }

    /// Validation RMSE of the kept round
    pub fn validation_rmse(&self) -> f64 {
        self.validation_rmse
    }
}

fn fit_once(
    train_matrix: &[Vec<f32>],
    train_y: &[f64],
    n_features: usize,
    iterations: usize,
    params: &GbmParams,
) -> GBDT {
    let mut cfg = Config::new();
    cfg.set_feature_size(n_features);
    cfg.set_max_depth(params.max_depth);
    cfg.set_iterations(iterations);
    cfg.set_shrinkage(params.learning_rate as ValueType);
    cfg.set_min_leaf_size(params.min_leaf_size);
    cfg.set_loss(&params.loss);
    // Full-sample training: the backend has no seed parameter, so the
    // sampling ratios stay at 1.0 to keep the fit deterministic.
    cfg.set_data_sample_ratio(1.0);
    cfg.set_feature_sample_ratio(1.0);
    cfg.set_training_optimization_level(2);

    let mut training: DataVec = train_matrix
        .iter()
        .zip(train_y)
        .map(|(row, &y)| Data::new_training_data(row.clone(), 1.0, y as ValueType, None))
        .collect();

    let mut model = GBDT::new(&cfg);
    model.fit(&mut training);
    model
}

fn predict_matrix(model: &GBDT, matrix: &[Vec<f32>]) -> Vec<f64> {
    let test: DataVec = matrix
        .iter()
        .map(|row| Data::new_test_data(row.clone(), None))
        .collect();
    model.predict(&test).into_iter().map(f64::from).collect()
}

/// Objective for one trial: fit with the sampled assignment, return the
/// validation RMSE (lower is better).
pub fn evaluate(
    assignment: &Assignment,
    train_x: &Frame,
    train_y: &[f64],
    val_x: &Frame,
    val_y: &[f64],
    categorical_features: &[String],
) -> Result<f64> {
    let params = GbmParams::from_assignment(assignment)?;
    let model = GbmRegressor::fit(train_x, train_y, val_x, val_y, &params, categorical_features)?;
    Ok(model.validation_rmse())
}
