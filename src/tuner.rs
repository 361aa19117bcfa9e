//! Top-level tuning driver

use std::collections::BTreeMap;

use crate::config::{ParamLiteral, SamplingSpec, TuneConfig};
use crate::data::Frame;
use crate::error::Result;
use crate::hpo::{Assignment, HpoError, SearchSpace, Study, Trial};
use crate::model;

/// Outcome of one tuning study.
#[derive(Debug, Clone)]
pub struct TuneOutcome {
    /// Best (lowest-loss) assignment found.
    pub best: Assignment,
    /// Validation RMSE of the best assignment.
    pub best_loss: f64,
    /// Full trial history in execution order.
    pub trials: Vec<Trial>,
}

/// Run a seeded TPE study over the declarative search space, minimizing
/// the validation RMSE of a gradient-boosted regressor.
///
/// Default assignments, if any, are enqueued in order and evaluated as
/// the study's first trials before the sampler's own proposals. Trials
/// run strictly sequentially under the budget and failure policy carried
/// by `config`.
#[allow(clippy::too_many_arguments)]
pub fn tune(
    train_x: &Frame,
    train_y: &[f64],
    val_x: &Frame,
    val_y: &[f64],
    categorical_features: &[String],
    search_space: &BTreeMap<String, SamplingSpec>,
    default_assignments: &[BTreeMap<String, ParamLiteral>],
    config: &TuneConfig,
) -> Result<TuneOutcome> {
    let space = SearchSpace::from_specs(search_space)?;
    let mut study = Study::new(space.clone(), config);
    for literals in default_assignments {
        study.enqueue(space.assignment_from_literals(literals)?);
    }

    study.optimize(config.n_trials, |assignment| {
        model::evaluate(assignment, train_x, train_y, val_x, val_y, categorical_features)
    })?;

    let best = study.best_trial().ok_or(HpoError::NoTrials)?;
    tracing::info!(loss = best.loss, trial = best.id, "best trial selected");

    Ok(TuneOutcome {
        best: best.assignment.clone(),
        best_loss: best.loss,
        trials: study.trials().to_vec(),
    })
}
