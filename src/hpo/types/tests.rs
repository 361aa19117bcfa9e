//! Tests for HPO types

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::config::{ParamLiteral, SamplingSpec};
use crate::hpo::error::HpoError;
use crate::hpo::types::{ParamDomain, ParamValue, SearchSpace, Trial, TrialStatus};

#[test]
fn test_param_value_accessors() {
    assert_eq!(ParamValue::Float(0.5).as_float(), Some(0.5));
    assert_eq!(ParamValue::Int(3).as_float(), Some(3.0));
    assert_eq!(ParamValue::Int(3).as_int(), Some(3));
    assert_eq!(ParamValue::Float(3.5).as_int(), None);
    assert_eq!(ParamValue::Categorical("a".into()).as_str(), Some("a"));
    assert_eq!(ParamValue::Float(0.5).as_str(), None);
}

#[test]
fn test_categorical_sampling_stays_in_choices() {
    let domain = ParamDomain::Categorical {
        choices: vec!["a".into(), "b".into(), "c".into()],
    };
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let value = domain.sample(&mut rng);
        match value {
            ParamValue::Categorical(s) => assert!(["a", "b", "c"].contains(&s.as_str())),
            other => panic!("expected categorical, got {other:?}"),
        }
    }
}

#[test]
fn test_int_sampling_stays_in_bounds() {
    let domain = ParamDomain::Int { low: 1, high: 10 };
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let value = domain.sample(&mut rng).as_int().unwrap();
        assert!((1..=10).contains(&value));
    }
}

#[test]
fn test_log_float_sampling_stays_in_bounds() {
    let domain = ParamDomain::Float {
        low: 1e-4,
        high: 1.0,
        log_scale: true,
    };
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let value = domain.sample(&mut rng).as_float().unwrap();
        assert!((1e-4..=1.0).contains(&value));
    }
}

#[test]
fn test_from_specs_builds_all_kinds() {
    let mut specs = BTreeMap::new();
    specs.insert(
        "loss".to_string(),
        SamplingSpec::categorical(vec!["SquaredError", "LAD"]),
    );
    specs.insert("max_iter".to_string(), SamplingSpec::numeric("int", 10.0, 200.0));
    specs.insert(
        "learning_rate".to_string(),
        SamplingSpec::numeric("log_float", 0.001, 0.3),
    );
    specs.insert(
        "subsample".to_string(),
        SamplingSpec::numeric("float", 0.5, 1.0),
    );

    let space = SearchSpace::from_specs(&specs).unwrap();
    assert_eq!(space.len(), 4);
    assert_eq!(
        space.get("max_iter"),
        Some(&ParamDomain::Int { low: 10, high: 200 })
    );
    assert_eq!(
        space.get("learning_rate"),
        Some(&ParamDomain::Float {
            low: 0.001,
            high: 0.3,
            log_scale: true
        })
    );
}

#[test]
fn test_from_specs_rejects_unknown_kind_before_sampling() {
    let mut specs = BTreeMap::new();
    specs.insert("lr".to_string(), SamplingSpec::numeric("bogus", 0.0, 1.0));
    let result = SearchSpace::from_specs(&specs);
    match result {
        Err(HpoError::UnknownSamplingType {
            param,
            sampling_type,
        }) => {
            assert_eq!(param, "lr");
            assert_eq!(sampling_type, "bogus");
        }
        other => panic!("expected UnknownSamplingType, got {other:?}"),
    }
}

#[test]
fn test_from_specs_rejects_missing_bounds() {
    let mut specs = BTreeMap::new();
    specs.insert(
        "lr".to_string(),
        SamplingSpec {
            sampling_type: "float".to_string(),
            choices: None,
            min: Some(0.1),
            max: None,
        },
    );
    assert!(matches!(
        SearchSpace::from_specs(&specs),
        Err(HpoError::InvalidDescriptor { .. })
    ));
}

#[test]
fn test_from_specs_rejects_fractional_int_bounds() {
    // A truncating cast would silently start the domain below the
    // declared minimum; fractional bounds are a descriptor error.
    let mut specs = BTreeMap::new();
    specs.insert(
        "max_iter".to_string(),
        SamplingSpec::numeric("int", 10.9, 200.0),
    );
    assert!(matches!(
        SearchSpace::from_specs(&specs),
        Err(HpoError::InvalidDescriptor { .. })
    ));
}

#[test]
fn test_from_specs_rejects_empty_choices() {
    let mut specs = BTreeMap::new();
    specs.insert(
        "loss".to_string(),
        SamplingSpec::categorical(Vec::<String>::new()),
    );
    assert!(matches!(
        SearchSpace::from_specs(&specs),
        Err(HpoError::InvalidDescriptor { .. })
    ));
}

#[test]
fn test_assignment_from_literals_partial_and_coerced() {
    let mut space = SearchSpace::new();
    space.add("max_iter", ParamDomain::Int { low: 10, high: 200 });
    space.add(
        "learning_rate",
        ParamDomain::Float {
            low: 0.001,
            high: 0.3,
            log_scale: true,
        },
    );

    let mut literals = BTreeMap::new();
    literals.insert("max_iter".to_string(), ParamLiteral::Int(50));
    let assignment = space.assignment_from_literals(&literals).unwrap();
    assert_eq!(assignment.len(), 1);
    assert_eq!(assignment["max_iter"], ParamValue::Int(50));

    // An int literal coerces into a float domain, but bounds still apply.
    let mut literals = BTreeMap::new();
    literals.insert("learning_rate".to_string(), ParamLiteral::Int(0));
    assert!(matches!(
        space.assignment_from_literals(&literals),
        Err(HpoError::InvalidValue(..))
    ));
}

#[test]
fn test_assignment_from_literals_unknown_key() {
    let mut space = SearchSpace::new();
    space.add("max_iter", ParamDomain::Int { low: 10, high: 200 });
    let mut literals = BTreeMap::new();
    literals.insert("nope".to_string(), ParamLiteral::Int(1));
    assert!(matches!(
        space.assignment_from_literals(&literals),
        Err(HpoError::UnknownHyperparameter(_))
    ));
}

#[test]
fn test_validate_full_assignment() {
    let mut space = SearchSpace::new();
    space.add("max_iter", ParamDomain::Int { low: 10, high: 200 });
    let mut rng = StdRng::seed_from_u64(1);
    let assignment = space.sample_random(&mut rng);
    space.validate(&assignment).unwrap();

    let mut bad = assignment.clone();
    bad.insert("max_iter".to_string(), ParamValue::Int(1000));
    assert!(matches!(
        space.validate(&bad),
        Err(HpoError::InvalidValue(..))
    ));
}

#[test]
fn test_trial_lifecycle() {
    let mut trial = Trial::new(0, crate::hpo::Assignment::new());
    assert_eq!(trial.status, TrialStatus::Pending);
    assert!(trial.loss.is_infinite());
    trial.complete(1.5);
    assert_eq!(trial.status, TrialStatus::Completed);
    assert_eq!(trial.loss, 1.5);

    let mut trial = Trial::new(1, crate::hpo::Assignment::new());
    trial.fail();
    assert_eq!(trial.status, TrialStatus::Failed);
    assert!(trial.loss.is_infinite());
}

proptest! {
    /// Property: numeric samples always lie within [min, max] for any
    /// bounds and seed.
    #[test]
    fn prop_float_sampling_in_bounds(low in -100.0f64..100.0, span in 0.001f64..100.0, seed in any::<u64>()) {
        let domain = ParamDomain::Float { low, high: low + span, log_scale: false };
        let mut rng = StdRng::seed_from_u64(seed);
        let value = domain.sample(&mut rng).as_float().unwrap();
        prop_assert!(value >= low && value <= low + span);
    }

    #[test]
    fn prop_int_sampling_in_bounds(low in -1000i64..1000, span in 0i64..1000, seed in any::<u64>()) {
        let domain = ParamDomain::Int { low, high: low + span };
        let mut rng = StdRng::seed_from_u64(seed);
        let value = domain.sample(&mut rng).as_int().unwrap();
        prop_assert!(value >= low && value <= low + span);
    }
}
