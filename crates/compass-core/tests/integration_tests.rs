//! Integration tests for compass-core
//!
//! These tests exercise the full metrics + profile → status bundle workflow.

use std::io::Write;
use std::sync::Arc;

use compass_core::{
    Dimension, Error, Metrics, Profile, StatusBundle, StatusConfig, StatusEngine, StatusLevel,
};

fn engine() -> StatusEngine {
    StatusEngine::with_defaults().expect("Failed to build engine from embedded config")
}

fn uniform(score: f64) -> Metrics {
    Metrics::new(score, score, score, score, score)
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_end_to_end_reference_scenario() {
    let metrics = Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0);
    let bundle = engine().evaluate(&metrics, &Profile::new()).unwrap();

    assert_eq!(
        bundle.levels(),
        vec![
            StatusLevel::Five,
            StatusLevel::Four,
            StatusLevel::Three,
            StatusLevel::Two,
            StatusLevel::One,
        ]
    );

    let order: Vec<Dimension> = bundle.dimensions.iter().map(|s| s.dimension).collect();
    assert_eq!(order, Dimension::all());

    // Weighted aggregate: .25*85 + .2*60 + .2*35 + .15*15 + .2*0
    assert_eq!(bundle.overall.score, 42.5);
    assert_eq!(bundle.overall.level, StatusLevel::Two);
    assert_eq!(bundle.overall.title, "Building Foundations");

    assert_eq!(bundle.improvement_areas.len(), 2);
    assert!(bundle.improvement_areas[0].starts_with("Behavior change"));
    assert!(bundle.improvement_areas[1].starts_with("Financial literacy"));

    // Every dimension below level 5 gets its next milestone, worst first;
    // savings is already at the top
    assert_eq!(
        bundle.milestones,
        vec![
            "Behavior change level 2 (First Changes): Cut one unnecessary recurring expense"
                .to_string(),
            "Financial literacy level 3 (Informed): Understand debt, credit and inflation"
                .to_string(),
            "Goal orientation level 4 (Goal Achiever): Reach your first goal on schedule"
                .to_string(),
            "Income growth level 5 (Income Builder): Sustain year-over-year income growth"
                .to_string(),
        ]
    );

    assert!(bundle.alerts.is_empty());
}

#[test]
fn test_bundle_serializes_levels_as_numbers() {
    let bundle = engine()
        .evaluate(&Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0), &Profile::new())
        .unwrap();
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json["dimensions"][0]["dimension"], "savings");
    assert_eq!(json["dimensions"][0]["level"], 5);
    assert_eq!(json["overall"]["level"], 2);

    let back: StatusBundle = serde_json::from_value(json).unwrap();
    assert_eq!(back, bundle);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_fixture_scores_map_to_levels() {
    let engine = engine();
    let fixtures = [
        (0.0, StatusLevel::One),
        (15.0, StatusLevel::Two),
        (35.0, StatusLevel::Three),
        (60.0, StatusLevel::Four),
        (85.0, StatusLevel::Five),
    ];

    for (score, level) in fixtures {
        let bundle = engine.evaluate(&uniform(score), &Profile::new()).unwrap();
        assert!(
            bundle.dimensions.iter().all(|s| s.level == level),
            "score {} gave {:?}",
            score,
            bundle.levels()
        );
    }
}

#[test]
fn test_overall_boundaries_from_uniform_scores() {
    let engine = engine();
    let fixtures = [
        (0.0, StatusLevel::One),
        (25.0, StatusLevel::Two),
        (45.0, StatusLevel::Three),
        (70.0, StatusLevel::Four),
        (90.0, StatusLevel::Five),
    ];

    for (score, level) in fixtures {
        let bundle = engine.evaluate(&uniform(score), &Profile::new()).unwrap();
        assert_eq!(bundle.overall.score, score);
        assert_eq!(bundle.overall.level, level, "aggregate {}", score);
    }
}

#[test]
fn test_levels_never_drop_as_score_rises() {
    let engine = engine();
    let mut previous = engine.evaluate(&uniform(0.0), &Profile::new()).unwrap();

    for score in 1..=100 {
        let bundle = engine
            .evaluate(&uniform(score as f64), &Profile::new())
            .unwrap();
        for (before, after) in previous.dimensions.iter().zip(&bundle.dimensions) {
            assert!(after.level >= before.level, "{} at {}", after.dimension, score);
        }
        assert!(bundle.overall.level >= previous.overall.level);
        previous = bundle;
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let engine = engine();
    let metrics = Metrics::new(72.0, 18.5, 44.0, 9.0, 63.0);
    let profile = Profile::new()
        .with_signal("flagged_spending_amount", 180)
        .with_signal("self_reported_stress", 9);

    let first = serde_json::to_string(&engine.evaluate(&metrics, &profile).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.evaluate(&metrics, &profile).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_improvement_areas_empty_iff_all_good() {
    let engine = engine();
    let cases = [
        (Metrics::new(60.0, 60.0, 60.0, 60.0, 60.0), true),
        (Metrics::new(35.0, 30.0, 35.0, 25.0, 32.0), true),
        (Metrics::new(35.0, 30.0, 35.0, 25.0, 31.0), false),
        (Metrics::new(0.0, 100.0, 100.0, 100.0, 100.0), false),
    ];

    for (metrics, expect_empty) in cases {
        let bundle = engine.evaluate(&metrics, &Profile::new()).unwrap();
        let all_good = bundle
            .dimensions
            .iter()
            .all(|s| s.level >= engine.improvement_below());
        assert_eq!(all_good, expect_empty);
        assert_eq!(bundle.improvement_areas.is_empty(), expect_empty);
    }
}

#[test]
fn test_milestones_exclude_top_level_dimensions() {
    let bundle = engine()
        .evaluate(&Metrics::new(100.0, 90.0, 10.0, 100.0, 70.0), &Profile::new())
        .unwrap();

    let maxed: Vec<&str> = bundle
        .dimensions
        .iter()
        .filter(|s| s.level.is_max())
        .map(|s| s.dimension.label())
        .collect();
    assert_eq!(maxed.len(), 3);

    for milestone in &bundle.milestones {
        assert!(maxed.iter().all(|label| !milestone.starts_with(label)));
    }
    assert_eq!(bundle.milestones.len(), 2);
    assert!(bundle.milestones[0].starts_with("Goal orientation"));
}

// =============================================================================
// Alerts
// =============================================================================

#[test]
fn test_high_spend_alert_is_highest_severity() {
    let engine = engine();
    let metrics = uniform(50.0);

    let high = engine
        .evaluate(
            &metrics,
            &Profile::new().with_signal("flagged_spending_amount", 400),
        )
        .unwrap();
    assert_eq!(high.alerts.len(), 1);
    assert!(high.alerts[0].contains("well above"));

    let low = engine
        .evaluate(
            &metrics,
            &Profile::new().with_signal("flagged_spending_amount", 50),
        )
        .unwrap();
    assert!(low.alerts.is_empty());
}

#[test]
fn test_malformed_profile_degrades_to_fewer_alerts() {
    let profile = Profile::from_json(serde_json::json!({
        "flagged_spending_amount": {"amount": 400},
        "self_reported_laziness": 9,
        "new_signal_we_do_not_know": 1
    }));

    let bundle = engine().evaluate(&uniform(50.0), &profile).unwrap();
    assert_eq!(bundle.alerts.len(), 1);
    assert!(bundle.alerts[0].contains("Motivation"));
}

#[test]
fn test_alerts_do_not_change_dimension_results() {
    let engine = engine();
    let metrics = Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0);

    let quiet = engine.evaluate(&metrics, &Profile::new()).unwrap();
    let noisy = engine
        .evaluate(
            &metrics,
            &Profile::new()
                .with_signal("flagged_spending_amount", 999)
                .with_signal("self_reported_stress", 10),
        )
        .unwrap();

    assert_eq!(quiet.dimensions, noisy.dimensions);
    assert_eq!(quiet.overall, noisy.overall);
    assert_eq!(noisy.alerts.len(), 2);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_out_of_range_scores_are_rejected() {
    let engine = engine();
    for bad in [-5.0, 105.0] {
        let mut metrics = uniform(50.0);
        metrics.set(Dimension::Literacy, bad);

        match engine.evaluate(&metrics, &Profile::new()) {
            Err(Error::InvalidScore { dimension, .. }) => assert_eq!(dimension, "literacy"),
            other => panic!("expected InvalidScore, got {:?}", other),
        }
    }
}

#[test]
fn test_non_numeric_metrics_are_rejected() {
    let err = Metrics::from_json(&serde_json::json!({
        "savings": 85, "income": "sixty", "goals": 35, "literacy": 15, "behavior": 0
    }))
    .unwrap_err();
    assert!(matches!(err, Error::InvalidScore { ref dimension, .. } if dimension == "income"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_engine_uses_override_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
improvement_below = 2

[[alerts]]
name = "stress"
signal = "stress_level"
rules = [{{ at_least = 3, severity = "medium", message = "Take a breather" }}]
"#
    )
    .unwrap();

    let engine = StatusEngine::load(Some(file.path())).unwrap();
    let bundle = engine
        .evaluate(
            &Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0),
            &Profile::new()
                .with_signal("stress_level", 4)
                .with_signal("flagged_spending_amount", 400),
        )
        .unwrap();

    // Only level 1 counts as weak now; the replaced alert families drop spending
    assert_eq!(bundle.alerts, vec!["Take a breather".to_string()]);
    assert_eq!(bundle.improvement_areas.len(), 1);
    assert!(bundle.improvement_areas[0].starts_with("Behavior change"));
}

#[test]
fn test_threshold_only_override_covers_upper_levels() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "improvement_below = 5").unwrap();

    let engine = StatusEngine::load(Some(file.path())).unwrap();
    let bundle = engine
        .evaluate(&Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0), &Profile::new())
        .unwrap();

    assert_eq!(bundle.improvement_areas.len(), 4);
    assert!(bundle.improvement_areas[2].starts_with("Goal orientation"));
    assert!(bundle.improvement_areas[3].starts_with("Income growth"));
    assert!(bundle
        .improvement_areas
        .iter()
        .all(|a| !a.starts_with("Savings discipline")));
}

#[test]
fn test_invalid_override_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "improvement_below = 9").unwrap();

    assert!(matches!(
        StatusConfig::load(Some(file.path())),
        Err(Error::Config(_))
    ));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_evaluation_shares_one_engine() {
    let engine = Arc::new(engine());
    let expected = engine
        .evaluate(&Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0), &Profile::new())
        .unwrap();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..50 {
                    let bundle = engine
                        .evaluate(&Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0), &Profile::new())
                        .unwrap();
                    assert_eq!(&bundle, expected);
                }
            });
        }
    });
}
