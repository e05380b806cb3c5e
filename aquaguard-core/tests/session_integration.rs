//! End-to-end tests of a monitoring session: provider -> rules -> store.

use aquaguard_core::{
    logger,
    prediction::{LinearSurrogate, PredictionProvider},
    session::SessionBuilder,
    simulation::SensorSimulator,
    AquaError,
};
use aquaguard_schemas::{
    file_formats::InputPolicy,
    model::LinearSurrogateParams,
    reading::Reading,
    risk::{AdviceKind, RiskTier},
};
use chrono::Utc;
use std::{fs, thread, time::Duration};

fn deterministic_provider() -> PredictionProvider {
    let params = LinearSurrogateParams { jitter: 0.0, ..LinearSurrogateParams::default() };
    PredictionProvider::new(LinearSurrogate::new(params).unwrap())
}

#[test]
fn manual_prediction_is_assessed_and_stored() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .build()
        .unwrap();

    // 0.15 + 1.5 * 0.08 + 4.0 * 0.015 = 0.33
    let assessment = session.predict(8.5, 29.0).unwrap();
    assert!((assessment.reading.ammonia - 0.33).abs() < 1e-9);
    assert_eq!(assessment.tier, RiskTier::Moderate);
    assert_eq!(assessment.advice[0].kind, AdviceKind::CriticalConditions);
    assert_eq!(assessment.advice[1].kind, AdviceKind::AmmoniaModerate);

    assert_eq!(session.store().len(), 1);
    assert_eq!(session.latest(), Some(&assessment));
}

#[test]
fn unavailable_model_never_stores_and_session_survives() {
    let mut session = SessionBuilder::new()
        .with_provider(PredictionProvider::unavailable("model.json not found"))
        .build()
        .unwrap();

    for _ in 0..3 {
        assert!(matches!(session.predict(7.5, 28.0), Err(AquaError::ModelUnavailable(_))));
    }
    assert!(session.store().is_empty());
    assert!(session.latest().is_none());

    let view = session.dashboard(30);
    assert!(view.latest.is_none());
    assert!(view.stats.is_none());
}

#[test]
fn failed_prediction_keeps_previous_assessment() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .with_input_policy(InputPolicy::Reject)
        .build()
        .unwrap();

    let first = session.predict(7.0, 25.0).unwrap();
    assert!(matches!(session.predict(20.0, 25.0), Err(AquaError::InvalidInput { .. })));
    assert_eq!(session.latest(), Some(&first));
    assert_eq!(session.store().len(), 1);
}

#[test]
fn clamped_inputs_are_what_gets_stored() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .build()
        .unwrap();

    let assessment = session.predict(20.0, 55.0).unwrap();
    assert_eq!(assessment.reading.ph, 14.0);
    assert_eq!(assessment.reading.temperature, 40.0);
    // 0.15 + 7.0 * 0.08 + 15.0 * 0.015
    assert!((assessment.reading.ammonia - 0.935).abs() < 1e-9);

    let stored = session.store().latest().unwrap();
    assert_eq!((stored.ph, stored.temperature), (14.0, 40.0));
    let stats = session.store().aggregate().unwrap();
    assert_eq!(stats.mean_ph, 14.0);
    assert_eq!(stats.mean_temperature, 40.0);
}

#[test]
fn provider_policy_survives_the_builder() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider().with_input_policy(InputPolicy::Reject))
        .build()
        .unwrap();

    assert_eq!(session.provider().input_policy(), InputPolicy::Reject);
    assert!(matches!(
        session.predict(20.0, 25.0),
        Err(AquaError::InvalidInput { parameter: "pH", .. })
    ));
    assert!(session.store().is_empty());

    let overridden = SessionBuilder::new()
        .with_provider(deterministic_provider().with_input_policy(InputPolicy::Reject))
        .with_input_policy(InputPolicy::Clamp)
        .build()
        .unwrap();
    assert_eq!(overridden.provider().input_policy(), InputPolicy::Clamp);
}

#[test]
fn history_with_out_of_range_values_is_refused() {
    let now = Utc::now();
    let history = vec![
        Reading::new(now - chrono::Duration::minutes(2), 7.5, 27.0, 0.2),
        Reading::new(now - chrono::Duration::minutes(1), 99.0, -10.0, -0.5),
    ];

    let result = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .with_history(history)
        .build();
    assert!(matches!(result, Err(AquaError::InvalidInput { parameter: "pH", .. })));
}

#[test]
fn window_is_bounded_by_capacity() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .with_capacity(3)
        .build()
        .unwrap();

    for i in 0..5 {
        session.predict(7.0 + i as f64 * 0.1, 26.0).unwrap();
    }

    let phs: Vec<f64> = session.store().iter().map(|r| r.ph).collect();
    assert_eq!(phs.len(), 3);
    assert!((phs[0] - 7.2).abs() < 1e-9);
    assert!((phs[2] - 7.4).abs() < 1e-9);
    assert!(session
        .store()
        .iter()
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn dashboard_combines_history_and_latest() {
    let history = SensorSimulator::seeded(5).generate_history(30, Utc::now() - chrono::Duration::hours(1));
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .with_history(history)
        .build()
        .unwrap();

    session.predict(7.5, 28.0).unwrap();

    let view = session.dashboard(30);
    assert_eq!(view.recent.len(), 30);
    assert_eq!(view.recent.last().map(|r| r.ph), Some(7.5));
    assert!(view.latest.is_some());
    let stats = view.stats.unwrap();
    assert!(stats.max_ammonia >= stats.mean_ammonia);
}

#[test]
fn builder_requires_a_provider_and_capacity() {
    assert!(matches!(SessionBuilder::new().build(), Err(AquaError::ProviderNotDefined)));
    assert!(matches!(
        SessionBuilder::new()
            .with_provider(deterministic_provider())
            .with_capacity(0)
            .build(),
        Err(AquaError::ConfigError(_))
    ));
}

#[test]
fn realtime_mode_excludes_manual_prediction() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .build()
        .unwrap();

    session
        .enable_realtime(Duration::from_millis(10), SensorSimulator::seeded(9))
        .unwrap();
    assert!(session.is_realtime());
    assert!(matches!(session.predict(7.5, 28.0), Err(AquaError::RealTimeActive)));
    assert!(matches!(
        session.enable_realtime(Duration::from_millis(10), SensorSimulator::seeded(9)),
        Err(AquaError::RealTimeActive)
    ));

    for _ in 0..3 {
        let assessment = session.next_realtime_tick().unwrap().expect("feed running");
        assert!((7.0..=9.0).contains(&assessment.reading.ph));
        assert!((25.0..=31.0).contains(&assessment.reading.temperature));
    }
    assert_eq!(session.store().len(), 3);

    session.disable_realtime();
    assert!(!session.is_realtime());
    assert!(session.next_realtime_tick().unwrap().is_none());
    assert!(session.predict(7.5, 28.0).is_ok());
}

#[test]
fn dropping_a_realtime_session_stops_its_feed() {
    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .build()
        .unwrap();
    session
        .enable_realtime(Duration::from_secs(60), SensorSimulator::seeded(2))
        .unwrap();

    let handle = thread::spawn(move || drop(session));
    let started = std::time::Instant::now();
    handle.join().unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn one_provider_serves_many_sessions() {
    let provider = PredictionProvider::surrogate();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let provider = provider.clone();
            thread::spawn(move || {
                let mut session = SessionBuilder::new().with_provider(provider).build().unwrap();
                for _ in 0..10 {
                    session.predict(7.0 + i as f64 * 0.5, 27.0).unwrap();
                }
                session.store().len()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 10);
    }
}

#[test]
fn session_log_records_each_reading() {
    let dir = std::env::temp_dir().join(format!("aquaguard-session-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("readings.csv");

    let mut session = SessionBuilder::new()
        .with_provider(deterministic_provider())
        .with_reading_log(path.to_str().unwrap())
        .build()
        .unwrap();
    session.predict(7.2, 26.0).unwrap();
    session.predict(8.4, 29.5).unwrap();
    assert!(session.predict(7.0, f64::NAN).is_err());

    let logged = logger::read_history(&path).unwrap();
    let stored: Vec<_> = session.store().iter().cloned().collect();
    assert_eq!(logged, stored);
}
