//! Property tests for the risk rules, the reading window and the provider.

use aquaguard_core::{
    prediction::PredictionProvider,
    risk::{self, AMMONIA_HIGH_MG_L, AMMONIA_MODERATE_MG_L},
    series::SeriesStore,
};
use aquaguard_schemas::{
    reading::Reading,
    risk::{AdviceKind, RiskTier},
};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

// ── Risk tiers ───────────────────────────────────────────────

proptest! {
    #[test]
    fn tier_matches_threshold_intervals(ammonia in 0.0f64..5.0) {
        let tier = risk::classify(ammonia);
        prop_assert_eq!(tier == RiskTier::Low, ammonia < AMMONIA_MODERATE_MG_L);
        prop_assert_eq!(
            tier == RiskTier::Moderate,
            (AMMONIA_MODERATE_MG_L..AMMONIA_HIGH_MG_L).contains(&ammonia)
        );
        prop_assert_eq!(tier == RiskTier::High, ammonia >= AMMONIA_HIGH_MG_L);
    }

    #[test]
    fn tier_is_monotonic(a in 0.0f64..2.0, b in 0.0f64..2.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(risk::classify(lo) <= risk::classify(hi));
    }
}

// ── Advice ordering ──────────────────────────────────────────

proptest! {
    #[test]
    fn advice_has_one_or_two_entries_environment_first(
        ph in 0.0f64..14.0,
        temperature in 0.0f64..40.0,
        ammonia in 0.0f64..2.0,
    ) {
        let advice = risk::advise(ph, temperature, ammonia);
        prop_assert!(advice.len() == 1 || advice.len() == 2);

        let last = advice.last().unwrap();
        prop_assert!(!last.kind.is_environmental());

        if advice.len() == 2 {
            prop_assert!(advice[0].kind.is_environmental());
        }

        let expect_env = ph > 8.0 || temperature > 28.0;
        prop_assert_eq!(advice.len() == 2, expect_env);
        if ph > 8.0 && temperature > 28.0 {
            prop_assert_eq!(advice[0].kind, AdviceKind::CriticalConditions);
        }
    }
}

// ── Reading window ───────────────────────────────────────────

proptest! {
    #[test]
    fn window_keeps_the_newest_readings(
        capacity in 1usize..20,
        ammonia in proptest::collection::vec(0.0f64..1.0, 0..60),
    ) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let readings: Vec<Reading> = ammonia
            .iter()
            .enumerate()
            .map(|(i, nh3)| Reading::new(start + Duration::seconds(i as i64 * 3), 7.5, 27.0, *nh3))
            .collect();

        let mut store = SeriesStore::with_capacity(capacity);
        for r in &readings {
            store.append(r.clone()).unwrap();
        }

        let expected_len = readings.len().min(capacity);
        prop_assert_eq!(store.len(), expected_len);
        let kept: Vec<Reading> = store.iter().cloned().collect();
        prop_assert_eq!(&kept[..], &readings[readings.len() - expected_len..]);

        match store.aggregate() {
            None => prop_assert!(readings.is_empty()),
            Some(stats) => {
                let peak = kept.iter().map(|r| r.ammonia).fold(f64::NEG_INFINITY, f64::max);
                prop_assert_eq!(stats.max_ammonia, peak);
                prop_assert!(stats.mean_ammonia <= stats.max_ammonia + 1e-12);
            }
        }
    }
}

// ── Prediction postcondition ─────────────────────────────────

proptest! {
    #[test]
    fn surrogate_never_predicts_negative(
        ph in -1.0e6f64..1.0e6,
        temperature in -1.0e6f64..1.0e6,
    ) {
        let provider = PredictionProvider::surrogate();
        let ammonia = provider.predict(ph, temperature).unwrap();
        prop_assert!(ammonia >= 0.0);
        prop_assert!(ammonia.is_finite());
    }
}
