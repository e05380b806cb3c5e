//! Risk tier classification and prescriptive advice.
//!
//! Both operations are pure functions of their inputs. The thresholds encode
//! operational limits for aquaculture ponds and are compared exactly.

use aquaguard_schemas::{
    reading::Reading,
    risk::{AdviceEntry, AdviceKind, Assessment, Priority, RiskTier},
};

/// Lower bound (inclusive) of the Moderate tier, in mg/L.
pub const AMMONIA_MODERATE_MG_L: f64 = 0.2;
/// Lower bound (inclusive) of the High tier, in mg/L.
pub const AMMONIA_HIGH_MG_L: f64 = 0.4;
/// pH above which ammonia toxicity rises.
pub const PH_ELEVATED: f64 = 8.0;
/// Water temperature (°C) above which ammonia formation accelerates.
pub const TEMPERATURE_HIGH_C: f64 = 28.0;

pub fn classify(ammonia: f64) -> RiskTier {
    if ammonia < AMMONIA_MODERATE_MG_L {
        RiskTier::Low
    } else if ammonia < AMMONIA_HIGH_MG_L {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}

/// Evaluates the advice rules for one reading.
///
/// The result holds at most one entry from the pH/temperature rule followed by
/// exactly one entry from the ammonia rule. All comparisons are strict.
pub fn advise(ph: f64, temperature: f64, ammonia: f64) -> Vec<AdviceEntry> {
    let mut advice = Vec::with_capacity(2);

    if let Some(entry) = environmental_advice(ph, temperature) {
        advice.push(entry);
    }
    advice.push(ammonia_advice(ammonia));

    advice
}

/// Classifies and advises on a stored reading in one step.
pub fn assess(reading: &Reading) -> Assessment {
    Assessment {
        reading: reading.clone(),
        tier: classify(reading.ammonia),
        advice: advise(reading.ph, reading.temperature, reading.ammonia),
    }
}

fn environmental_advice(ph: f64, temperature: f64) -> Option<AdviceEntry> {
    let ph_high = ph > PH_ELEVATED;
    let temp_high = temperature > TEMPERATURE_HIGH_C;

    if ph_high && temp_high {
        Some(entry(
            Priority::High,
            AdviceKind::CriticalConditions,
            "Critical: Both pH and temperature are elevated. Immediate water change recommended (30-40%).",
            "Perform partial water change and increase aeration",
        ))
    } else if ph_high {
        Some(entry(
            Priority::Medium,
            AdviceKind::PhElevated,
            "pH is elevated. This increases ammonia toxicity.",
            "Add pH buffer or perform gradual water change",
        ))
    } else if temp_high {
        Some(entry(
            Priority::Medium,
            AdviceKind::TemperatureHigh,
            "Water temperature is high. Reduce temperature to prevent ammonia formation.",
            "Increase aeration, reduce feeding, or add cooling system",
        ))
    } else {
        None
    }
}

fn ammonia_advice(ammonia: f64) -> AdviceEntry {
    if ammonia > AMMONIA_HIGH_MG_L {
        entry(
            Priority::High,
            AdviceKind::AmmoniaHigh,
            "High ammonia detected! Immediate action required.",
            "Stop feeding, perform 40-50% water change, add ammonia neutralizer",
        )
    } else if ammonia > AMMONIA_MODERATE_MG_L {
        entry(
            Priority::Medium,
            AdviceKind::AmmoniaModerate,
            "Moderate ammonia levels. Monitor closely.",
            "Reduce feeding by 50%, increase monitoring frequency",
        )
    } else {
        entry(
            Priority::Low,
            AdviceKind::AmmoniaAcceptable,
            "Water quality is within acceptable range.",
            "Continue regular monitoring and maintenance",
        )
    }
}

fn entry(priority: Priority, kind: AdviceKind, message: &str, action: &str) -> AdviceEntry {
    AdviceEntry {
        priority,
        kind,
        message: message.to_string(),
        action: action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn tier_boundaries_are_lower_inclusive() {
        assert_eq!(classify(0.0), RiskTier::Low);
        assert_eq!(classify(0.199_999), RiskTier::Low);
        assert_eq!(classify(0.2), RiskTier::Moderate);
        assert_eq!(classify(0.399_999), RiskTier::Moderate);
        assert_eq!(classify(0.4), RiskTier::High);
        assert_eq!(classify(3.5), RiskTier::High);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }

    #[test]
    fn thresholds_themselves_do_not_trigger_environmental_advice() {
        let advice = advise(8.0, 28.0, 0.1);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::AmmoniaAcceptable);
        assert_eq!(advice[0].priority, Priority::Low);
    }

    #[test]
    fn both_elevated_with_high_ammonia_gives_two_high_entries() {
        let advice = advise(8.5, 29.0, 0.5);
        assert_eq!(advice.len(), 2);
        assert_eq!(advice[0].kind, AdviceKind::CriticalConditions);
        assert_eq!(advice[0].priority, Priority::High);
        assert!(advice[0].message.starts_with("Critical"));
        assert_eq!(advice[1].kind, AdviceKind::AmmoniaHigh);
        assert_eq!(advice[1].priority, Priority::High);
        assert!(advice[1].action.starts_with("Stop feeding"));
    }

    #[test]
    fn acceptable_conditions_give_single_low_entry() {
        let advice = advise(7.5, 28.0, 0.15);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::AmmoniaAcceptable);
    }

    #[test]
    fn single_elevated_parameter_gives_medium_entry() {
        let ph_only = advise(8.2, 26.0, 0.3);
        assert_eq!(ph_only[0].kind, AdviceKind::PhElevated);
        assert_eq!(ph_only[0].priority, Priority::Medium);
        assert_eq!(ph_only[1].kind, AdviceKind::AmmoniaModerate);

        let temp_only = advise(7.0, 30.0, 0.05);
        assert_eq!(temp_only[0].kind, AdviceKind::TemperatureHigh);
        assert_eq!(temp_only[0].priority, Priority::Medium);
        assert_eq!(temp_only[1].kind, AdviceKind::AmmoniaAcceptable);
    }

    #[test]
    fn ammonia_advice_uses_strict_comparisons() {
        // 0.4 is already a High tier but not yet above the advice threshold.
        assert_eq!(advise(7.0, 25.0, 0.4)[0].kind, AdviceKind::AmmoniaModerate);
        assert_eq!(advise(7.0, 25.0, 0.2)[0].kind, AdviceKind::AmmoniaAcceptable);
        assert_eq!(advise(7.0, 25.0, 0.41)[0].kind, AdviceKind::AmmoniaHigh);
    }

    #[test]
    fn assess_combines_tier_and_advice() {
        let reading = Reading::new(Utc::now(), 8.3, 27.0, 0.25);
        let assessment = assess(&reading);
        assert_eq!(assessment.tier, RiskTier::Moderate);
        assert_eq!(assessment.advice.len(), 2);
        assert_eq!(assessment.reading, reading);
    }
}
