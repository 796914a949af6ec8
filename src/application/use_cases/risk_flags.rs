use crate::domain::field_schema::FieldKey;
use crate::domain::parameters::ParameterSet;
use serde::Serialize;

/// An advisory threshold shown next to the form. Flags never block
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFlag {
    pub key: FieldKey,
    pub title: &'static str,
    pub rule: &'static str,
    pub triggered: bool,
}

pub fn risk_flags(set: &ParameterSet) -> Vec<RiskFlag> {
    vec![
        RiskFlag {
            key: FieldKey::Ca,
            title: "CA Indicator",
            rule: "Value >= 1: High Pathological Weight",
            triggered: set.ca >= 1.0,
        },
        RiskFlag {
            key: FieldKey::Oldpeak,
            title: "ST Depression",
            rule: "Oldpeak > 1.0: High Risk Warning",
            triggered: set.oldpeak > 1.0,
        },
        RiskFlag {
            key: FieldKey::Thal,
            title: "Thal Type",
            rule: "Type 6/7: Significant Predictor",
            triggered: set.thal == 6.0 || set.thal == 7.0,
        },
        RiskFlag {
            key: FieldKey::Cp,
            title: "Chest Pain",
            rule: "Type 4 (Asymptomatic): Highest Disease Probability",
            triggered: set.cp == 4.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triggered(set: &ParameterSet) -> Vec<FieldKey> {
        risk_flags(set)
            .into_iter()
            .filter(|flag| flag.triggered)
            .map(|flag| flag.key)
            .collect()
    }

    #[test]
    fn test_all_flags_fire() {
        let set = ParameterSet::from_values([63.0, 1.0, 4.0, 145.0, 233.0, 150.0, 0.0, 2.3, 1.0, 6.0]);
        assert_eq!(
            triggered(&set),
            vec![FieldKey::Ca, FieldKey::Oldpeak, FieldKey::Thal, FieldKey::Cp]
        );
    }

    #[test]
    fn test_initial_profile_fires_only_oldpeak() {
        assert_eq!(triggered(&ParameterSet::default()), vec![FieldKey::Oldpeak]);
    }

    #[test]
    fn test_boundaries() {
        let mut set = ParameterSet::default();
        set.oldpeak = 1.0;
        set.ca = 0.9;
        set.thal = 7.0;
        assert_eq!(triggered(&set), vec![FieldKey::Thal]);
        assert_eq!(risk_flags(&set).len(), 4);
    }
}
