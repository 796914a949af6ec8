use crate::domain::field_schema::FieldKey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LEADING_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

/// Reads the leading number of a form or file value, ignoring whatever
/// follows it (`"145mmHg"` is 145, `"2.3.4"` is 2.3).
///
/// Returns `None` when the value does not start with a number. `Infinity`
/// is recognised but comes back non-finite, so callers still reject it.
pub fn parse_leading_f64(raw: &str) -> Option<f64> {
    let number = LEADING_NUMBER_PATTERN.find(raw.trim())?.as_str();
    match number.trim_start_matches(['+', '-']) {
        "Infinity" if number.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => number.parse().ok(),
    }
}

/// Current values of the ten clinical parameters.
///
/// Values are finite but never range-checked; anything the form or an
/// imported file supplies is passed through to the analysis as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub bp: f64,
    pub chol: f64,
    pub maxhr: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub ca: f64,
    pub thal: f64,
}

impl ParameterSet {
    /// Build a set from values given in schema order
    pub fn from_values(values: [f64; 10]) -> Self {
        let [age, sex, cp, bp, chol, maxhr, exang, oldpeak, ca, thal] = values;
        Self {
            age,
            sex,
            cp,
            bp,
            chol,
            maxhr,
            exang,
            oldpeak,
            ca,
            thal,
        }
    }

    /// Values in schema order
    pub fn values(&self) -> [f64; 10] {
        [
            self.age,
            self.sex,
            self.cp,
            self.bp,
            self.chol,
            self.maxhr,
            self.exang,
            self.oldpeak,
            self.ca,
            self.thal,
        ]
    }

    pub fn get(&self, key: FieldKey) -> f64 {
        match key {
            FieldKey::Age => self.age,
            FieldKey::Sex => self.sex,
            FieldKey::Cp => self.cp,
            FieldKey::Bp => self.bp,
            FieldKey::Chol => self.chol,
            FieldKey::Maxhr => self.maxhr,
            FieldKey::Exang => self.exang,
            FieldKey::Oldpeak => self.oldpeak,
            FieldKey::Ca => self.ca,
            FieldKey::Thal => self.thal,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: f64) {
        let slot = match key {
            FieldKey::Age => &mut self.age,
            FieldKey::Sex => &mut self.sex,
            FieldKey::Cp => &mut self.cp,
            FieldKey::Bp => &mut self.bp,
            FieldKey::Chol => &mut self.chol,
            FieldKey::Maxhr => &mut self.maxhr,
            FieldKey::Exang => &mut self.exang,
            FieldKey::Oldpeak => &mut self.oldpeak,
            FieldKey::Ca => &mut self.ca,
            FieldKey::Thal => &mut self.thal,
        };
        *slot = value;
    }
}

impl Default for ParameterSet {
    /// The form's initial patient profile
    fn default() -> Self {
        Self::from_values([54.0, 1.0, 2.0, 130.0, 240.0, 155.0, 0.0, 1.2, 0.0, 3.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_schema_order() {
        let set = ParameterSet::default();
        for key in FieldKey::ALL {
            assert_eq!(set.values()[key.index()], set.get(key));
        }
    }

    #[test]
    fn test_set_single_field() {
        let mut set = ParameterSet::default();
        set.set(FieldKey::Chol, 301.0);
        assert_eq!(set.chol, 301.0);
        assert_eq!(set.bp, 130.0);
    }

    #[test]
    fn test_json_uses_lowercase_keys() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        assert_eq!(json["maxhr"], 155.0);
        assert_eq!(json["oldpeak"], 1.2);
    }

    #[test]
    fn test_leading_number_ignores_trailing_text() {
        assert_eq!(parse_leading_f64("145mmHg"), Some(145.0));
        assert_eq!(parse_leading_f64("1abc"), Some(1.0));
        assert_eq!(parse_leading_f64("2.3.4"), Some(2.3));
        assert_eq!(parse_leading_f64(" 233 mg "), Some(233.0));
        assert_eq!(parse_leading_f64("1e"), Some(1.0));
        assert_eq!(parse_leading_f64("-3.5e1x"), Some(-35.0));
        assert_eq!(parse_leading_f64(".5"), Some(0.5));
        assert_eq!(parse_leading_f64("7."), Some(7.0));
        assert_eq!(parse_leading_f64("0"), Some(0.0));
    }

    #[test]
    fn test_leading_number_rejects_non_numbers() {
        for raw in ["", "abc", "N/A", "-", ".", "e5", "NaN", "inf", "infinity", "mmHg145"] {
            assert_eq!(parse_leading_f64(raw), None, "parsed {:?}", raw);
        }
    }

    #[test]
    fn test_infinity_is_not_finite() {
        assert_eq!(parse_leading_f64("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_f64("-Infinityx"), Some(f64::NEG_INFINITY));
    }
}
