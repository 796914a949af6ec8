use crate::domain::field_schema::{descriptor, FieldKey};
use crate::domain::parameters::{parse_leading_f64, ParameterSet};
use tracing::debug;

/// The form state: one owned parameter set with explicit mutation points.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: ParameterSet,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a manual edit. The leading number of the input is used
    /// (`"12mmHg"` sets 12); input without a finite leading number is ignored
    /// and the field keeps its value. Returns whether the edit was applied.
    pub fn set_field(&mut self, key: FieldKey, raw_value: &str) -> bool {
        match parse_leading_f64(raw_value) {
            Some(value) if value.is_finite() => {
                self.current.set(key, value);
                true
            }
            _ => {
                debug!(
                    field = descriptor(key).label,
                    raw_value,
                    kept = self.current.get(key),
                    "Ignoring non-numeric field edit"
                );
                false
            }
        }
    }

    /// Swaps in a whole set, as produced by a successful import.
    pub fn replace_all(&mut self, new_set: ParameterSet) {
        self.current = new_set;
    }

    pub fn snapshot(&self) -> ParameterSet {
        self.current
    }
}
