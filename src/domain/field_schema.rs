// ============================================================
// FIELD SCHEMA
// ============================================================
// The ten clinical parameters, in the column order shared by
// import, export and the form.

use crate::domain::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of one clinical parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Age,
    Sex,
    Cp,
    Bp,
    Chol,
    Maxhr,
    Exang,
    Oldpeak,
    Ca,
    Thal,
}

impl FieldKey {
    /// All keys in schema order
    pub const ALL: [FieldKey; 10] = [
        FieldKey::Age,
        FieldKey::Sex,
        FieldKey::Cp,
        FieldKey::Bp,
        FieldKey::Chol,
        FieldKey::Maxhr,
        FieldKey::Exang,
        FieldKey::Oldpeak,
        FieldKey::Ca,
        FieldKey::Thal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Age => "age",
            FieldKey::Sex => "sex",
            FieldKey::Cp => "cp",
            FieldKey::Bp => "bp",
            FieldKey::Chol => "chol",
            FieldKey::Maxhr => "maxhr",
            FieldKey::Exang => "exang",
            FieldKey::Oldpeak => "oldpeak",
            FieldKey::Ca => "ca",
            FieldKey::Thal => "thal",
        }
    }

    /// Column position in imported and exported rows
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Indicator fields whose only valid codes are 0 and 1
    pub fn is_binary(&self) -> bool {
        matches!(self, FieldKey::Sex | FieldKey::Exang)
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown field: {}", s)))
    }
}

/// A permitted integer code of a discrete field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CodeOption {
    pub value: i64,
    pub label: &'static str,
}

/// Value domain of a field
///
/// Bounds of a continuous domain are input hints for the form; values
/// outside them are accepted everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldDomain {
    Continuous {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Discrete {
        codes: &'static [CodeOption],
    },
}

impl FieldDomain {
    /// Orange `.tab` type-row keyword
    pub fn kind(&self) -> &'static str {
        match self {
            FieldDomain::Continuous { .. } => "continuous",
            FieldDomain::Discrete { .. } => "discrete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: &'static str,
    pub domain: FieldDomain,
    pub default: f64,
}

const SEX_CODES: &[CodeOption] = &[
    CodeOption { value: 1, label: "Male" },
    CodeOption { value: 0, label: "Female" },
];

const CP_CODES: &[CodeOption] = &[
    CodeOption { value: 1, label: "Typical" },
    CodeOption { value: 2, label: "Atypical" },
    CodeOption { value: 3, label: "Non-Anginal" },
    CodeOption { value: 4, label: "Asymptomatic" },
];

const EXANG_CODES: &[CodeOption] = &[
    CodeOption { value: 0, label: "Negative" },
    CodeOption { value: 1, label: "Positive" },
];

const CA_CODES: &[CodeOption] = &[
    CodeOption { value: 0, label: "0 vessels" },
    CodeOption { value: 1, label: "1 vessel" },
    CodeOption { value: 2, label: "2 vessels" },
    CodeOption { value: 3, label: "3 vessels" },
];

const THAL_CODES: &[CodeOption] = &[
    CodeOption { value: 3, label: "Normal" },
    CodeOption { value: 6, label: "Fixed" },
    CodeOption { value: 7, label: "Reversable" },
];

const fn continuous(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> FieldDomain {
    FieldDomain::Continuous { min, max, step }
}

static FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor {
        key: FieldKey::Age,
        label: "Patient Age",
        domain: continuous(Some(1.0), Some(120.0), None),
        default: 50.0,
    },
    FieldDescriptor {
        key: FieldKey::Sex,
        label: "Sex",
        domain: FieldDomain::Discrete { codes: SEX_CODES },
        default: 0.0,
    },
    FieldDescriptor {
        key: FieldKey::Cp,
        label: "Chest Pain Type",
        domain: FieldDomain::Discrete { codes: CP_CODES },
        default: 1.0,
    },
    FieldDescriptor {
        key: FieldKey::Bp,
        label: "Resting BP (mmHg)",
        domain: continuous(Some(80.0), Some(220.0), None),
        default: 120.0,
    },
    FieldDescriptor {
        key: FieldKey::Chol,
        label: "Cholesterol (mg/dl)",
        domain: continuous(Some(100.0), Some(600.0), None),
        default: 200.0,
    },
    FieldDescriptor {
        key: FieldKey::Maxhr,
        label: "Max Heart Rate",
        domain: continuous(Some(60.0), Some(220.0), None),
        default: 150.0,
    },
    FieldDescriptor {
        key: FieldKey::Exang,
        label: "Exercise Induced Angina",
        domain: FieldDomain::Discrete { codes: EXANG_CODES },
        default: 0.0,
    },
    FieldDescriptor {
        key: FieldKey::Oldpeak,
        label: "ST Depression (Oldpeak)",
        domain: continuous(None, None, Some(0.1)),
        default: 0.0,
    },
    FieldDescriptor {
        key: FieldKey::Ca,
        label: "Number of Major Vessels (CA)",
        domain: FieldDomain::Discrete { codes: CA_CODES },
        default: 0.0,
    },
    FieldDescriptor {
        key: FieldKey::Thal,
        label: "Thalassemia (Thal)",
        domain: FieldDomain::Discrete { codes: THAL_CODES },
        default: 3.0,
    },
];

/// The ordered field descriptors
pub fn fields() -> &'static [FieldDescriptor; 10] {
    &FIELDS
}

pub fn descriptor(key: FieldKey) -> &'static FieldDescriptor {
    &FIELDS[key.index()]
}
