// ============================================================
// TABULAR IMPORT
// ============================================================
// Autofills the form from an uploaded Orange .tab or CSV file.
// The first row that looks like data wins; every unusable value
// falls back to the field default.

use crate::domain::error::ImportError;
use crate::domain::field_schema::{fields, FieldDescriptor};
use crate::domain::parameters::{parse_leading_f64, ParameterSet};
use encoding_rs::{UTF_8, WINDOWS_1252};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Result of one import attempt
pub type ImportOutcome = std::result::Result<ParameterSet, ImportError>;

/// Case-sensitive keywords marking Orange type/role rows and metadata
const HEADER_KEYWORDS: [&str; 5] = ["continuous", "discrete", "feature", "meta", "class"];

static AGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)age").unwrap());

/// Decodes an uploaded file to text.
///
/// UTF-8 (with or without BOM) is expected; bytes that are not valid UTF-8
/// are read as Windows-1252, which is what spreadsheet exports on legacy
/// systems produce.
pub fn decode_upload(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    warn!("Upload is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

pub fn import_bytes(bytes: &[u8]) -> ImportOutcome {
    import(&decode_upload(bytes))
}

/// Parses uploaded text into a complete parameter set.
pub fn import(raw_text: &str) -> ImportOutcome {
    let data_line = raw_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| !is_header_line(line) && starts_with_digit(line))
        .ok_or_else(|| {
            info!("Import rejected: no data row found");
            ImportError::NoDataRowFound
        })?;

    let tokens: Vec<&str> = data_line
        .split([',', '\t'])
        .map(str::trim)
        .collect();

    if tokens.len() < fields().len() {
        info!(found = tokens.len(), "Import rejected: incomplete data row");
        return Err(ImportError::IncompleteRow {
            found: tokens.len(),
        });
    }

    let mut values = [0.0; 10];
    for (slot, (field, token)) in values.iter_mut().zip(fields().iter().zip(&tokens)) {
        *slot = coerce(field, token);
    }

    debug!(tokens = tokens.len(), "Imported data row");
    Ok(ParameterSet::from_values(values))
}

fn is_header_line(line: &str) -> bool {
    line.starts_with('#')
        || HEADER_KEYWORDS.iter().any(|keyword| line.contains(keyword))
        || AGE_PATTERN.is_match(line)
}

fn starts_with_digit(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn coerce(field: &FieldDescriptor, token: &str) -> f64 {
    let parsed = parse_leading_f64(token);

    if field.key.is_binary() {
        return if parsed == Some(1.0) { 1.0 } else { 0.0 };
    }

    parsed
        .filter(|value| value.is_finite())
        .unwrap_or(field.default)
}
