use crate::domain::error::{AppError, Result};
use crate::domain::field_schema::fields;
use crate::domain::parameters::ParameterSet;
use csv::{Terminator, WriterBuilder};

pub const EXPORT_FILE_NAME: &str = "orange_export.tab";
pub const EXPORT_CONTENT_TYPE: &str = "text/tab-separated-values";

const ROLE: &str = "feature";

/// Writes the set as an Orange `.tab` document: names, types, roles and
/// one row of values, all in schema order.
pub fn export(set: &ParameterSet) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let names: Vec<&str> = fields().iter().map(|f| f.key.as_str()).collect();
    let kinds: Vec<&str> = fields().iter().map(|f| f.domain.kind()).collect();
    let roles = [ROLE; 10];
    let values: Vec<String> = set.values().iter().map(|v| v.to_string()).collect();

    writer.write_record(&names).map_err(write_error)?;
    writer.write_record(&kinds).map_err(write_error)?;
    writer.write_record(roles).map_err(write_error)?;
    writer.write_record(&values).map_err(write_error)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush export: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}

fn write_error(err: csv::Error) -> AppError {
    AppError::Internal(format!("Failed to write export row: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::tabular_import::import;

    #[test]
    fn test_export_default_profile() {
        let text = export(&ParameterSet::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "age\tsex\tcp\tbp\tchol\tmaxhr\texang\toldpeak\tca\tthal");
        assert_eq!(
            lines[1],
            "continuous\tdiscrete\tdiscrete\tcontinuous\tcontinuous\tcontinuous\tdiscrete\tcontinuous\tdiscrete\tdiscrete"
        );
        assert_eq!(lines[2], vec!["feature"; 10].join("\t"));
        assert_eq!(lines[3], "54\t1\t2\t130\t240\t155\t0\t1.2\t0\t3");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let sets = [
            ParameterSet::default(),
            ParameterSet::from_values([63.0, 1.0, 3.0, 145.0, 233.0, 150.0, 0.0, 2.3, 0.0, 6.0]),
            ParameterSet::from_values([29.5, 0.0, 4.0, 94.25, 564.0, 71.0, 1.0, 6.2, 3.0, 7.0]),
            ParameterSet::from_values([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.1, 0.0, 0.0]),
        ];

        for set in sets {
            let text = export(&set).unwrap();
            assert_eq!(import(&text), Ok(set));
        }
    }
}
