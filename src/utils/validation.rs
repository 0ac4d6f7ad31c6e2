use crate::domain::model::{ExportFormat, FormContext};
use crate::utils::error::{Result, TrendError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Domain and country are the only required inputs; both are reported together.
pub fn validate_form(form: &FormContext) -> Result<()> {
    let mut missing_fields = Vec::new();
    if form.domain.trim().is_empty() {
        missing_fields.push("domain".to_string());
    }
    if form.country.trim().is_empty() {
        missing_fields.push("country".to_string());
    }

    if missing_fields.is_empty() {
        Ok(())
    } else {
        Err(TrendError::ValidationError { missing_fields })
    }
}

impl Validate for FormContext {
    fn validate(&self) -> Result<()> {
        validate_form(self)
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrendError::config(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(TrendError::config(field_name, "Path contains null bytes"));
    }

    Ok(())
}

/// A bare file name: no directory separators, no parent references.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    if name.contains('/') || name.contains('\\') || name == ".." || name == "." {
        return Err(TrendError::config(
            field_name,
            format!("'{}' must be a plain file name", name),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrendError::config(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[ExportFormat]) -> Result<()> {
    if formats.is_empty() {
        return Err(TrendError::config(
            field_name,
            "At least one export format is required",
        ));
    }

    let mut seen = HashSet::new();
    for format in formats {
        if !seen.insert(format) {
            return Err(TrendError::config(
                field_name,
                format!("Format '{}' is listed more than once", format.extension()),
            ));
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TrendError::config(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_form_reports_every_missing_field() {
        let err = validate_form(&FormContext::default()).unwrap_err();
        match err {
            TrendError::ValidationError { missing_fields } => {
                assert_eq!(missing_fields, vec!["domain", "country"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = FormContext::new("Finance", "  ").validate().unwrap_err();
        assert!(err.to_string().contains("country"));
        assert!(!err.to_string().contains("domain"));
    }

    #[test]
    fn test_validate_form_accepts_minimal_input() {
        assert!(validate_form(&FormContext::new("Gaming", "Atlantis")).is_ok());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("export.bundle_filename", "report.zip").is_ok());
        assert!(validate_file_name("export.bundle_filename", "../report.zip").is_err());
        assert!(validate_file_name("export.bundle_filename", " ").is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = [ExportFormat::Json, ExportFormat::Csv];
        assert!(validate_formats("export.formats", &formats).is_ok());
        assert!(validate_formats("export.formats", &[]).is_err());
        assert!(
            validate_formats("export.formats", &[ExportFormat::Csv, ExportFormat::Csv]).is_err()
        );
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pipeline.simulated_delay_ms", 1500u64, 0, 60_000).is_ok());
        assert!(validate_range("pipeline.simulated_delay_ms", 90_000u64, 0, 60_000).is_err());
    }
}
