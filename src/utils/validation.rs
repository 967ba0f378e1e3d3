use crate::utils::error::{QuikBakError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QuikBakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QuikBakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuikBakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuikBakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number of at least 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("config", "quikbak.toml").is_ok());
        assert!(validate_path("config", "").is_err());
        assert!(validate_path("config", "quik\0bak.toml").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("largeFileSizeMB", 0.0).is_ok());
        assert!(validate_non_negative("largeFileSizeMB", 0.5).is_ok());
        assert!(validate_non_negative("largeFileSizeMB", -1.0).is_err());
        assert!(validate_non_negative("largeFileSizeMB", f64::NAN).is_err());
        assert!(validate_non_negative("largeFileSizeMB", f64::INFINITY).is_err());
    }
}
