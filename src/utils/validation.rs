//! Field-level validation helpers for reference data

use crate::types::{EngineError, EngineResult};

/// Validate a company name: non-empty, at most 120 characters.
pub fn validate_company_name(name: &str) -> EngineResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "company name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 120 {
        return Err(EngineError::Validation(
            "company name cannot exceed 120 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate an account name: non-empty, at most 120 characters.
pub fn validate_account_name(name: &str) -> EngineResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "account name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 120 {
        return Err(EngineError::Validation(
            "account name cannot exceed 120 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a voucher or line narration: at most 255 characters.
pub fn validate_narration(narration: &str) -> EngineResult<()> {
    if narration.chars().count() > 255 {
        return Err(EngineError::Validation(
            "narration cannot exceed 255 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_are_rejected() {
        assert!(validate_company_name("  ").is_err());
        assert!(validate_account_name("").is_err());
        assert!(validate_account_name("Cash").is_ok());
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long = "x".repeat(121);
        assert!(validate_account_name(&long).is_err());
        assert!(validate_narration(&"n".repeat(256)).is_err());
        assert!(validate_narration(&"n".repeat(255)).is_ok());
    }
}
