// ==========================================
// Bakery Cost Calculator - API error types
// ==========================================
// Translates repository and engine errors into
// caller-facing errors with a stable code and kind.
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Input errors
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input failed field validation (every violation is reported)
    #[error("validation failed: {reason}")]
    ValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    #[error("not found: {0}")]
    NotFound(String),

    // ==========================================
    // Business rule errors
    // ==========================================
    #[error("material is used by {reference_count} recipe line(s) and cannot be deleted: material_id={material_id}")]
    MaterialInUse {
        material_id: String,
        reference_count: i64,
    },

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    /// Cost engine rejected its input
    #[error(transparent)]
    Calculation(#[from] EngineError),

    // ==========================================
    // Data access errors
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // Generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification, enough for a transport to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ApiError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::MaterialInUse { .. } => "MATERIAL_IN_USE",
            ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApiError::Calculation(e) => match e {
                EngineError::Resolution { .. } => "RESOLUTION_ERROR",
                EngineError::InvalidYield { .. } => "INVALID_YIELD",
                EngineError::InvalidLaborTime { .. } => "INVALID_LABOR_TIME",
                EngineError::InvalidMargin { .. } => "INVALID_MARGIN",
                EngineError::DivisionByZero => "DIVISION_BY_ZERO",
                EngineError::InvalidPackageSize { .. } => "INVALID_PACKAGE_SIZE",
                EngineError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            },
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::ValidationError { .. }
            | ApiError::Calculation(_) => {
                ErrorKind::BadRequest
            }
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::MaterialInUse { .. } | ApiError::BusinessRuleViolation(_) => ErrorKind::Conflict,
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => ErrorKind::Internal,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let violations = match self {
            ApiError::ValidationError { violations, .. } => violations.clone(),
            _ => Vec::new(),
        };
        ErrorResponse {
            code: self.code().to_string(),
            kind: self.kind(),
            message: self.to_string(),
            violations,
        }
    }
}

// ==========================================
// From RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={}) does not exist", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("database lock poisoned: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key constraint violated: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("stored value invalid ({}): {}", field, message))
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// Validation violation detail
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationViolation {
    pub field: String,
    pub reason: String,
}

impl ValidationViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error body handed to callers (CLI stderr, or any transport).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ValidationViolation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_conversion() {
        let api_err: ApiError = RepositoryError::not_found("Recipe", "R001").into();
        match &api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Recipe"));
                assert!(msg.contains("R001"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(api_err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_repository_error_kinds() {
        let cases = vec![
            (RepositoryError::LockError("poisoned".to_string()), "DATABASE_CONNECTION_ERROR", ErrorKind::Internal),
            (RepositoryError::DatabaseQueryError("syntax".to_string()), "DATABASE_ERROR", ErrorKind::Internal),
            (RepositoryError::UniqueConstraintViolation("materials.id".to_string()), "BUSINESS_RULE_VIOLATION", ErrorKind::Conflict),
            (RepositoryError::ForeignKeyViolation("recipe_materials".to_string()), "BUSINESS_RULE_VIOLATION", ErrorKind::Conflict),
            (
                RepositoryError::FieldValueError {
                    field: "column 2".to_string(),
                    message: "bad unit".to_string(),
                },
                "DATABASE_ERROR",
                ErrorKind::Internal,
            ),
        ];
        for (repo_err, code, kind) in cases {
            let api_err: ApiError = repo_err.into();
            assert_eq!(api_err.code(), code);
            assert_eq!(api_err.kind(), kind);
        }
    }

    #[test]
    fn test_engine_errors_are_bad_requests() {
        let api_err: ApiError = EngineError::Resolution {
            recipe_id: "R1".to_string(),
            material_id: "M9".to_string(),
        }
        .into();
        assert_eq!(api_err.code(), "RESOLUTION_ERROR");
        assert_eq!(api_err.kind(), ErrorKind::BadRequest);

        let api_err: ApiError = EngineError::DivisionByZero.into();
        assert_eq!(api_err.code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_material_in_use_is_conflict() {
        let err = ApiError::MaterialInUse {
            material_id: "M1".to_string(),
            reference_count: 2,
        };
        let response = err.to_response();
        assert_eq!(response.code, "MATERIAL_IN_USE");
        assert_eq!(response.kind, ErrorKind::Conflict);
        assert!(response.message.contains("M1"));
        assert!(response.violations.is_empty());
    }

    #[test]
    fn test_validation_error_carries_violations() {
        let err = ApiError::ValidationError {
            reason: "1 invalid field(s)".to_string(),
            violations: vec![ValidationViolation::new("yield", "must be greater than 0")],
        };
        let response = err.to_response();
        assert_eq!(response.kind, ErrorKind::BadRequest);
        assert_eq!(response.violations.len(), 1);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], "VALIDATION_ERROR");
        assert_eq!(value["kind"], "BAD_REQUEST");
        assert_eq!(value["violations"][0]["field"], "yield");
    }
}
