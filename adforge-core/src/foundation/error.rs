/// Convenience result type used across the engine.
pub type AdforgeResult<T> = Result<T, AdforgeError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdforgeError {
    /// Malformed or structurally invalid campaign brief input.
    #[error("brief validation error: {0}")]
    BriefValidation(String),

    /// A strict brand or legal gate blocked the run.
    #[error("compliance violation: {message}")]
    Compliance {
        /// Summary of the gate that failed.
        message: String,
        /// Individual rule failures, human readable.
        violations: Vec<String>,
    },

    /// Required configuration (policy files, run modes) missing or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A generative backend failed to produce an image.
    #[error("provider error: {0}")]
    Provider(String),

    /// Invalid data encountered outside brief parsing.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdforgeError {
    /// Build an [`AdforgeError::BriefValidation`] value.
    pub fn brief_validation(msg: impl Into<String>) -> Self {
        Self::BriefValidation(msg.into())
    }

    /// Build an [`AdforgeError::Compliance`] value.
    pub fn compliance(message: impl Into<String>, violations: Vec<String>) -> Self {
        Self::Compliance {
            message: message.into(),
            violations,
        }
    }

    /// Build an [`AdforgeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`AdforgeError::Provider`] value.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Build an [`AdforgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
