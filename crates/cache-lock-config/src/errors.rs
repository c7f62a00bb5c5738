use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// Unknown backend driver.
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },

    /// Unparsable or out-of-range value.
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}
