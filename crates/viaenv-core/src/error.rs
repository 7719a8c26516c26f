//! Error types for `viaenv-core`.
//!
//! Validation errors carry the offending input so the form that produced it
//! can echo it back next to the message.

/// Errors from validating user-supplied form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{field} is required")]
    Empty { field: &'static str },

    /// The input is neither an IP address nor a CIDR network.
    #[error("'{input}' is not a valid IP address or CIDR range: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// A free-text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Errors from parsing a configuration value into a core type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The theme name is not one of the known variants.
    #[error("unknown theme '{0}', expected 'light' or 'dark'")]
    UnknownTheme(String),

    /// The sort key is not one the page offers.
    #[error("unknown sort key '{0}', expected 'name' or 'updated'")]
    UnknownSort(String),
}
