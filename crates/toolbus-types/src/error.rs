use thiserror::Error;

/// Errors raised by a tool's `execute`.
///
/// These never terminate a connection: the dispatcher reports them to the
/// client as an `error` frame and continues reading. Protocol-level problems
/// (malformed frames, unknown types, unknown tools) are not Rust errors at
/// all -- the dispatcher answers them directly.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' must be {expected}")]
    InvalidParameter { name: String, expected: String },

    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl ToolError {
    /// Convenience constructor for [`ToolError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, expected: impl Into<String>) -> Self {
        ToolError::InvalidParameter {
            name: name.into(),
            expected: expected.into(),
        }
    }
}
