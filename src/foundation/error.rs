pub type ScrollworkResult<T> = Result<T, ScrollworkError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollworkError {
    /// A value handed straight to the API is malformed: thresholds, lengths, colors, recipes,
    /// form fields.
    #[error("validation error: {0}")]
    Validation(String),

    /// A timeline or scrub binding was misused at runtime.
    #[error("animation error: {0}")]
    Animation(String),

    /// A page or scroll configuration is unreadable or inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// JSON that does not parse into the expected shape.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollworkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
