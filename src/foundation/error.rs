/// Convenience result alias used throughout the crate.
pub type EtherResult<T> = Result<T, EtherError>;

/// Crate-wide error type.
///
/// The contour generator itself never fails; errors come from the edges of the system (config,
/// outline sources, rendering surfaces, encoders).
#[derive(thiserror::Error, Debug)]
pub enum EtherError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Outline source missing, unparseable or degenerate.
    #[error("outline error: {0}")]
    Outline(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame capture / encoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other error, usually IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EtherError {
    /// Build a [`EtherError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EtherError::Outline`].
    pub fn outline(msg: impl Into<String>) -> Self {
        Self::Outline(msg.into())
    }

    /// Build a [`EtherError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`EtherError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            EtherError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(EtherError::outline("x").to_string().contains("outline error:"));
        assert!(EtherError::render("x").to_string().contains("render error:"));
        assert!(EtherError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = EtherError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
