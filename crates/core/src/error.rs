#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let err = CoreError::Validation("TRENDING_LIMIT must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: TRENDING_LIMIT must be at least 1"
        );
    }

    #[test]
    fn display_conflict() {
        let err = CoreError::Conflict("already started".into());
        assert_eq!(err.to_string(), "Conflict: already started");
    }
}
