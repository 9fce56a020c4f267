use std::fmt;

/// Status and body text of the single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// What a run ended with, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    ImageUrl(String),
    ApiError { status: u16, body: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::ImageUrl(_))
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::ImageUrl(url) => write!(f, "Image URL: {}", url),
            RunOutcome::ApiError { body, .. } => write!(f, "Error: {}", body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_lines() {
        let ok = RunOutcome::ImageUrl("http://x/y.png".into());
        assert_eq!(ok.to_string(), "Image URL: http://x/y.png");
        assert!(ok.is_success());

        let err = RunOutcome::ApiError {
            status: 502,
            body: "{\"detail\":\"upstream\"}".into(),
        };
        assert_eq!(err.to_string(), "Error: {\"detail\":\"upstream\"}");
        assert!(!err.is_success());
    }
}
