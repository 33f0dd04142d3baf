//! Error taxonomy shared by the library and the console front-end.

/// Everything that can go wrong while analyzing or persisting a directive.
///
/// Only `Configuration`, `Inference` and `InvalidInput` ever reach a caller.
/// The storage variants are produced inside the gateway, logged as warnings
/// and turned into `false` / empty results there.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// Required secret missing or unreadable secrets file
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network, timeout or non-2xx from the inference endpoint
    #[error("AI 분석 오류: {0}")]
    Inference(String),

    /// Write to a team endpoint failed
    #[error("Google Sheets 저장 실패: {0}")]
    StorageWrite(String),

    /// Read from a team endpoint failed or returned garbage
    #[error("히스토리 로드 실패: {0}")]
    StorageRead(String),

    /// Missing team selection or blank message
    #[error("{0}")]
    InvalidInput(String),
}

impl DirectiveError {
    /// Exit code used by the console front-end.
    pub fn exit_code(&self) -> i32 {
        match self {
            DirectiveError::Configuration(_) | DirectiveError::InvalidInput(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_split_usage_from_runtime() {
        assert_eq!(DirectiveError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(DirectiveError::InvalidInput("x".into()).exit_code(), 2);
        assert_eq!(DirectiveError::Inference("x".into()).exit_code(), 1);
    }

    #[test]
    fn display_keeps_cause() {
        let err = DirectiveError::Inference("HTTP 500".into());
        assert!(err.to_string().contains("HTTP 500"));
    }
}
