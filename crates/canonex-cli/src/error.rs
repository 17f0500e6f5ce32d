use canonex_core::{ExchangeError, ExchangeErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] canonex_core::ValidationError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Exchange(error) => match error.kind() {
                ExchangeErrorKind::MissingCredentials | ExchangeErrorKind::UnsupportedEndpoint => 2,
                _ => 3,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use canonex_core::{ApiScope, HttpMethod, ValidationError};

    use super::*;

    #[test]
    fn usage_problems_exit_with_two() {
        let validation = CliError::from(ValidationError::InvalidParam {
            value: String::from("depth"),
        });
        assert_eq!(validation.exit_code(), 2);

        let missing = CliError::from(ExchangeError::missing_credentials("apiKey"));
        assert_eq!(missing.exit_code(), 2);

        let undeclared = CliError::from(ExchangeError::unsupported_endpoint(
            ApiScope::Public,
            HttpMethod::Delete,
            "time",
        ));
        assert_eq!(undeclared.exit_code(), 2);
    }

    #[test]
    fn upstream_failures_exit_with_three() {
        let error = CliError::from(ExchangeError::upstream(502, "bad gateway"));
        assert_eq!(error.exit_code(), 3);
    }
}
