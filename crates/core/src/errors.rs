use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::SubmissionError;
use crate::wizard::WizardError;

/// Application-level error union used at the binary boundary. Each variant
/// maps to a stable error class and exit code for scripted callers.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("integration failure: {0}")]
    Integration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Wizard(_) => "wizard_state",
            Self::Submission(_) => "submission",
            Self::Configuration(_) => "config_validation",
            Self::Integration(_) => "integration",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Wizard(_) => 3,
            Self::Submission(_) | Self::Integration(_) => 4,
            Self::Configuration(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationError;
    use crate::gateway::SubmissionError;
    use crate::wizard::WizardError;

    #[test]
    fn classes_and_exit_codes_are_stable() {
        let submission =
            ApplicationError::from(SubmissionError::Transport("connection reset".to_string()));
        assert_eq!(submission.error_class(), "submission");
        assert_eq!(submission.exit_code(), 4);

        let wizard = ApplicationError::from(WizardError::AlreadySubmitted {
            quote_id: "Q-9".to_string(),
        });
        assert_eq!(wizard.error_class(), "wizard_state");
        assert_eq!(wizard.exit_code(), 3);
    }
}
