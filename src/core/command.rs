use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Declined {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Database { message, .. } => { message }
            CommandError::Declined { message, .. } => { message }
            CommandError::DuplicateKey { message } => { message }
            CommandError::NotFound { message } => { message }
            CommandError::Runtime { message, .. } => { message }
            CommandError::Serialization { message } => { message }
            CommandError::Validation { message, .. } => { message }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::NotGranted { message, reason_code } => {
                CommandError::Declined { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_convert_library_error() {
        let err = CommandError::from(LibraryError::not_granted("Payment failed: Insufficient funds", None));
        assert!(matches!(err, CommandError::Declined { .. }));
        assert_eq!("Payment failed: Insufficient funds", err.message());

        let err = CommandError::from(LibraryError::unavailable("busy", None, true));
        assert!(matches!(err, CommandError::Runtime { retryable: true, .. }));

        let err = CommandError::from(LibraryError::runtime("boom", None));
        assert!(matches!(err, CommandError::Runtime { retryable: false, .. }));

        let err = CommandError::from(LibraryError::not_found("Book not found."));
        assert_eq!(CommandError::NotFound { message: "Book not found.".to_string() }, err);
    }
}
