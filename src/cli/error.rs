use miette::Diagnostic;
use thiserror::Error;

use crate::content::{ClientError, ErrorBody, UploadError};
use crate::store::StoreError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to connect to API server")]
    #[diagnostic(
        code(folio::cli::connection_failed),
        help(
            "Is the server running? Try: folio serve\nOr set FOLIO_API_URL to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from API server: {message}")]
    #[diagnostic(
        code(folio::cli::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(folio::cli::api_error))]
    ApiError { status: u16, message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(folio::cli::unauthorized),
        help("Run `folio login` and export the printed FOLIO_TOKEN, or pass --token.")
    )]
    Unauthorized { message: String },

    #[error("{message}")]
    #[diagnostic(code(folio::cli::rejected))]
    Rejected { message: String },

    #[error("{0}")]
    #[diagnostic(code(folio::cli::not_found))]
    NotFound(String),

    #[error("Refusing to delete '{label}' without --force")]
    #[diagnostic(
        code(folio::cli::confirmation_required),
        help("Deletion cannot be undone. Re-run with --force to confirm.")
    )]
    ConfirmationRequired { label: String },

    #[error(transparent)]
    #[diagnostic(code(folio::cli::upload))]
    Upload(#[from] UploadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(folio::cli::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Build an error from a non-success response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.to_string());
        if status == 401 {
            CliError::Unauthorized { message }
        } else {
            CliError::ApiError { status, message }
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::ConnectionFailed { source: e }
        } else {
            CliError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

impl From<CliError> for ClientError {
    fn from(e: CliError) -> Self {
        match e {
            CliError::ApiError { status, message } => ClientError::Server { status, message },
            CliError::Unauthorized { message } => ClientError::Server {
                status: 401,
                message,
            },
            CliError::InvalidResponse { message } => ClientError::Deserialization(message),
            other => ClientError::Network(other.to_string()),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
