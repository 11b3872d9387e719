//! Resume upload checks, run before any bytes leave the client and again on
//! the server.

use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";

/// Upload ceiling: 5 MiB.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a PDF file")]
    NotPdf { content_type: String },

    #[error("File size must be less than 5MB")]
    TooLarge { size: u64 },

    #[error("File is empty")]
    Empty,
}

/// Accept only non-empty PDFs up to [`MAX_RESUME_BYTES`].
pub fn validate_resume(content_type: &str, size: u64) -> Result<(), UploadError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime != PDF_MIME {
        return Err(UploadError::NotPdf {
            content_type: content_type.to_string(),
        });
    }
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > MAX_RESUME_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}
