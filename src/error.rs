//! Error types for the pdfguard library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfguard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while opening or reporting on a document.
///
/// Per-page extraction never surfaces here: a page that cannot be read
/// degrades to sentinel metric bundles and still gets a verdict. The only
/// fallible boundary is opening the document itself (and serializing the
/// response text).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version header is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The document could not be opened by the PDF backend.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be analyzed.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error serializing a response to JSON text.
    #[error("Report serialization error: {0}")]
    Report(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
