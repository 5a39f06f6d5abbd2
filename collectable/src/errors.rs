use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::Shared;

/// Error kinds for collection operations
///
/// Every failure raised by a collection, a primitive or a factory builder carries
/// exactly one of these kinds, enabling callers to match on the category of failure
/// instead of parsing messages.
///
/// # Examples
///
/// ```rust
/// use collectable::errors::{CollectionError, CollectionResult, ErrorKind};
///
/// fn example() -> CollectionResult<()> {
///     Err(CollectionError::new("Key 7 does not exist", ErrorKind::KeyNotFound))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::KeyNotFound);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Key errors
    /// The key is not of the type the collection accepts
    InvalidKeyType,
    /// The key does not exist in the collection
    KeyNotFound,
    /// The key is already present and the operation refuses to overwrite it
    KeyAlreadyExists,

    // Shape errors
    /// Paired inputs (keys and values, records and columns) have different lengths
    SizeMismatch,
    /// Range bounds or step are inconsistent
    InvalidRange,
    /// More items were requested than the collection holds
    CapacityExceeded,
    /// An argument is malformed for the requested operation
    InvalidArgument,

    // Internal errors
    /// The deferred store was accessed in a way the collection does not allow (a bug)
    InvalidAttribute,
    /// Error encoding or decoding a collection
    EncodingError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidKeyType => write!(f, "Invalid key type"),
            ErrorKind::KeyNotFound => write!(f, "Key not found"),
            ErrorKind::KeyAlreadyExists => write!(f, "Key already exists"),
            ErrorKind::SizeMismatch => write!(f, "Size mismatch"),
            ErrorKind::InvalidRange => write!(f, "Invalid range"),
            ErrorKind::CapacityExceeded => write!(f, "Capacity exceeded"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::InvalidAttribute => write!(f, "Invalid attribute"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom collection error type.
///
/// `CollectionError` encapsulates the error message, its kind and an optional cause.
/// It supports error chaining and keeps the backtrace of the point where it was raised.
///
/// # Examples
///
/// ```rust
/// use collectable::errors::{CollectionError, ErrorKind};
///
/// // Create a simple error
/// let err = CollectionError::new("Key 3 does not exist", ErrorKind::KeyNotFound);
///
/// // Create an error with a cause
/// let cause = CollectionError::new("lengths differ", ErrorKind::SizeMismatch);
/// let err = CollectionError::new_with_cause(
///     "Failed to fill collection",
///     ErrorKind::SizeMismatch,
///     cause,
/// );
/// assert!(err.cause().is_some());
/// ```
///
/// # Type alias
///
/// The `CollectionResult<T>` type alias is equivalent to `Result<T, CollectionError>` and is
/// used throughout the crate for operations that can fail.
#[derive(Clone)]
pub struct CollectionError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CollectionError>>,
    backtrace: Shared<Backtrace>,
}

impl CollectionError {
    /// Creates a new `CollectionError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Shared::new(Backtrace::new_unresolved()),
        }
    }

    /// Creates a new `CollectionError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CollectionError) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Shared::new(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CollectionError> {
        self.cause.as_deref()
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(
                f,
                "{} ({})\nCaused by: {:?}",
                self.message, self.error_kind, cause
            ),
            None => self.backtrace.write_with(|backtrace| {
                backtrace.resolve();
                write!(f, "{} ({})\n{:?}", self.message, self.error_kind, backtrace)
            }),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for collection operations.
///
/// `CollectionResult<T>` is shorthand for `Result<T, CollectionError>`.
pub type CollectionResult<T> = Result<T, CollectionError>;

impl de::Error for CollectionError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectionError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl ser::Error for CollectionError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectionError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        CollectionError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<bincode::error::EncodeError> for CollectionError {
    fn from(err: bincode::error::EncodeError) -> Self {
        CollectionError::new(&format!("Encoding error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<bincode::error::DecodeError> for CollectionError {
    fn from(err: bincode::error::DecodeError) -> Self {
        CollectionError::new(&format!("Decoding error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<std::fmt::Error> for CollectionError {
    fn from(err: std::fmt::Error) -> Self {
        CollectionError::new(&format!("Formatting error: {}", err), ErrorKind::InternalError)
    }
}

impl From<String> for CollectionError {
    fn from(msg: String) -> Self {
        CollectionError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CollectionError {
    fn from(msg: &str) -> Self {
        CollectionError::new(msg, ErrorKind::InternalError)
    }
}
