use std::string::FromUtf8Error;

/// Errors produced while parsing an `Authorization` header value.
///
/// These never reach the client. The authorizer folds every variant into the same
/// unauthorized response. The offending payload is kept in `value` but left out of the
/// `Display` output, which ends up in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid basic auth encoding: {reason}")]
    InvalidEncoding {
        value: String,
        #[source]
        reason: EncodingError,
    },
    #[error("Basic auth credentials lack the `:` separator")]
    MalformedCredentials { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
}
