//! `Authorization` header parsing.
//!
//! A header made of exactly two whitespace separated fields is read as `<scheme> <payload>`.
//! Anything else is kept verbatim as a bare token. Only the `basic` scheme is decoded.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::{
    error::{EncodingError, ParseError},
    token::Token,
};

const BASIC: &str = "basic";

/// Standard alphabet, accepting payloads with or without padding and with non-zero
/// trailing bits in the last symbol.
const BASIC_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[tracing::instrument(skip_all)]
pub fn parse_authorization_header(header: &str) -> Result<Token, ParseError> {
    let mut fields = header.split_whitespace();

    let (scheme, payload) = match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(payload), None) => (scheme, payload),
        _ => return Ok(Token::bare(header)),
    };

    let token = Token::new(scheme, payload);

    if token.scheme() != BASIC {
        return Ok(token);
    }

    let decoded = decode_basic_auth(payload)?;

    Ok(Token::new(BASIC, decoded))
}

/// Decodes a basic auth payload into its `user:password` text.
pub fn decode_basic_auth(encoded: &str) -> Result<String, ParseError> {
    let decoded = BASIC_ENGINE
        .decode(encoded)
        .map_err(|err| ParseError::InvalidEncoding {
            value: encoded.to_string(),
            reason: err.into(),
        })?;

    if !decoded.contains(&b':') {
        return Err(ParseError::MalformedCredentials {
            value: encoded.to_string(),
        });
    }

    String::from_utf8(decoded).map_err(|err| ParseError::InvalidEncoding {
        value: encoded.to_string(),
        reason: EncodingError::Utf8(err),
    })
}
