use std::{ops::Deref, sync::Arc};

use http::HeaderMap;

use crate::{
    config::AuthConfig,
    error::ParseError,
    header::{DefaultHeaderExtractor, HeaderExtractor},
    parse::parse_authorization_header,
};

use super::{layer::AuthorizationLayer, unauthorized::Unauthorized};

#[derive(Debug)]
pub struct AuthorizerInner<H> {
    header_extractor: H,
    config: AuthConfig,
}

impl<H> AuthorizerInner<H> {
    pub const fn new(header_extractor: H, config: AuthConfig) -> Self {
        Self {
            header_extractor,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Decides whether a request may proceed, based on its `Authorization` header.
///
/// Cheap to clone, the configuration is shared.
#[derive(Debug)]
pub struct Authorizer<H = DefaultHeaderExtractor> {
    inner: Arc<AuthorizerInner<H>>,
}

impl Authorizer {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_header_extractor(DefaultHeaderExtractor::authorization(), config)
    }
}

impl<H> Authorizer<H> {
    pub fn with_header_extractor(header_extractor: H, config: AuthConfig) -> Self {
        Self {
            inner: Arc::new(AuthorizerInner::new(header_extractor, config)),
        }
    }

    pub fn layer(self) -> AuthorizationLayer<H> {
        AuthorizationLayer::from_authorizer(self)
    }

    pub fn unauthorized(&self) -> Unauthorized {
        Unauthorized::new(self.config.realm().to_owned())
    }
}

impl<H> Clone for Authorizer<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H> Deref for Authorizer<H> {
    type Target = AuthorizerInner<H>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<H> Authorizer<H>
where
    H: HeaderExtractor,
    H::Error: std::error::Error,
{
    /// Returns `Ok(())` if the request is authorized.
    ///
    /// With an empty allow-list every request is authorized. Matchers run in the configured
    /// order and the first one that accepts the token wins.
    #[tracing::instrument(skip_all)]
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthorizeError<H::Error>> {
        if self.config.is_disabled() {
            tracing::trace!("No credentials configured, authorization disabled");

            return Ok(());
        }

        let result = self.check(headers);

        match &result {
            Ok(()) => tracing::debug!("Authorized"),
            Err(err) => tracing::warn!(%err, "Unauthorized"),
        }

        result
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), AuthorizeError<H::Error>> {
        let header = self
            .header_extractor
            .extract_header(headers)
            .map_err(AuthorizeError::Header)?;

        let token = parse_authorization_header(header)?;

        let credentials = self.config.credentials();

        let authorized = self
            .config
            .matchers()
            .iter()
            .any(|matcher| matcher.matches(credentials, &token));

        if authorized {
            return Ok(());
        }

        Err(AuthorizeError::NoMatch)
    }

    /// Invokes `next` if the request is authorized, otherwise returns the terminal
    /// [`Unauthorized`] response. `next` is called at most once.
    pub fn handle<T, F>(&self, headers: &HeaderMap, next: F) -> Result<T, Unauthorized>
    where
        F: FnOnce() -> T,
    {
        match self.authorize(headers) {
            Ok(()) => Ok(next()),
            Err(_) => Err(self.unauthorized()),
        }
    }
}

/// Why a request was rejected. Logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizeError<H> {
    #[error("Header extraction error: {0}")]
    Header(#[source] H),
    #[error("Header parse error: {0}")]
    Parse(
        #[source]
        #[from]
        ParseError,
    ),
    #[error("No matcher authorized the token")]
    NoMatch,
}
