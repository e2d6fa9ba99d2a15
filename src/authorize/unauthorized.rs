use std::borrow::Cow;

use http::{header::WWW_AUTHENTICATE, HeaderValue, Response, StatusCode};

pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// Terminal response written when a request is not authorized.
///
/// Carries no detail about why authorization failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unauthorized {
    realm: Cow<'static, str>,
}

impl Unauthorized {
    pub fn new(realm: impl Into<Cow<'static, str>>) -> Self {
        Self {
            realm: realm.into(),
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// `WWW-Authenticate` value, if a realm is set.
    pub fn challenge(&self) -> Option<String> {
        if self.realm.is_empty() {
            return None;
        }

        Some(format!("Basic realm=\"{}:\"", self.realm))
    }
}

impl<B> From<Unauthorized> for Response<B>
where
    B: From<&'static str>,
{
    fn from(value: Unauthorized) -> Self {
        let mut response = Response::new(B::from(UNAUTHORIZED_BODY));

        *response.status_mut() = StatusCode::UNAUTHORIZED;

        if let Some(challenge) = value.challenge() {
            match HeaderValue::from_str(&challenge) {
                Ok(challenge) => {
                    response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
                }
                Err(err) => {
                    tracing::warn!(%err, realm = %value.realm, "Invalid realm, skipping challenge");
                }
            }
        }

        response
    }
}

#[cfg(feature = "axum")]
mod axum {
    use axum::response::{IntoResponse, Response};

    use super::Unauthorized;

    impl IntoResponse for Unauthorized {
        fn into_response(self) -> Response {
            Response::from(self)
        }
    }
}
