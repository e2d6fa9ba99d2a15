use std::borrow::Cow;

use serde::Deserialize;

/// Normalized credential extracted from an `Authorization` header.
///
/// `scheme` is always lower-cased and empty when the header carried no scheme prefix.
/// For the `basic` scheme `value` holds the decoded `user:password` text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    scheme: String,
    value: String,
}

impl core::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("scheme", &self.scheme)
            .field("value", &"...")
            .finish()
    }
}

impl Token {
    pub fn new(scheme: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            scheme: scheme.as_ref().to_lowercase(),
            value: value.into(),
        }
    }

    /// A token without a scheme prefix.
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            scheme: String::new(),
            value: value.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Allow-list entry configured by the operator.
///
/// Same shape as [`Token`], but the scheme is stored as supplied. Matchers compare it
/// case-insensitively.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub scheme: Cow<'static, str>,
    pub value: Cow<'static, str>,
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("scheme", &self.scheme)
            .field("value", &"...")
            .finish()
    }
}

impl Credential {
    pub fn new(
        scheme: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }

    /// `basic` entry with the value `user:password`.
    pub fn basic(user: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self::new(
            "basic",
            format!("{}:{}", user.as_ref(), password.as_ref()),
        )
    }

    /// Schemeless entry, matched against headers that carry a bare token.
    pub fn bare(value: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", value)
    }

    pub fn matches(&self, token: &Token) -> bool {
        self.scheme.to_lowercase() == token.scheme() && self.value == token.value()
    }
}

impl From<BasicAuthUser> for Credential {
    fn from(user: BasicAuthUser) -> Self {
        Self::basic(user.username, user.password)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct BasicAuthUser {
    #[serde(alias = "user")]
    pub username: Cow<'static, str>,
    pub password: Cow<'static, str>,
}

impl core::fmt::Debug for BasicAuthUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthUser")
            .field("username", &self.username)
            .field("password", &"...")
            .finish()
    }
}

impl BasicAuthUser {
    pub fn new(
        username: impl Into<Cow<'static, str>>,
        password: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl<U, P> From<(U, P)> for BasicAuthUser
where
    U: Into<Cow<'static, str>>,
    P: Into<Cow<'static, str>>,
{
    fn from(value: (U, P)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_scheme_is_lower_cased() {
        let token = Token::new("BeArEr", "AbC");

        assert_eq!(token.scheme(), "bearer");
        assert_eq!(token.value(), "AbC");
    }

    #[test]
    fn credential_scheme_is_compared_case_insensitively() {
        let credential = Credential::new("Bearer", "s3cr3t");

        assert!(credential.matches(&Token::new("bearer", "s3cr3t")));
        assert!(!credential.matches(&Token::new("bearer", "S3CR3T")));
        assert!(!credential.matches(&Token::bare("s3cr3t")));
    }

    #[test]
    fn credential_value_is_not_trimmed() {
        let credential = Credential::bare("s3cr3t ");

        assert!(!credential.matches(&Token::bare("s3cr3t")));
    }

    #[test]
    fn basic_auth_user_becomes_basic_credential() {
        let credential: Credential = BasicAuthUser::from(("Aladdin", "open sesame")).into();

        assert_eq!(credential.scheme, "basic");
        assert_eq!(credential.value, "Aladdin:open sesame");
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug = format!("{:?}", Credential::basic("user", "hunter2"));

        assert!(!debug.contains("hunter2"));
    }
}
