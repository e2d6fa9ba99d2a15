use std::{borrow::Cow, sync::Arc};

use serde::Deserialize;

use crate::{
    matcher::{DefaultMatcher, Matcher},
    token::{BasicAuthUser, Credential},
};

pub const DEFAULT_REALM: &str = "Authorization required";

pub type SharedMatcher = Arc<dyn Matcher + Send + Sync>;

/// Allow-list, matchers and realm of an authorizer.
///
/// Built once and shared read-only by every request. An empty allow-list disables the
/// authorization check entirely.
#[derive(Clone)]
pub struct AuthConfig {
    credentials: Vec<Credential>,
    matchers: Vec<SharedMatcher>,
    realm: Cow<'static, str>,
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("credentials", &self.credentials)
            .field("matchers", &self.matchers.len())
            .field("realm", &self.realm)
            .finish()
    }
}

impl AuthConfig {
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self::builder().credentials(credentials).build()
    }

    pub fn user(
        username: impl Into<Cow<'static, str>>,
        password: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::users([BasicAuthUser::new(username, password)])
    }

    pub fn users<U>(users: impl IntoIterator<Item = U>) -> Self
    where
        U: Into<BasicAuthUser>,
    {
        Self::new(users.into_iter().map(|user| Credential::from(user.into())))
    }

    /// Allows the given bare tokens, sent without a scheme prefix.
    pub fn tokens<T>(tokens: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Self::new(tokens.into_iter().map(Credential::bare))
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn matchers(&self) -> &[SharedMatcher] {
        &self.matchers
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn is_disabled(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[derive(Default)]
pub struct AuthConfigBuilder {
    credentials: Vec<Credential>,
    matchers: Vec<SharedMatcher>,
    realm: Option<Cow<'static, str>>,
}

impl core::fmt::Debug for AuthConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfigBuilder")
            .field("credentials", &self.credentials)
            .field("matchers", &self.matchers.len())
            .field("realm", &self.realm)
            .finish()
    }
}

impl AuthConfigBuilder {
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credentials.push(credential);
        self
    }

    pub fn credentials(mut self, credentials: impl IntoIterator<Item = Credential>) -> Self {
        self.credentials.extend(credentials);
        self
    }

    /// Appends a matcher. Matchers are evaluated in the order they were added.
    pub fn matcher<M>(mut self, matcher: M) -> Self
    where
        M: Matcher + Send + Sync + 'static,
    {
        self.matchers.push(Arc::new(matcher));
        self
    }

    pub fn realm(mut self, realm: impl Into<Cow<'static, str>>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn build(self) -> AuthConfig {
        let matchers = if self.matchers.is_empty() {
            vec![Arc::new(DefaultMatcher) as SharedMatcher]
        } else {
            self.matchers
        };

        let realm = match self.realm {
            Some(realm) if !realm.is_empty() => realm,
            _ => Cow::Borrowed(DEFAULT_REALM),
        };

        AuthConfig {
            credentials: self.credentials,
            matchers,
            realm,
        }
    }
}

/// Deserializable credential settings, e.g. loaded from a configuration file.
///
/// ```
/// use tower_auth_gate::config::AuthSettings;
///
/// let settings: AuthSettings = serde_json::from_str(
///     r#"{
///         "realm": "private",
///         "users": [{ "username": "foo", "password": "bar" }],
///         "tokens": ["s3cr3t"],
///         "credentials": [{ "scheme": "Bearer", "value": "s3cr3t" }]
///     }"#,
/// )
/// .unwrap();
///
/// let config = settings.into_config();
///
/// assert_eq!(config.credentials().len(), 3);
/// assert_eq!(config.realm(), "private");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub realm: Option<String>,
    pub credentials: Vec<Credential>,
    pub users: Vec<BasicAuthUser>,
    pub tokens: Vec<String>,
}

impl AuthSettings {
    pub fn into_config(self) -> AuthConfig {
        self.into_builder().build()
    }

    /// Starts a builder from these settings, so custom matchers can still be added.
    pub fn into_builder(self) -> AuthConfigBuilder {
        let builder = AuthConfig::builder()
            .credentials(self.credentials)
            .credentials(self.users.into_iter().map(Credential::from))
            .credentials(self.tokens.into_iter().map(Credential::bare));

        match self.realm {
            Some(realm) => builder.realm(realm),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;

    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = AuthConfig::builder().build();

        assert!(config.is_disabled());
        assert_eq!(config.realm(), DEFAULT_REALM);
        assert_eq!(config.matchers().len(), 1);
        assert!(!config.matchers()[0].matches(config.credentials(), &Token::bare("")));
    }

    #[test]
    fn empty_realm_falls_back_to_default() {
        let config = AuthConfig::builder().realm("").build();

        assert_eq!(config.realm(), DEFAULT_REALM);
    }

    #[test]
    fn custom_matchers_replace_the_default() {
        let config = AuthConfig::builder()
            .credential(Credential::bare("s3cr3t"))
            .matcher(|_: &[Credential], token: &Token| token.value() == "anything")
            .build();

        assert_eq!(config.matchers().len(), 1);
        assert!(!config.matchers()[0].matches(config.credentials(), &Token::bare("s3cr3t")));
    }

    #[test]
    fn users_become_basic_credentials() {
        let config = AuthConfig::users([("foo", "bar"), ("baz", "")]);

        assert_eq!(
            config.credentials(),
            &[Credential::basic("foo", "bar"), Credential::basic("baz", "")]
        );
    }

    #[test]
    fn single_user() {
        let config = AuthConfig::user("foo", "bar");

        assert_eq!(config.credentials(), &[Credential::new("basic", "foo:bar")]);
    }

    #[test]
    fn tokens_become_bare_credentials() {
        let config = AuthConfig::tokens(["s3cr3t", "other"]);

        assert_eq!(
            config.credentials(),
            &[Credential::bare("s3cr3t"), Credential::bare("other")]
        );
    }

    #[test]
    fn settings_are_deserialized() {
        let settings: AuthSettings = serde_json::from_str(
            r#"{
                "users": [{ "user": "foo", "password": "bar" }],
                "credentials": [{ "value": "opaque" }]
            }"#,
        )
        .expect("Failed to deserialize settings");

        let config = settings.into_config();

        assert_eq!(config.realm(), DEFAULT_REALM);
        assert_eq!(
            config.credentials(),
            &[Credential::bare("opaque"), Credential::basic("foo", "bar")]
        );
    }
}
