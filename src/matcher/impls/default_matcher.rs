use crate::{
    matcher::Matcher,
    token::{Credential, Token},
};

/// Authorizes a token if some allow-list entry has the same scheme (ignoring case) and
/// exactly the same value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

impl Matcher for DefaultMatcher {
    fn matches(&self, credentials: &[Credential], token: &Token) -> bool {
        credentials
            .iter()
            .any(|credential| credential.matches(token))
    }
}
