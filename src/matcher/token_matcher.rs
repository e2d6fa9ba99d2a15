use crate::token::{Credential, Token};

use super::or::Or;

/// Decides whether a parsed [`Token`] is authorized by the configured allow-list.
///
/// Matchers are pure and stateless across calls. Closures with the signature
/// `Fn(&[Credential], &Token) -> bool` are matchers too.
#[cfg_attr(test, mockall::automock)]
pub trait Matcher {
    fn matches(&self, credentials: &[Credential], token: &Token) -> bool;
}

pub trait MatcherExt: Sized + Matcher {
    /// Authorizes if either `self` or `other` does. `other` is not evaluated if `self` matches.
    fn or<M>(self, other: M) -> Or<Self, M>;
}

impl<T> MatcherExt for T
where
    T: Sized + Matcher,
{
    fn or<M>(self, other: M) -> Or<Self, M> {
        Or::new(self, other)
    }
}

impl<F> Matcher for F
where
    F: Fn(&[Credential], &Token) -> bool,
{
    fn matches(&self, credentials: &[Credential], token: &Token) -> bool {
        self(credentials, token)
    }
}
