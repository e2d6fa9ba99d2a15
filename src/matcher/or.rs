use crate::token::{Credential, Token};

use super::token_matcher::Matcher;

#[derive(Debug, Clone)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub const fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Matcher for Or<L, R>
where
    L: Matcher,
    R: Matcher,
{
    fn matches(&self, credentials: &[Credential], token: &Token) -> bool {
        self.left.matches(credentials, token) || self.right.matches(credentials, token)
    }
}
