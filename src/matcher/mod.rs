mod impls;
mod or;
mod token_matcher;

pub use impls::default_matcher::DefaultMatcher;
pub use or::Or;
pub use token_matcher::{Matcher, MatcherExt};

#[cfg(test)]
pub(crate) use token_matcher::MockMatcher;
