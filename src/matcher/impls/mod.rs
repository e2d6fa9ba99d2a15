pub mod default_matcher;
