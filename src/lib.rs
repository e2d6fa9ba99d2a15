#![deny(unsafe_code, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! `Authorization` header gate for http services built on top of [tower](https://docs.rs/tower/latest/tower/).
//!
//! ```
//! use tower_auth_gate::{authorize::AuthorizationLayer, config::AuthConfig};
//!
//! let layer = AuthorizationLayer::new(AuthConfig::user("Aladdin", "open sesame"));
//! # let _ = layer;
//! ```

pub mod authorize;
pub mod config;
pub mod error;
pub mod header;
pub mod matcher;
pub mod parse;
pub mod token;
