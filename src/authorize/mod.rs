mod authorizer;
mod layer;
mod service;
mod unauthorized;

pub use authorizer::{AuthorizeError, Authorizer, AuthorizerInner};
pub use layer::AuthorizationLayer;
pub use service::AuthorizationService;
pub use unauthorized::{Unauthorized, UNAUTHORIZED_BODY};
