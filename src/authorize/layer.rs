use tower_layer::Layer;

use crate::{config::AuthConfig, header::DefaultHeaderExtractor};

use super::{authorizer::Authorizer, service::AuthorizationService};

#[derive(Debug)]
pub struct AuthorizationLayer<H = DefaultHeaderExtractor> {
    authorizer: Authorizer<H>,
}

impl AuthorizationLayer {
    pub fn new(config: AuthConfig) -> Self {
        Self::from_authorizer(Authorizer::new(config))
    }
}

impl<H> AuthorizationLayer<H> {
    pub const fn from_authorizer(authorizer: Authorizer<H>) -> Self {
        Self { authorizer }
    }
}

impl<H> Clone for AuthorizationLayer<H> {
    fn clone(&self) -> Self {
        Self {
            authorizer: self.authorizer.clone(),
        }
    }
}

impl<S, H> Layer<S> for AuthorizationLayer<H> {
    type Service = AuthorizationService<S, H>;

    fn layer(&self, service: S) -> Self::Service {
        AuthorizationService::new(service, self.authorizer.clone())
    }
}
