use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use http::Request;
use tower::Service;

use crate::header::{DefaultHeaderExtractor, HeaderExtractor};

use super::{authorizer::Authorizer, unauthorized::Unauthorized};

/// Forwards authorized requests unchanged to the inner service and answers every other
/// request with [`Unauthorized`].
#[derive(Debug)]
pub struct AuthorizationService<S, H = DefaultHeaderExtractor> {
    service: S,
    authorizer: Authorizer<H>,
}

impl<S, H> AuthorizationService<S, H> {
    pub const fn new(service: S, authorizer: Authorizer<H>) -> Self {
        Self {
            service,
            authorizer,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

impl<S, H> Clone for AuthorizationService<S, H>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            authorizer: self.authorizer.clone(),
        }
    }
}

impl<S, H, B> Service<Request<B>> for AuthorizationService<S, H>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
    S::Response: From<Unauthorized> + Send + 'static,
    H: HeaderExtractor,
    H::Error: std::error::Error,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        if self.authorizer.authorize(request.headers()).is_ok() {
            return Box::pin(self.service.call(request));
        }

        let response = S::Response::from(self.authorizer.unauthorized());

        Box::pin(async move { Ok(response) })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderValue, Response, StatusCode,
    };
    use tower::{service_fn, Layer, ServiceExt};

    use crate::{
        authorize::{AuthorizationLayer, UNAUTHORIZED_BODY},
        config::{AuthConfig, DEFAULT_REALM},
        test::init_tracing,
        token::Credential,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Calls(Arc<AtomicUsize>);

    impl Calls {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    async fn call(
        config: AuthConfig,
        authorization: Option<&'static str>,
    ) -> (Response<String>, Calls) {
        let calls = Calls::default();

        let next = {
            let calls = calls.clone();

            service_fn(move |request: Request<()>| {
                let calls = calls.clone();

                async move {
                    calls.0.fetch_add(1, Ordering::SeqCst);

                    assert!(request.extensions().is_empty());

                    Ok::<_, Infallible>(Response::new(String::from("Hello")))
                }
            })
        };

        let service = AuthorizationLayer::new(config).layer(next);

        let mut request = Request::builder();

        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let request = request.body(()).expect("Failed to build request");

        let response = service
            .oneshot(request)
            .await
            .expect("Service failed");

        (response, calls)
    }

    fn aladdin() -> AuthConfig {
        AuthConfig::new([Credential::new("basic", "Aladdin:open sesame")])
    }

    #[tokio::test]
    async fn basic_auth_is_forwarded() {
        init_tracing();

        let (response, calls) =
            call(aladdin(), Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")).await;

        assert_eq!(calls.count(), 1);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "Hello");
    }

    #[tokio::test]
    async fn bare_token_is_forwarded() {
        init_tracing();

        let (response, calls) =
            call(AuthConfig::new([Credential::new("", "s3cr3t")]), Some("s3cr3t")).await;

        assert_eq!(calls.count(), 1);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        init_tracing();

        let (response, calls) = call(aladdin(), None).await;

        assert_eq!(calls.count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body(), UNAUTHORIZED_BODY);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static(
                "Basic realm=\"Authorization required:\""
            ))
        );
    }

    #[tokio::test]
    async fn invalid_header_is_rejected() {
        init_tracing();

        let (response, calls) = call(aladdin(), Some("Basic !!!")).await;

        assert_eq!(calls.count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body(), "Unauthorized");
    }

    #[tokio::test]
    async fn custom_realm_is_announced() {
        init_tracing();

        let config = AuthConfig::builder()
            .credential(Credential::bare("s3cr3t"))
            .realm("vault")
            .build();

        let (response, calls) = call(config, Some("Bearer s3cr3t")).await;

        assert_eq!(calls.count(), 0);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Basic realm=\"vault:\""))
        );
    }

    #[tokio::test]
    async fn empty_allow_list_forwards_everything() {
        init_tracing();

        for authorization in [None, Some(""), Some("Basic !!!"), Some("Whut foo")] {
            let (response, calls) = call(AuthConfig::builder().build(), authorization).await;

            assert_eq!(calls.count(), 1);
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(AuthConfig::builder().build().realm(), DEFAULT_REALM);
    }

    #[tokio::test]
    async fn service_is_shared_across_concurrent_requests() {
        init_tracing();

        let calls = Calls::default();

        let next = {
            let calls = calls.clone();

            service_fn(move |_: Request<()>| {
                let calls = calls.clone();

                async move {
                    calls.0.fetch_add(1, Ordering::SeqCst);

                    Ok::<_, Infallible>(Response::new(String::new()))
                }
            })
        };

        let service = AuthorizationLayer::new(AuthConfig::tokens(["s3cr3t"])).layer(next);

        let handles = (0..16)
            .map(|i| {
                let service = service.clone();

                tokio::spawn(async move {
                    let authorization = if i % 2 == 0 { "s3cr3t" } else { "wrong" };

                    let request = Request::builder()
                        .header(AUTHORIZATION, authorization)
                        .body(())
                        .expect("Failed to build request");

                    service
                        .oneshot(request)
                        .await
                        .expect("Service failed")
                        .status()
                })
            })
            .collect::<Vec<_>>();

        let mut unauthorized = 0;

        for handle in handles {
            if handle.await.expect("Task panicked") == StatusCode::UNAUTHORIZED {
                unauthorized += 1;
            }
        }

        assert_eq!(unauthorized, 8);
        assert_eq!(calls.count(), 8);
    }
}
