//! axum integration
//!
//! [`Decoded<T>`] buffers the request body, dispatches it through the
//! [`Registry`] in the router state and yields the decoded value.
//! [`DefaultDecoded<T>`] does the same with the process-wide registry.
//!
//! ```rust,ignore
//! async fn login(Decoded(login): Decoded<Login>) -> String {
//!     format!("username: {}", login.username)
//! }
//!
//! let app = Router::new()
//!     .route("/login", post(login))
//!     .with_state(Arc::new(Registry::new()));
//! ```

use crate::decode::Validate;
use crate::error::{Error, ErrorKind};
use crate::registry::Registry;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Extractor decoding the body with the registry from router state
#[derive(Debug, Clone, Default)]
pub struct Decoded<T>(pub T);

/// Extractor decoding the body with the process-wide registry
#[derive(Debug, Clone, Default)]
pub struct DefaultDecoded<T>(pub T);

/// Rejection returned when a body cannot be decoded
#[derive(Debug)]
pub enum DecodeRejection {
    /// The body could not be read
    Body(axum::Error),
    /// Dispatch failed
    Dispatch(Error),
}

impl DecodeRejection {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            DecodeRejection::Body(_) => StatusCode::BAD_REQUEST,
            DecodeRejection::Dispatch(err) => match err.kind() {
                ErrorKind::MalformedContentType | ErrorKind::Decode => StatusCode::BAD_REQUEST,
                ErrorKind::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Config | ErrorKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<Error> for DecodeRejection {
    fn from(err: Error) -> Self {
        DecodeRejection::Dispatch(err)
    }
}

impl std::fmt::Display for DecodeRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeRejection::Body(err) => write!(f, "Failed to read request body: {err}"),
            DecodeRejection::Dispatch(err) => write!(f, "{err}"),
        }
    }
}

impl IntoResponse for DecodeRejection {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Decoded<T>
where
    T: DeserializeOwned + Validate + Default + Send,
    S: Send + Sync,
    Arc<Registry>: FromRef<S>,
{
    type Rejection = DecodeRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Arc::<Registry>::from_ref(state);
        decode_request(&registry, req).await.map(Decoded)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for DefaultDecoded<T>
where
    T: DeserializeOwned + Validate + Default + Send,
    S: Send + Sync,
{
    type Rejection = DecodeRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        decode_request(crate::default_registry(), req)
            .await
            .map(DefaultDecoded)
    }
}

/// Buffer an axum request and decode it with `registry`
pub async fn decode_request<T>(registry: &Registry, req: Request) -> Result<T, DecodeRejection>
where
    T: DeserializeOwned + Validate + Default,
{
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, registry.config().max_body_size)
        .await
        .map_err(DecodeRejection::Body)?;

    let mut request = http::Request::from_parts(parts, bytes);
    let mut target = T::default();
    registry.decode(&mut request, &mut target)?;
    Ok(target)
}
