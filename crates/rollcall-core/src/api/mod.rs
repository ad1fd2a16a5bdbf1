//! Remote sign-up board API.
//!
//! [`BoardApi`] is the seam between the session/roster state machine and the
//! network. [`HttpBoardApi`] is the production implementation; tests plug in
//! fakes.

mod http;

use std::future::Future;

pub use http::HttpBoardApi;
use serde::Deserialize;
use thiserror::Error;

use crate::activity::Activities;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-OK status.
    #[error("request rejected (HTTP {status})")]
    Rejected { status: u16, detail: Option<String> },

    /// The request never produced a usable response (connection, timeout, decode).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be built.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Server-supplied `detail`, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) | ApiError::Url(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

/// `GET /auth/verify` success payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    pub teacher_name: String,
}

/// `POST /auth/login` success payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub teacher_name: String,
}

/// Success payload of the signup and unregister endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Client for the sign-up board endpoints.
///
/// Futures are `Send` so effect handlers can spawn them onto the runtime.
pub trait BoardApi {
    /// `GET /auth/verify` with the token as bearer credential.
    fn verify(&self, token: &str) -> impl Future<Output = Result<VerifyResponse, ApiError>> + Send;

    /// `POST /auth/login` with form-encoded credentials.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// `GET /activities`.
    fn list_activities(&self) -> impl Future<Output = Result<Activities, ApiError>> + Send;

    /// `POST /activities/{name}/signup?email=...`.
    fn signup(
        &self,
        token: &str,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<MessageResponse, ApiError>> + Send;

    /// `DELETE /activities/{name}/unregister?email=...`.
    fn unregister(
        &self,
        token: &str,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<MessageResponse, ApiError>> + Send;
}
