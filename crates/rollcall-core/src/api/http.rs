use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, BoardApi, LoginResponse, MessageResponse, VerifyResponse};
use crate::activity::Activities;

/// Standard User-Agent header for rollcall API requests.
pub const USER_AGENT: &str = concat!("rollcall/", env!("CARGO_PKG_VERSION"));

/// Error body shape shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// reqwest-backed [`BoardApi`].
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBoardApi {
    /// Creates a client for `base_url`.
    ///
    /// `timeout` of `None` keeps the transport default (no timeout).
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(base_url = %base_url, ?timeout, "created board API client");
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds `/activities/{name}/{action}?email=...`.
    fn roster_endpoint(&self, activity: &str, action: &str, email: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["activities", activity, action])?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Decodes a success body, or turns a non-OK status with a JSON body into
/// [`ApiError::Rejected`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    // An error body that is not JSON is a transport failure, as on success.
    let body: ErrorBody = response.json().await?;
    let detail = body.detail.and_then(|d| d.as_str().map(str::to_string));

    tracing::debug!(status = status.as_u16(), ?detail, "request rejected");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

impl BoardApi for HttpBoardApi {
    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        let url = self.endpoint(&["auth", "verify"])?;
        let response = self.request(Method::GET, url, Some(token)).send().await?;
        decode(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"])?;
        tracing::info!(username, "submitting login");
        let response = self
            .request(Method::POST, url, None)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        decode(response).await
    }

    async fn list_activities(&self) -> Result<Activities, ApiError> {
        let url = self.endpoint(&["activities"])?;
        let response = self.request(Method::GET, url, None).send().await?;
        decode(response).await
    }

    async fn signup(
        &self,
        token: &str,
        activity: &str,
        email: &str,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.roster_endpoint(activity, "signup", email)?;
        tracing::info!(activity, "signup request");
        let response = self.request(Method::POST, url, Some(token)).send().await?;
        decode(response).await
    }

    async fn unregister(
        &self,
        token: &str,
        activity: &str,
        email: &str,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.roster_endpoint(activity, "unregister", email)?;
        tracing::info!(activity, "unregister request");
        let response = self.request(Method::DELETE, url, Some(token)).send().await?;
        decode(response).await
    }
}
