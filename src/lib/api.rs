//! HTTP gateway to the alumni backend with consistent timeouts, tracing spans and
//! error mapping. Feature clients build on these helpers instead of issuing raw
//! requests. Bearer tokens are attached only when a caller passes one and are
//! never logged.

use super::{config::AppConfig, errors::AppError};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header, multipart::Form};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

/// Thin client bound to the configured API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = parse_base_url(&config.api_base_url)?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(config.request_timeout())
            .user_agent(concat!("alumni-web/", env!("CARGO_PKG_VERSION")));

        let client = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to initialize HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path such as `/accounts/login/` against the base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path.trim().trim_start_matches('/'))
            .map_err(|err| AppError::Config(format!("Invalid API path {path}: {err}")))
    }

    /// GETs JSON, optionally bearer-authenticated.
    ///
    /// # Errors
    /// See [`AppError`]; 401/403 on an authenticated call map to `Unauthorized`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&SecretString>,
    ) -> Result<T, AppError> {
        let request = self.request(Method::GET, path, bearer)?;
        self.execute(Method::GET, path, request, bearer.is_some())
            .await
    }

    /// POSTs a JSON body without authentication.
    ///
    /// # Errors
    /// See [`AppError`].
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.request(Method::POST, path, None)?.json(body);
        self.execute(Method::POST, path, request, false).await
    }

    /// Sends a multipart form with the given method.
    ///
    /// # Errors
    /// See [`AppError`]; 401/403 on an authenticated call map to `Unauthorized`.
    pub async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
        bearer: Option<&SecretString>,
    ) -> Result<T, AppError> {
        let request = self.request(method.clone(), path, bearer)?.multipart(form);
        self.execute(method, path, request, bearer.is_some()).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&SecretString>,
    ) -> Result<RequestBuilder, AppError> {
        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = bearer {
            request = request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            );
        }

        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T, AppError> {
        let span = info_span!(
            "api.request",
            http.method = %method,
            path = %path,
            authenticated
        );

        async move {
            let response = request.send().await.map_err(map_request_error)?;
            debug!(status = response.status().as_u16(), "response received");
            handle_response(response, authenticated).await
        }
        .instrument(span)
        .await
    }
}

/// Parses the base URL and makes sure relative joins append to its path.
///
/// # Errors
/// Returns `AppError::Config` if the URL is empty, malformed or not http(s).
pub fn parse_base_url(base_url: &str) -> Result<Url, AppError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is not configured.".to_string()));
    }

    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AppError::Config(format!(
            "Unsupported API base URL scheme {scheme}"
        ))),
    }
}

/// Maps transport errors into user-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_decode() {
        AppError::Parse(format!("Failed to decode response: {err}"))
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    authenticated: bool,
) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    if authenticated && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
        warn!(status = status.as_u16(), "authenticated call rejected");
        return Err(AppError::Unauthorized {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        return Err(AppError::Rejected {
            status: status.as_u16(),
            message: error_text(&body),
        });
    }

    decode_body(&body)
}

/// Decodes a success body; an empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    let payload = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(payload)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Flattens a backend error body into one line: every value of a field-keyed
/// map (arrays flattened) joined by spaces. Non-JSON bodies yield an empty
/// string so callers fall back to their own message.
#[must_use]
pub fn error_text(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };

    let mut parts = Vec::new();
    match value {
        Value::Object(map) => {
            for (_, value) in map {
                collect_messages(value, &mut parts);
            }
        }
        other => collect_messages(other, &mut parts),
    }

    parts.join(" ")
}

fn collect_messages(value: Value, parts: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(message) => {
            if !message.trim().is_empty() {
                parts.push(message.trim().to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_messages(item, parts);
            }
        }
        other => parts.push(other.to_string()),
    }
}
