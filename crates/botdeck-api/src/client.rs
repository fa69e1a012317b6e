// HTTP client adapter
//
// Wraps `reqwest::Client` with base-URL joining, body decoding, and
// server-message extraction. Resource clients (console, admin) are thin
// typed shims over these verbs. No retries: every call is at-most-once.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error body shapes returned by the API ────────────────────────────

/// FastAPI-style error body: `{"detail": "..."}` for raised HTTP errors,
/// `{"detail": [{"loc": [...], "msg": "..."}]}` for validation failures.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Validation(Vec<ValidationIssue>),
    Other(serde_json::Value),
}

#[derive(serde::Deserialize)]
struct ValidationIssue {
    msg: String,
    #[serde(default)]
    loc: Vec<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        match self.detail {
            Some(ErrorDetail::Text(text)) => Some(text),
            Some(ErrorDetail::Validation(issues)) if !issues.is_empty() => Some(
                issues
                    .iter()
                    .map(ValidationIssue::render)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Some(ErrorDetail::Other(value)) if !value.is_null() => Some(value.to_string()),
            _ => self.message,
        }
    }
}

impl ValidationIssue {
    fn render(&self) -> String {
        let loc = self
            .loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        if loc.is_empty() {
            self.msg.clone()
        } else {
            format!("{loc}: {}", self.msg)
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Typed HTTP adapter bound to one API base URL.
///
/// Paths are given as segments relative to the base (`["groups", "7"]`
/// resolves to `{base}/groups/7`). Each segment is percent-encoded, so a
/// `/` or `?` inside an id stays part of that segment. Successful bodies
/// are decoded as JSON; anything else becomes [`Error::RequestFailed`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins keep it.
    ///
    /// `http://host/api` would otherwise join `groups` as `http://host/groups`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    /// GET with query parameters. `None` fields should be skipped by the
    /// query type's `Serialize` impl so absent filters are never sent.
    pub async fn get_with_query<T, Q>(&self, path: &[&str], query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).query(query).send().await?;
        handle_response(resp).await
    }

    pub async fn post<T, B>(&self, path: &[&str], body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    pub async fn put<T, B>(&self, path: &[&str], body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        handle_response(resp).await
    }

    /// DELETE expecting an empty (usually 204) response.
    pub async fn delete(&self, path: &[&str]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::decode(
            status.as_u16(),
            format!("{e} (body preview: {preview:?})"),
        )
    })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    Error::status(status.as_u16(), error_message(status, &raw))
}

/// Pull the most useful message out of an error body.
fn error_message(status: reqwest::StatusCode, raw: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(ErrorBody::into_message)
    {
        return message;
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = HttpClient::from_reqwest("http://localhost:8000/api", reqwest::Client::new())
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            client.url(&["groups", "7"]).unwrap().as_str(),
            "http://localhost:8000/api/groups/7"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        let client =
            HttpClient::from_reqwest("http://localhost:8000/api/", reqwest::Client::new()).unwrap();
        let url = client.url(&["config", "features", "a/b?c d"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/config/features/a%2Fb%3Fc%20d"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn opaque_base_url_is_rejected() {
        let err =
            HttpClient::from_reqwest("mailto:admin@example.com", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn detail_string_is_extracted() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"detail":"Group not found"}"#);
        assert_eq!(msg, "Group not found");
    }

    #[test]
    fn validation_details_are_joined() {
        let raw = r#"{"detail":[
            {"loc":["body","sanity_limit"],"msg":"ensure this value is greater than or equal to 0","type":"value_error"},
            {"loc":["query","limit"],"msg":"too large"}
        ]}"#;
        let msg = error_message(StatusCode::UNPROCESSABLE_ENTITY, raw);
        assert_eq!(
            msg,
            "body.sanity_limit: ensure this value is greater than or equal to 0; query.limit: too large"
        );
    }

    #[test]
    fn plain_text_and_empty_bodies_fall_back() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "500 Internal Server Error"
        );
    }
}
