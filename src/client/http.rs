use reqwest::{header::HeaderMap, StatusCode, Url};

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request to `{0}` failed: {1}")]
    Request(Url, String),

    #[error("unable to read response body: {0}")]
    Body(String),
}

/// HTTP response, as seen by the status list client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP `GET` capability.
///
/// Non-success statuses are not errors at this level: the response is
/// returned as is and the caller decides.
pub trait HttpGet {
    #[allow(async_fn_in_trait)]
    async fn http_get(&self, url: &Url, headers: HeaderMap) -> Result<HttpResponse, HttpError>;
}

impl<T: HttpGet> HttpGet for &T {
    async fn http_get(&self, url: &Url, headers: HeaderMap) -> Result<HttpResponse, HttpError> {
        T::http_get(*self, url, headers).await
    }
}

impl HttpGet for reqwest::Client {
    async fn http_get(&self, url: &Url, headers: HeaderMap) -> Result<HttpResponse, HttpError> {
        let response = self
            .get(url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| HttpError::Request(url.clone(), e.to_string()))?;

        let status = response.status();
        log::debug!("GET {url}: {status}");

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
