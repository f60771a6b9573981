use chrono::{DateTime, Utc};
use iref::UriRef;
use log::{debug, warn};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode, Url,
};

use crate::{
    jwt::CompactJwt, StatusError, StatusListTokenClaims, TokenFormat, USER_AGENT,
};

use super::{FetchStatusClaims, HttpGet, VerifyStatusListTokenSignature};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Skip the expiration and issuance date checks.
    ///
    /// The subject is still checked.
    pub ignore_time_bounds: bool,
}

impl FetchOptions {
    pub const IGNORE_TIME_BOUNDS: Self = Self {
        ignore_time_bounds: true,
    };
}

/// Fetches Status List Tokens over HTTP, then validates and verifies them.
///
/// Each call performs exactly one request. Nothing is cached or retried.
pub struct StatusListTokenFetcher<V, C = reqwest::Client> {
    client: C,
    verifier: V,
    date_time: Option<DateTime<Utc>>,
    options: FetchOptions,
}

impl<V> StatusListTokenFetcher<V> {
    pub fn new(verifier: V) -> Self {
        Self::with_client(reqwest::Client::new(), verifier)
    }
}

impl<V, C> StatusListTokenFetcher<V, C> {
    pub fn with_client(client: C, verifier: V) -> Self {
        Self {
            client,
            verifier,
            date_time: None,
            options: FetchOptions::default(),
        }
    }

    /// Sets the date used to validate tokens and verify their signature.
    ///
    /// Defaults to the current date at each fetch.
    pub fn with_date_time(self, date_time: DateTime<Utc>) -> Self {
        Self {
            date_time: Some(date_time),
            ..self
        }
    }

    pub fn with_options(self, options: FetchOptions) -> Self {
        Self { options, ..self }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    fn now(&self) -> DateTime<Utc> {
        self.date_time.unwrap_or_else(Utc::now)
    }
}

impl<V, C> StatusListTokenFetcher<V, C>
where
    V: VerifyStatusListTokenSignature,
    C: HttpGet,
{
    /// Retrieves the raw Status List Token published at `uri`.
    ///
    /// CWT tokens are rejected before any request is sent.
    pub async fn fetch_token(&self, uri: &UriRef, format: TokenFormat) -> Result<String, StatusError> {
        if format == TokenFormat::Cwt {
            return Err(StatusError::CwtNotSupported);
        }

        let url = Url::parse(uri.as_str()).map_err(|_| StatusError::BadUrl(uri.as_str().to_owned()))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(format.media_type()));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        debug!("fetching {format} status list token from {url}");
        let response = self
            .client
            .http_get(&url, headers)
            .await
            .map_err(|e| StatusError::Network(e.to_string()))?;

        if response.status != StatusCode::OK {
            return Err(StatusError::Network(format!(
                "unexpected HTTP status {}",
                response.status
            )));
        }

        let body = String::from_utf8(response.body).map_err(StatusError::decoding)?;
        Ok(body.trim().to_owned())
    }

    /// Fetches, validates and verifies the Status List Token published at
    /// `uri`, returning its claims.
    pub async fn get_status_claims(
        &self,
        uri: &UriRef,
        format: TokenFormat,
        clock_skew: chrono::Duration,
    ) -> Result<StatusListTokenClaims, StatusError> {
        let token = self.fetch_token(uri, format).await?;

        let jwt = CompactJwt::parse(&token)?;
        if jwt.type_() != Some(format.media_subtype()) {
            debug!("unexpected JWT type {:?}", jwt.type_());
            return Err(StatusError::BadJwtHeader);
        }

        let claims: StatusListTokenClaims =
            serde_json::from_slice(&jwt.payload).map_err(StatusError::decoding)?;

        let now = self.now();
        let claims = if self.options.ignore_time_bounds {
            warn!("status list token time bounds not checked");
            claims.ensure_subject(uri.as_str())?;
            claims
        } else {
            claims.ensure_valid(uri.as_str(), now, clock_skew)?
        };

        self.verifier
            .verify_status_list_token(&token, format, now)
            .await
            .map_err(StatusError::other)?;

        debug!("status list token `{}` verified", claims.subject);
        Ok(claims)
    }
}

impl<V, C> FetchStatusClaims for StatusListTokenFetcher<V, C>
where
    V: VerifyStatusListTokenSignature,
    C: HttpGet,
{
    async fn fetch_status_claims(
        &self,
        uri: &UriRef,
        format: TokenFormat,
        clock_skew: chrono::Duration,
    ) -> Result<StatusListTokenClaims, StatusError> {
        self.get_status_claims(uri, format, clock_skew).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use base64::Engine;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use reqwest::{header::HeaderMap, StatusCode, Url};
    use serde_json::{json, Value};

    use super::{FetchOptions, StatusListTokenFetcher};
    use crate::{
        client::{HttpError, HttpGet, HttpResponse, Unverified, VerifyStatusListTokenSignature},
        jwt::BASE64_URL,
        StatusError, StatusReference, TokenFormat,
    };

    const URI: &str = "https://example.com/statuslists/1";
    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(NOW, 0).unwrap()
    }

    fn token(typ: Option<&str>, claims: Value) -> String {
        let mut header = json!({ "alg": "ES256" });
        if let Some(typ) = typ {
            header["typ"] = typ.into();
        }

        format!(
            "{}.{}.c2ln",
            BASE64_URL.encode(serde_json::to_vec(&header).unwrap()),
            BASE64_URL.encode(serde_json::to_vec(&claims).unwrap())
        )
    }

    fn claims(sub: &str, exp: i64) -> Value {
        json!({
            "sub": sub,
            "iat": NOW - 3600,
            "exp": exp,
            "ttl": 43200,
            "status_list": {
                "bits": 1,
                "lst": "eNrbuRgAAhcBXQ"
            }
        })
    }

    fn valid_token() -> String {
        token(Some("statuslist+jwt"), claims(URI, NOW + 3600))
    }

    struct FakeServer {
        status: StatusCode,
        body: Vec<u8>,
        requests: Mutex<Vec<(Url, HeaderMap)>>,
    }

    impl FakeServer {
        fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
            Self {
                status,
                body: body.into(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn ok(body: impl Into<Vec<u8>>) -> Self {
            Self::new(StatusCode::OK, body)
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpGet for FakeServer {
        async fn http_get(&self, url: &Url, headers: HeaderMap) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push((url.clone(), headers));
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct Unreachable;

    impl HttpGet for Unreachable {
        async fn http_get(&self, url: &Url, _: HeaderMap) -> Result<HttpResponse, HttpError> {
            Err(HttpError::Request(url.clone(), "connection refused".to_owned()))
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, TokenFormat, DateTime<Utc>)>>);

    impl VerifyStatusListTokenSignature for Recorder {
        type Error = String;

        async fn verify_status_list_token(
            &self,
            token: &str,
            format: TokenFormat,
            date_time: DateTime<Utc>,
        ) -> Result<(), Self::Error> {
            self.0
                .lock()
                .unwrap()
                .push((token.to_owned(), format, date_time));
            Ok(())
        }
    }

    struct Reject;

    impl VerifyStatusListTokenSignature for Reject {
        type Error = String;

        async fn verify_status_list_token(
            &self,
            _token: &str,
            _format: TokenFormat,
            _date_time: DateTime<Utc>,
        ) -> Result<(), Self::Error> {
            Err("invalid signature".to_owned())
        }
    }

    async fn fetch<V: VerifyStatusListTokenSignature>(
        server: &FakeServer,
        verifier: V,
        uri: &str,
    ) -> Result<crate::StatusListTokenClaims, StatusError> {
        let reference = StatusReference::from_str_uri(0, uri).unwrap();
        StatusListTokenFetcher::with_client(server, verifier)
            .with_date_time(now())
            .get_status_claims(reference.uri(), TokenFormat::Jwt, Duration::seconds(60))
            .await
    }

    #[test_log::test(tokio::test)]
    async fn valid() {
        let server = FakeServer::ok(valid_token());
        let verifier = Recorder::default();

        let claims = fetch(&server, &verifier, URI).await.unwrap();
        assert_eq!(claims.subject, URI);
        assert_eq!(claims.status_list.compressed_list, "eNrbuRgAAhcBXQ");

        let requests = server.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (url, headers) = &requests[0];
        assert_eq!(url.as_str(), URI);
        assert_eq!(headers["accept"], "application/statuslist+jwt");
        assert!(headers.contains_key("user-agent"));

        let verified = verifier.0.lock().unwrap();
        assert_eq!(*verified, [(valid_token(), TokenFormat::Jwt, now())]);
    }

    #[tokio::test]
    async fn trailing_whitespace() {
        let server = FakeServer::ok(format!("{}\r\n", valid_token()));
        assert!(fetch(&server, Unverified, URI).await.is_ok())
    }

    #[tokio::test]
    async fn cwt_not_supported() {
        let server = FakeServer::ok(valid_token());
        let reference = StatusReference::from_str_uri(0, URI).unwrap();
        let result = StatusListTokenFetcher::with_client(&server, Unverified)
            .get_status_claims(reference.uri(), TokenFormat::Cwt, Duration::zero())
            .await;

        assert_eq!(result, Err(StatusError::CwtNotSupported));
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn fetch_cwt_token() {
        let server = FakeServer::ok(valid_token());
        let reference = StatusReference::from_str_uri(0, URI).unwrap();
        let result = StatusListTokenFetcher::with_client(&server, Unverified)
            .fetch_token(reference.uri(), TokenFormat::Cwt)
            .await;

        assert_eq!(result, Err(StatusError::CwtNotSupported));
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn bad_url() {
        let server = FakeServer::ok(valid_token());
        assert_eq!(
            fetch(&server, Unverified, "invalid_url_string").await,
            Err(StatusError::BadUrl("invalid_url_string".to_owned()))
        );
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn unreachable() {
        let reference = StatusReference::from_str_uri(0, URI).unwrap();
        let result = StatusListTokenFetcher::with_client(Unreachable, Unverified)
            .get_status_claims(reference.uri(), TokenFormat::Jwt, Duration::zero())
            .await;
        assert!(matches!(result, Err(StatusError::Network(_))));
    }

    #[tokio::test]
    async fn not_found() {
        let server = FakeServer::new(StatusCode::NOT_FOUND, valid_token());
        match fetch(&server, Unverified, URI).await {
            Err(StatusError::Network(detail)) => assert!(detail.contains("404")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_utf8_body() {
        let server = FakeServer::ok(vec![0xff, 0xfe, 0xfd]);
        assert!(matches!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::Decoding(_))
        ));
    }

    #[tokio::test]
    async fn invalid_jwt() {
        let server = FakeServer::ok("not a jwt");
        assert_eq!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::InvalidJwt)
        );
    }

    #[tokio::test]
    async fn bad_header_type() {
        let server = FakeServer::ok(token(Some("JWT"), claims(URI, NOW + 3600)));
        assert_eq!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::BadJwtHeader)
        );

        let server = FakeServer::ok(token(None, claims(URI, NOW + 3600)));
        assert_eq!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::BadJwtHeader)
        );
    }

    #[tokio::test]
    async fn invalid_claims() {
        let server = FakeServer::ok(token(Some("statuslist+jwt"), json!({ "sub": URI })));
        assert!(matches!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::Decoding(_))
        ));
    }

    #[tokio::test]
    async fn bad_subject() {
        let other = "https://example.com/statuslists/2";
        let server = FakeServer::ok(token(Some("statuslist+jwt"), claims(other, NOW + 3600)));
        assert_eq!(
            fetch(&server, Unverified, URI).await,
            Err(StatusError::BadSubject(other.to_owned()))
        );
    }

    #[tokio::test]
    async fn expired() {
        let server = FakeServer::ok(token(Some("statuslist+jwt"), claims(URI, NOW - 3600)));
        let verifier = Recorder::default();
        assert!(matches!(
            fetch(&server, &verifier, URI).await,
            Err(StatusError::ExpiredToken { .. })
        ));
        assert!(verifier.0.lock().unwrap().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn ignore_time_bounds() {
        let server = FakeServer::ok(token(Some("statuslist+jwt"), claims(URI, NOW - 3600)));
        let reference = StatusReference::from_str_uri(0, URI).unwrap();
        let fetcher = StatusListTokenFetcher::with_client(&server, Unverified)
            .with_date_time(now())
            .with_options(FetchOptions::IGNORE_TIME_BOUNDS);

        assert!(fetcher
            .get_status_claims(reference.uri(), TokenFormat::Jwt, Duration::zero())
            .await
            .is_ok());

        // The subject is still checked.
        let other = StatusReference::from_str_uri(0, "https://example.com/statuslists/2").unwrap();
        assert_eq!(
            fetcher
                .get_status_claims(other.uri(), TokenFormat::Jwt, Duration::zero())
                .await,
            Err(StatusError::BadSubject(URI.to_owned()))
        );
    }

    #[tokio::test]
    async fn rejected_signature() {
        let server = FakeServer::ok(valid_token());
        assert_eq!(
            fetch(&server, Reject, URI).await,
            Err(StatusError::Other("invalid signature".to_owned()))
        );
    }
}
