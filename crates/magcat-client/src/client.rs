//! HTTP client for the Magnit goods API.
//!
//! Wraps `reqwest` with the static mobile-app headers the API expects,
//! typed error mapping, and response deserialization for the two endpoints
//! this tool uses. Each call is a single attempt; the fail-soft policy for
//! a failed call lives in the collector, not here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use magcat_core::CollectorConfig;

use crate::error::ClientError;
use crate::types::{ProductDetail, SearchPage, SearchPayload, CATALOG_TYPE, STORE_TYPE};

const DEFAULT_BASE_URL: &str = "https://middle-api.magnit.ru/";

const SEARCH_PATH: &str = "v2/goods/search";

/// Identity of the mobile app build whose traffic this tool replays. The
/// endpoints reject requests without the full header set.
const USER_AGENT: &str = "okhttp/4.12.0";
const APP_VERSION: &str = "8.57.0";
const DEVICE_ID: &str = "b4ffad2b-c7cd-3bf4-942f-ee21b4236584";
const DEVICE_PLATFORM: &str = "Android";
const PLATFORM_VERSION: &str = "28";
const DEVICE_TAG: &str =
    "41BDE13C-E42E-4619-87E8-BD91D5340640_9D318296-014D-4675-9322-9BCDE9CC8FFE";
const SENTRY_TRACE: &str = "a015ca4609c04622b479fbc6bd5886d9-af8e458832f54712";
const SENTRY_BAGGAGE: &str = "sentry-environment=production,\
sentry-public_key=6d4cfb7c8887ad7d38f6d3182a75acda,\
sentry-release=ru.tander.magnit%408.57.0%2B1149075,\
sentry-trace_id=a015ca4609c04622b479fbc6bd5886d9";

/// Conditional-fetch timestamp replayed verbatim on detail requests.
const IF_MODIFIED_SINCE_STAMP: &str = "Mon, 16 Jun 2025 15:30:33 GMT";

/// Client for the Magnit goods API.
///
/// Use [`MagnitClient::new`] for production or
/// [`MagnitClient::with_base_url`] to point at a mock server in tests.
pub struct MagnitClient {
    client: Client,
    base_url: Url,
}

/// Static headers sent with every request.
fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-app-version", HeaderValue::from_static(APP_VERSION));
    headers.insert("x-device-id", HeaderValue::from_static(DEVICE_ID));
    headers.insert(
        "x-device-platform",
        HeaderValue::from_static(DEVICE_PLATFORM),
    );
    headers.insert(
        "x-platform-version",
        HeaderValue::from_static(PLATFORM_VERSION),
    );
    headers.insert("x-device-tag", HeaderValue::from_static(DEVICE_TAG));
    headers.insert("sentry-trace", HeaderValue::from_static(SENTRY_TRACE));
    headers.insert("baggage", HeaderValue::from_static(SENTRY_BAGGAGE));
    headers
}

impl MagnitClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .default_headers(base_headers())
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // Url::join resolves endpoint paths under the root rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches one page of search results at the given offset.
    ///
    /// Sends the fixed search payload (catalog type, store/city context,
    /// category filter, descending-popularity ordering) with the page
    /// window taken from `config` and `offset`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_page(
        &self,
        config: &CollectorConfig,
        offset: u64,
    ) -> Result<SearchPage, ClientError> {
        let url = self.endpoint_url(SEARCH_PATH)?;
        let payload = SearchPayload::new(config, offset);
        let response = self.client.post(url).json(&payload).send().await?;
        Self::parse_response(response, &format!("search page at offset {offset}")).await
    }

    /// Fetches the detail document for one product in one store.
    ///
    /// Adds the fixed catalog-type/store-type query parameters and the
    /// static `If-Modified-Since` conditional-fetch header.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`MagnitClient::search_page`].
    pub async fn product_detail(
        &self,
        product_id: i64,
        store_code: &str,
    ) -> Result<ProductDetail, ClientError> {
        let url = self.endpoint_url(&format!("api/v2/goods/{product_id}/stores/{store_code}"))?;
        let response = self
            .client
            .get(url)
            .query(&[("catalog-type", CATALOG_TYPE), ("store-type", STORE_TYPE)])
            .header(
                reqwest::header::IF_MODIFIED_SINCE,
                HeaderValue::from_static(IF_MODIFIED_SINCE_STAMP),
            )
            .send()
            .await?;
        Self::parse_response(
            response,
            &format!("detail for product {product_id} (store {store_code})"),
        )
        .await
    }

    /// Resolves an endpoint path against the stored base URL.
    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url.join(path).map_err(|e| ClientError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    /// Asserts a 2xx status and parses the response body as JSON.
    async fn parse_response<T>(response: reqwest::Response, context: &str) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
