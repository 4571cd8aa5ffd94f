use std::time::Duration;

use futures_util::StreamExt;
use marquee_logging::marquee_debug;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{CatalogPage, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// API root; list endpoints are resolved relative to it.
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            api_key: None,
            language: "en-US".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Remote movie catalog.
///
/// An empty `query` asks for the unfiltered popular listing. Implementations
/// must return [`FailureKind::Cancelled`] once `cancel` fires, and must not
/// retry on their own.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<CatalogPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Builds the listing URL for `query` and `page`.
    pub fn endpoint(&self, query: &str, page: u32) -> Result<Url, FetchError> {
        if page == 0 {
            return Err(FetchError::new(
                FailureKind::InvalidRequest,
                "pages are numbered from 1",
            ));
        }

        let mut base = self.settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let path = if query.is_empty() {
            "movie/popular"
        } else {
            "search/movie"
        };
        let mut url = Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|err| FetchError::new(FailureKind::InvalidRequest, err.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(api_key) = self.settings.api_key.as_deref() {
                pairs.append_pair("api_key", api_key);
            }
            pairs.append_pair("language", &self.settings.language);
            if !query.is_empty() {
                pairs.append_pair("query", query);
            }
            pairs.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    async fn fetch_page(&self, url: Url) -> Result<CatalogPage, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<CatalogPage, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::cancelled());
        }
        let url = self.endpoint(query, page)?;
        marquee_debug!("search_movies query_len={} page={}", query.len(), page);

        // Dropping the request future aborts the connection.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::cancelled()),
            result = self.fetch_page(url) => result,
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedResponse, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, api_key: Option<&str>) -> ReqwestCatalogClient {
        ReqwestCatalogClient::new(CatalogSettings {
            base_url: base_url.to_string(),
            api_key: api_key.map(ToOwned::to_owned),
            ..CatalogSettings::default()
        })
        .expect("client")
    }

    #[test]
    fn empty_query_targets_popular_listing() {
        let url = client("https://catalog.test/3", Some("k"))
            .endpoint("", 2)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://catalog.test/3/movie/popular?api_key=k&language=en-US&page=2"
        );
    }

    #[test]
    fn query_is_encoded_for_search() {
        let url = client("https://catalog.test/3/", None)
            .endpoint("star wars & co", 1)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://catalog.test/3/search/movie?language=en-US&query=star+wars+%26+co&page=1"
        );
    }

    #[test]
    fn page_zero_is_rejected() {
        let err = client("https://catalog.test/3/", None)
            .endpoint("x", 0)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidRequest);
    }
}
