use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Instant;

use super::errors::FetchError;
use super::record_set::PriceRecordSet;
use crate::config::{ConfigError, PriceApiConfig};

/// Source of historical daily prices
///
/// Implemented by the HTTP client below; the ingestion job and the query
/// handlers only see this trait.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Fetch the last `days` trading days for `ticker`
    async fn fetch_historical(&self, ticker: &str, days: u32)
        -> Result<PriceRecordSet, FetchError>;
}

/// HTTP client for the `historical-price-full` endpoint
pub struct HistoricalPriceClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HistoricalPriceClient {
    /// Build a client with the configured base URL, credential and timeout
    pub fn new(config: &PriceApiConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "PRICE_API_BASE_URL",
            value: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "PRICE_API_BASE_URL",
                value: config.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/api/v3/historical-price-full/{ticker}?timeseries={days}&apikey={key}`
    fn request_url(&self, ticker: &str, days: u32) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v3", "historical-price-full", ticker]);
        }

        url.query_pairs_mut()
            .append_pair("timeseries", &days.to_string())
            .append_pair("apikey", &self.api_key);

        url
    }
}

#[async_trait]
impl PriceFetcher for HistoricalPriceClient {
    async fn fetch_historical(
        &self,
        ticker: &str,
        days: u32,
    ) -> Result<PriceRecordSet, FetchError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(FetchError::InvalidRequest("ticker must not be empty".to_string()));
        }
        if days == 0 {
            return Err(FetchError::InvalidRequest(
                "timeseries must be a positive number of days".to_string(),
            ));
        }

        let start = Instant::now();
        let url = self.request_url(ticker, days);

        tracing::debug!("Fetching {} days of history for {}", days, ticker);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                ticker: ticker.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| FetchError::Transport {
            ticker: ticker.to_string(),
            source,
        })?;

        if !status.is_success() {
            tracing::warn!("Provider returned HTTP {} for {}", status.as_u16(), ticker);
            return Err(FetchError::Status {
                ticker: ticker.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;
        let record_set = PriceRecordSet::new(raw);

        tracing::debug!(
            "Fetched {} records for {} in {:.2}ms",
            record_set.len(),
            ticker,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(record_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str, timeout: Duration) -> HistoricalPriceClient {
        HistoricalPriceClient::new(&PriceApiConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout,
        })
        .unwrap()
    }

    #[test]
    fn test_request_url() {
        let client = client_for("https://financialmodelingprep.com", Duration::from_secs(10));
        let url = client.request_url("AAPL", 3);

        assert_eq!(
            url.as_str(),
            "https://financialmodelingprep.com/api/v3/historical-price-full/AAPL?timeseries=3&apikey=test-key"
        );
    }

    #[test]
    fn test_request_url_escapes_ticker() {
        let client = client_for("http://localhost:8080/", Duration::from_secs(10));
        let url = client.request_url("BRK/B", 1);

        assert!(url.path().ends_with("/historical-price-full/BRK%2FB"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HistoricalPriceClient::new(&PriceApiConfig {
            base_url: "not a url".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(1),
        });

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "PRICE_API_BASE_URL", .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        let body = json!({
            "symbol": "AAPL",
            "historical": [
                {"date": "2024-01-03", "close": 184.25},
                {"date": "2024-01-02", "close": 185.64},
                {"date": "2024-01-01", "close": 192.53}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/api/v3/historical-price-full/AAPL"))
            .and(query_param("timeseries", "3"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let record_set = client.fetch_historical("AAPL", 3).await.unwrap();

        assert_eq!(serde_json::to_value(&record_set).unwrap(), body);
        assert_eq!(record_set.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API KEY"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.fetch_historical("AAPL", 3).await.unwrap_err();

        match err {
            FetchError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid API KEY");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.fetch_historical("AAPL", 3).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"historical": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(200));
        let err = client.fetch_historical("AAPL", 3).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_invalid_input_skips_network() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));

        assert!(client
            .fetch_historical("  ", 3)
            .await
            .unwrap_err()
            .is_invalid_request());
        assert!(client
            .fetch_historical("AAPL", 0)
            .await
            .unwrap_err()
            .is_invalid_request());
    }
}
