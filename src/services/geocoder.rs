use crate::models::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the geocoding service
///
/// These stay internal to the adapter: `resolve` collapses every failure to
/// `None` so callers only ever see "got a coordinate" or "didn't".
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("geocoding service returned status {0}")]
    ApiError(reqwest::StatusCode),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// First-result shape of the geocoding response
///
/// The service returns lat/lon as strings, not numbers.
#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    lat: String,
    lon: String,
}

/// US zip-code geocoder backed by a Nominatim-style HTTP service
///
/// Each lookup is independent and stateless: no retry, no caching, no
/// rate-limit handling.
pub struct ZipGeocoder {
    endpoint: String,
    client: Client,
}

impl ZipGeocoder {
    /// Create a geocoder against the given search endpoint
    ///
    /// Public geocoding services require an identifying user agent.
    pub fn new(endpoint: String, user_agent: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, client }
    }

    /// Resolve a US zip code to a coordinate pair
    ///
    /// Returns `None` for a blank zip (no request is issued), an empty result
    /// set, a malformed response, or any transport failure. Nothing raises
    /// past this boundary; "not found" and "unreachable" are distinguished in
    /// the logs only.
    pub async fn resolve(&self, zip_code: &str) -> Option<Coordinate> {
        let zip = zip_code.trim();
        if zip.is_empty() {
            return None;
        }

        match self.lookup(zip).await {
            Ok(Some(coordinate)) => Some(coordinate),
            Ok(None) => {
                tracing::debug!("No geocoding match for zip {}", zip);
                None
            }
            Err(e) => {
                tracing::warn!("Geocoding lookup failed for zip {}: {}", zip, e);
                None
            }
        }
    }

    /// Issue the lookup and parse the first candidate
    async fn lookup(&self, zip: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!(
            "{}?format=json&postalcode={}&country=US",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(zip)
        );

        tracing::debug!("Geocoding zip {} via {}", zip, self.endpoint);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(response.status()));
        }

        let candidates: Vec<GeocodeCandidate> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let first = match candidates.first() {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        let latitude: f64 = first
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("unparsable lat: {}", first.lat)))?;
        let longitude: f64 = first
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("unparsable lon: {}", first.lon)))?;

        let coordinate = Coordinate::new(latitude, longitude);
        if !coordinate.in_bounds() {
            return Err(GeocodeError::InvalidResponse(format!(
                "coordinate out of bounds: {}, {}",
                latitude, longitude
            )));
        }

        Ok(Some(coordinate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn geocoder_for(server: &mockito::ServerGuard) -> ZipGeocoder {
        ZipGeocoder::new(
            format!("{}/search", server.url()),
            "fairway-search-tests".to_string(),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_resolve_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("postalcode".into(), "20500".into()),
                Matcher::UrlEncoded("country".into(), "US".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"lat":"38.8977","lon":"-77.0365"},{"lat":"0","lon":"0"}]"#)
            .create_async()
            .await;

        let coordinate = geocoder_for(&server).resolve("20500").await;

        mock.assert_async().await;
        let coordinate = coordinate.expect("should resolve");
        assert!((coordinate.latitude - 38.8977).abs() < 1e-9);
        assert!((coordinate.longitude + 77.0365).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_resolve_empty_results_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        assert!(geocoder_for(&server).resolve("00000").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_malformed_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected":"shape"}"#)
            .create_async()
            .await;

        assert!(geocoder_for(&server).resolve("20500").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_server_error_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        assert!(geocoder_for(&server).resolve("20500").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_unparsable_coordinates_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"lat":"not-a-number","lon":"-77.0365"}]"#)
            .create_async()
            .await;

        assert!(geocoder_for(&server).resolve("20500").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_out_of_bounds_coordinates_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"lat":"123.4","lon":"-77.0365"}]"#)
            .create_async()
            .await;

        assert!(geocoder_for(&server).resolve("20500").await.is_none());
    }

    #[test]
    fn test_blank_zip_issues_no_request() {
        tokio_test::block_on(async {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("GET", "/search")
                .match_query(Matcher::Any)
                .expect(0)
                .create_async()
                .await;

            let geocoder = geocoder_for(&server);
            assert!(geocoder.resolve("").await.is_none());
            assert!(geocoder.resolve("   ").await.is_none());

            mock.assert_async().await;
        });
    }
}
