//! The AAP client handle.

use meui_batch::BatchClient;
use url::Url;

/// Client for the Access/Authorization Provider backend.
///
/// Carries the base URL of the AAP's public API and a bearer credential:
/// either the end-user's access token or a client-credentials token when
/// acting as the application itself (authorization judgements).
#[derive(Debug, Clone)]
pub struct AapClient {
    base_url: Url,
    transport: BatchClient,
}

impl AapClient {
    /// Creates a client against `base_url` authorized by `bearer`.
    #[must_use]
    pub fn new(base_url: Url, bearer: String) -> Self {
        Self {
            base_url,
            transport: BatchClient::new(bearer),
        }
    }

    /// Returns the base URL of the backend.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn transport(&self) -> &BatchClient {
        &self.transport
    }

    /// Resolves a collection endpoint under the base URL.
    pub(crate) fn collection(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("AAP base URL must be an http(s) URL");
            segments.pop_if_empty();
            for part in path.split('/') {
                segments.push(part);
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_joins_segment() {
        let client = AapClient::new(
            Url::parse("https://aap.example.com").expect("url"),
            "token".to_string(),
        );
        assert_eq!(
            client.collection("grants").as_str(),
            "https://aap.example.com/grants"
        );
    }

    #[test]
    fn collection_handles_nested_path() {
        let client = AapClient::new(
            Url::parse("https://aap.example.com").expect("url"),
            "token".to_string(),
        );
        assert_eq!(
            client.collection("entities/judge").as_str(),
            "https://aap.example.com/entities/judge"
        );
    }
}
