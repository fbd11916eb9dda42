//! The IdP client handle.

use meui_batch::BatchClient;
use url::Url;

/// Client for the Identity Provider backend.
///
/// Carries the base URL of the IdP's public API and a bearer credential:
/// either the end-user's access token (acting on behalf of the user) or a
/// client-credentials token (acting as the application itself).
#[derive(Debug, Clone)]
pub struct IdpClient {
    base_url: Url,
    transport: BatchClient,
}

impl IdpClient {
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
                .expect("IdP base URL must be an http(s) URL");
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
        let client = IdpClient::new(
            Url::parse("https://idp.example.com").expect("url"),
            "token".to_string(),
        );
        assert_eq!(
            client.collection("humans").as_str(),
            "https://idp.example.com/humans"
        );
    }

    #[test]
    fn collection_handles_base_path() {
        let client = IdpClient::new(
            Url::parse("https://idp.example.com/api/").expect("url"),
            "token".to_string(),
        );
        assert_eq!(
            client.collection("invites").as_str(),
            "https://idp.example.com/api/invites"
        );
    }

    #[test]
    fn collection_handles_nested_path() {
        let client = IdpClient::new(
            Url::parse("https://idp.example.com").expect("url"),
            "token".to_string(),
        );
        assert_eq!(
            client.collection("invites/send").as_str(),
            "https://idp.example.com/invites/send"
        );
    }
}
