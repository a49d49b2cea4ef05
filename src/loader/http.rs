use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::LoadFailure;
use crate::loader::ResourceLoader;

/// Blocking HTTP loader resolving paths against a base URL.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    base_url: String,
    client: Client,
}

impl HttpLoader {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LoadFailure> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| LoadFailure::Fetch {
                path: base_url.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl ResourceLoader for HttpLoader {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure> {
        let fetch_error = |reason: String| LoadFailure::Fetch {
            path: path.to_owned(),
            reason,
        };

        let response = self
            .client
            .get(self.url_for(path))
            .send()
            .map_err(|err| fetch_error(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("status {status}")));
        }
        let body = response
            .bytes()
            .map_err(|err| fetch_error(err.to_string()))?;
        Ok(body.to_vec())
    }
}
