use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::Deserialize;
use crate::api::error::ApiError;

pub mod auth;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod repository;
mod request;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MANIFEST_CONTENT_TYPE: &str = "application/vnd.oci.image.manifest.v1+json,application/vnd.docker.distribution.manifest.v2+json,application/vnd.oci.image.index.v1+json,application/vnd.docker.distribution.manifest.list.v2+json";
/// Number of entries requested per page from the paginated listing endpoints
pub const PAGE_SIZE: usize = 100;

#[derive(Deserialize, Debug)]
pub struct ApiCatalog {
    pub repositories: Option<Vec<String>>,
}

/// Connection details of a registry. The `username`/`password` pair is sent as
/// basic auth with every request when both are present
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RegistryConfig {
    host: String,
    username: Option<String>,
    password: Option<String>,
}

impl RegistryConfig {
    pub fn new(host: String, username: Option<String>, password: Option<String>) -> Self {
        Self {
            host,
            username,
            password,
        }
    }

    pub fn uri(&self) -> String {
        format!("https://{}", self.host)
    }

    pub fn url(&self, rest: &str) -> String {
        format!("{}{}", self.uri(), rest)
    }

    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => builder.basic_auth(username, Some(password)),
            _ => builder
        }
    }
}

fn get_request_client(accept: &str) -> Result<Client, ApiError> {
    let mut headers = HeaderMap::new();
    headers.append(
        ACCEPT,
        HeaderValue::from_str(accept)
            .map_err(|_| ApiError::InvalidHeaderValue(String::from(accept)))?,
    );
    ClientBuilder::new()
        .default_headers(headers)
        .build()
        .map_err(|e| e.into())
}

#[cfg(test)]
mod test {
    use crate::api::RegistryConfig;

    #[test]
    fn test_url() {
        let config = RegistryConfig::new(String::from("myregistry.azurecr.io"), None, None);
        assert_eq!(config.uri(), "https://myregistry.azurecr.io");
        assert_eq!(config.url("/acr/v1/_catalog"), "https://myregistry.azurecr.io/acr/v1/_catalog");
    }
}
