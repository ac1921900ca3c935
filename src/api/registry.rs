use std::sync::Arc;
use log::debug;
use crate::api::repository::Repository;
use crate::api::{get_request_client, ApiCatalog, RegistryConfig, JSON_CONTENT_TYPE, PAGE_SIZE};
use crate::api::error::ApiError;
use crate::api::request::{get_follow_path, handle_response};

#[derive(Debug)]
pub struct Registry {
    config: Arc<RegistryConfig>,
}

impl Registry {
    pub fn new(config: Arc<RegistryConfig>) -> Self {
        Self { config }
    }

    /// Get all repositories present in the registry
    pub async fn get_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let client = get_request_client(JSON_CONTENT_TYPE)?;
        let mut repositories = Vec::<Repository>::new();
        let mut link = Some(self.config.url(format!("/acr/v1/_catalog?n={PAGE_SIZE}").as_str()));

        while let Some(current) = link {
            debug!("Listing repositories from '{current}'");
            let mut resp = self.config.authorize(client.get(current)).send().await?;
            resp = handle_response(resp).await?;
            link = get_follow_path(resp.headers())?.map(|path| self.config.url(path.as_str()));
            let body = resp.json::<ApiCatalog>().await?;
            repositories.extend(
                body.repositories
                    .unwrap_or_default()
                    .into_iter()
                    .map(|name| Repository::new(name, self.config.clone())),
            );
        }
        Ok(repositories)
    }
}
