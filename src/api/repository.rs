use std::sync::Arc;
use futures::{stream, Stream, TryStreamExt};
use log::debug;
use crate::api::manifest::ApiManifests;
use crate::api::{get_request_client, RegistryConfig, JSON_CONTENT_TYPE, MANIFEST_CONTENT_TYPE, PAGE_SIZE};
use crate::api::error::ApiError;
use crate::api::request::{get_follow_path, handle_response};
use crate::image::ImageManifest;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Repository {
    pub name: String,
    config: Arc<RegistryConfig>,
}

impl Repository {
    pub fn new(name: String, config: Arc<RegistryConfig>) -> Self {
        Self { name, config }
    }

    /// Lazily list all manifests of this repository, most recently updated first <br>
    /// **Important**: No request is sent before the stream is polled. Pages are fetched one at a
    /// time while the stream is consumed and the stream can't be restarted
    pub fn manifests(self) -> impl Stream<Item = Result<ImageManifest, ApiError>> {
        let first = self.config.url(format!("/acr/v1/{}/_manifests?orderby=timedesc&n={PAGE_SIZE}", self.name).as_str());

        stream::try_unfold((self, Some(first)), |(repository, link)| async move {
            let Some(link) = link else {
                return Ok(None)
            };
            let (manifests, next) = repository.get_manifest_page(link).await?;
            let page = stream::iter(manifests.into_iter().map(Ok::<_, ApiError>));
            Ok::<_, ApiError>(Some((page, (repository, next))))
        })
        .try_flatten()
    }

    /// Fetch a single page of manifests together with the url of the next page
    async fn get_manifest_page(&self, link: String) -> Result<(Vec<ImageManifest>, Option<String>), ApiError> {
        debug!("Listing manifests of repository '{}' from '{link}'", self.name);
        let client = get_request_client(JSON_CONTENT_TYPE)?;
        let mut resp = self.config.authorize(client.get(link)).send().await?;
        resp = handle_response(resp).await?;
        let next = get_follow_path(resp.headers())?.map(|path| self.config.url(path.as_str()));

        let body = resp.json::<ApiManifests>().await?;
        let manifests = body.manifests
            .unwrap_or_default()
            .into_iter()
            .map(|manifest| manifest.into_image_manifest(&self.name))
            .collect();
        Ok((manifests, next))
    }

    /// Delete a specific manifest by it's digest from the registry
    pub async fn delete_manifest(&self, digest: &str) -> Result<(), ApiError> {
        let client = get_request_client(MANIFEST_CONTENT_TYPE)?;
        let resp = self.config
            .authorize(client.delete(self.config.url(format!("/v2/{}/manifests/{digest}", self.name).as_str())))
            .send()
            .await?;
        handle_response(resp).await?;
        Ok(())
    }
}
