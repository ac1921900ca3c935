use chrono::{DateTime, Utc};
use serde::Deserialize;
use crate::image::ImageManifest;

/// Page of the `/acr/v1/<repository>/_manifests` listing
#[derive(Deserialize, Debug)]
pub struct ApiManifests {
    pub manifests: Option<Vec<ApiManifest>>,
}

/// **Note:** <br>
/// Only the fields which are needed for classifying an image are deserialized. The
/// listing carries more attributes (architecture, size, changeable attributes, ...)
#[derive(Deserialize, Debug)]
pub struct ApiManifest {
    pub digest: String,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "lastUpdateTime")]
    pub last_update_time: DateTime<Utc>,
}

impl ApiManifest {
    pub fn into_image_manifest(self, repository: &str) -> ImageManifest {
        ImageManifest::new(repository.to_string(), self.tags, self.digest, self.last_update_time)
    }
}
