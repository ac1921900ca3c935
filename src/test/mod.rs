use chrono::Duration;
use futures::stream::{self, Iter};
use crate::api::error::ApiError;
use crate::image::{ImageIdentifier, ImageManifest};

pub const HOST: &str = "myregistry.azurecr.io";

pub type ManifestStream = Iter<std::vec::IntoIter<Result<ImageManifest, ApiError>>>;

pub fn digest(seed: u8) -> String {
    format!("sha256:{seed:064x}")
}

pub fn image_id(repository: &str, seed: u8) -> ImageIdentifier {
    ImageIdentifier::new(HOST, repository, &digest(seed)).expect("Test image id should be valid")
}

pub fn get_manifest(repository: &str, tags: Option<Vec<&str>>, offset: Duration) -> ImageManifest {
    get_manifests(vec![(repository, tags, offset)]).remove(0)
}

/// Manifests whose digests are derived from their position and whose last update lies `offset` from now
pub fn get_manifests(raw: Vec<(&str, Option<Vec<&str>>, Duration)>) -> Vec<ImageManifest> {
    let now = chrono::offset::Utc::now();
    raw.into_iter()
        .enumerate()
        .map(|(index, (repository, tags, offset))| ImageManifest::new(
            repository.to_string(),
            tags.map(|tags| tags.into_iter().map(String::from).collect()),
            digest(index as u8),
            now + offset,
        ))
        .collect()
}

pub fn repository(name: &str, manifests: Vec<ImageManifest>) -> (String, ManifestStream) {
    (name.to_string(), stream::iter(manifests.into_iter().map(Ok).collect::<Vec<_>>()))
}
