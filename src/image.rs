use std::fmt::{Display, Formatter};
use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;
use crate::error::Error;

/// Grammar of a fully qualified image id `<registry>/<repository>@sha256:<hex>` <br>
/// **Important**: The registry part is deliberately loose (unescaped dots) and must not be tightened
const IMAGE_ID_REGEX: &str = "^(?<registry>[a-z]+.[a-z]+.[a-z].)/(?<repository>[a-z0-9/-]+)@(?<digest>sha256:[a-fA-F0-9]{64})$";

fn image_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(IMAGE_ID_REGEX).expect("Image id pattern should be valid"))
}

/// Check whether an image id has a valid format
pub fn validate_image_id(image_id: &str) -> Result<(), Error> {
    if image_id_pattern().is_match(image_id) {
        Ok(())
    } else {
        Err(Error::InvalidImageId(image_id.to_string()))
    }
}

/// Registry metadata of one image version as it's listed by the registry
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageManifest {
    pub repository: String,
    pub tags: Option<Vec<String>>,
    pub digest: String,
    pub last_updated_on: DateTime<Utc>,
}

impl ImageManifest {
    pub fn new(repository: String, tags: Option<Vec<String>>, digest: String, last_updated_on: DateTime<Utc>) -> Self {
        Self { repository, tags, digest, last_updated_on }
    }

    /// Absent and empty tag lists both count as dangling
    pub fn is_dangling(&self) -> bool {
        self.tags.as_ref().map_or(true, |tags| tags.is_empty())
    }
}

/// Canonical `<registry>/<repository>@<digest>` form used to compare against deployed images
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct ImageIdentifier(String);

impl ImageIdentifier {
    /// Build and validate the id of an image in the registry at `host`
    pub fn new(host: &str, repository: &str, digest: &str) -> Result<Self, Error> {
        Self::parse(format!("{host}/{repository}@{digest}"))
    }

    pub fn parse(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        validate_image_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image selected by the classifier. The dangling state is fixed on construction
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Image {
    repository: String,
    tags: Vec<String>,
    digest: String,
    age_days: i64,
    dangling: bool,
}

impl Image {
    pub fn new(repository: String, tags: Option<Vec<String>>, digest: String, age_days: i64) -> Self {
        let tags = tags.unwrap_or_default();
        let dangling = tags.is_empty();
        Self { repository, tags, digest, age_days: age_days.max(0), dangling }
    }

    /// Create the image of `manifest` with its age in whole days relative to `now`
    pub fn from_manifest(manifest: ImageManifest, now: DateTime<Utc>) -> Self {
        let age_days = (now - manifest.last_updated_on).num_days();
        Self::new(manifest.repository, manifest.tags, manifest.digest, age_days)
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn age_days(&self) -> i64 {
        self.age_days
    }

    pub fn is_dangling(&self) -> bool {
        self.dangling
    }
}

impl Display for Image {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:?}@{}", self.repository, self.tags, self.digest)
    }
}
