use chrono::{DateTime, Duration, Utc};
use crate::image::ImageManifest;
use crate::policies::Policy;

pub const AGE_MAX_POLICY: &str = "age.max";

/// Policy to match all manifests which were last updated longer ago than a given number of days.
/// The comparison uses the full timestamp difference, not the rounded day count <br>
/// A maximum age of zero days matches every manifest
/// # Example
/// ```
/// let policy = AgeMaxPolicy::new(30, Utc::now());
///
/// // true for manifests last updated more than 30 days ago
/// let affected = policy.affects(&manifest);
/// ```
#[derive(Debug, Clone)]
pub struct AgeMaxPolicy {
    age: Duration,
    now: DateTime<Utc>,
}

impl AgeMaxPolicy {
    pub fn new(max_age_days: u32, now: DateTime<Utc>) -> Self {
        Self { age: Duration::days(i64::from(max_age_days)), now }
    }
}

impl Policy<ImageManifest> for AgeMaxPolicy {
    fn affects(&self, manifest: &ImageManifest) -> bool {
        self.age == Duration::zero() || (self.now - manifest.last_updated_on) > self.age
    }

    fn id(&self) -> &'static str {
        AGE_MAX_POLICY
    }
}
