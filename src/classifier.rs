use std::collections::HashSet;
use std::pin::pin;
use chrono::{DateTime, Utc};
use futures::{Stream, TryStreamExt};
use log::{debug, info};
use crate::api::error::ApiError;
use crate::error::Error;
use crate::image::{Image, ImageIdentifier, ImageManifest};
use crate::policies::age_max::AgeMaxPolicy;
use crate::policies::dangling::DanglingPolicy;
use crate::policies::exemption::ExemptionPolicy;
use crate::policies::Policy;

/// Outcome of a classification run. No image is part of both lists
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Classification {
    /// Dangling or over-age images which aren't deployed
    pub obsolete: Vec<Image>,
    /// Dangling or over-age images which are deployed and therefore kept
    pub protected: Vec<Image>,
}

#[derive(Debug)]
pub struct Classifier {
    host: String,
    exemption: ExemptionPolicy,
    policies: Vec<Box<dyn Policy<ImageManifest>>>,
    deployed: HashSet<ImageIdentifier>,
    now: DateTime<Utc>,
}

impl Classifier {
    pub fn new(host: String, max_age_days: u32, exemption: ExemptionPolicy, deployed: HashSet<ImageIdentifier>) -> Self {
        Self::at(host, max_age_days, exemption, deployed, Utc::now())
    }

    /// Create a classifier which computes image ages relative to `now`
    pub fn at(host: String, max_age_days: u32, exemption: ExemptionPolicy, deployed: HashSet<ImageIdentifier>, now: DateTime<Utc>) -> Self {
        let policies: Vec<Box<dyn Policy<ImageManifest>>> = vec![
            Box::new(DanglingPolicy),
            Box::new(AgeMaxPolicy::new(max_age_days, now)),
        ];
        Self { host, exemption, policies, deployed, now }
    }

    /// Whether a repository is skipped entirely
    pub fn is_exempt(&self, repository: &str) -> bool {
        self.exemption.affects(repository)
    }

    /// A manifest is considered for deletion as soon as one of the policies affects it
    pub fn is_eligible(&self, manifest: &ImageManifest) -> bool {
        self.policies.iter().any(|policy| {
            let affected = policy.affects(manifest);
            if affected {
                debug!("Manifest {}@{} is affected by policy '{}'", manifest.repository, manifest.digest, policy.id());
            }
            affected
        })
    }

    /// Partition the manifests of all non-exempt repositories into obsolete and protected images <br>
    /// The manifest streams of exempt repositories are never polled. Any image id which doesn't match
    /// the expected format aborts the classification, as does any error of a manifest stream
    pub async fn classify<S>(&self, repositories: impl IntoIterator<Item = (String, S)>) -> Result<Classification, Error>
    where
        S: Stream<Item = Result<ImageManifest, ApiError>>,
    {
        let mut classification = Classification::default();

        for (repository, manifests) in repositories {
            if self.is_exempt(&repository) {
                debug!("Skipping exempt repository {repository}");
                continue
            }
            info!("-> Checking repository {repository}");

            let mut manifests = pin!(manifests);
            while let Some(manifest) = manifests.try_next().await? {
                if !self.is_eligible(&manifest) {
                    continue
                }
                let id = ImageIdentifier::new(&self.host, &repository, &manifest.digest)?;
                let deployed = self.deployed.contains(&id);
                let image = Image::from_manifest(manifest, self.now);
                if deployed {
                    classification.protected.push(image);
                } else {
                    classification.obsolete.push(image);
                }
            }
        }

        Ok(classification)
    }
}
