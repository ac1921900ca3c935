use std::collections::HashSet;
use std::sync::Arc;
use log::{error, info, warn};
use crate::api::auth::authenticate;
use crate::api::registry::Registry;
use crate::api::repository::Repository;
use crate::az;
use crate::classifier::{Classification, Classifier};
use crate::cli::Args;
use crate::config::{Config, Credentials};
use crate::error::Error;
use crate::executor::{delete_all, DeletionReport};
use crate::image::{Image, ImageIdentifier};
use crate::policies::exemption::ExemptionPolicy;
use crate::usage::measure_released;

/// One cleanup run against a single registry
#[derive(Debug)]
pub struct Cleaner {
    pub registry_name: String,
    pub resource_group: String,
    pub host: String,
    pub max_age_days: u32,
    deployed: HashSet<ImageIdentifier>,
    exemption: ExemptionPolicy,
    credentials: Credentials,
}

impl Cleaner {
    pub fn new(args: Args, config: &Config, credentials: Credentials) -> Self {
        Self {
            host: args.registry_host(),
            max_age_days: args.max_age_days(),
            registry_name: args.registry_name,
            resource_group: args.resource_group,
            deployed: args.deployed_images.0.into_iter().collect(),
            exemption: ExemptionPolicy::from(&config.exemptions),
            credentials,
        }
    }

    pub fn uri(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Delete all obsolete images from the registry and report the storage which was released
    pub async fn run(self) -> Result<(), Error> {
        warn!(
            "Dangling images and unused images older than {} days will be deleted from the {} container registry",
            self.max_age_days,
            self.uri()
        );

        let config = Arc::new(authenticate(&self.host, &self.credentials).await?);
        let registry = Registry::new(config.clone());

        let classification = self.fetch_obsolete_images(&registry).await?;
        self.report_protected(&classification.protected);
        let obsolete = classification.obsolete;

        if obsolete.is_empty() {
            info!("No obsolete images found for deletion");
            return Ok(())
        }

        let dangling = obsolete.iter().filter(|image| image.is_dangling()).count();
        warn!("A total of {dangling} dangling images will be deleted");
        warn!("A total of {} unused images will be deleted", obsolete.len() - dangling);

        az::login(&self.credentials).await?;

        let usage_before = az::get_registry_usage(&self.registry_name, &self.resource_group).await?;
        let report = delete_all(obsolete, |repository, digest| {
            let repository = Repository::new(repository, config.clone());
            async move { repository.delete_manifest(&digest).await }
        }).await;
        let usage_after = az::get_registry_usage(&self.registry_name, &self.resource_group).await?;

        info!(
            "A total of {} bytes has been released from the {} container registry",
            measure_released(usage_before, usage_after),
            self.registry_name
        );
        self.report_deletions(&report);
        Ok(())
    }

    async fn fetch_obsolete_images(&self, registry: &Registry) -> Result<Classification, Error> {
        info!("Fetching list of dangling images and unused images older than {} days:", self.max_age_days);
        let repositories = registry.get_repositories().await?;
        let classifier = Classifier::new(self.host.clone(), self.max_age_days, self.exemption.clone(), self.deployed.clone());

        classifier
            .classify(repositories.into_iter().map(|repository| (repository.name.clone(), repository.manifests())))
            .await
    }

    fn report_protected(&self, protected: &[Image]) {
        if protected.is_empty() {
            return
        }
        info!(
            "The images below are older than {} days but they are in use, therefore they will not be deleted:",
            self.max_age_days
        );
        for image in protected {
            info!("{}/{image}", self.uri());
        }
    }

    fn report_deletions(&self, report: &DeletionReport) {
        if report.failures.is_empty() {
            info!("Deleted {} images from the {} container registry", report.deleted, self.registry_name);
            return
        }
        error!(
            "Deleted {} images from the {} container registry, {} deletions failed:",
            report.deleted,
            self.registry_name,
            report.failures.len()
        );
        for failure in &report.failures {
            error!("{}/{}: {}", self.uri(), failure.image, failure.reason);
        }
    }
}
