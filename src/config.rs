use std::collections::HashMap;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;
use log::info;
use serde::Deserialize;
use crate::error::Error;

/// Repositories whose images are used by job pods. Pods created by jobs only exist while the job
/// is running, so a job image is very likely not listed as deployed when the cleanup runs
pub const DEFAULT_JOB_REPOSITORIES: [&str; 3] = ["ingress-nginx/kube-webhook-certgen", "multiarch/qemu-user-static", "busybox"];
pub const DEFAULT_EXEMPT_PREFIXES: [&str; 2] = ["helm-charts", "e2e-tests"];

pub const REQUIRED_ENVIRONMENT_VARIABLES: [&str; 4] = ["AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET", "AZURE_TENANT_ID", "AZURE_SUBSCRIPTION_ID"];

#[derive(Deserialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub exemptions: ExemptionConfig,
}

impl Config {
    /// Parse the static configuration file at `path`. A missing file results in the default configuration
    pub fn parse(path: &Path) -> Result<Self, Error> {
        match read_to_string(path) {
            Ok(content) => {
                info!("Using config from static configuration file at '{}'", path.display());
                Self::from_yaml(&content)
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No static configuration file at '{}'. Using defaults", path.display());
                Ok(Self::default())
            },
            Err(err) => Err(Error::InvalidConfig(format!("Unable to read '{}': {err}", path.display())))
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        if content.trim().is_empty() {
            return Ok(Self::default())
        }
        serde_yaml::from_str(content).map_err(|err| Error::InvalidConfig(err.to_string()))
    }
}

#[derive(Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ExemptionConfig {
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub repositories: Vec<String>,
}

impl Default for ExemptionConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_EXEMPT_PREFIXES.iter().map(|prefix| prefix.to_string()).collect(),
            repositories: DEFAULT_JOB_REPOSITORIES.iter().map(|repository| repository.to_string()).collect(),
        }
    }
}

/// Service principal used for the registry and the azure cli
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub subscription_id: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_map(std::env::vars().collect())
    }

    /// Read the credentials from `environment`. The first missing variable is reported
    pub fn from_map(mut environment: HashMap<String, String>) -> Result<Self, Error> {
        if let Some(missing) = REQUIRED_ENVIRONMENT_VARIABLES.iter().find(|name| !environment.contains_key(**name)) {
            return Err(Error::MissingEnvironmentVariable(*missing))
        }
        let mut take = |name: &str| environment.remove(name).unwrap_or_default();
        Ok(Self {
            client_id: take("AZURE_CLIENT_ID"),
            client_secret: take("AZURE_CLIENT_SECRET"),
            tenant_id: take("AZURE_TENANT_ID"),
            subscription_id: take("AZURE_SUBSCRIPTION_ID"),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}
