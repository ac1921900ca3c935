use std::path::PathBuf;
use clap::Parser;
use crate::image::ImageIdentifier;

/// Clean up an Azure container registry by deleting dangling images and images which are
/// older than a given number of days if they are not deployed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the container registry (without `.azurecr.io`)
    pub registry_name: String,

    /// Resource group of the container registry
    pub resource_group: String,

    /// Images last updated longer ago than this are deleted unless deployed
    pub max_image_age_days: u32,

    /// Comma-separated list of deployed images in the format `<registry>/<repository>@sha256:<digest>`
    #[arg(value_parser = parse_deployed_images)]
    pub deployed_images: DeployedImages,

    /// Delete all images except the deployed ones (`true` or `false`)
    #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolValueParser::new())]
    pub cleanup_all: bool,

    /// Path to the static configuration file
    #[arg(short, long, value_name = "FILE", env = "CONFIG_PATH", default_value = "config.yml")]
    pub config: PathBuf,
}

impl Args {
    /// The age threshold in effect. Cleaning up everything forces a threshold of zero days
    pub fn max_age_days(&self) -> u32 {
        if self.cleanup_all {
            0
        } else {
            self.max_image_age_days
        }
    }

    pub fn registry_host(&self) -> String {
        format!("{}.azurecr.io", self.registry_name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeployedImages(pub Vec<ImageIdentifier>);

/// Parse and validate every entry of the deployed images list. A single invalid entry
/// rejects the whole list
fn parse_deployed_images(value: &str) -> Result<DeployedImages, String> {
    value
        .split(',')
        .map(|entry| ImageIdentifier::parse(entry.trim()).map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()
        .map(DeployedImages)
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use crate::cli::Args;
    use crate::test::{digest, HOST};

    fn deployed(seeds: &[u8]) -> String {
        seeds.iter().map(|seed| format!("{HOST}/app/api@{}", digest(*seed))).collect::<Vec<_>>().join(",")
    }

    #[test]
    fn test_parse() {
        let args = Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", deployed(&[1, 2]).as_str(), "false"]).unwrap();
        assert_eq!(args.registry_name, "myregistry");
        assert_eq!(args.resource_group, "rg-registry");
        assert_eq!(args.max_age_days(), 30);
        assert_eq!(args.registry_host(), HOST);
        assert_eq!(args.deployed_images.0.len(), 2);
        assert_eq!(args.deployed_images.0[1].as_str(), format!("{HOST}/app/api@{}", digest(2)));
        assert!(!args.cleanup_all);
    }

    #[test]
    fn test_cleanup_all_forces_zero() {
        let args = Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", deployed(&[1]).as_str(), "true"]).unwrap();
        assert!(args.cleanup_all);
        assert_eq!(args.max_age_days(), 0);
    }

    #[test]
    fn test_trims_entries() {
        let list = format!("{HOST}/app/api@{} , {HOST}/app/web@{}", digest(1), digest(2));
        let args = Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", list.as_str(), "false"]).unwrap();
        assert_eq!(args.deployed_images.0[1].as_str(), format!("{HOST}/app/web@{}", digest(2)));
    }

    #[test]
    fn test_invalid_deployed_image() {
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", "not-an-id", "false"]).is_err());
        let list = format!("{},not-an-id", deployed(&[1]));
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", list.as_str(), "false"]).is_err());
        let list = format!("{},", deployed(&[1]));
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", list.as_str(), "false"]).is_err());
    }

    #[test]
    fn test_invalid_flag() {
        for flag in ["yes", "1", "True", "__import__('os')"] {
            assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", deployed(&[1]).as_str(), flag]).is_err(), "{flag} should be rejected");
        }
    }

    #[test]
    fn test_invalid_age() {
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "-1", deployed(&[1]).as_str(), "false"]).is_err());
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "thirty", deployed(&[1]).as_str(), "false"]).is_err());
    }

    #[test]
    fn test_missing_argument() {
        assert!(Args::try_parse_from(["acr-cleaner", "myregistry", "rg-registry", "30", deployed(&[1]).as_str()]).is_err());
    }
}
