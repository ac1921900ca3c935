use crate::image::ImageManifest;
use crate::policies::Policy;

pub const DANGLING_POLICY: &str = "dangling";

/// Policy to match all manifests without any tag, independent of their age
#[derive(Debug, Clone, Default)]
pub struct DanglingPolicy;

impl Policy<ImageManifest> for DanglingPolicy {
    fn affects(&self, manifest: &ImageManifest) -> bool {
        manifest.is_dangling()
    }

    fn id(&self) -> &'static str {
        DANGLING_POLICY
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;
    use crate::policies::dangling::DanglingPolicy;
    use crate::policies::Policy;
    use crate::test::get_manifest;

    #[test]
    pub fn test_untagged() {
        assert!(DanglingPolicy.affects(&get_manifest("app/api", None, Duration::days(-5))));
        assert!(DanglingPolicy.affects(&get_manifest("app/api", Some(vec![]), Duration::seconds(-5))));
        assert!(!DanglingPolicy.affects(&get_manifest("app/api", Some(vec!["v1"]), Duration::days(-500))));
    }
}
