use std::collections::HashSet;
use crate::config::ExemptionConfig;
use crate::policies::Policy;

pub const EXEMPTION_POLICY: &str = "exemption";

/// Policy to match all repositories which must never be scanned. A repository is exempt when its
/// name starts with one of the configured prefixes (chart and test repositories) or equals one of
/// the configured repositories whose images are only used by short-lived job pods
#[derive(Debug, Clone, Default)]
pub struct ExemptionPolicy {
    prefixes: Vec<String>,
    repositories: HashSet<String>,
}

impl ExemptionPolicy {
    pub fn new(prefixes: Vec<String>, repositories: impl IntoIterator<Item = String>) -> Self {
        Self { prefixes, repositories: repositories.into_iter().collect() }
    }
}

impl From<&ExemptionConfig> for ExemptionPolicy {
    fn from(config: &ExemptionConfig) -> Self {
        Self::new(config.prefixes.clone(), config.repositories.clone())
    }
}

impl Policy<str> for ExemptionPolicy {
    fn affects(&self, repository: &str) -> bool {
        self.prefixes.iter().any(|prefix| repository.starts_with(prefix.as_str()))
            || self.repositories.contains(repository)
    }

    fn id(&self) -> &'static str {
        EXEMPTION_POLICY
    }
}

#[cfg(test)]
mod test {
    use crate::config::ExemptionConfig;
    use crate::policies::exemption::ExemptionPolicy;
    use crate::policies::Policy;

    #[test]
    pub fn test_default_exemptions() {
        let policy = ExemptionPolicy::from(&ExemptionConfig::default());
        assert!(policy.affects("helm-charts/foo"));
        assert!(policy.affects("helm-charts"));
        assert!(policy.affects("e2e-tests-runner"));
        assert!(policy.affects("busybox"));
        assert!(policy.affects("ingress-nginx/kube-webhook-certgen"));
        assert!(policy.affects("multiarch/qemu-user-static"));

        assert!(!policy.affects("app/api"));
        assert!(!policy.affects("busybox-extra"));
        assert!(!policy.affects("ingress-nginx/controller"));
        assert!(!policy.affects("charts/helm-charts"));
    }

    #[test]
    pub fn test_custom_exemptions() {
        let policy = ExemptionPolicy::new(vec![String::from("tmp-")], vec![String::from("jobs/cleanup")]);
        assert!(policy.affects("tmp-feature"));
        assert!(policy.affects("jobs/cleanup"));
        assert!(!policy.affects("helm-charts/foo"));
        assert!(!policy.affects("busybox"));
    }

    #[test]
    pub fn test_empty() {
        let policy = ExemptionPolicy::default();
        assert!(!policy.affects("helm-charts/foo"));
        assert!(!policy.affects(""));
    }
}
