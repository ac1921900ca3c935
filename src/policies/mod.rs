use std::fmt::Debug;

pub mod age_max;
pub mod dangling;
pub mod exemption;

pub trait Policy<T: ?Sized>: Debug + Send + Sync {
    /// Whether the given repository/manifest is affected by this policy
    fn affects(&self, element: &T) -> bool;

    /// Identifier of the policy used for log output. Same as the constant value
    /// `<POLICY_NAME>_POLICY`
    fn id(&self) -> &'static str;
}
