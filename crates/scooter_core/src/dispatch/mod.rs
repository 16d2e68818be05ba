pub mod aging;
pub mod algorithm;
pub mod brute_force;
pub mod combined;
pub mod greedy;

use std::str::FromStr;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aging::{AgingPolicy, StationAging};
pub use algorithm::{best_scoring, DispatchContext, DispatchPolicy, TargetChoice};
pub use brute_force::BruteForcePolicy;
pub use combined::CombinedPolicy;
pub use greedy::GreedyPolicy;

/// Resource wrapper for the dispatch policy trait object.
#[derive(Resource)]
pub struct DispatchPolicyResource(pub Box<dyn DispatchPolicy>);

impl DispatchPolicyResource {
    pub fn new(policy: Box<dyn DispatchPolicy>) -> Self {
        Self(policy)
    }
}

impl std::ops::Deref for DispatchPolicyResource {
    type Target = dyn DispatchPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Raised when a policy name from the configuration surface does not match
/// any known policy. A construction-time failure, never a mid-run one.
#[derive(Debug, Error)]
#[error("unknown dispatch policy '{0}' (expected aging, greedy, or combined)")]
pub struct UnknownPolicy(pub String);

/// Which scoring policy trucks use to choose their next station. The
/// brute-force baseline implements the same trait but is wired directly by
/// tests and benches rather than by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchPolicyKind {
    #[default]
    Aging,
    Greedy,
    Combined,
}

impl DispatchPolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchPolicyKind::Aging => "aging",
            DispatchPolicyKind::Greedy => "greedy",
            DispatchPolicyKind::Combined => "combined",
        }
    }
}

impl FromStr for DispatchPolicyKind {
    type Err = UnknownPolicy;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "aging" => Ok(DispatchPolicyKind::Aging),
            "greedy" => Ok(DispatchPolicyKind::Greedy),
            "combined" => Ok(DispatchPolicyKind::Combined),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Construct a boxed [`DispatchPolicy`] from a [`DispatchPolicyKind`].
pub fn build_dispatch_policy(kind: DispatchPolicyKind) -> Box<dyn DispatchPolicy> {
    match kind {
        DispatchPolicyKind::Aging => Box::new(AgingPolicy),
        DispatchPolicyKind::Greedy => Box::new(GreedyPolicy),
        DispatchPolicyKind::Combined => Box::new(CombinedPolicy::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_round_trip() {
        for kind in [
            DispatchPolicyKind::Aging,
            DispatchPolicyKind::Greedy,
            DispatchPolicyKind::Combined,
        ] {
            assert_eq!(kind.as_str().parse::<DispatchPolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_policy_name_is_rejected() {
        let err = "brute".parse::<DispatchPolicyKind>().unwrap_err();
        assert!(err.to_string().contains("brute"));
    }
}
