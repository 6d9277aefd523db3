//! Compiler pass phases

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Phase a compiler pass runs in; phases execute in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassPhase {
    /// Runs before any built-in optimisation
    #[default]
    BeforeOptimization,
    /// Parameter, alias and reference resolution
    Optimization,
    /// After optimisation, before unused services are removed
    BeforeRemoving,
    /// Removal of private aliases and unused private services
    Removing,
    /// Last chance to inspect the final definitions
    AfterRemoving,
}

impl PassPhase {
    /// All phases in execution order
    pub const ALL: [PassPhase; 5] = [
        PassPhase::BeforeOptimization,
        PassPhase::Optimization,
        PassPhase::BeforeRemoving,
        PassPhase::Removing,
        PassPhase::AfterRemoving,
    ];

    /// Snake-case name used in manifests and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeOptimization => "before_optimization",
            Self::Optimization => "optimization",
            Self::BeforeRemoving => "before_removing",
            Self::Removing => "removing",
            Self::AfterRemoving => "after_removing",
        }
    }
}

impl fmt::Display for PassPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == normalized)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown compiler pass phase '{s}'. Use one of: {}",
                    Self::ALL.map(|p| p.as_str()).join(", ")
                ))
            })
    }
}
