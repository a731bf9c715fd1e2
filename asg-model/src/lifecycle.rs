//! Lifecycle states of an instance inside an Auto Scaling group
//!
//! These are the group-membership phases reported by the service, not the
//! EC2 power state of the underlying instance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle state label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleState {
    Pending,
    #[serde(rename = "Pending:Wait")]
    PendingWait,
    #[serde(rename = "Pending:Proceed")]
    PendingProceed,
    /// Reserved by the service, never reported for live instances
    Quarantined,
    InService,
    Terminating,
    #[serde(rename = "Terminating:Wait")]
    TerminatingWait,
    #[serde(rename = "Terminating:Proceed")]
    TerminatingProceed,
    Terminated,
    Detaching,
    Detached,
    EnteringStandby,
    Standby,
}

impl LifecycleState {
    /// Every state, in the order the service documents them
    pub const ALL: [LifecycleState; 13] = [
        Self::Pending,
        Self::PendingWait,
        Self::PendingProceed,
        Self::Quarantined,
        Self::InService,
        Self::Terminating,
        Self::TerminatingWait,
        Self::TerminatingProceed,
        Self::Terminated,
        Self::Detaching,
        Self::Detached,
        Self::EnteringStandby,
        Self::Standby,
    ];

    /// Wire label (e.g., "Pending:Wait")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PendingWait => "Pending:Wait",
            Self::PendingProceed => "Pending:Proceed",
            Self::Quarantined => "Quarantined",
            Self::InService => "InService",
            Self::Terminating => "Terminating",
            Self::TerminatingWait => "Terminating:Wait",
            Self::TerminatingProceed => "Terminating:Proceed",
            Self::Terminated => "Terminated",
            Self::Detaching => "Detaching",
            Self::Detached => "Detached",
            Self::EnteringStandby => "EnteringStandby",
            Self::Standby => "Standby",
        }
    }

    /// Returns true while the instance is moving between stable states
    /// (launching, terminating, detaching, entering standby, or paused in a
    /// lifecycle hook)
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            Self::Pending
                | Self::PendingWait
                | Self::PendingProceed
                | Self::Terminating
                | Self::TerminatingWait
                | Self::TerminatingProceed
                | Self::Detaching
                | Self::EnteringStandby
        )
    }

    /// Returns true once the instance has left the group for good
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated | Self::Detached)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == value)
            .ok_or_else(|| Error::UnknownLifecycleState(value.to_string()))
    }
}

impl TryFrom<&str> for LifecycleState {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LifecycleState> for String {
    fn from(state: LifecycleState) -> Self {
        state.as_str().to_string()
    }
}
