//! Instances grouped by the Auto Scaling group that reported them

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instance::Instance;
use crate::lifecycle::LifecycleState;

/// The instance list of one Auto Scaling group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInstances {
    #[serde(
        rename = "AutoScalingGroupName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group_name: Option<String>,
    #[serde(rename = "Instances", default)]
    pub instances: Vec<Instance>,
}

impl GroupInstances {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: Some(group_name.into()),
            instances: Vec::new(),
        }
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Instances whose stored lifecycle label matches `state`
    pub fn in_state(&self, state: LifecycleState) -> impl Iterator<Item = &Instance> {
        self.instances
            .iter()
            .filter(move |i| i.lifecycle_state() == Some(state.as_str()))
    }
}

/// Output shape of `aws autoscaling describe-auto-scaling-groups`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAutoScalingGroupsOutput {
    #[serde(default)]
    auto_scaling_groups: Vec<GroupInstances>,
}

/// Parse the JSON output of `describe-auto-scaling-groups`
///
/// Group attributes other than the name and the instance list are ignored.
pub fn parse_describe_groups_json(json: &str) -> Result<Vec<GroupInstances>> {
    let output: DescribeAutoScalingGroupsOutput = serde_json::from_str(json)?;
    log::debug!(
        "Parsed {} Auto Scaling groups from JSON",
        output.auto_scaling_groups.len()
    );
    Ok(output.auto_scaling_groups)
}
