//! Instance - Snapshot of an EC2 instance inside an Auto Scaling group
//!
//! Every field is independently optional. An unset field is `None`, which
//! compares and hashes differently from any set value. No length or pattern
//! checks happen here; those limits are enforced by the service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::HashCodeBuilder;
use crate::launch_template::LaunchTemplateSpecification;
use crate::lifecycle::LifecycleState;

/// EC2 instance as reported by an Auto Scaling group
///
/// Setters take `&mut self`, so concurrent mutation needs external
/// synchronization like any other owned value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Instance {
    /// EC2 instance ID (e.g., "i-1234567890abcdef0")
    #[serde(skip_serializing_if = "Option::is_none")]
    instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability_zone: Option<String>,
    /// Lifecycle label, stored in its wire form (see [`LifecycleState`])
    #[serde(skip_serializing_if = "Option::is_none")]
    lifecycle_state: Option<String>,
    /// "Healthy" or "Unhealthy" as reported by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    health_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_configuration_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_template: Option<LaunchTemplateSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    protected_from_scale_in: Option<bool>,
}

impl Instance {
    /// Create an instance with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    pub fn set_instance_id(&mut self, instance_id: Option<String>) {
        self.instance_id = instance_id;
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    pub fn availability_zone(&self) -> Option<&str> {
        self.availability_zone.as_deref()
    }

    pub fn set_availability_zone(&mut self, availability_zone: Option<String>) {
        self.availability_zone = availability_zone;
    }

    pub fn with_availability_zone(mut self, availability_zone: impl Into<String>) -> Self {
        self.availability_zone = Some(availability_zone.into());
        self
    }

    pub fn lifecycle_state(&self) -> Option<&str> {
        self.lifecycle_state.as_deref()
    }

    /// Accepts a raw label or a [`LifecycleState`], both stored as the label
    pub fn set_lifecycle_state<S: Into<String>>(&mut self, lifecycle_state: Option<S>) {
        self.lifecycle_state = lifecycle_state.map(Into::into);
    }

    /// Accepts a raw label or a [`LifecycleState`], both stored as the label
    pub fn with_lifecycle_state(mut self, lifecycle_state: impl Into<String>) -> Self {
        self.lifecycle_state = Some(lifecycle_state.into());
        self
    }

    /// Parse the stored label into a [`LifecycleState`]
    ///
    /// Returns `Ok(None)` when unset and an error when the label is not one
    /// the model knows about.
    pub fn lifecycle_state_kind(&self) -> Result<Option<LifecycleState>> {
        self.lifecycle_state
            .as_deref()
            .map(str::parse)
            .transpose()
    }

    pub fn health_status(&self) -> Option<&str> {
        self.health_status.as_deref()
    }

    pub fn set_health_status(&mut self, health_status: Option<String>) {
        self.health_status = health_status;
    }

    pub fn with_health_status(mut self, health_status: impl Into<String>) -> Self {
        self.health_status = Some(health_status.into());
        self
    }

    pub fn launch_configuration_name(&self) -> Option<&str> {
        self.launch_configuration_name.as_deref()
    }

    pub fn set_launch_configuration_name(&mut self, launch_configuration_name: Option<String>) {
        self.launch_configuration_name = launch_configuration_name;
    }

    pub fn with_launch_configuration_name(
        mut self,
        launch_configuration_name: impl Into<String>,
    ) -> Self {
        self.launch_configuration_name = Some(launch_configuration_name.into());
        self
    }

    pub fn launch_template(&self) -> Option<&LaunchTemplateSpecification> {
        self.launch_template.as_ref()
    }

    pub fn set_launch_template(&mut self, launch_template: Option<LaunchTemplateSpecification>) {
        self.launch_template = launch_template;
    }

    pub fn with_launch_template(mut self, launch_template: LaunchTemplateSpecification) -> Self {
        self.launch_template = Some(launch_template);
        self
    }

    pub fn protected_from_scale_in(&self) -> Option<bool> {
        self.protected_from_scale_in
    }

    pub fn set_protected_from_scale_in(&mut self, protected_from_scale_in: Option<bool>) {
        self.protected_from_scale_in = protected_from_scale_in;
    }

    pub fn with_protected_from_scale_in(mut self, protected_from_scale_in: bool) -> Self {
        self.protected_from_scale_in = Some(protected_from_scale_in);
        self
    }

    /// Returns true only when scale-in protection is explicitly set
    pub fn is_protected_from_scale_in(&self) -> bool {
        self.protected_from_scale_in == Some(true)
    }

    /// JVM-compatible hash code over all seven fields, in declaration order
    pub fn hash_code(&self) -> i32 {
        HashCodeBuilder::new()
            .string(self.instance_id())
            .string(self.availability_zone())
            .string(self.lifecycle_state())
            .string(self.health_status())
            .string(self.launch_configuration_name())
            .field(self.launch_template.as_ref().map_or(0, |t| t.hash_code()))
            .bool(self.protected_from_scale_in)
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        if let Some(id) = &self.instance_id {
            write!(f, "InstanceId: {},", id)?;
        }
        if let Some(zone) = &self.availability_zone {
            write!(f, "AvailabilityZone: {},", zone)?;
        }
        if let Some(state) = &self.lifecycle_state {
            write!(f, "LifecycleState: {},", state)?;
        }
        if let Some(health) = &self.health_status {
            write!(f, "HealthStatus: {},", health)?;
        }
        if let Some(name) = &self.launch_configuration_name {
            write!(f, "LaunchConfigurationName: {},", name)?;
        }
        if let Some(template) = &self.launch_template {
            write!(f, "LaunchTemplate: {},", template)?;
        }
        if let Some(protected) = self.protected_from_scale_in {
            write!(f, "ProtectedFromScaleIn: {}", protected)?;
        }
        f.write_str("}")
    }
}
