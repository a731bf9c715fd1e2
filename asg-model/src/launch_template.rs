//! Launch template reference carried by an instance

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::HashCodeBuilder;

/// Launch template by ID or name, plus the version used
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LaunchTemplateSpecification {
    /// Template ID (e.g., "lt-0a20c965061f64abc")
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_template_name: Option<String>,
    /// Version number, "$Latest" or "$Default"
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl LaunchTemplateSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch_template_id(&self) -> Option<&str> {
        self.launch_template_id.as_deref()
    }

    pub fn set_launch_template_id(&mut self, launch_template_id: Option<String>) {
        self.launch_template_id = launch_template_id;
    }

    pub fn with_launch_template_id(mut self, launch_template_id: impl Into<String>) -> Self {
        self.launch_template_id = Some(launch_template_id.into());
        self
    }

    pub fn launch_template_name(&self) -> Option<&str> {
        self.launch_template_name.as_deref()
    }

    pub fn set_launch_template_name(&mut self, launch_template_name: Option<String>) {
        self.launch_template_name = launch_template_name;
    }

    pub fn with_launch_template_name(mut self, launch_template_name: impl Into<String>) -> Self {
        self.launch_template_name = Some(launch_template_name.into());
        self
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// JVM-compatible hash code over all three fields
    pub fn hash_code(&self) -> i32 {
        HashCodeBuilder::new()
            .string(self.launch_template_id())
            .string(self.launch_template_name())
            .string(self.version())
            .finish()
    }
}

impl fmt::Display for LaunchTemplateSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        if let Some(id) = &self.launch_template_id {
            write!(f, "LaunchTemplateId: {},", id)?;
        }
        if let Some(name) = &self.launch_template_name {
            write!(f, "LaunchTemplateName: {},", name)?;
        }
        if let Some(version) = &self.version {
            write!(f, "Version: {}", version)?;
        }
        f.write_str("}")
    }
}
