//! Text rendering of instance listings and summaries

use std::collections::BTreeMap;
use std::fmt::Write;

use asg_model::{GroupInstances, Instance, LifecycleState};
use colored::{ColoredString, Colorize};

/// Output options
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Colorize headers and lifecycle labels
    pub color: bool,

    /// Print a header line before each group's instances
    pub group_headers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            group_headers: true,
        }
    }
}

impl RenderConfig {
    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Instance selection applied before rendering
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub state: Option<LifecycleState>,
    pub group: Option<String>,
}

impl Filter {
    /// Build a filter from command-line values, rejecting unknown lifecycle labels
    pub fn from_args(state: Option<&str>, group: Option<String>) -> asg_model::Result<Self> {
        let state = state.map(str::parse::<LifecycleState>).transpose()?;
        Ok(Self { state, group })
    }

    pub fn matches_group(&self, group: &GroupInstances) -> bool {
        match &self.group {
            Some(name) => group.group_name.as_deref() == Some(name.as_str()),
            None => true,
        }
    }

    pub fn matches(&self, instance: &Instance) -> bool {
        match self.state {
            Some(state) => instance.lifecycle_state() == Some(state.as_str()),
            None => true,
        }
    }

    /// Groups narrowed to the selected instances (groups left empty are kept)
    pub fn apply(&self, groups: &[GroupInstances]) -> Vec<GroupInstances> {
        groups
            .iter()
            .filter(|g| self.matches_group(g))
            .map(|g| GroupInstances {
                group_name: g.group_name.clone(),
                instances: g
                    .instances
                    .iter()
                    .filter(|i| self.matches(i))
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

fn group_label(group: &GroupInstances) -> &str {
    group.group_name.as_deref().unwrap_or("<unnamed>")
}

/// One line per instance, using the instance's `Display` form
pub fn render_instances(groups: &[GroupInstances], config: &RenderConfig) -> String {
    let mut out = String::new();
    for group in groups {
        if config.group_headers {
            let header = format!("{} ({} instances)", group_label(group), group.instances.len());
            let _ = writeln!(out, "{}", config.paint(&header, |s| s.cyan().bold()));
        }
        for instance in &group.instances {
            let _ = writeln!(out, "{}", instance);
        }
    }
    out
}

/// Pretty-printed JSON in the describe-auto-scaling-groups shape
pub fn render_instances_json(groups: &[GroupInstances]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(groups)
}

/// Per-state and per-health counts across all groups
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub by_state: BTreeMap<String, usize>,
    pub by_health: BTreeMap<String, usize>,
    /// In-service instances without scale-in protection, as (group, instance ID)
    pub unprotected_in_service: Vec<(String, String)>,
}

impl Summary {
    pub fn from_groups(groups: &[GroupInstances]) -> Self {
        let mut summary = Summary::default();
        for group in groups {
            for instance in &group.instances {
                summary.total += 1;
                let state = instance.lifecycle_state().unwrap_or("<unset>");
                *summary.by_state.entry(state.to_string()).or_default() += 1;
                let health = instance.health_status().unwrap_or("<unset>");
                *summary.by_health.entry(health.to_string()).or_default() += 1;

                if instance.lifecycle_state() == Some(LifecycleState::InService.as_str())
                    && !instance.is_protected_from_scale_in()
                {
                    summary.unprotected_in_service.push((
                        group_label(group).to_string(),
                        instance.instance_id().unwrap_or("<unknown>").to_string(),
                    ));
                }
            }
        }
        summary
    }

    pub fn render(&self, config: &RenderConfig) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", config.paint("Instances:", |s| s.bold()), self.total);

        let _ = writeln!(out, "{}", config.paint("Lifecycle states:", |s| s.bold()));
        for (state, count) in &self.by_state {
            let label = match state.parse::<LifecycleState>() {
                Ok(s) if s.is_terminal() => config.paint(state, |s| s.red()),
                Ok(s) if s.is_transitional() => config.paint(state, |s| s.yellow()),
                Ok(_) => config.paint(state, |s| s.green()),
                Err(_) => state.clone(),
            };
            let _ = writeln!(out, "  {}: {}", label, count);
        }

        let _ = writeln!(out, "{}", config.paint("Health:", |s| s.bold()));
        for (health, count) in &self.by_health {
            let _ = writeln!(out, "  {}: {}", health, count);
        }

        if !self.unprotected_in_service.is_empty() {
            let _ = writeln!(
                out,
                "{}",
                config.paint("Unprotected in-service instances:", |s| s.bold())
            );
            for (group, id) in &self.unprotected_in_service {
                let _ = writeln!(out, "  {}/{}", group, id);
            }
        }
        out
    }
}

/// Table of every lifecycle state and its classification
pub fn render_states(config: &RenderConfig) -> String {
    let mut out = String::new();
    for state in LifecycleState::ALL {
        let kind = if state.is_terminal() {
            config.paint("terminal", |s| s.red())
        } else if state.is_transitional() {
            config.paint("transitional", |s| s.yellow())
        } else {
            config.paint("stable", |s| s.green())
        };
        let _ = writeln!(out, "{:<20} {}", state.as_str(), kind);
    }
    out
}
