//! Loading saved describe-auto-scaling-groups responses

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use asg_model::{GroupInstances, parse_describe_groups_json, xml};
use clap::ValueEnum;

/// Response encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON if the document starts with `{`, XML otherwise
    Auto,
    /// Query API XML
    Xml,
    /// AWS CLI JSON output
    Json,
}

impl InputFormat {
    /// Resolve `Auto` by looking at the first non-blank character
    pub fn detect(self, content: &str) -> InputFormat {
        match self {
            InputFormat::Auto => {
                if strip_bom(content).trim_start().starts_with('{') {
                    InputFormat::Json
                } else {
                    InputFormat::Xml
                }
            }
            other => other,
        }
    }
}

/// Drop a leading UTF-8 byte order mark
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Read a file, or stdin when the path is absent or "-"
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Parse response content in the given format
pub fn parse_groups(content: &str, format: InputFormat) -> Result<Vec<GroupInstances>> {
    let content = strip_bom(content);
    let format = format.detect(content);
    log::debug!("Parsing input as {:?}", format);
    let groups = match format {
        InputFormat::Json => parse_describe_groups_json(content)
            .context("Failed to parse describe-auto-scaling-groups JSON")?,
        _ => xml::parse_describe_groups(content)
            .context("Failed to parse DescribeAutoScalingGroups XML")?,
    };
    Ok(groups)
}

/// Read and parse in one step
pub fn load_groups(path: Option<&Path>, format: InputFormat) -> Result<Vec<GroupInstances>> {
    let content = read_source(path)?;
    parse_groups(&content, format)
}
