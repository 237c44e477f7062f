//! Static inspection of a CloudFormation template body.
//!
//! CloudFormation short-form intrinsics (`!Ref`, `!Sub`, ...) are YAML tags;
//! `serde_yaml` keeps them as tagged values, so the top-level sections can be
//! read without understanding the intrinsics themselves.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use crate::domain::error::StackError;
use crate::domain::stack::StackParameters;

/// Top-level keys the tool reads from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutline {
    pub description: Option<String>,
    pub parameters: Vec<String>,
    pub resources: Vec<String>,
    pub outputs: Vec<String>,
}

impl TemplateOutline {
    /// Parse a template body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not YAML or has no `Resources` section.
    pub fn parse(body: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(body).context("parsing template YAML")?;
        let root = doc
            .as_mapping()
            .ok_or_else(|| StackError::InvalidTemplate("template root is not a mapping".into()))?;

        let resources = section_keys(root, "Resources");
        if resources.is_empty() {
            return Err(StackError::InvalidTemplate("template declares no Resources".into()).into());
        }

        Ok(Self {
            description: root
                .get("Description")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string()),
            parameters: section_keys(root, "Parameters"),
            resources,
            outputs: section_keys(root, "Outputs"),
        })
    }

    /// Ensures every parameter the tool passes is declared by the template.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::MissingParameters`] naming the undeclared keys.
    pub fn check_parameters(&self, params: &StackParameters) -> Result<()> {
        let missing: Vec<&str> = params
            .pairs()
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !self.parameters.iter().any(|p| p == key))
            .collect();
        if !missing.is_empty() {
            return Err(StackError::MissingParameters(missing.join(", ")).into());
        }
        Ok(())
    }
}

fn section_keys(root: &Mapping, section: &str) -> Vec<String> {
    root.get(section)
        .and_then(Value::as_mapping)
        .map(|m| m.keys().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default()
}
