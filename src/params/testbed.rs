//! Testbed YAML loading and section selection

use crate::error::AzError;
use crate::system::System;
use anyhow::{Context as _, Result, anyhow};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Section of the testbed document holding deployment values when none
/// is named explicitly
pub const DEFAULT_TESTBED_SECTION: &str = "azure";

/// Load a testbed YAML file and select the named sub-section
///
/// With `section` set to `None` the document root itself is used. The
/// selected node must be a mapping.
pub fn load_testbed(system: &dyn System, path: &str, section: Option<&str>) -> Result<Mapping> {
    let path_obj = Path::new(path);

    if !system.exists(path_obj) {
        return Err(anyhow!("Testbed file not found: {path}"));
    }

    let content = system
        .read_to_string(path_obj)
        .with_context(|| format!("Failed to read testbed file: {path}"))?;

    let document: Value = serde_yaml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse YAML testbed in file: {path}\n\
            Please check the syntax and structure of your testbed file"
        )
    })?;

    let selected = match section {
        Some(section) => document
            .get(section)
            .ok_or_else(|| {
                AzError::template(format!("Testbed file {path} has no '{section}' section"))
            })?
            .clone(),
        None => document,
    };

    match selected {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(AzError::template(format!(
            "Testbed section in {path} is not a mapping of identifiers to values"
        ))
        .into()),
    }
}

/// Look up a testbed identifier, requiring a string value
pub fn lookup(testbed: &Mapping, key: &str) -> Result<String> {
    let value = testbed.get(key).ok_or_else(|| {
        AzError::template(format!("Testbed has no value for identifier '{key}'"))
    })?;

    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(AzError::template(format!(
            "Testbed value for identifier '{key}' must be a string, got: {other:?}"
        ))
        .into()),
    }
}
