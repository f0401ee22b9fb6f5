//! Parameter template rendering

use super::testbed;
use crate::system::System;
use anyhow::{Context as _, Result};
use regex::Regex;
use serde_yaml::Mapping;
use std::path::Path;
use tracing::debug;

/// Render a parameter template against a testbed section and write the
/// result
///
/// Each line is scanned for a `[identifier]` placeholder (at most one
/// per line is honored); the placeholder is replaced with the testbed
/// value wrapped in double quotes. A placeholder whose identifier has no
/// testbed value is an error naming the identifier. Returns the number
/// of substitutions made.
pub fn render_parameter_file(
    system: &dyn System,
    template_path: &str,
    testbed_section: &Mapping,
    output_path: &str,
) -> Result<usize> {
    let template = system
        .read_to_string(Path::new(template_path))
        .with_context(|| format!("Failed to read parameter template: {template_path}"))?;

    let placeholder = Regex::new(r"\[(\w*)\]").expect("placeholder pattern is valid");

    let mut rendered = String::with_capacity(template.len());
    let mut substitutions = 0;

    for line in template.split_inclusive('\n') {
        match placeholder.captures(line) {
            Some(captures) => {
                let identifier = &captures[1];
                let value = testbed::lookup(testbed_section, identifier)?;
                rendered.push_str(&line.replacen(&captures[0], &format!("\"{value}\""), 1));
                substitutions += 1;
            }
            None => rendered.push_str(line),
        }
    }

    debug!("Rendered {substitutions} placeholders from {template_path}");

    system
        .write(Path::new(output_path), rendered.as_bytes())
        .with_context(|| format!("Failed to write parameter file: {output_path}"))?;

    Ok(substitutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::load_testbed;
    use crate::system::MockSystem;

    const TESTBED: &str = "\
azure:
  vmName: fw-vm-1
  location: eastus
";

    const TEMPLATE: &str = "{\n  \"vmName\": { \"value\": [vmName] },\n  \"location\": { \"value\": [location] },\n  \"static\": { \"value\": \"unchanged\" }\n}\n";

    fn system_with_files() -> MockSystem {
        MockSystem::new()
            .with_file("/testbed.yaml", TESTBED.as_bytes())
            .with_file("/template.json", TEMPLATE.as_bytes())
    }

    #[test]
    fn substitutes_quoted_values() {
        let system = system_with_files();
        let section = load_testbed(&system, "/testbed.yaml", Some("azure")).unwrap();

        let count =
            render_parameter_file(&system, "/template.json", &section, "/params.json").unwrap();
        assert_eq!(count, 2);

        let out = system.file_contents("/params.json").unwrap();
        assert!(out.contains("\"vmName\": { \"value\": \"fw-vm-1\" }"));
        assert!(out.contains("\"location\": { \"value\": \"eastus\" }"));
        assert!(out.contains("\"static\": { \"value\": \"unchanged\" }"));
    }

    #[test]
    fn unknown_identifier_fails_with_its_name() {
        let system = MockSystem::new()
            .with_file("/testbed.yaml", TESTBED.as_bytes())
            .with_file("/template.json", b"{ \"x\": [mystery] }\n");
        let section = load_testbed(&system, "/testbed.yaml", Some("azure")).unwrap();

        let err = render_parameter_file(&system, "/template.json", &section, "/params.json")
            .unwrap_err();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn only_first_placeholder_per_line_is_replaced() {
        let system = MockSystem::new()
            .with_file("/testbed.yaml", TESTBED.as_bytes())
            .with_file("/template.json", b"[vmName] and [location]\n");
        let section = load_testbed(&system, "/testbed.yaml", Some("azure")).unwrap();

        render_parameter_file(&system, "/template.json", &section, "/params.json").unwrap();
        let out = system.file_contents("/params.json").unwrap();
        assert_eq!(out, "\"fw-vm-1\" and [location]\n");
    }

    #[test]
    fn template_without_placeholders_is_copied_verbatim() {
        let system = MockSystem::new()
            .with_file("/testbed.yaml", TESTBED.as_bytes())
            .with_file("/template.json", b"plain text\nno markers here\n");
        let section = load_testbed(&system, "/testbed.yaml", Some("azure")).unwrap();

        let count =
            render_parameter_file(&system, "/template.json", &section, "/params.json").unwrap();
        assert_eq!(count, 0);
        assert_eq!(
            system.file_contents("/params.json").unwrap(),
            "plain text\nno markers here\n"
        );
    }

    #[test]
    fn missing_template_is_a_filesystem_error() {
        let system = MockSystem::new().with_file("/testbed.yaml", TESTBED.as_bytes());
        let section = load_testbed(&system, "/testbed.yaml", Some("azure")).unwrap();

        let err = render_parameter_file(&system, "/absent.json", &section, "/params.json")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read parameter template"));
    }
}
