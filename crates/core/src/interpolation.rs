use std::collections::HashMap;

use indexmap::IndexSet;
use leon::Template;

use crate::error::{Error, Result};

pub const INPUT: &str = "input";
pub const OUTPUT: &str = "output";
pub const APP_DIR: &str = "app_dir";
pub const BIN_DIR: &str = "bin_dir";

/// Every placeholder an argument template may use.
pub const PLACEHOLDERS: [&str; 4] = [INPUT, OUTPUT, APP_DIR, BIN_DIR];

pub fn get_templates(arguments: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in arguments {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

/// Find all placeholders in all argument templates, in order of first appearance.
pub fn get_ordered_placeholders(templates: &[Template]) -> IndexSet<String> {
    let mut placeholders = IndexSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = placeholders.insert(key.to_string());
        }
    }

    placeholders
}

/// Checks that `arguments` parse and only use known placeholders.
pub fn validate_arguments(operation: &str, arguments: &[String]) -> Result<()> {
    let templates = get_templates(arguments)?;

    for placeholder in get_ordered_placeholders(&templates) {
        if !PLACEHOLDERS.contains(&placeholder.as_str()) {
            return Err(Error::UnknownPlaceholder {
                operation: operation.to_string(),
                placeholder,
                known: PLACEHOLDERS.join(", "),
            });
        }
    }

    Ok(())
}

pub fn interpolate_arguments(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}
