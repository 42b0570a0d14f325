//! Documentation template generation.

use crate::error::{Error, Result};
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of documentation skeleton to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Readme,
    Api,
    Guide,
    Changelog,
}

impl TemplateKind {
    fn default_sections(&self) -> &'static [&'static str] {
        match self {
            TemplateKind::Readme => &["Overview", "Installation", "Usage", "License"],
            TemplateKind::Api => &["Authentication", "Endpoints", "Request Format", "Responses", "Errors"],
            TemplateKind::Guide => &["Introduction", "Prerequisites", "Steps", "Troubleshooting"],
            TemplateKind::Changelog => &["Unreleased", "Added", "Changed", "Fixed"],
        }
    }
}

/// Generate a Markdown documentation skeleton.
///
/// Caller-provided `sections` replace the kind's defaults. The generated
/// document carries an ISO date stamp.
pub fn generate(title: &str, kind: TemplateKind, sections: Option<&[String]>) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidParams {
            reason: "title must not be empty".to_string(),
        });
    }

    let date = chrono::Utc::now().format("%Y-%m-%d");
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!("> Generated on {}\n\n", date));

    match sections {
        Some(custom) => {
            for section in custom {
                let section = section.trim();
                if !section.is_empty() {
                    out.push_str(&format!("## {}\n\n_TBD_\n\n", section));
                }
            }
        }
        None => {
            for section in kind.default_sections() {
                out.push_str(&format!("## {}\n\n_TBD_\n\n", section));
            }
        }
    }

    Ok(out.trim_end().to_string() + "\n")
}
