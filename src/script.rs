//! Step Scripts
//!
//! TOML schema for the runner binary: an ordered list of keyword invocations.
//!
//! ```toml
//! [[step]]
//! keyword = "create_excel_document"
//! args = ["doc1"]
//!
//! [[step]]
//! keyword = "write_excel_cell"
//! args = ["1", "1", "text"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A whole script file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One keyword invocation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Step {
    pub keyword: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Script {
    /// Load and parse a script file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse script {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let text = r#"
            [[step]]
            keyword = "create_excel_document"
            args = ["doc1"]

            [[step]]
            keyword = "close_all_excel_documents"
        "#;
        let script: Script = toml::from_str(text).expect("parse script");
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0].keyword, "create_excel_document");
        assert_eq!(script.steps[0].args, vec!["doc1".to_string()]);
        assert!(script.steps[1].args.is_empty());
    }

    #[test]
    fn test_empty_script_is_valid() {
        let script: Script = toml::from_str("").expect("parse empty script");
        assert!(script.steps.is_empty());
    }
}
