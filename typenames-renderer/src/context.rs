//! Template context: the payload user templates render against.

use serde::{Deserialize, Serialize};

use typenames_core::SuffixName;

/// Values exposed to a user template.
///
/// ```text
/// {{ type_name }}    TSNames
/// {{ suffix_name }}  ts
/// {{ names }}        ["\"a\"", "\"b\""]   (quoted)
/// {{ raw_names }}    ["a", "b"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContext {
    pub type_name: String,
    pub suffix_name: String,
    pub names: Vec<String>,
    pub raw_names: Vec<String>,
}

impl TemplateContext {
    /// Build from already-quoted names; `raw_names` drops the outer quotes.
    pub fn new(suffix_name: &SuffixName, quoted: &[String]) -> Self {
        let raw_names = quoted
            .iter()
            .map(|n| {
                n.strip_prefix('"')
                    .and_then(|n| n.strip_suffix('"'))
                    .unwrap_or(n)
                    .to_string()
            })
            .collect();
        Self {
            type_name: suffix_name.type_name(),
            suffix_name: suffix_name.0.clone(),
            names: quoted.to_vec(),
            raw_names,
        }
    }
}
