//! Raw plugin options as handed over by the host compiler.
//!
//! Two shapes are accepted:
//!
//! - **List form**: `[{ "expose": "utils", "src": "./src/utils" }, ...]`. A lone
//!   `{expose, src}` object is treated as a one-element list.
//! - **Map form**: `{ "cwd": ..., "root": ..., "alias": {...}, "extensions": [...] }`.
//!
//! Nothing here touches the filesystem; see [`crate::normalize`] for that.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Sentinel `cwd` value asking for the nearest project config file's directory.
pub const PROJECT_CONFIG_CWD: &str = "fromProjectConfig";

/// Historical spelling of [`PROJECT_CONFIG_CWD`].
pub const LEGACY_PROJECT_CONFIG_CWD: &str = "babelrc";

/// One `{expose, src}` record of the list form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposeEntry {
    pub expose: String,
    pub src: String,
}

/// Where literal targets and relative roots are anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CwdOption {
    Path(PathBuf),
    /// Use the directory of the nearest project config file.
    ProjectConfig,
}

impl CwdOption {
    fn parse(value: &str) -> Self {
        if value == PROJECT_CONFIG_CWD || value == LEGACY_PROJECT_CONFIG_CWD {
            CwdOption::ProjectConfig
        } else {
            CwdOption::Path(PathBuf::from(value))
        }
    }
}

/// Map-form options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedOptions {
    pub cwd: Option<CwdOption>,
    pub root: Vec<String>,
    /// Alias key to target, in configuration order.
    pub alias: IndexMap<String, String>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOptions {
    Simple(Vec<ExposeEntry>),
    Extended(ExtendedOptions),
}

impl Default for PluginOptions {
    fn default() -> Self {
        PluginOptions::Extended(ExtendedOptions::default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct RawExtended {
    #[serde(default)]
    cwd: Option<String>,
    #[serde(default)]
    root: Option<OneOrMany>,
    #[serde(default)]
    alias: Option<IndexMap<String, Value>>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
}

impl PluginOptions {
    /// Parse host-provided options.
    ///
    /// # Example
    ///
    /// ```
    /// use modalias_config::PluginOptions;
    /// use serde_json::json;
    ///
    /// let options = PluginOptions::from_value(&json!([
    ///     { "expose": "utils", "src": "./src/mylib/subfolder/utils" }
    /// ]))
    /// .unwrap();
    ///
    /// assert!(matches!(options, PluginOptions::Simple(ref entries) if entries.len() == 1));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(PluginOptions::default()),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| parse_expose_entry(index, item))
                .collect::<Result<Vec<_>>>()
                .map(PluginOptions::Simple),
            Value::Object(map) if map.contains_key("expose") || map.contains_key("src") => {
                Ok(PluginOptions::Simple(vec![parse_expose_entry(0, value)?]))
            }
            Value::Object(_) => parse_extended(value).map(PluginOptions::Extended),
            other => Err(ConfigError::InvalidShape(other.clone())),
        }
    }
}

fn parse_expose_entry(index: usize, item: &Value) -> Result<ExposeEntry> {
    let Value::Object(map) = item else {
        return Err(ConfigError::InvalidShape(item.clone()));
    };

    let field = |name: &'static str| -> Result<String> {
        match map.get(name) {
            None | Some(Value::Null) => Err(ConfigError::MissingField { index, field: name }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(ConfigError::NotAString {
                key: format!("{name} (entry #{index})"),
                value: other.clone(),
            }),
        }
    };

    Ok(ExposeEntry {
        expose: field("expose")?,
        src: field("src")?,
    })
}

fn parse_extended(value: &Value) -> Result<ExtendedOptions> {
    let raw: RawExtended =
        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })?;

    let mut alias = IndexMap::new();
    for (key, value) in raw.alias.unwrap_or_default() {
        match value {
            Value::String(target) => {
                alias.insert(key, target);
            }
            other => return Err(ConfigError::NotAString { key, value: other }),
        }
    }

    let root = match raw.root {
        None => Vec::new(),
        Some(OneOrMany::One(root)) => vec![root],
        Some(OneOrMany::Many(roots)) => roots,
    };

    Ok(ExtendedOptions {
        cwd: raw.cwd.as_deref().map(CwdOption::parse),
        root,
        alias,
        extensions: raw.extensions,
    })
}
