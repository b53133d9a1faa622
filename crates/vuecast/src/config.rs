//! Configuration loading.

use camino::Utf8Path;
use serde::Deserialize;
use std::fs;

/// The config file looked up in the workspace root.
pub const CONFIG_FILE: &str = "vuecast.config.json";

/// Project configuration from `vuecast.config.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VuecastConfig {
    /// File name suffixes to scan. Only `.astro` files are ever converted,
    /// so this narrows the scan (e.g. `.page.astro`).
    pub extensions: Vec<String>,

    /// Glob patterns to skip, relative to the workspace.
    pub ignore: Vec<String>,

    /// Whether to report conversion diagnostics.
    pub diagnostics: Option<bool>,
}

impl VuecastConfig {
    /// Loads configuration from the workspace root.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is reported and also yields the defaults.
    pub fn load(project_root: &Utf8Path) -> Self {
        let config_path = project_root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::parse(&content))
        {
            Ok(config) => {
                log::debug!("loaded {config_path}");
                config
            }
            Err(e) => {
                log::warn!("failed to parse {config_path}: {e}");
                Self::default()
            }
        }
    }

    /// Parses JSON with `//` and `/* */` comments and trailing commas.
    pub fn parse(content: &str) -> Result<Self, String> {
        let content = remove_trailing_commas(&remove_json_comments(content));
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    /// Returns the file extensions to process.
    pub fn file_extensions(&self) -> Vec<&str> {
        if self.extensions.is_empty() {
            vec![".astro"]
        } else {
            self.extensions.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Returns whether diagnostics are enabled (defaults to true).
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics.unwrap_or(true)
    }
}

/// Removes single-line and multi-line comments outside of strings.
fn remove_json_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                '"' => in_string = false,
                '\\' => result.extend(chars.next()),
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                result.push(c);
                in_string = true;
            }
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                while let Some(next) = chars.next() {
                    if next == '*' && chars.next_if_eq(&'/').is_some() {
                        break;
                    }
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Removes commas that directly precede `}` or `]`, ignoring whitespace.
fn remove_trailing_commas(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in json.char_indices() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == ',' {
            let next = json[i + 1..].trim_start().chars().next();
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        if c == '"' {
            in_string = true;
        }
        result.push(c);
    }

    result
}
