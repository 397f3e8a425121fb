use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::markers::LineMarkerSet;
use crate::textarea::{DEFAULT_ROWS, TextareaConfig};

/// Flags that may come from the command line or a saved flag file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub rows: Option<usize>,
    pub line_markers: Vec<String>,
    pub placeholder: Option<String>,
    pub no_default_markers: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` (usually the CLI) over `self` (usually the file).
    pub fn union(&self, other: &Self) -> Self {
        Self {
            rows: other.rows.or(self.rows),
            line_markers: if other.line_markers.is_empty() {
                self.line_markers.clone()
            } else {
                other.line_markers.clone()
            },
            placeholder: other
                .placeholder
                .clone()
                .or_else(|| self.placeholder.clone()),
            no_default_markers: self.no_default_markers || other.no_default_markers,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Line markers in effect: the markdown defaults unless disabled,
    /// followed by any extra markers.
    pub fn marker_set(&self) -> LineMarkerSet {
        let mut set = if self.no_default_markers {
            LineMarkerSet::default()
        } else {
            LineMarkerSet::markdown()
        };
        for marker in &self.line_markers {
            set.push(marker.clone());
        }
        set
    }

    /// Text area configuration for the editor pane.
    pub fn textarea_config(&self, initial: String) -> TextareaConfig {
        let mut config = TextareaConfig::default()
            .with_id("editor")
            .with_default_value(initial)
            .with_rows(self.rows.unwrap_or(DEFAULT_ROWS))
            .with_auto_focus(true)
            .with_line_markers(self.marker_set());
        if let Some(placeholder) = &self.placeholder {
            config = config.with_placeholder(placeholder.clone());
        }
        config
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markarea").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markarea")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markarea").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markarea")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markarearc")
}

/// Read a flag file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut tokens = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match shlex::split(line) {
            Some(words) => tokens.extend(words),
            None => tracing::warn!(
                path = %path.display(),
                line = number + 1,
                "skipping config line with unbalanced quotes"
            ),
        }
    }
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
///
/// Returns an error if a value cannot be quoted (it contains a nul byte) or
/// the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markarea defaults (saved with --save)".to_string());
    if let Some(rows) = flags.rows {
        lines.push(format!("--rows {rows}"));
    }
    if flags.no_default_markers {
        lines.push("--no-default-markers".to_string());
    }
    for marker in &flags.line_markers {
        lines.push(format!("--line-marker {}", quote(marker)?));
    }
    if let Some(placeholder) = &flags.placeholder {
        lines.push(format!("--placeholder {}", quote(placeholder)?));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", quote(&path.display().to_string())?));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module knows out of a token list. Unknown tokens
/// and flags missing their value are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--rows" | "--line-marker" | "--placeholder" | "--log-file"
        );
        let value = if takes_value && inline_value.is_none() {
            let next = tokens.get(i + 1).cloned();
            if next.is_some() {
                i += 1;
            }
            next
        } else {
            inline_value
        };

        match (name, value) {
            ("--no-default-markers", _) => flags.no_default_markers = true,
            ("--rows", Some(value)) => {
                if let Ok(rows) = value.parse() {
                    flags.rows = Some(rows);
                }
            }
            ("--line-marker", Some(value)) => flags.line_markers.push(value),
            ("--placeholder", Some(value)) => flags.placeholder = Some(value),
            ("--log-file", Some(value)) => flags.log_file = Some(PathBuf::from(value)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn quote(value: &str) -> Result<String> {
    shlex::try_quote(value)
        .map(std::borrow::Cow::into_owned)
        .with_context(|| format!("Cannot store {value:?} in a config file"))
}
