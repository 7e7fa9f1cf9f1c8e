//! charmeleon configuration system
//!
//! Project-level configuration lives in `charmeleon.toml`. Every field has a
//! default, so an empty (or missing) file yields [`CompilerConfig::default`].
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Project-level (charmeleon.toml, or the file given with --config)
//! 3. Default values
//! ```
//!
//! # Example
//!
//! ```toml
//! [codegen]
//! indent_width = 2
//! strict_jumps = true
//!
//! [optimizer]
//! prune_unread_variables = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "charmeleon.toml";

/// Complete compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CompilerConfig {
    /// Code generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,
    /// Dead-code elimination settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Security scan settings
    #[serde(default)]
    pub sast: SastConfig,
}

/// Python code generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodegenConfig {
    /// Spaces per nesting level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Function that receives top-level statements
    #[serde(default = "default_entry_function")]
    pub entry_function: String,
    /// Fail the compilation on jumps that could not be structured
    #[serde(default)]
    pub strict_jumps: bool,
}

fn default_indent_width() -> usize {
    4
}

fn default_entry_function() -> String {
    "__global_main__".to_string()
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            entry_function: default_entry_function(),
            strict_jumps: false,
        }
    }
}

/// Optimizer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizerConfig {
    /// Run dead-code elimination at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Also drop definitions of user variables that nothing reads
    #[serde(default = "default_true")]
    pub prune_unread_variables: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prune_unread_variables: true,
        }
    }
}

/// SAST configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SastConfig {
    /// Run the security scan during builds
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SastConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Locate the project configuration file in `dir`
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<CompilerConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::ParseError)
}

/// Load configuration from an explicit file
pub fn load_config(path: &Path) -> Result<CompilerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
    parse_config(&content)
}

/// Load `--config` if given, else `charmeleon.toml` from the current
/// directory, else defaults
pub fn load_or_default(explicit: Option<&Path>) -> Result<CompilerConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let cwd = std::env::current_dir().map_err(|e| ConfigError::IoError(PathBuf::from("."), e))?;
    match find_config(&cwd) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            load_config(&path)
        },
        None => Ok(CompilerConfig::default()),
    }
}

/// Render a configuration back to TOML
pub fn to_toml(config: &CompilerConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(ConfigError::SerializeError)
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => write!(f, "IO error on {}: {}", path.display(), e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.codegen.indent_width, 4);
        assert_eq!(config.codegen.entry_function, "__global_main__");
        assert!(config.optimizer.enabled);
        assert!(config.optimizer.prune_unread_variables);
        assert!(config.sast.enabled);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
[codegen]
indent_width = 2
strict_jumps = true

[optimizer]
prune_unread_variables = false
"#,
        )
        .unwrap();
        assert_eq!(config.codegen.indent_width, 2);
        assert!(config.codegen.strict_jumps);
        assert_eq!(config.codegen.entry_function, "__global_main__");
        assert!(config.optimizer.enabled);
        assert!(!config.optimizer.prune_unread_variables);
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[codegen\nindent_width = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Config parse error"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = CompilerConfig::default();
        config.codegen.indent_width = 8;
        let text = to_toml(&config).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config(dir.path()).is_none());

        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[sast]\nenabled = false\n").unwrap();
        assert_eq!(find_config(dir.path()), Some(path.clone()));

        let config = load_config(&path).unwrap();
        assert!(!config.sast.enabled);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(..)));
    }
}
