use crate::config::QuikBakConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{QuikBakError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use toml::{Table, Value};

/// Table holding all settings, mirroring the `quikbak.*` settings namespace.
pub const CONFIG_SECTION: &str = "quikbak";
pub const DEFAULT_CONFIG_FILE: &str = "quikbak.toml";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// 替換環境變數 (例如 ${BACKUP_PATTERN})，未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

/// Parses a TOML document and returns its `[quikbak]` table.
fn parse_section(content: &str) -> Result<Table> {
    let processed = substitute_env_vars(content);
    let mut document: Table = toml::from_str(&processed)?;

    match document.remove(CONFIG_SECTION) {
        None => Ok(Table::new()),
        Some(Value::Table(section)) => Ok(section),
        Some(other) => Err(QuikBakError::ConfigValidationError {
            field: CONFIG_SECTION.to_string(),
            message: format!("expected a table, found {}", other.type_str()),
        }),
    }
}

/// Reads settings from a TOML file on every lookup. A missing file means
/// every key is unset.
#[derive(Debug, Clone)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_section(&self) -> Result<Table> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_section(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", self.path.display());
                Ok(Table::new())
            }
            Err(e) => Err(QuikBakError::io_at(&self.path, e)),
        }
    }

    /// Writes the default settings to the file. Refuses to replace an
    /// existing file unless `force` is set.
    pub fn write_defaults(&self, force: bool) -> Result<()> {
        if self.path.exists() && !force {
            return Err(QuikBakError::ConfigError {
                message: format!(
                    "{} already exists (use --force to overwrite)",
                    self.path.display()
                ),
            });
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| QuikBakError::io_at(parent, e))?;
        }

        let content = QuikBakConfig::default().to_toml_string()?;
        std::fs::write(&self.path, content).map_err(|e| QuikBakError::io_at(&self.path, e))
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_section()?.remove(key))
    }
}

/// Fixed in-memory settings.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    values: Table,
}

impl StaticConfigProvider {
    pub fn new(values: Table) -> Self {
        Self { values }
    }

    /// Takes the `[quikbak]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Self::new(parse_section(content)?))
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }
}

/// Overrides layered on top of another provider, used for command-line flags.
#[derive(Debug, Clone)]
pub struct LayeredConfigProvider<B: ConfigProvider> {
    overrides: Table,
    base: B,
}

impl<B: ConfigProvider> LayeredConfigProvider<B> {
    pub fn new(base: B) -> Self {
        Self {
            overrides: Table::new(),
            base,
        }
    }

    pub fn with_override(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.to_string(), value.into());
        self
    }

    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: ConfigProvider> ConfigProvider for LayeredConfigProvider<B> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.overrides.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.base.get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_reads_section_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[quikbak]
namingPattern = "{filename}_bak.{ext}"
includeTimestamp = false
largeFileSizeMB = 0.5
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let provider = TomlConfigProvider::new(temp_file.path());
        let config = QuikBakConfig::from_provider(&provider).unwrap();

        assert_eq!(config.naming_pattern, "{filename}_bak.{ext}");
        assert!(!config.include_timestamp);
        assert_eq!(config.large_file_size_mb, 0.5);
        assert_eq!(config.timestamp_format, "YYYY-MM-DD_HHmmss");
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let temp = TempDir::new().unwrap();
        let provider = TomlConfigProvider::new(temp.path().join("absent.toml"));
        assert_eq!(provider.get("namingPattern").unwrap(), None);
        assert_eq!(
            QuikBakConfig::from_provider(&provider).unwrap(),
            QuikBakConfig::default()
        );
    }

    #[test]
    fn test_file_is_reread_on_every_lookup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quikbak.toml");
        let provider = TomlConfigProvider::new(&path);

        std::fs::write(&path, "[quikbak]\nincludeTimestamp = true\n").unwrap();
        assert_eq!(
            provider.get("includeTimestamp").unwrap(),
            Some(Value::Boolean(true))
        );

        std::fs::write(&path, "[quikbak]\nincludeTimestamp = false\n").unwrap();
        assert_eq!(
            provider.get("includeTimestamp").unwrap(),
            Some(Value::Boolean(false))
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUIKBAK_TEST_FORMAT", "YYYYMMDD");

        let provider = StaticConfigProvider::from_toml_str(
            "[quikbak]\ntimestampFormat = \"${QUIKBAK_TEST_FORMAT}\"\n",
        )
        .unwrap();
        assert_eq!(
            provider.get("timestampFormat").unwrap(),
            Some(Value::String("YYYYMMDD".to_string()))
        );

        std::env::remove_var("QUIKBAK_TEST_FORMAT");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let provider = StaticConfigProvider::from_toml_str(
            "[quikbak]\nnamingPattern = \"${QUIKBAK_SURELY_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(
            provider.get("namingPattern").unwrap(),
            Some(Value::String("${QUIKBAK_SURELY_UNSET_VAR}".to_string()))
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = StaticConfigProvider::from_toml_str("[quikbak\nbroken");
        assert!(matches!(result, Err(QuikBakError::TomlError(_))));
    }

    #[test]
    fn test_section_must_be_a_table() {
        let result = StaticConfigProvider::from_toml_str("quikbak = 3\n");
        assert!(matches!(
            result,
            Err(QuikBakError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_overrides_win_over_base() {
        let base = StaticConfigProvider::from_toml_str(
            "[quikbak]\nincludeTimestamp = true\nnamingPattern = \"{filename}.{ext}\"\n",
        )
        .unwrap();
        let layered = LayeredConfigProvider::new(base).with_override("includeTimestamp", false);

        let config = QuikBakConfig::from_provider(&layered).unwrap();
        assert!(!config.include_timestamp);
        assert_eq!(config.naming_pattern, "{filename}.{ext}");
    }

    #[test]
    fn test_write_defaults_refuses_to_clobber() {
        let temp = TempDir::new().unwrap();
        let provider = TomlConfigProvider::new(temp.path().join("nested").join("quikbak.toml"));

        provider.write_defaults(false).unwrap();
        assert_eq!(
            QuikBakConfig::from_provider(&provider).unwrap(),
            QuikBakConfig::default()
        );

        assert!(matches!(
            provider.write_defaults(false),
            Err(QuikBakError::ConfigError { .. })
        ));
        assert!(provider.write_defaults(true).is_ok());
    }
}
