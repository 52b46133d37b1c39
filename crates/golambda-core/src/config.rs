use serde::{Deserialize, Serialize};

/// File name of the optional per-project configuration.
pub const CONFIG_FILE_NAME: &str = "golambda.toml";

/// golambda.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GolambdaConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub package: PackageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Toolchain executable, resolved through PATH
    #[serde(default = "default_program")]
    pub program: String,
    /// Namespace prefix for generated module paths
    #[serde(default = "default_module_prefix")]
    pub module_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// GOOS for the compile step
    #[serde(default = "default_os")]
    pub os: String,
    /// GOARCH for the compile step
    #[serde(default = "default_arch")]
    pub arch: String,
    /// Name of the intermediate binary and of the archive entry
    #[serde(default = "default_binary_name")]
    pub binary_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Dependency manifests carried into staging when present.
    /// The first entry is the module manifest whose presence skips `mod init`.
    #[serde(default = "default_manifests")]
    pub manifests: Vec<String>,
    /// Deflate level for the output archive (1..=9)
    #[serde(default = "default_compression_level")]
    pub compression_level: i64,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            module_prefix: default_module_prefix(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            os: default_os(),
            arch: default_arch(),
            binary_name: default_binary_name(),
        }
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            manifests: default_manifests(),
            compression_level: default_compression_level(),
        }
    }
}

impl PackageConfig {
    /// The manifest that declares the module, if any is configured.
    pub fn module_manifest(&self) -> Option<&str> {
        self.manifests.first().map(String::as_str)
    }
}

impl GolambdaConfig {
    /// Load from golambda.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        Self::load_file(&project_dir.join(CONFIG_FILE_NAME), false)
    }

    /// Load from an explicit path. Unlike [`GolambdaConfig::load`], a missing
    /// file is an error when `required` is set.
    pub fn load_file(config_path: &std::path::Path, required: bool) -> crate::Result<Self> {
        if !required && !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        let level = self.package.compression_level;
        if !(1..=9).contains(&level) {
            return Err(crate::Error::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

fn default_program() -> String {
    "go".to_owned()
}

fn default_module_prefix() -> String {
    "github.com/nhost.io".to_owned()
}

fn default_os() -> String {
    "linux".to_owned()
}

fn default_arch() -> String {
    "amd64".to_owned()
}

fn default_binary_name() -> String {
    "main".to_owned()
}

fn default_manifests() -> Vec<String> {
    vec!["go.mod".to_owned(), "go.sum".to_owned()]
}

fn default_compression_level() -> i64 {
    9
}
