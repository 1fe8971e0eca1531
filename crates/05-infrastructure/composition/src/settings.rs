//! 生成器设置
//!
//! 加载顺序：默认值 -> 配置文件 -> 环境变量。

use di_common::{is_valid_identifier, ConfigError, ConfigResult, ScanConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error};

/// 生成的容器包的默认名称
pub const DEFAULT_PACKAGE_NAME: &str = "dic";

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "DI";

/// 生成器设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 生成的容器包名称
    pub package_name: String,
    /// 扫描配置
    pub scan: ScanConfig,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            scan: ScanConfig::default(),
        }
    }
}

impl GeneratorSettings {
    /// 从配置文件和环境变量加载设置
    ///
    /// 文件按顺序叠加，后面的覆盖前面的；环境变量最后生效，嵌套键使用 `__` 分隔，
    /// 例如 `DI_SCAN__FALLBACK_ALIAS`。
    pub fn load(files: &[PathBuf], env_prefix: Option<&str>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        for file in files {
            debug!("加载配置文件: {}", file.display());
            builder = builder.add_source(config::File::from(file.as_path()));
        }

        if let Some(prefix) = env_prefix {
            debug!("加载环境变量配置，前缀: {}", prefix);
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scan.reserved_aliases")
                    .with_list_parse_key("scan.reserved_definition_names"),
            );
        }

        let settings = builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })
    }

    /// 验证设置
    pub fn validate(&self) -> ConfigResult<()> {
        if !is_valid_identifier(&self.package_name) {
            return Err(ConfigError::validation(format!(
                "包名称不是合法的标识符: {}",
                self.package_name
            )));
        }

        self.scan.validate()
    }
}
