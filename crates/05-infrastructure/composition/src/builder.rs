//! 容器生成器构建器

use crate::generator::ContainerGenerator;
use crate::logging::LoggingConfig;
use crate::settings::{GeneratorSettings, DEFAULT_ENV_PREFIX};
use di_common::{ConfigError, GeneratorResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 容器生成器构建器
///
/// 使用建造者模式组装设置来源，显式设置的值优先于配置文件和环境变量。
pub struct GeneratorBuilder {
    /// 配置文件列表
    config_files: Vec<PathBuf>,
    /// 环境变量前缀，`None` 表示不读取环境变量
    env_prefix: Option<String>,
    /// 显式设置的包名称
    package_name: Option<String>,
    /// 额外保留的定义名称
    reserved_definition_names: Vec<String>,
    /// 额外保留的别名
    reserved_aliases: Vec<String>,
    /// 显式设置的备用别名
    fallback_alias: Option<String>,
    /// 是否在加载后验证设置
    validate: bool,
    /// 构建时安装的日志配置，`None` 表示由调用方自行安装
    logging: Option<LoggingConfig>,
}

impl GeneratorBuilder {
    /// 创建新的生成器构建器
    pub fn new() -> Self {
        Self {
            config_files: Vec::new(),
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            package_name: None,
            reserved_definition_names: Vec::new(),
            reserved_aliases: Vec::new(),
            fallback_alias: None,
            validate: true,
            logging: None,
        }
    }

    /// 添加配置文件（TOML 或 JSON，按扩展名识别）
    pub fn add_config_file<P: AsRef<Path>>(mut self, path: P) -> GeneratorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        info!("添加配置文件: {}", path.display());
        self.config_files.push(path.to_path_buf());
        Ok(self)
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 设置生成的容器包名称
    pub fn with_package_name<S: Into<String>>(mut self, name: S) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// 添加保留的定义名称
    pub fn reserve_definition_name<S: Into<String>>(mut self, name: S) -> Self {
        self.reserved_definition_names.push(name.into());
        self
    }

    /// 添加保留的命名空间别名
    pub fn reserve_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.reserved_aliases.push(alias.into());
        self
    }

    /// 设置备用别名
    pub fn with_fallback_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.fallback_alias = Some(alias.into());
        self
    }

    /// 启用或禁用设置验证
    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// 构建时安装日志订阅者
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 加载并合并设置，不初始化日志
    pub fn settings(&self) -> GeneratorResult<GeneratorSettings> {
        let mut settings =
            GeneratorSettings::load(&self.config_files, self.env_prefix.as_deref())?;

        if let Some(name) = &self.package_name {
            settings.package_name = name.clone();
        }
        settings
            .scan
            .reserved_definition_names
            .extend(self.reserved_definition_names.iter().cloned());
        settings
            .scan
            .reserved_aliases
            .extend(self.reserved_aliases.iter().cloned());
        if let Some(alias) = &self.fallback_alias {
            settings.scan.fallback_alias = alias.clone();
        }

        if self.validate {
            debug!("开始配置验证");
            settings.validate()?;
        }

        Ok(settings)
    }

    /// 构建容器生成器
    pub fn build(self) -> GeneratorResult<ContainerGenerator> {
        if let Some(logging) = &self.logging {
            logging.init()?;
        }

        info!("开始构建容器生成器");
        let settings = self.settings()?;

        info!("容器生成器构建完成: 包名称 {}", settings.package_name);
        Ok(ContainerGenerator::new(settings))
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
