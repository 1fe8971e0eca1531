//! 扫描配置
//!
//! 保留标识符表在每次运行时作为显式配置传入，而不是进程级全局状态。

use crate::errors::ConfigError;
use crate::naming::format_namespace_alias;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 生成容器中保留的定义名称
pub const DEFAULT_RESERVED_DEFINITION_NAMES: &[&str] =
    &["C", "ErrorCallback", "Container", "NewContainer"];

/// 生成代码中保留的导入别名
pub const DEFAULT_RESERVED_ALIASES: &[&str] =
    &["dingo", "di", "providerPkg", "errors", "fmt", "http"];

/// 命名空间中没有字母时使用的别名
pub const DEFAULT_FALLBACK_ALIAS: &str = "pkg";

/// 扫描配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 保留的定义名称（格式化之后比较）
    pub reserved_definition_names: BTreeSet<String>,
    /// 保留的命名空间别名
    pub reserved_aliases: BTreeSet<String>,
    /// 备用别名
    pub fallback_alias: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            reserved_definition_names: DEFAULT_RESERVED_DEFINITION_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reserved_aliases: DEFAULT_RESERVED_ALIASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_alias: DEFAULT_FALLBACK_ALIAS.to_string(),
        }
    }
}

impl ScanConfig {
    /// 添加保留的定义名称
    pub fn with_reserved_definition_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_definition_names.insert(name.into());
        self
    }

    /// 添加保留的别名
    pub fn with_reserved_alias(mut self, alias: impl Into<String>) -> Self {
        self.reserved_aliases.insert(alias.into());
        self
    }

    /// 设置备用别名
    pub fn with_fallback_alias(mut self, alias: impl Into<String>) -> Self {
        self.fallback_alias = alias.into();
        self
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_alias.is_empty() {
            return Err(ConfigError::validation("备用别名不能为空"));
        }

        if format_namespace_alias(&self.fallback_alias) != self.fallback_alias {
            return Err(ConfigError::validation(format!(
                "备用别名只能包含字母: {}",
                self.fallback_alias
            )));
        }

        Ok(())
    }
}
