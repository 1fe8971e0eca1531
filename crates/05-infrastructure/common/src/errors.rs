//! 错误类型定义

use thiserror::Error;

/// 类型注册错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("类型不受支持: {kind}")]
    Unsupported { kind: String },
}

impl TypeError {
    /// 创建不支持类型错误
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }
}

/// 定义命名错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("定义名称 '{name}' 不可用（格式化后为空）")]
    Empty { name: String },

    #[error("定义名称 '{name}' 不可用（保留关键字 {formatted}）")]
    Reserved { name: String, formatted: String },

    #[error("定义名称 '{name}' 不可用（首字符为数字）")]
    LeadingDigit { name: String },

    #[error("定义名称重复: {name}")]
    Duplicate { name: String },

    #[error("定义名称 '{name}' 格式化后为 {formatted}，与定义 '{other}' 冲突")]
    FormattedCollision {
        name: String,
        formatted: String,
        other: String,
    },
}

/// 构造函数和析构函数形态错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Build 必须是函数或指向结构体的指针，实际为 {kind}")]
    InvalidBuild { kind: String },

    #[error("不支持可变参数 (variadic) 的 Build 函数")]
    Variadic,

    #[error("Build 函数必须有 2 个返回值，实际为 {count}")]
    BuildOutputCount { count: usize },

    #[error("Build 函数的第二个返回值必须是 error，实际为 {actual}")]
    BuildErrorOutput { actual: String },

    #[error("Close 必须是函数，实际为 {kind}")]
    CloseNotCallable { kind: String },

    #[error("不支持可变参数 (variadic) 的 Close 函数")]
    CloseVariadic,

    #[error("Close 必须只返回一个 error")]
    CloseOutput,

    #[error("Close 必须只有一个输入参数，实际为 {count}")]
    CloseInputCount { count: usize },

    #[error("对象类型为 {object} 但 Close 使用的是 {close_input}")]
    CloseTypeMismatch { object: String, close_input: String },

    #[error("类型注册失败: {source}")]
    Type {
        #[from]
        source: TypeError,
    },
}

/// 参数绑定错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("参数 {key}: 自动填充需要恰好一个 {ty}，但没有找到该类型的定义")]
    NoCandidate { key: String, ty: String },

    #[error("参数 {key}: 自动填充需要恰好一个 {ty}，但找到 {count} 个该类型的定义: {candidates:?}")]
    Ambiguous {
        key: String,
        ty: String,
        count: usize,
        candidates: Vec<String>,
    },

    #[error("参数 {key} 应该是 {expected}，实际为 {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("参数 {key}: 找不到定义 {service}")]
    UnknownService { key: String, service: String },

    #[error("定义不应该有参数 {key}")]
    UnexpectedParam { key: String },

    #[error("参数 {key}: 使用 Build 函数的定义不能设置 AutoFill(false)")]
    AutoFillDisabledOnPositional { key: String },

    #[error("参数 {key}: 类型注册失败: {source}")]
    Type {
        key: String,
        #[source]
        source: TypeError,
    },
}

impl BindingError {
    /// 获取出错的参数键
    pub fn key(&self) -> &str {
        match self {
            Self::NoCandidate { key, .. }
            | Self::Ambiguous { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::UnknownService { key, .. }
            | Self::UnexpectedParam { key }
            | Self::AutoFillDisabledOnPositional { key }
            | Self::Type { key, .. } => key,
        }
    }
}

/// 单个定义扫描错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl From<TypeError> for DefinitionError {
    fn from(source: TypeError) -> Self {
        Self::Shape(ShapeError::Type { source })
    }
}

/// 定义提供者错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("找不到定义 {name}")]
    NotFound { name: String },

    #[error("无法添加定义: {name} 已经定义")]
    AlreadyDefined { name: String },
}

/// 扫描错误类型
///
/// 每个错误都会终止整个扫描过程，并附带出错的定义名称。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("定义提供者错误: {source}")]
    Provider {
        #[from]
        source: ProviderError,
    },

    #[error("无法扫描定义 {name}: {source}")]
    Definition {
        name: String,
        #[source]
        source: DefinitionError,
    },

    #[error("无法扫描定义 {name} 的参数: {source}")]
    Parameters {
        name: String,
        #[source]
        source: BindingError,
    },
}

impl ScanError {
    /// 创建定义错误
    pub fn definition(name: impl Into<String>, source: impl Into<DefinitionError>) -> Self {
        Self::Definition {
            name: name.into(),
            source: source.into(),
        }
    }

    /// 创建参数错误
    pub fn parameters(name: impl Into<String>, source: BindingError) -> Self {
        Self::Parameters {
            name: name.into(),
            source,
        }
    }

    /// 获取出错的定义名称
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            Self::Definition { name, .. } | Self::Parameters { name, .. } => Some(name),
            Self::Provider { .. } => None,
        }
    }

    /// 获取命名错误（如果是）
    pub fn naming_error(&self) -> Option<&NamingError> {
        match self {
            Self::Definition {
                source: DefinitionError::Naming(e),
                ..
            } => Some(e),
            _ => None,
        }
    }

    /// 获取形态错误（如果是）
    pub fn shape_error(&self) -> Option<&ShapeError> {
        match self {
            Self::Definition {
                source: DefinitionError::Shape(e),
                ..
            } => Some(e),
            _ => None,
        }
    }

    /// 获取参数绑定错误（如果是）
    pub fn binding_error(&self) -> Option<&BindingError> {
        match self {
            Self::Parameters { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 生成器错误类型
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("扫描定义失败: {source}")]
    Scan {
        #[from]
        source: ScanError,
    },

    #[error("生成器启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type TypeResult<T> = Result<T, TypeError>;
pub type ScanResult<T> = Result<T, ScanError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_accessors() {
        let err = ScanError::definition("mailer", ShapeError::Variadic);
        assert_eq!(err.definition_name(), Some("mailer"));
        assert_eq!(err.shape_error(), Some(&ShapeError::Variadic));
        assert!(err.binding_error().is_none());
        assert!(err.to_string().contains("mailer"));
        assert!(err.to_string().contains("variadic"));
    }

    #[test]
    fn test_type_error_converts_into_shape_error() {
        let err: DefinitionError = TypeError::unsupported("uintptr").into();
        assert!(matches!(
            err,
            DefinitionError::Shape(ShapeError::Type { .. })
        ));
    }

    #[test]
    fn test_binding_error_key() {
        let err = BindingError::Ambiguous {
            key: "0".to_string(),
            ty: "int".to_string(),
            count: 2,
            candidates: vec!["b".to_string(), "c".to_string()],
        };
        assert_eq!(err.key(), "0");
        assert!(err.to_string().contains("2"));
    }
}
