//! 日志初始化
//!
//! 生成输入通过标准输出交给模板阶段，日志固定写到标准错误。

use di_common::{GeneratorError, GeneratorResult};
use tracing_subscriber::EnvFilter;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 单行紧凑格式
    #[default]
    Compact,
    /// 多行易读格式
    Pretty,
    /// 每行一个 JSON 对象
    Json,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// 过滤指令，语法同 `RUST_LOG`，例如 `info,di_impl=debug`
    pub filter: String,
    /// 输出格式
    pub format: LogFormat,
    /// 是否显示事件所在的源文件和行号
    pub show_source: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
            show_source: false,
        }
    }
}

impl LoggingConfig {
    /// 使用给定的过滤指令
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }

    /// 诊断扫描问题时使用：输出每个定义的扫描细节
    pub fn verbose() -> Self {
        Self {
            filter: "debug".to_string(),
            format: LogFormat::Pretty,
            show_source: true,
        }
    }

    /// 只输出警告（例如循环依赖）和错误
    pub fn quiet() -> Self {
        Self::with_filter("warn")
    }

    /// 机器可读的日志
    pub fn json() -> Self {
        Self {
            format: LogFormat::Json,
            ..Self::default()
        }
    }

    /// 安装全局日志订阅者
    ///
    /// 进程内只能安装一次，重复安装返回错误。
    pub fn init(&self) -> GeneratorResult<()> {
        let filter = EnvFilter::try_new(&self.filter).map_err(|e| {
            GeneratorError::BootstrapFailed {
                message: format!("日志过滤指令无效 '{}': {}", self.filter, e),
            }
        })?;

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_file(self.show_source)
            .with_line_number(self.show_source);

        match self.format {
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Json => builder.json().try_init(),
        }
        .map_err(|e| GeneratorError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })
    }
}
