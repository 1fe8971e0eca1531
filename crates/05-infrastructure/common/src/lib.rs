//! # DI Common
//!
//! 依赖注入容器生成器的公共基础：错误类型、命名约定、作用域标签和扫描配置。
//!
//! ## 核心内容
//!
//! - [`ScanError`] 及其细分错误 - 所有错误都会终止整个运行
//! - [`format_def_name`] / [`def_name_is_allowed`] - 定义名称格式化与校验
//! - [`ScanConfig`] - 每次运行显式传入的保留标识符表
//!
//! ## 设计原则
//!
//! - 单次运行只写一次，没有全局可变状态
//! - 失败即终止，不暴露部分结果

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod naming;

pub use configuration::*;
pub use errors::*;
pub use naming::*;
