//! 生命周期作用域标签
//!
//! 作用域对核心来说是不透明字符串，这里只提供运行时容器常用的标签。

/// 应用作用域
pub const APP: &str = "app";

/// 请求作用域
pub const REQUEST: &str = "request";

/// 子请求作用域
pub const SUB_REQUEST: &str = "subrequest";

/// 默认作用域列表，按从外到内的顺序
pub const DEFAULT_SCOPES: &[&str] = &[APP, REQUEST, SUB_REQUEST];
