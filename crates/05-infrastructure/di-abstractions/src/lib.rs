//! # DI Abstractions
//!
//! 容器生成器的抽象层，定义服务声明、类型描述和扫描结果的数据模型。
//!
//! ## 核心接口
//!
//! - [`TypeDescriptor`] / [`Describe`] - 声明时给出的类型描述
//! - [`Definition`] / [`Param`] - 原始服务定义
//! - [`Provider`] - 定义提供者接口
//! - [`Scan`] / [`ResolvedDefinition`] - 扫描与参数解析之后的结果

pub mod definition;
pub mod provider;
pub mod render;
pub mod scan;
pub mod types;

pub use definition::*;
pub use provider::*;
pub use scan::*;
pub use types::*;
