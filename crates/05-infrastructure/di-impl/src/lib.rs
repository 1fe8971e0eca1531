//! # 依赖注入容器生成器核心实现
//!
//! 提供类型注册表、定义扫描器和参数解析器。
//!
//! ```
//! use di_abstractions::{Definition, FuncDescriptor, TypeDescriptor};
//! use di_impl::{BaseProvider, Scanner};
//!
//! let mut provider = BaseProvider::new();
//! provider
//!     .add(Definition::new(
//!         "port",
//!         TypeDescriptor::func(FuncDescriptor::constructor(vec![], TypeDescriptor::int())),
//!     ))
//!     .unwrap();
//!
//! let scan = Scanner::with_defaults(provider).scan().unwrap();
//! assert_eq!(scan.definitions[0].object_type, "int");
//! ```

pub mod cycles;
pub mod param_resolver;
pub mod provider;
pub mod scanner;
pub mod type_registry;

pub use cycles::find_dependency_cycles;
pub use param_resolver::ParamResolver;
pub use provider::BaseProvider;
pub use scanner::Scanner;
pub use type_registry::{RegisteredType, TypeRegistry};

use di_abstractions::{Provider, Scan};
use di_common::{ScanConfig, ScanResult};

/// 使用给定配置扫描提供者中的所有定义
pub fn scan<P: Provider>(provider: P, config: &ScanConfig) -> ScanResult<Scan> {
    Scanner::new(provider, config.clone()).scan()
}
