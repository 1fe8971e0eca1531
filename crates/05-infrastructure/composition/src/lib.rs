//! # 容器生成器组合层
//!
//! 把设置加载、日志初始化和定义扫描组合成一个完整的生成流程，输出交给模板阶段。
//!
//! ## 主要功能
//!
//! - **生成器构建器**: 使用构建者模式组装设置来源和日志
//! - **设置加载**: 默认值、配置文件和环境变量逐层覆盖
//! - **生成输入**: 把扫描结果整理为可序列化的模板输入
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_composition::GeneratorBuilder;
//! use di_impl::BaseProvider;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new()
//!         .add_config_file("di.toml")?
//!         .build()?;
//!
//!     let provider = BaseProvider::new();
//!     let input = generator.generate(provider)?;
//!     println!("{}", input.to_json()?);
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod generator;
pub mod logging;
pub mod settings;


// 重新导出主要类型
pub use builder::GeneratorBuilder;
pub use generator::{ContainerGenerator, GenerationInput};
pub use logging::{LogFormat, LoggingConfig};
pub use settings::{GeneratorSettings, DEFAULT_ENV_PREFIX, DEFAULT_PACKAGE_NAME};

// 重新导出错误类型
pub use di_common::{ConfigError, GeneratorError};
