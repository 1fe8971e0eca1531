//! # DI Macros
//!
//! 这个 crate 提供为记录类型生成类型描述的派生宏。
//!
//! ## 核心宏
//!
//! - [`Describe`] - 实现 `di_abstractions::Describe`
//!
//! ## 使用示例
//!
//! ```rust
//! use di_abstractions::{Describe, TypeDescriptor};
//! use di_macros::Describe;
//!
//! #[derive(Describe)]
//! #[describe(namespace = "acme.io/app/mail", methods(Close))]
//! pub struct Mailer {
//!     #[describe(rename = "Host")]
//!     pub host: String,
//!     #[describe(skip)]
//!     pub cache: Vec<u8>,
//! }
//!
//! let TypeDescriptor::Struct(named) = Mailer::describe() else {
//!     panic!("expected struct");
//! };
//! assert_eq!(named.namespace, "acme.io/app/mail");
//! assert_eq!(named.fields.len(), 1);
//! assert_eq!(named.fields[0].name, "Host");
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod describe;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 类型描述派生宏
///
/// 为具名字段结构体或单元结构体实现 `Describe`。字段类型必须同样实现 `Describe`，
/// 字段按声明顺序描述，`pub` 字段视为导出字段。
///
/// # 结构体参数
///
/// - `namespace = "path/to/pkg"` - 命名空间路径（默认为模块路径，`::` 替换为 `/`）
/// - `name = "Name"` - 类型名称（默认为结构体名称）
/// - `methods(A, B)` - 方法集合
///
/// # 字段参数
///
/// - `skip` - 不描述该字段
/// - `rename = "Name"` - 描述中使用的字段名称
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    describe::derive_describe_impl(input)
}
