//! 扫描结果模型
//!
//! 扫描器为每个定义生成一个 [`ResolvedDefinition`]，参数解析器填充其参数绑定，
//! 之后整个 [`Scan`] 冻结并交给模板阶段。

use crate::definition::{Literal, ParamKey};
use crate::types::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 构造方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    /// 调用返回 (对象, error) 的函数
    Callable,
    /// 实例化结构体并填充字段
    Record,
}

/// 已解析的参数绑定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamBinding {
    /// 参数键
    pub key: ParamKey,
    /// 函数参数位置或字段声明顺序
    pub position: usize,
    /// 期望类型签名
    pub type_signature: String,
    /// 期望类型的零值
    pub zero_value: String,
    /// 期望类型描述
    pub descriptor: TypeDescriptor,
    /// 绑定的服务名称，字面量或刻意留空时为 `None`
    pub service_name: Option<String>,
    /// 绑定的字面量
    pub literal: Option<Literal>,
    /// 结构体字段刻意不填充
    pub unset: bool,
    /// 所属定义在 [`Scan::definitions`] 中的下标
    pub owner: usize,
}

impl ParamBinding {
    /// 是否绑定到字面量
    pub fn is_literal(&self) -> bool {
        self.literal.is_some()
    }

    /// 是否绑定到其他服务
    pub fn is_service(&self) -> bool {
        self.service_name.is_some()
    }
}

/// 已解析的服务定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDefinition {
    /// 定义名称
    pub name: String,
    /// 生成代码中使用的名称
    pub formatted_name: String,
    /// 作用域
    pub scope: String,
    /// 描述
    pub description: Option<String>,
    /// 对象类型签名
    pub object_type: String,
    /// 对象类型描述
    pub object_descriptor: TypeDescriptor,
    /// 对象类型的零值
    pub empty_object: String,
    /// 构造方式
    pub build_kind: BuildKind,
    /// 构造类型签名：函数签名或结构体签名
    pub build_type: String,
    /// 按参数键排序的绑定
    pub params: BTreeMap<ParamKey, ParamBinding>,
    /// 析构函数签名，没有析构函数时为空
    pub close_type: String,
    /// 每次获取都创建新实例
    pub unshared: bool,
    /// 不参与自动填充
    pub not_for_autofill: bool,
}

impl ResolvedDefinition {
    /// 构造时是否需要访问提供者中的原始定义
    ///
    /// 函数构造总是需要；结构体构造只在有字面量参数时需要。
    pub fn needs_raw_definition(&self) -> bool {
        match self.build_kind {
            BuildKind::Callable => true,
            BuildKind::Record => self.params.values().any(ParamBinding::is_literal),
        }
    }

    /// 是否声明了析构函数
    pub fn has_close(&self) -> bool {
        !self.close_type.is_empty()
    }

    /// 是否通过函数构造
    pub fn is_callable(&self) -> bool {
        self.build_kind == BuildKind::Callable
    }

    /// 绑定到其他服务的参数引用的服务名称
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.params
            .values()
            .filter_map(|binding| binding.service_name.as_deref())
    }
}

/// 一次扫描的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// 按提供者顺序排列的定义
    pub definitions: Vec<ResolvedDefinition>,
    /// 命名空间到别名的完整映射
    pub imports: BTreeMap<String, String>,
    /// 参数解析之前的别名映射，不含只出现在字段和字面量类型中的命名空间
    pub imports_without_params: BTreeMap<String, String>,
}

impl Scan {
    /// 按名称查找定义
    pub fn get(&self, name: &str) -> Option<&ResolvedDefinition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// 参数绑定所属的定义
    pub fn owner_of(&self, binding: &ParamBinding) -> Option<&ResolvedDefinition> {
        self.definitions.get(binding.owner)
    }

    /// 定义数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 是否没有定义
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
