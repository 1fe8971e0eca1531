//! 服务定义
//!
//! 定义在运行开始时一次性提供，提供之后不可变。

use crate::types::{Describe, TypeDescriptor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 参数键：结构体字段名或函数参数位置
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// 函数参数位置
    Index(usize),
    /// 结构体字段名
    Field(String),
}

impl ParamKey {
    /// 纯数字解析为位置，其余解析为字段名
    fn classify(s: &str) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = s.parse() {
                return Self::Index(index);
            }
        }
        Self::Field(s.to_string())
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Field(name) => f.write_str(name),
        }
    }
}

impl FromStr for ParamKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

// 与 FromStr 和反序列化一致：`"0"` 是位置 0
impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        Self::classify(name)
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        Self::classify(&name)
    }
}

// 以字符串形式序列化，保证作为 map 键时与 JSON 兼容
impl Serialize for ParamKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParamKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.parse::<ParamKey>() {
            Ok(key) => Ok(key),
            Err(never) => match never {},
        }
    }
}

/// 字面量：值和它在声明时确定的类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// 字面量的值
    pub value: serde_json::Value,
    /// 值的类型，用于与参数类型比较
    pub ty: TypeDescriptor,
}

impl Literal {
    /// 使用显式类型描述创建字面量
    pub fn new(value: impl Into<serde_json::Value>, ty: TypeDescriptor) -> Self {
        Self {
            value: value.into(),
            ty,
        }
    }

    /// 从实现了 [`Describe`] 的值创建字面量
    pub fn of<T>(value: T) -> Self
    where
        T: Describe + Into<serde_json::Value>,
    {
        Self {
            ty: T::describe(),
            value: value.into(),
        }
    }
}

/// 参数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// 字面量
    Value(Literal),
    /// 引用另一个服务
    Service(String),
    /// 显式开启或关闭自动填充
    AutoFill(bool),
}

impl Param {
    /// 引用另一个服务
    pub fn service(name: impl Into<String>) -> Self {
        Self::Service(name.into())
    }

    /// 字面量参数
    pub fn value<T>(value: T) -> Self
    where
        T: Describe + Into<serde_json::Value>,
    {
        Self::Value(Literal::of(value))
    }

    /// 带显式类型的字面量参数
    pub fn typed_value(value: impl Into<serde_json::Value>, ty: TypeDescriptor) -> Self {
        Self::Value(Literal::new(value, ty))
    }
}

/// 服务定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// 唯一名称
    pub name: String,
    /// 生命周期作用域（不透明字符串）
    #[serde(default)]
    pub scope: String,
    /// 构造方式：指向结构体的指针，或返回 (对象, error) 的函数
    pub build: TypeDescriptor,
    /// 构造参数
    #[serde(default)]
    pub params: BTreeMap<ParamKey, Param>,
    /// 析构函数：接收构造出的对象并返回 error
    #[serde(default)]
    pub close: Option<TypeDescriptor>,
    /// 每次获取都创建新实例
    #[serde(default)]
    pub unshared: bool,
    /// 不作为其他服务自动填充的候选
    #[serde(default)]
    pub not_for_autofill: bool,
    /// 描述
    #[serde(default)]
    pub description: Option<String>,
}

impl Definition {
    /// 创建新的定义
    pub fn new(name: impl Into<String>, build: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            scope: String::new(),
            build,
            params: BTreeMap::new(),
            close: None,
            unshared: false,
            not_for_autofill: false,
            description: None,
        }
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// 设置参数
    pub fn with_param(mut self, key: impl Into<ParamKey>, param: Param) -> Self {
        self.params.insert(key.into(), param);
        self
    }

    /// 设置析构函数
    pub fn with_close(mut self, close: TypeDescriptor) -> Self {
        self.close = Some(close);
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 标记为非共享
    pub fn unshared(mut self) -> Self {
        self.unshared = true;
        self
    }

    /// 排除在自动填充候选之外
    pub fn not_for_autofill(mut self) -> Self {
        self.not_for_autofill = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_key_order_and_display() {
        let mut keys = vec![
            ParamKey::from("Host"),
            ParamKey::from(10usize),
            ParamKey::from(2usize),
            ParamKey::from("Addr"),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2", "10", "Addr", "Host"]);
    }

    #[test]
    fn test_param_key_from_str() {
        assert_eq!("3".parse::<ParamKey>().unwrap(), ParamKey::Index(3));
        assert_eq!(
            "Port".parse::<ParamKey>().unwrap(),
            ParamKey::Field("Port".to_string())
        );
        assert_eq!(
            "".parse::<ParamKey>().unwrap(),
            ParamKey::Field(String::new())
        );
    }

    #[test]
    fn test_param_key_from_string_matches_parse() {
        assert_eq!(ParamKey::from("0"), ParamKey::Index(0));
        assert_eq!(ParamKey::from("12".to_string()), ParamKey::Index(12));
        assert_eq!(ParamKey::from("Port"), ParamKey::Field("Port".to_string()));
        assert_eq!(ParamKey::from("v2"), ParamKey::Field("v2".to_string()));

        let def = Definition::new("server", TypeDescriptor::int())
            .with_param("1", Param::value(8080u16));
        assert!(def.params.contains_key(&ParamKey::Index(1)));
    }

    #[test]
    fn test_params_serialize_as_json_object() {
        let def = Definition::new("server", TypeDescriptor::int())
            .with_param(0usize, Param::value(8080u16))
            .with_param("Host", Param::service("host"));

        let json = serde_json::to_value(&def.params).unwrap();
        assert_eq!(json["0"]["value"]["value"], 8080);
        assert_eq!(json["Host"]["service"], "host");

        let back: BTreeMap<ParamKey, Param> = serde_json::from_value(json).unwrap();
        assert_eq!(back, def.params);
    }

    #[test]
    fn test_literal_of() {
        let literal = Literal::of("localhost".to_string());
        assert_eq!(literal.ty, TypeDescriptor::string());
        assert_eq!(literal.value, serde_json::json!("localhost"));
    }
}
