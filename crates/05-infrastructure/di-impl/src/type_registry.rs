//! 类型注册表
//!
//! 把类型描述转换为生成代码中使用的规范签名，并维护命名空间到别名的映射。
//! 同一次运行中，同一个命名空间总是得到同一个别名。

use di_abstractions::{BasicKind, FuncDescriptor, InterfaceType, NamedType, TypeDescriptor};
use di_common::{format_namespace_alias, ScanConfig, TypeError, TypeResult};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

const VENDOR_SEGMENT: &str = "/vendor/";

/// 注册结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredType {
    /// 规范签名
    pub signature: String,
    /// 生成代码中的零值
    pub zero_value: String,
}

impl RegisteredType {
    fn new(signature: impl Into<String>, zero_value: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            zero_value: zero_value.into(),
        }
    }

    fn nil(signature: impl Into<String>) -> Self {
        Self::new(signature, "nil")
    }
}

/// 类型注册表
///
/// 每次运行创建一个，不在运行之间共享。
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    /// 命名空间 -> 别名
    imports: BTreeMap<String, String>,
    /// 别名基础名 -> 下一个后缀
    counters: BTreeMap<String, usize>,
    reserved_aliases: BTreeSet<String>,
    fallback_alias: String,
}

impl TypeRegistry {
    /// 使用扫描配置创建类型注册表
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            imports: BTreeMap::new(),
            counters: BTreeMap::new(),
            reserved_aliases: config.reserved_aliases.clone(),
            fallback_alias: config.fallback_alias.clone(),
        }
    }

    /// 注册的所有命名空间及其别名
    pub fn imports(&self) -> BTreeMap<String, String> {
        self.imports.clone()
    }

    /// 查询已注册命名空间的别名
    pub fn alias_of(&self, namespace: &str) -> Option<&str> {
        self.imports
            .get(strip_vendor(namespace))
            .map(String::as_str)
    }

    /// 注册类型，返回规范签名和零值
    pub fn register(&mut self, ty: &TypeDescriptor) -> TypeResult<RegisteredType> {
        match ty {
            TypeDescriptor::Basic(BasicKind::Uintptr) => {
                Err(TypeError::unsupported(BasicKind::Uintptr.name()))
            }
            TypeDescriptor::Basic(kind) => Ok(RegisteredType::new(kind.name(), kind.zero_value())),
            TypeDescriptor::UnsafePointer => Err(TypeError::unsupported(ty.kind_name())),
            TypeDescriptor::Array { len, elem } => {
                let elem = self.register(elem)?;
                let signature = format!("[{}]{}", len, elem.signature);
                let zero_value = format!("{}{{}}", signature);
                Ok(RegisteredType::new(signature, zero_value))
            }
            TypeDescriptor::Slice { elem } => {
                let elem = self.register(elem)?;
                Ok(RegisteredType::nil(format!("[]{}", elem.signature)))
            }
            TypeDescriptor::Map { key, value } => {
                let key = self.register(key)?;
                let value = self.register(value)?;
                Ok(RegisteredType::nil(format!(
                    "map[{}]{}",
                    key.signature, value.signature
                )))
            }
            TypeDescriptor::Chan { dir, elem } => {
                let elem = self.register(elem)?;
                Ok(RegisteredType::nil(format!(
                    "{} {}",
                    dir.prefix(),
                    elem.signature
                )))
            }
            TypeDescriptor::Pointer { elem } => {
                let elem = self.register(elem)?;
                Ok(RegisteredType::nil(format!("*{}", elem.signature)))
            }
            TypeDescriptor::Func(func) => self.register_func(func),
            TypeDescriptor::Interface(iface) => Ok(RegisteredType::nil(self.register_interface(iface))),
            TypeDescriptor::Struct(named) => self.register_struct(named),
        }
    }

    fn register_func(&mut self, func: &FuncDescriptor) -> TypeResult<RegisteredType> {
        let last = func.inputs.len().saturating_sub(1);
        let mut inputs = Vec::with_capacity(func.inputs.len());

        for (i, input) in func.inputs.iter().enumerate() {
            let signature = match input {
                TypeDescriptor::Slice { elem } if func.variadic && i == last => {
                    format!("...{}", self.register(elem)?.signature)
                }
                _ => self.register(input)?.signature,
            };
            inputs.push(signature);
        }

        let outputs = func
            .outputs
            .iter()
            .map(|output| self.register(output).map(|r| r.signature))
            .collect::<TypeResult<Vec<_>>>()?;

        let inputs = inputs.join(", ");
        let signature = match outputs.as_slice() {
            [] => format!("func({})", inputs),
            [output] => format!("func({}) {}", inputs, output),
            outputs => format!("func({}) ({})", inputs, outputs.join(", ")),
        };

        Ok(RegisteredType::nil(signature))
    }

    fn register_interface(&mut self, iface: &InterfaceType) -> String {
        if let Some(alias) = self.add_import(&iface.namespace) {
            return format!("{}.{}", alias, iface.name);
        }
        if iface.name.is_empty() {
            return "interface{}".to_string();
        }
        iface.name.clone()
    }

    fn register_struct(&mut self, named: &NamedType) -> TypeResult<RegisteredType> {
        if named.name.is_empty() {
            return Err(TypeError::unsupported("anonymous struct"));
        }

        let signature = match self.add_import(&named.namespace) {
            Some(alias) => format!("{}.{}", alias, named.name),
            None => named.name.clone(),
        };
        let zero_value = format!("{}{{}}", signature);

        Ok(RegisteredType::new(signature, zero_value))
    }

    fn add_import(&mut self, namespace: &str) -> Option<String> {
        if namespace.is_empty() {
            return None;
        }

        let path = strip_vendor(namespace);
        if let Some(alias) = self.imports.get(path) {
            return Some(alias.clone());
        }

        let alias = self.create_alias(path);
        debug!("注册命名空间: {} as {}", path, alias);
        self.imports.insert(path.to_string(), alias.clone());

        Some(alias)
    }

    fn create_alias(&mut self, path: &str) -> String {
        let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

        let mut base = format_namespace_alias(segment);
        if base.is_empty() {
            base = self.fallback_alias.clone();
        }

        // 保留别名从 1 开始计数，第一次使用就带后缀
        let reserved = self.reserved_aliases.contains(&base);
        let counter = self
            .counters
            .entry(base.clone())
            .or_insert(usize::from(reserved));

        let alias = if *counter > 0 {
            format!("{}{}", base, counter)
        } else {
            base
        };
        *counter += 1;

        alias
    }
}

/// 去掉 vendor 前缀，保留最后一个 `/vendor/` 之后的路径
fn strip_vendor(namespace: &str) -> &str {
    match namespace.rfind(VENDOR_SEGMENT) {
        Some(index) => &namespace[index + VENDOR_SEGMENT.len()..],
        None => namespace,
    }
}
