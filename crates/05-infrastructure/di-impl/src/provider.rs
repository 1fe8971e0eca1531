//! 内存定义提供者

use di_abstractions::{Definition, Provider};
use di_common::ProviderError;
use std::collections::BTreeMap;
use tracing::debug;

/// 基础定义提供者
///
/// 定义按名称存储，[`Provider::names`] 按字母顺序返回。
#[derive(Debug, Clone, Default)]
pub struct BaseProvider {
    definitions: BTreeMap<String, Definition>,
}

impl BaseProvider {
    /// 创建空的提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加定义，名称已存在时返回错误
    pub fn add(&mut self, definition: Definition) -> Result<(), ProviderError> {
        if self.definitions.contains_key(&definition.name) {
            return Err(ProviderError::AlreadyDefined {
                name: definition.name,
            });
        }

        debug!("添加定义: {}", definition.name);
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// 批量添加定义，遇到第一个重复名称时停止
    pub fn add_all(
        &mut self,
        definitions: impl IntoIterator<Item = Definition>,
    ) -> Result<(), ProviderError> {
        for definition in definitions {
            self.add(definition)?;
        }
        Ok(())
    }

    /// 检查是否包含指定名称的定义
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Provider for BaseProvider {
    fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Result<Definition, ProviderError> {
        self.definitions
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                name: name.to_string(),
            })
    }
}
