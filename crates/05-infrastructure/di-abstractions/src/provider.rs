//! 定义提供者抽象接口

use crate::definition::Definition;
use di_common::ProviderError;

/// 定义提供者 trait
///
/// 扫描器通过提供者获取所有服务定义。
pub trait Provider {
    /// 所有定义名称，按字母顺序排列且不重复
    fn names(&self) -> Vec<String>;

    /// 获取指定名称的定义，不存在时返回错误
    fn get(&self, name: &str) -> Result<Definition, ProviderError>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn get(&self, name: &str) -> Result<Definition, ProviderError> {
        (**self).get(name)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn get(&self, name: &str) -> Result<Definition, ProviderError> {
        (**self).get(name)
    }
}
