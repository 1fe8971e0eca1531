//! 容器生成器
//!
//! 运行扫描并把结果整理为模板阶段使用的输入。

use crate::settings::GeneratorSettings;
use di_abstractions::{Provider, ResolvedDefinition, Scan};
use di_common::{GeneratorError, GeneratorResult};
use di_impl::Scanner;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

/// 模板阶段的输入
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationInput {
    /// 生成的容器包名称
    pub package_name: String,
    /// 定义文件使用的完整导入表
    pub definitions_imports: BTreeMap<String, String>,
    /// 容器文件使用的导入表，不含只出现在参数类型中的命名空间
    pub container_imports: BTreeMap<String, String>,
    pub definitions: Vec<ResolvedDefinition>,
}

impl GenerationInput {
    fn from_scan(package_name: &str, scan: Scan) -> Self {
        Self {
            package_name: package_name.to_string(),
            definitions_imports: scan.imports,
            container_imports: scan.imports_without_params,
            definitions: scan.definitions,
        }
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> GeneratorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GeneratorError::BootstrapFailed {
            message: format!("序列化生成输入失败: {}", e),
        })
    }
}

/// 容器生成器
#[derive(Debug, Clone)]
pub struct ContainerGenerator {
    settings: GeneratorSettings,
}

impl ContainerGenerator {
    /// 使用已验证的设置创建生成器
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// 获取设置
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// 扫描提供者中的定义，生成模板输入
    ///
    /// 扫描失败时不产生任何输出。
    pub fn generate<P: Provider>(&self, provider: P) -> GeneratorResult<GenerationInput> {
        info!("开始生成容器: {}", self.settings.package_name);

        let scan = Scanner::new(provider, self.settings.scan.clone())
            .scan()
            .map_err(|e| {
                error!("扫描定义失败: {}", e);
                e
            })?;

        let input = GenerationInput::from_scan(&self.settings.package_name, scan);
        info!(
            "容器生成输入准备完成: {} 个定义",
            input.definitions.len()
        );
        Ok(input)
    }
}

impl Default for ContainerGenerator {
    fn default() -> Self {
        Self::new(GeneratorSettings::default())
    }
}
