//! 参数解析器
//!
//! 在所有定义扫描完成之后运行一次，为每个构造参数确定绑定：字面量、显式服务
//! 引用，或按类型自动填充的唯一候选。

use crate::type_registry::TypeRegistry;
use di_abstractions::{
    BuildKind, Definition, Literal, Param, ParamBinding, ParamKey, ResolvedDefinition,
    TypeDescriptor,
};
use di_common::{BindingError, ScanError, ScanResult};
use std::collections::BTreeMap;
use tracing::debug;

/// 参数解析器
pub struct ParamResolver<'a> {
    registry: &'a mut TypeRegistry,
    /// 定义名称 -> 下标
    by_name: BTreeMap<String, usize>,
    /// 对象类型签名 -> 可用于自动填充的定义下标
    by_type: BTreeMap<String, Vec<usize>>,
}

impl<'a> ParamResolver<'a> {
    /// 为已扫描的定义建立索引
    pub fn new(registry: &'a mut TypeRegistry, definitions: &[ResolvedDefinition]) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_type: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, def) in definitions.iter().enumerate() {
            by_name.insert(def.name.clone(), index);
            if !def.not_for_autofill {
                by_type.entry(def.object_type.clone()).or_default().push(index);
            }
        }

        Self {
            registry,
            by_name,
            by_type,
        }
    }

    /// 解析所有定义的参数
    ///
    /// `raw` 与 `definitions` 一一对应。遇到第一个错误即终止。
    pub fn resolve(
        mut self,
        raw: &[Definition],
        definitions: &mut [ResolvedDefinition],
    ) -> ScanResult<()> {
        for (index, def) in raw.iter().enumerate() {
            let params = self
                .resolve_definition(index, def, definitions)
                .map_err(|e| ScanError::parameters(&def.name, e))?;

            debug!("定义 {} 的参数解析完成: {} 个参数", def.name, params.len());
            definitions[index].params = params;
        }

        Ok(())
    }

    fn resolve_definition(
        &mut self,
        owner: usize,
        raw: &Definition,
        definitions: &[ResolvedDefinition],
    ) -> Result<BTreeMap<ParamKey, ParamBinding>, BindingError> {
        let build_kind = definitions[owner].build_kind;
        let mut params = self.expected_params(owner, build_kind, &raw.build)?;

        for (key, binding) in params.iter_mut() {
            let positional = build_kind == BuildKind::Callable;
            match raw.params.get(key) {
                None | Some(Param::AutoFill(true)) => {
                    self.autofill(binding, !positional, definitions)?
                }
                Some(Param::AutoFill(false)) => {
                    if positional {
                        return Err(BindingError::AutoFillDisabledOnPositional {
                            key: key.to_string(),
                        });
                    }
                    binding.unset = true;
                }
                Some(Param::Service(service)) => {
                    self.bind_service(binding, service, definitions)?
                }
                Some(Param::Value(literal)) => self.bind_literal(binding, literal)?,
            }
        }

        if let Some(key) = raw.params.keys().find(|key| !params.contains_key(*key)) {
            return Err(BindingError::UnexpectedParam {
                key: key.to_string(),
            });
        }

        Ok(params)
    }

    /// 期望的参数集合：函数的每个位置参数，或结构体的每个导出字段
    fn expected_params(
        &mut self,
        owner: usize,
        build_kind: BuildKind,
        build: &TypeDescriptor,
    ) -> Result<BTreeMap<ParamKey, ParamBinding>, BindingError> {
        let expected: Vec<(ParamKey, usize, &TypeDescriptor)> = match (build_kind, build) {
            (BuildKind::Callable, TypeDescriptor::Func(func)) => func
                .inputs
                .iter()
                .enumerate()
                .map(|(i, ty)| (ParamKey::Index(i), i, ty))
                .collect(),
            (BuildKind::Record, _) => build
                .pointee_record()
                .map(|named| {
                    named
                        .fields
                        .iter()
                        .enumerate()
                        .filter(|(_, field)| field.exported)
                        .map(|(i, field)| (ParamKey::Field(field.name.clone()), i, &field.ty))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        let mut params = BTreeMap::new();
        for (key, position, ty) in expected {
            let registered = self
                .registry
                .register(ty)
                .map_err(|source| BindingError::Type {
                    key: key.to_string(),
                    source,
                })?;

            params.insert(
                key.clone(),
                ParamBinding {
                    key,
                    position,
                    type_signature: registered.signature,
                    zero_value: registered.zero_value,
                    descriptor: ty.clone(),
                    service_name: None,
                    literal: None,
                    unset: false,
                    owner,
                },
            );
        }

        Ok(params)
    }

    fn autofill(
        &self,
        binding: &mut ParamBinding,
        accept_not_found: bool,
        definitions: &[ResolvedDefinition],
    ) -> Result<(), BindingError> {
        let candidates = self
            .by_type
            .get(&binding.type_signature)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match candidates {
            [] if accept_not_found => {
                binding.unset = true;
                Ok(())
            }
            [] => Err(BindingError::NoCandidate {
                key: binding.key.to_string(),
                ty: binding.type_signature.clone(),
            }),
            [candidate] => {
                binding.service_name = Some(definitions[*candidate].name.clone());
                Ok(())
            }
            candidates => Err(BindingError::Ambiguous {
                key: binding.key.to_string(),
                ty: binding.type_signature.clone(),
                count: candidates.len(),
                candidates: candidates
                    .iter()
                    .map(|&index| definitions[index].name.clone())
                    .collect(),
            }),
        }
    }

    fn bind_service(
        &self,
        binding: &mut ParamBinding,
        service: &str,
        definitions: &[ResolvedDefinition],
    ) -> Result<(), BindingError> {
        let Some(&index) = self.by_name.get(service) else {
            return Err(BindingError::UnknownService {
                key: binding.key.to_string(),
                service: service.to_string(),
            });
        };

        let target = &definitions[index];
        if !accepts(binding, &target.object_type, &target.object_descriptor) {
            return Err(BindingError::TypeMismatch {
                key: binding.key.to_string(),
                expected: binding.type_signature.clone(),
                actual: target.object_type.clone(),
            });
        }

        binding.service_name = Some(service.to_string());
        Ok(())
    }

    fn bind_literal(
        &mut self,
        binding: &mut ParamBinding,
        literal: &Literal,
    ) -> Result<(), BindingError> {
        let registered = self
            .registry
            .register(&literal.ty)
            .map_err(|source| BindingError::Type {
                key: binding.key.to_string(),
                source,
            })?;

        if !accepts(binding, &registered.signature, &literal.ty) {
            return Err(BindingError::TypeMismatch {
                key: binding.key.to_string(),
                expected: binding.type_signature.clone(),
                actual: registered.signature,
            });
        }

        binding.literal = Some(literal.clone());
        Ok(())
    }
}

/// 签名相同，或期望类型是接口且实际类型满足该接口
fn accepts(binding: &ParamBinding, signature: &str, descriptor: &TypeDescriptor) -> bool {
    signature == binding.type_signature
        || (binding.descriptor.is_interface() && descriptor.implements(&binding.descriptor))
}
