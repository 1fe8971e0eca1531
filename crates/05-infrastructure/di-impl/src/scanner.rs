//! 定义扫描器
//!
//! 按提供者给出的顺序逐个校验定义：名称 -> 构造方式 -> 析构函数。全部通过后
//! 统一解析参数。任何错误都会终止整个扫描。

use crate::cycles::find_dependency_cycles;
use crate::param_resolver::ParamResolver;
use crate::type_registry::TypeRegistry;
use di_abstractions::{BuildKind, Definition, Provider, ResolvedDefinition, Scan, TypeDescriptor};
use di_common::{
    def_name_is_allowed, format_def_name, DefinitionError, NamingError, ScanConfig, ScanError,
    ScanResult, ShapeError,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// 构造方式校验结果
struct BuildShape {
    kind: BuildKind,
    build_type: String,
    object_type: String,
    object_descriptor: TypeDescriptor,
    empty_object: String,
}

/// 定义扫描器
pub struct Scanner<P> {
    provider: P,
    config: ScanConfig,
}

impl<P: Provider> Scanner<P> {
    /// 创建扫描器
    pub fn new(provider: P, config: ScanConfig) -> Self {
        Self { provider, config }
    }

    /// 使用默认配置创建扫描器
    pub fn with_defaults(provider: P) -> Self {
        Self::new(provider, ScanConfig::default())
    }

    /// 获取扫描配置
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// 扫描所有定义并解析参数
    pub fn scan(&self) -> ScanResult<Scan> {
        let mut registry = TypeRegistry::new(&self.config);
        let mut names = BTreeSet::new();
        let mut formatted_names: BTreeMap<String, String> = BTreeMap::new();
        let mut raw = Vec::new();
        let mut definitions = Vec::new();

        for name in self.provider.names() {
            let def = self.provider.get(&name)?;

            debug!("扫描定义: {}", def.name);

            let resolved = self
                .scan_definition(&def, &mut registry, &mut names, &mut formatted_names)
                .map_err(|e| ScanError::definition(&def.name, e))?;

            definitions.push(resolved);
            raw.push(def);
        }

        // 参数类型注册之前的导入表
        let imports_without_params = registry.imports();

        ParamResolver::new(&mut registry, &definitions).resolve(&raw, &mut definitions)?;

        let scan = Scan {
            definitions,
            imports: registry.imports(),
            imports_without_params,
        };

        for cycle in find_dependency_cycles(&scan) {
            warn!("检测到循环依赖: {}", cycle.join(" -> "));
        }

        info!(
            "扫描完成: {} 个定义, {} 个导入",
            scan.definitions.len(),
            scan.imports.len()
        );

        Ok(scan)
    }

    fn scan_definition(
        &self,
        def: &Definition,
        registry: &mut TypeRegistry,
        names: &mut BTreeSet<String>,
        formatted_names: &mut BTreeMap<String, String>,
    ) -> Result<ResolvedDefinition, DefinitionError> {
        let formatted_name = self.check_name(def, names, formatted_names)?;

        let shape = scan_build(&def.build, registry)?;

        let close_type = match &def.close {
            Some(close) => scan_close(close, &shape.object_type, registry)?,
            None => String::new(),
        };

        Ok(ResolvedDefinition {
            name: def.name.clone(),
            formatted_name,
            scope: def.scope.clone(),
            description: def.description.clone(),
            object_type: shape.object_type,
            object_descriptor: shape.object_descriptor,
            empty_object: shape.empty_object,
            build_kind: shape.kind,
            build_type: shape.build_type,
            params: BTreeMap::new(),
            close_type,
            unshared: def.unshared,
            not_for_autofill: def.not_for_autofill,
        })
    }

    fn check_name(
        &self,
        def: &Definition,
        names: &mut BTreeSet<String>,
        formatted_names: &mut BTreeMap<String, String>,
    ) -> Result<String, NamingError> {
        if !names.insert(def.name.clone()) {
            return Err(NamingError::Duplicate {
                name: def.name.clone(),
            });
        }

        def_name_is_allowed(&def.name, &self.config.reserved_definition_names)?;

        let formatted = format_def_name(&def.name);
        if let Some(other) = formatted_names.get(&formatted) {
            return Err(NamingError::FormattedCollision {
                name: def.name.clone(),
                formatted,
                other: other.clone(),
            });
        }
        formatted_names.insert(formatted.clone(), def.name.clone());

        Ok(formatted)
    }
}

/// 校验构造方式：指向结构体的指针，或返回 (对象, error) 的非可变参数函数
fn scan_build(build: &TypeDescriptor, registry: &mut TypeRegistry) -> Result<BuildShape, ShapeError> {
    if let TypeDescriptor::Func(func) = build {
        if func.variadic {
            return Err(ShapeError::Variadic);
        }

        let [object, err] = func.outputs.as_slice() else {
            return Err(ShapeError::BuildOutputCount {
                count: func.outputs.len(),
            });
        };

        if !err.satisfies_error() {
            return Err(ShapeError::BuildErrorOutput {
                actual: registry.register(err)?.signature,
            });
        }

        let build_type = registry.register(build)?.signature;
        let object_registered = registry.register(object)?;

        return Ok(BuildShape {
            kind: BuildKind::Callable,
            build_type,
            object_type: object_registered.signature,
            object_descriptor: object.clone(),
            empty_object: object_registered.zero_value,
        });
    }

    let Some(named) = build.pointee_record() else {
        return Err(ShapeError::InvalidBuild {
            kind: build.kind_name().to_string(),
        });
    };

    let build_type = registry
        .register(&TypeDescriptor::record(named.clone()))?
        .signature;
    let object_registered = registry.register(build)?;

    Ok(BuildShape {
        kind: BuildKind::Record,
        build_type,
        object_type: object_registered.signature,
        object_descriptor: build.clone(),
        empty_object: object_registered.zero_value,
    })
}

/// 校验析构函数：`func(object) error`，返回析构函数签名
fn scan_close(
    close: &TypeDescriptor,
    object_type: &str,
    registry: &mut TypeRegistry,
) -> Result<String, ShapeError> {
    let TypeDescriptor::Func(func) = close else {
        return Err(ShapeError::CloseNotCallable {
            kind: close.kind_name().to_string(),
        });
    };

    if func.variadic {
        return Err(ShapeError::CloseVariadic);
    }

    match func.outputs.as_slice() {
        [output] if output.satisfies_error() => {}
        _ => return Err(ShapeError::CloseOutput),
    }

    let [input] = func.inputs.as_slice() else {
        return Err(ShapeError::CloseInputCount {
            count: func.inputs.len(),
        });
    };

    let close_type = registry.register(close)?.signature;
    let close_input = registry.register(input)?.signature;

    if close_input != object_type {
        return Err(ShapeError::CloseTypeMismatch {
            object: object_type.to_string(),
            close_input,
        });
    }

    Ok(close_type)
}
