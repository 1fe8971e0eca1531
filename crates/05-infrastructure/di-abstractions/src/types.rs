//! 类型描述模型
//!
//! 在声明时显式给出构造函数签名和字段类型，代替运行时反射。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// 基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    /// 仅地址语义，无法在生成代码中表示
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    /// 类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
        }
    }

    /// 零值在生成代码中的写法
    pub fn zero_value(&self) -> &'static str {
        match self {
            Self::Bool => "false",
            Self::String => "\"\"",
            _ => "0",
        }
    }
}

/// 通道方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    #[default]
    Both,
    Recv,
    Send,
}

impl ChanDir {
    /// 通道类型前缀
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Both => "chan",
            Self::Recv => "<-chan",
            Self::Send => "chan<-",
        }
    }
}

/// 函数类型描述
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FuncDescriptor {
    pub inputs: Vec<TypeDescriptor>,
    pub outputs: Vec<TypeDescriptor>,
    pub variadic: bool,
}

impl FuncDescriptor {
    /// 创建空函数描述
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加输入参数
    pub fn input(mut self, ty: TypeDescriptor) -> Self {
        self.inputs.push(ty);
        self
    }

    /// 添加返回值
    pub fn output(mut self, ty: TypeDescriptor) -> Self {
        self.outputs.push(ty);
        self
    }

    /// 标记最后一个参数为可变参数
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// 构造函数形态：`func(inputs...) (object, error)`
    pub fn constructor(inputs: Vec<TypeDescriptor>, object: TypeDescriptor) -> Self {
        Self {
            inputs,
            outputs: vec![object, TypeDescriptor::error()],
            variadic: false,
        }
    }

    /// 析构函数形态：`func(object) error`
    pub fn closer(object: TypeDescriptor) -> Self {
        Self {
            inputs: vec![object],
            outputs: vec![TypeDescriptor::error()],
            variadic: false,
        }
    }
}

/// 接口类型描述
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceType {
    /// 命名空间路径，空字符串表示内建或本地类型
    pub namespace: String,
    /// 接口名称，空字符串表示匿名接口
    pub name: String,
    /// 接口要求的方法集合
    pub methods: Vec<String>,
}

impl InterfaceType {
    /// 内建 error 接口
    pub fn error() -> Self {
        Self {
            namespace: String::new(),
            name: "error".to_string(),
            methods: vec!["Error".to_string()],
        }
    }

    /// 匿名空接口，任何类型都满足
    pub fn any() -> Self {
        Self::default()
    }
}

/// 结构体字段描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    /// 只有导出的字段才参与参数解析
    pub exported: bool,
}

impl FieldDescriptor {
    /// 创建字段描述
    pub fn new(name: impl Into<String>, ty: TypeDescriptor, exported: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            exported,
        }
    }
}

/// 具名结构体描述
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedType {
    pub namespace: String,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    /// 该类型拥有的方法集合，用于接口满足性判断
    pub methods: Vec<String>,
}

impl NamedType {
    /// 创建具名结构体描述
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// 添加导出字段
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty, true));
        self
    }

    /// 添加非导出字段
    pub fn private_field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty, false));
        self
    }

    /// 添加方法
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    /// 不带字段的浅引用
    pub fn reference(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            fields: Vec::new(),
            methods: self.methods.clone(),
        }
    }
}

/// 类型描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Basic(BasicKind),
    /// 仅地址语义，无法在生成代码中表示
    UnsafePointer,
    Array {
        len: usize,
        elem: Box<TypeDescriptor>,
    },
    Slice {
        elem: Box<TypeDescriptor>,
    },
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeDescriptor>,
    },
    Func(FuncDescriptor),
    Interface(InterfaceType),
    Pointer {
        elem: Box<TypeDescriptor>,
    },
    Struct(NamedType),
}

impl TypeDescriptor {
    /// 基础类型
    pub fn basic(kind: BasicKind) -> Self {
        Self::Basic(kind)
    }

    /// `bool`
    pub fn bool() -> Self {
        Self::Basic(BasicKind::Bool)
    }

    /// `int`
    pub fn int() -> Self {
        Self::Basic(BasicKind::Int)
    }

    /// `string`
    pub fn string() -> Self {
        Self::Basic(BasicKind::String)
    }

    /// 内建 `error` 接口
    pub fn error() -> Self {
        Self::Interface(InterfaceType::error())
    }

    /// 匿名空接口 `interface{}`
    pub fn any() -> Self {
        Self::Interface(InterfaceType::any())
    }

    /// 定长数组 `[len]elem`
    pub fn array(len: usize, elem: TypeDescriptor) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// 切片 `[]elem`
    pub fn slice(elem: TypeDescriptor) -> Self {
        Self::Slice {
            elem: Box::new(elem),
        }
    }

    /// 映射 `map[key]value`
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// 指定方向的通道
    pub fn chan(dir: ChanDir, elem: TypeDescriptor) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// 指针 `*elem`
    pub fn pointer(elem: TypeDescriptor) -> Self {
        Self::Pointer {
            elem: Box::new(elem),
        }
    }

    /// 函数类型
    pub fn func(func: FuncDescriptor) -> Self {
        Self::Func(func)
    }

    /// 具名结构体（值类型）
    pub fn record(named: NamedType) -> Self {
        Self::Struct(named)
    }

    /// 具名接口及其方法集合
    pub fn interface(
        namespace: impl Into<String>,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Interface(InterfaceType {
            namespace: namespace.into(),
            name: name.into(),
            methods: methods.into_iter().map(Into::into).collect(),
        })
    }

    /// 从实现了 [`Describe`] 的类型获取描述
    pub fn of<T: Describe + ?Sized>() -> Self {
        T::describe()
    }

    /// 类型种类名称，用于错误信息
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Basic(kind) => kind.name(),
            Self::UnsafePointer => "unsafe pointer",
            Self::Array { .. } => "array",
            Self::Slice { .. } => "slice",
            Self::Map { .. } => "map",
            Self::Chan { .. } => "chan",
            Self::Func(_) => "func",
            Self::Interface(_) => "interface",
            Self::Pointer { .. } => "pointer",
            Self::Struct(_) => "struct",
        }
    }

    /// 是否为接口类型
    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    /// 如果是指向结构体的指针，返回该结构体
    pub fn pointee_record(&self) -> Option<&NamedType> {
        match self {
            Self::Pointer { elem } => match elem.as_ref() {
                Self::Struct(named) => Some(named),
                _ => None,
            },
            _ => None,
        }
    }

    /// 类型的方法集合
    ///
    /// 结构体的方法同时属于结构体本身和指向它的指针。
    pub fn method_set(&self) -> &[String] {
        match self {
            Self::Struct(named) => named.methods.as_slice(),
            Self::Interface(iface) => iface.methods.as_slice(),
            Self::Pointer { elem } => match elem.as_ref() {
                Self::Struct(named) => named.methods.as_slice(),
                _ => &[],
            },
            _ => &[],
        }
    }

    /// 检查该类型是否满足给定接口
    pub fn satisfies(&self, iface: &InterfaceType) -> bool {
        let methods = self.method_set();
        iface.methods.iter().all(|m| methods.contains(m))
    }

    /// 检查该类型是否满足 error 约定
    pub fn satisfies_error(&self) -> bool {
        self.satisfies(&InterfaceType::error())
    }

    /// 检查该类型能否赋值给期望类型（仅处理接口满足性，结构相等由签名比较完成）
    pub fn implements(&self, expected: &TypeDescriptor) -> bool {
        match expected {
            Self::Interface(iface) => self.satisfies(iface),
            _ => false,
        }
    }
}

/// 声明时提供类型描述的 trait
///
/// 记录类型通过 `#[derive(Describe)]` 实现。
///
/// `Box<T>`、`Arc<T>`、`Rc<T>` 描述为指向 `T::reference()` 的指针，不含字段。
/// 结构体构造的定义需要字段，应写成 `TypeDescriptor::pointer(T::describe())`，
/// 不能用 `TypeDescriptor::of::<Box<T>>()`。
pub trait Describe {
    /// 完整描述（结构体包含字段）
    fn describe() -> TypeDescriptor;

    /// 浅描述，具名结构体不展开字段，用于字段和容器元素，避免自引用类型无限展开
    fn reference() -> TypeDescriptor {
        Self::describe()
    }
}

macro_rules! impl_describe_basic {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Basic(BasicKind::$kind)
                }
            }
        )*
    };
}

impl_describe_basic! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    str => String,
    &str => String,
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::slice(T::reference())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(N, T::reference())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::reference(), V::reference())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::reference(), V::reference())
    }
}

macro_rules! impl_describe_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ptr<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::pointer(T::reference())
                }
            }
        )*
    };
}

impl_describe_pointer!(Box, Arc, Rc);
