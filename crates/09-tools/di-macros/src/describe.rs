//! Describe 派生宏实现

use crate::utils::{field_describe_args, is_valid_identifier, unraw};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Result, Visibility};

/// 结构体级别的 `#[describe(...)]` 参数
#[derive(Debug, Default)]
pub struct DescribeArgs {
    /// 命名空间路径，默认为模块路径
    pub namespace: Option<String>,
    /// 类型名称，默认为结构体名称
    pub name: Option<String>,
    /// 方法集合，用于接口满足性判断
    pub methods: Vec<String>,
}

impl DescribeArgs {
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = DescribeArgs::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("describe")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("namespace") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.namespace = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if !is_valid_identifier(&value.value()) {
                        return Err(meta.error("name 必须是合法的标识符"));
                    }
                    args.name = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("methods") {
                    meta.parse_nested_meta(|method| {
                        let ident = method
                            .path
                            .get_ident()
                            .ok_or_else(|| method.error("方法名称必须是标识符"))?;
                        args.methods.push(unraw(ident));
                        Ok(())
                    })
                } else {
                    Err(meta.error("未知的 describe 参数，支持 namespace、name、methods"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 实现 #[derive(Describe)]
pub fn derive_describe_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Describe 不支持泛型结构体",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Describe 不支持元组结构体",
                ))
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Describe 只能用于结构体",
            ))
        }
    };

    let args = DescribeArgs::from_input(input)?;
    let struct_name = &input.ident;
    let type_name = args.name.unwrap_or_else(|| unraw(struct_name));

    let namespace = match &args.namespace {
        Some(namespace) => quote! { ::std::string::String::from(#namespace) },
        None => quote! { ::std::module_path!().replace("::", "/") },
    };

    let methods = &args.methods;

    let mut field_descriptors = Vec::new();
    for field in fields {
        let field_args = field_describe_args(field)?;
        if field_args.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_args.rename.unwrap_or_else(|| unraw(ident));
        let field_type = &field.ty;
        let exported = matches!(field.vis, Visibility::Public(_));

        field_descriptors.push(quote! {
            ::di_abstractions::FieldDescriptor::new(
                #field_name,
                <#field_type as ::di_abstractions::Describe>::reference(),
                #exported,
            )
        });
    }

    Ok(quote! {
        impl ::di_abstractions::Describe for #struct_name {
            fn describe() -> ::di_abstractions::TypeDescriptor {
                ::di_abstractions::TypeDescriptor::Struct(::di_abstractions::NamedType {
                    namespace: #namespace,
                    name: ::std::string::String::from(#type_name),
                    fields: ::std::vec![#(#field_descriptors),*],
                    methods: ::std::vec![#(::std::string::String::from(#methods)),*],
                })
            }

            fn reference() -> ::di_abstractions::TypeDescriptor {
                ::di_abstractions::TypeDescriptor::Struct(::di_abstractions::NamedType {
                    namespace: #namespace,
                    name: ::std::string::String::from(#type_name),
                    fields: ::std::vec::Vec::new(),
                    methods: ::std::vec![#(::std::string::String::from(#methods)),*],
                })
            }
        }
    })
}
