//! 宏工具函数

use syn::{Field, Ident, LitStr, Result};

/// 字段级别的 `#[describe(...)]` 参数
#[derive(Debug, Default)]
pub struct FieldArgs {
    /// 不出现在描述中
    pub skip: bool,
    /// 描述中使用的字段名称
    pub rename: Option<String>,
}

/// 解析字段上的 `#[describe(skip)]` / `#[describe(rename = "...")]`
pub fn field_describe_args(field: &Field) -> Result<FieldArgs> {
    let mut args = FieldArgs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("describe")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                args.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                if !is_valid_identifier(&value.value()) {
                    return Err(meta.error("rename 必须是合法的标识符"));
                }
                args.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("未知的字段参数，支持 skip、rename"))
            }
        })?;
    }

    Ok(args)
}

/// 去掉原始标识符的 `r#` 前缀
pub fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// 验证标识符是否有效
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first_char) = chars.next() else {
        return false;
    };

    // 第一个字符必须是字母或下划线
    if !first_char.is_alphabetic() && first_char != '_' {
        return false;
    }

    // 其余字符必须是字母、数字或下划线
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, ItemStruct};

    fn first_field(item: &ItemStruct) -> &Field {
        item.fields.iter().next().unwrap()
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("valid_name"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("name123"));
        assert!(is_valid_identifier("CamelCase"));

        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("123invalid"));
        assert!(!is_valid_identifier("invalid-name"));
        assert!(!is_valid_identifier("invalid.name"));
    }

    #[test]
    fn test_unraw() {
        let raw: Ident = parse_quote!(r#type);
        let plain: Ident = parse_quote!(host);
        assert_eq!(unraw(&raw), "type");
        assert_eq!(unraw(&plain), "host");
    }

    #[test]
    fn test_field_args_skip_and_rename() {
        let item: ItemStruct = parse_quote! {
            struct Mailer {
                #[describe(rename = "Host")]
                host: String,
            }
        };
        let args = field_describe_args(first_field(&item)).unwrap();
        assert!(!args.skip);
        assert_eq!(args.rename.as_deref(), Some("Host"));

        let item: ItemStruct = parse_quote! {
            struct Mailer {
                #[describe(skip)]
                cache: Vec<u8>,
            }
        };
        let args = field_describe_args(first_field(&item)).unwrap();
        assert!(args.skip);
        assert!(args.rename.is_none());
    }

    #[test]
    fn test_field_args_ignore_other_attributes() {
        let item: ItemStruct = parse_quote! {
            struct Mailer {
                #[serde(default)]
                host: String,
            }
        };
        let args = field_describe_args(first_field(&item)).unwrap();
        assert!(!args.skip);
        assert!(args.rename.is_none());
    }

    #[test]
    fn test_field_args_reject_unknown_key() {
        let item: ItemStruct = parse_quote! {
            struct Mailer {
                #[describe(optional)]
                host: String,
            }
        };
        assert!(field_describe_args(first_field(&item)).is_err());

        let item: ItemStruct = parse_quote! {
            struct Mailer {
                #[describe(rename = "not-valid")]
                host: String,
            }
        };
        assert!(field_describe_args(first_field(&item)).is_err());
    }
}
