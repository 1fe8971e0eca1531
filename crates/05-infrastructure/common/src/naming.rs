//! 命名约定
//!
//! 将任意定义名称转换为生成代码中可用的标识符，并校验保留关键字。

use crate::errors::NamingError;
use std::collections::BTreeSet;

/// 将定义名称格式化为生成容器中使用的标识符
///
/// 每一段连续的非字母数字字符都会开启一个新的"单词"，单词的第一个字母数字
/// 字符转为大写，非字母数字字符全部丢弃。
///
/// ```
/// use di_common::format_def_name;
///
/// assert_eq!(format_def_name("mailer.smtp-transport"), "MailerSmtpTransport");
/// ```
pub fn format_def_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len());
    let mut start = true;

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            start = true;
            continue;
        }

        if start {
            formatted.push(c.to_ascii_uppercase());
            start = false;
        } else {
            formatted.push(c);
        }
    }

    formatted
}

/// 检查定义名称是否可用
///
/// 格式化后的名称为空、与保留关键字相同或以数字开头时返回错误。
pub fn def_name_is_allowed(name: &str, reserved: &BTreeSet<String>) -> Result<(), NamingError> {
    let formatted = format_def_name(name);

    let Some(first) = formatted.chars().next() else {
        return Err(NamingError::Empty {
            name: name.to_string(),
        });
    };

    if reserved.contains(&formatted) {
        return Err(NamingError::Reserved {
            name: name.to_string(),
            formatted,
        });
    }

    if first.is_ascii_digit() {
        return Err(NamingError::LeadingDigit {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// 格式化命名空间别名，只保留字母
pub fn format_namespace_alias(segment: &str) -> String {
    segment.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// 检查字符串是否为合法的标识符（字母或下划线开头，仅包含字母、数字、下划线）
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
