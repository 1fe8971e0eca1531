//! 生成代码注释与参数列表的渲染辅助函数
//!
//! 供模板阶段使用，输出内容与参数顺序完全确定。

use crate::scan::{BuildKind, ResolvedDefinition};

const COMMENT_PREFIX: &str = "\t\t// ";
const COMMENT_RULE: &str = "\t\t// ---------------------------------------------";

// 字符串序列化不会失败
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

fn single_line(value: &str) -> String {
    value.replace('\n', "")
}

impl ResolvedDefinition {
    /// 构造调用中的参数列表
    ///
    /// 函数构造为 `p0, p1`，结构体构造为每行一个 `Field: pN,`。
    pub fn params_string(&self) -> String {
        match self.build_kind {
            BuildKind::Callable => (0..self.params.len())
                .map(|i| format!("p{}", i))
                .collect::<Vec<_>>()
                .join(", "),
            BuildKind::Record => self
                .params
                .iter()
                .map(|(key, binding)| format!("{}: p{},\n", key, binding.position))
                .collect(),
        }
    }

    /// 注释中的作用域，未设置时为 `main`
    pub fn comment_scope(&self) -> String {
        if self.scope.is_empty() {
            "main".to_string()
        } else {
            single_line(&self.scope)
        }
    }

    pub fn comment_description(&self) -> String {
        let description = match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => return String::new(),
        };

        let mut comment: String = description
            .split('\n')
            .map(|line| format!("{}{}\n", COMMENT_PREFIX, line))
            .collect();
        comment.push_str("\t\t//\n");
        comment
    }

    /// 注释中的参数列表，按键排序
    pub fn comment_params(&self) -> String {
        if self.params.is_empty() {
            return format!("{}\tparams: nil\n", COMMENT_PREFIX);
        }

        let mut comment = format!("{}\tparams:\n", COMMENT_PREFIX);
        for (key, binding) in &self.params {
            let ty = single_line(&binding.type_signature);
            comment.push_str(&format!("{}\t\t- {}: ", COMMENT_PREFIX, quote(&key.to_string())));
            match &binding.service_name {
                Some(service) => {
                    comment.push_str(&format!("Service({}) [{}]\n", ty, quote(service)));
                }
                None => comment.push_str(&format!("Value({})\n", ty)),
            }
        }
        comment
    }

    /// 生成代码中定义的完整注释块
    pub fn generate_comment(&self) -> String {
        let mut comment = self.comment_description();

        comment.push_str(COMMENT_RULE);
        comment.push('\n');
        comment.push_str(&format!("{}\tname: {}\n", COMMENT_PREFIX, quote(&self.name)));
        comment.push_str(&format!(
            "{}\ttype: {}\n",
            COMMENT_PREFIX,
            single_line(&self.object_type)
        ));
        comment.push_str(&format!(
            "{}\tscope: {}\n",
            COMMENT_PREFIX,
            quote(&self.comment_scope())
        ));

        let build = match self.build_kind {
            BuildKind::Callable => "func",
            BuildKind::Record => "struct",
        };
        comment.push_str(&format!("{}\tbuild: {}\n", COMMENT_PREFIX, build));

        comment.push_str(&self.comment_params());

        comment.push_str(&format!("{}\tunshared: {}\n", COMMENT_PREFIX, self.unshared));
        comment.push_str(&format!("{}\tclose: {}\n", COMMENT_PREFIX, self.has_close()));
        comment.push_str(COMMENT_RULE);

        comment
    }
}
