//! Centralized integration tests for di-macros crate

use di_abstractions::{
    BasicKind, Definition, Describe, FieldDescriptor, FuncDescriptor, NamedType, ParamKey,
    TypeDescriptor,
};
use di_common::ScanConfig;
use di_impl::{scan, BaseProvider};
use di_macros::Describe;
use std::collections::BTreeMap;

/// 邮件传输接口的描述占位类型
pub struct Transport;

impl Describe for Transport {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::interface("acme.io/app/mail", "Transport", ["Send"])
    }
}

/// 测试服务
#[derive(Describe)]
#[describe(namespace = "acme.io/app/mail", methods(Close))]
pub struct Mailer {
    #[describe(rename = "Host")]
    pub host: String,
    #[describe(rename = "Transport")]
    pub transport: Transport,
    #[describe(skip)]
    pub outbox: Vec<String>,
    retries: u8,
}

#[derive(Describe)]
#[describe(namespace = "acme.io/app/mail", name = "Smtp", methods(Send))]
pub struct SmtpTransport {
    pub headers: BTreeMap<String, String>,
    pub fallbacks: Vec<SmtpTransport>,
}

#[derive(Describe)]
pub struct Local {
    pub r#type: String,
}

fn named(ty: TypeDescriptor) -> NamedType {
    match ty {
        TypeDescriptor::Struct(named) => named,
        other => panic!("expected struct, got {:?}", other),
    }
}

#[test]
fn test_describe_fields_in_declaration_order() {
    let mailer = named(Mailer::describe());

    assert_eq!(mailer.namespace, "acme.io/app/mail");
    assert_eq!(mailer.name, "Mailer");
    assert_eq!(mailer.methods, vec!["Close".to_string()]);
    assert_eq!(
        mailer.fields,
        vec![
            FieldDescriptor::new("Host", TypeDescriptor::string(), true),
            FieldDescriptor::new("Transport", Transport::describe(), true),
            FieldDescriptor::new("retries", TypeDescriptor::basic(BasicKind::Uint8), false),
        ]
    );
}

#[test]
fn test_reference_has_no_fields() {
    let reference = named(Mailer::reference());
    assert!(reference.fields.is_empty());
    assert_eq!(reference.methods, vec!["Close".to_string()]);
    assert_eq!(reference.name, "Mailer");
}

#[test]
fn test_boxed_record_is_shallow() {
    let boxed = TypeDescriptor::of::<Box<Mailer>>();
    assert!(boxed.pointee_record().unwrap().fields.is_empty());

    let full = TypeDescriptor::pointer(Mailer::describe());
    assert_eq!(full.pointee_record().unwrap().fields.len(), 3);
}

#[test]
fn test_self_referencing_type_describes() {
    let smtp = named(SmtpTransport::describe());
    assert_eq!(smtp.name, "Smtp");
    assert_eq!(smtp.fields.len(), 2);
    assert_eq!(
        smtp.fields[0].ty,
        TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::string())
    );
    // 元素只做浅描述
    assert_eq!(
        smtp.fields[1].ty,
        TypeDescriptor::slice(SmtpTransport::reference())
    );
}

#[test]
fn test_default_namespace_and_raw_identifier() {
    let local = named(Local::describe());
    assert_eq!(local.namespace, module_path!().replace("::", "/"));
    assert_eq!(local.fields[0].name, "type");
}

#[test]
fn test_derived_record_scans() {
    let mailer = TypeDescriptor::pointer(Mailer::describe());
    let smtp = TypeDescriptor::pointer(SmtpTransport::describe());

    let mut provider = BaseProvider::new();
    provider
        .add_all(vec![
            Definition::new("mailer", mailer),
            Definition::new(
                "transport",
                TypeDescriptor::func(FuncDescriptor::constructor(
                    vec![smtp],
                    Transport::describe(),
                )),
            ),
            Definition::new("smtp", TypeDescriptor::pointer(SmtpTransport::describe())),
        ])
        .unwrap();

    let scan = scan(provider, &ScanConfig::default()).unwrap();

    let mailer = scan.get("mailer").unwrap();
    assert_eq!(mailer.object_type, "*mail.Mailer");
    assert!(mailer.params[&ParamKey::from("Host")].unset);
    assert_eq!(
        mailer.params[&ParamKey::from("Transport")]
            .service_name
            .as_deref(),
        Some("transport")
    );
    assert!(!mailer.params.contains_key(&ParamKey::from("retries")));

    let transport = scan.get("transport").unwrap();
    assert_eq!(
        transport.params[&ParamKey::Index(0)].service_name.as_deref(),
        Some("smtp")
    );
    assert_eq!(scan.imports["acme.io/app/mail"], "mail");
}
