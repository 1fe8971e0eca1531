//! Centralized integration tests for the scanning pipeline
use di_abstractions::{
    Definition, FuncDescriptor, NamedType, Param, ParamKey, Provider, TypeDescriptor,
};
use di_common::{BindingError, GeneratorError, NamingError, ScanConfig};
use di_composition::GeneratorBuilder;
use di_impl::{find_dependency_cycles, scan, BaseProvider, Scanner};

fn constructor(inputs: Vec<TypeDescriptor>, object: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::func(FuncDescriptor::constructor(inputs, object))
}

fn pointer_to(namespace: &str, name: &str) -> TypeDescriptor {
    TypeDescriptor::pointer(TypeDescriptor::record(NamedType::new(namespace, name)))
}

fn logger() -> TypeDescriptor {
    TypeDescriptor::interface("acme.io/app/log", "Logger", ["Printf"])
}

fn provider(defs: Vec<Definition>) -> BaseProvider {
    let mut provider = BaseProvider::new();
    provider.add_all(defs).unwrap();
    provider
}

#[test]
fn test_explicit_service_may_implement_interface() {
    let console = TypeDescriptor::pointer(TypeDescriptor::record(
        NamedType::new("acme.io/app/log", "Console").method("Printf"),
    ));

    let scan = Scanner::with_defaults(provider(vec![
        Definition::new("app", constructor(vec![logger()], TypeDescriptor::string()))
            .with_param(0usize, Param::service("console")),
        Definition::new("console", constructor(vec![], console)),
    ]))
    .scan()
    .unwrap();

    let app = scan.get("app").unwrap();
    let binding = &app.params[&ParamKey::Index(0)];
    assert_eq!(binding.type_signature, "log.Logger");
    assert_eq!(binding.zero_value, "nil");
    assert_eq!(binding.service_name.as_deref(), Some("console"));
}

#[test]
fn test_explicit_service_type_mismatch() {
    let err = Scanner::with_defaults(provider(vec![
        Definition::new("app", constructor(vec![logger()], TypeDescriptor::string()))
            .with_param(0usize, Param::service("port")),
        Definition::new("port", constructor(vec![], TypeDescriptor::int())),
    ]))
    .scan()
    .unwrap_err();

    assert_eq!(
        err.binding_error(),
        Some(&BindingError::TypeMismatch {
            key: "0".to_string(),
            expected: "log.Logger".to_string(),
            actual: "int".to_string(),
        })
    );
}

#[test]
fn test_unknown_service_and_unexpected_param() {
    let err = Scanner::with_defaults(provider(vec![Definition::new(
        "app",
        constructor(vec![TypeDescriptor::int()], TypeDescriptor::string()),
    )
    .with_param(0usize, Param::service("missing"))]))
    .scan()
    .unwrap_err();
    assert!(matches!(
        err.binding_error(),
        Some(BindingError::UnknownService { service, .. }) if service == "missing"
    ));

    let err = Scanner::with_defaults(provider(vec![Definition::new(
        "app",
        constructor(vec![TypeDescriptor::int()], TypeDescriptor::string()),
    )
    .with_param(0usize, Param::value(8080isize))
    .with_param(3usize, Param::value(1isize))]))
    .scan()
    .unwrap_err();
    assert_eq!(
        err.binding_error(),
        Some(&BindingError::UnexpectedParam {
            key: "3".to_string()
        })
    );
}

#[test]
fn test_literal_type_must_match() {
    let err = Scanner::with_defaults(provider(vec![Definition::new(
        "app",
        constructor(vec![TypeDescriptor::int()], TypeDescriptor::string()),
    )
    .with_param(0usize, Param::value("8080"))]))
    .scan()
    .unwrap_err();

    assert!(matches!(
        err.binding_error(),
        Some(BindingError::TypeMismatch { expected, actual, .. })
            if expected == "int" && actual == "string"
    ));
}

#[test]
fn test_not_for_autofill_is_skipped_but_bindable() {
    let defs = vec![
        Definition::new(
            "app",
            constructor(vec![TypeDescriptor::int()], TypeDescriptor::string()),
        ),
        Definition::new("port", constructor(vec![], TypeDescriptor::int())),
        Definition::new("debug-port", constructor(vec![], TypeDescriptor::int()))
            .not_for_autofill(),
    ];

    let scan = scan(provider(defs.clone()), &ScanConfig::default()).unwrap();
    assert_eq!(
        scan.get("app").unwrap().params[&ParamKey::Index(0)]
            .service_name
            .as_deref(),
        Some("port")
    );
    assert!(scan.get("debug-port").unwrap().not_for_autofill);

    let mut defs = defs;
    defs[0] = defs[0].clone().with_param(0usize, Param::service("debug-port"));
    let scan = di_impl::scan(provider(defs), &ScanConfig::default()).unwrap();
    assert_eq!(
        scan.get("app").unwrap().params[&ParamKey::Index(0)]
            .service_name
            .as_deref(),
        Some("debug-port")
    );
}

#[test]
fn test_vendored_namespaces_share_alias() {
    let vendored = pointer_to("acme.io/app/vendor/github.com/lib/pq", "Driver");
    let direct = TypeDescriptor::record(NamedType::new("github.com/lib/pq", "Driver"));

    let scan = Scanner::with_defaults(provider(vec![
        Definition::new("driver", constructor(vec![], vendored)),
        Definition::new("options", constructor(vec![], direct)),
    ]))
    .scan()
    .unwrap();

    assert_eq!(scan.imports.len(), 1);
    assert_eq!(scan.imports["github.com/lib/pq"], "pq");
    assert_eq!(scan.get("driver").unwrap().object_type, "*pq.Driver");
    assert_eq!(scan.get("options").unwrap().empty_object, "pq.Driver{}");
}

#[test]
fn test_cycles_are_reported_not_fatal() {
    let a = pointer_to("acme.io/app/graph", "A");
    let b = pointer_to("acme.io/app/graph", "B");

    let scan = Scanner::with_defaults(provider(vec![
        Definition::new("a", constructor(vec![b.clone()], a.clone())),
        Definition::new("b", constructor(vec![a], b)).unshared(),
    ]))
    .scan()
    .unwrap();

    assert!(scan.get("b").unwrap().unshared);
    assert_eq!(
        find_dependency_cycles(&scan),
        vec![vec!["a".to_string(), "b".to_string()]]
    );
}

#[test]
fn test_reserved_definition_name() {
    let err = Scanner::with_defaults(provider(vec![Definition::new(
        "container",
        constructor(vec![], TypeDescriptor::int()),
    )]))
    .scan()
    .unwrap_err();

    assert!(matches!(
        err.naming_error(),
        Some(NamingError::Reserved { formatted, .. }) if formatted == "Container"
    ));
}

#[test]
fn test_generate_through_builder() {
    let generator = GeneratorBuilder::new()
        .without_env()
        .with_package_name("services")
        .reserve_alias("log")
        .reserve_definition_name("App")
        .build()
        .unwrap();

    let definitions = provider(vec![
        Definition::new("logger", constructor(vec![], logger())),
        Definition::new(
            "mailer",
            TypeDescriptor::pointer(TypeDescriptor::record(
                NamedType::new("acme.io/app/mail", "Mailer")
                    .field("Log", logger())
                    .field("From", TypeDescriptor::string()),
            )),
        )
        .with_param("From", Param::value("noreply@acme.io")),
    ]);
    assert_eq!(definitions.names(), vec!["logger", "mailer"]);

    let input = generator.generate(definitions).unwrap();
    assert_eq!(input.package_name, "services");
    assert_eq!(input.definitions_imports["acme.io/app/log"], "log1");
    assert_eq!(input.container_imports["acme.io/app/log"], "log1");
    assert_eq!(input.container_imports["acme.io/app/mail"], "mail");

    let json: serde_json::Value = serde_json::from_str(&input.to_json().unwrap()).unwrap();
    assert_eq!(json["definitions"][1]["formatted_name"], "Mailer");

    // 保留名称在格式化之后比较
    let err = GeneratorBuilder::new()
        .without_env()
        .reserve_definition_name("App")
        .build()
        .unwrap()
        .generate(provider(vec![Definition::new(
            "app",
            constructor(vec![], TypeDescriptor::int()),
        )]))
        .unwrap_err();
    assert!(matches!(err, GeneratorError::Scan { .. }));
}
