use di_abstractions::{Describe, TypeDescriptor};
use di_macros::Describe;
use std::collections::HashMap;

#[derive(Describe)]
pub struct Settings {
    pub hosts: Vec<String>,
    pub limits: HashMap<String, u32>,
    pub retries: [u8; 3],
}

#[derive(Describe)]
#[describe(namespace = "acme.io/app", name = "Server", methods(Start, Close))]
pub struct HttpServer {
    pub settings: Box<Settings>,
    port: u16,
}

fn main() {
    let TypeDescriptor::Struct(named) = HttpServer::describe() else {
        panic!("expected struct");
    };
    assert_eq!(named.name, "Server");
    assert_eq!(named.fields.len(), 2);
    assert!(named.fields[0].exported);
    assert!(!named.fields[1].exported);
}
