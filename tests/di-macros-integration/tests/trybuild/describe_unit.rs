use di_abstractions::{Describe, TypeDescriptor};
use di_macros::Describe;

#[derive(Describe)]
#[describe(namespace = "acme.io/app/clock")]
struct SystemClock;

fn main() {
    let TypeDescriptor::Struct(named) = SystemClock::describe() else {
        panic!("expected struct");
    };
    assert!(named.fields.is_empty());
    assert_eq!(named.namespace, "acme.io/app/clock");
}
