#![allow(dead_code)]

use di_macros::Describe;

#[derive(Describe)]
struct Wrapper<T> {
    pub inner: T,
}

fn main() {}
