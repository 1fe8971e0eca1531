#![allow(dead_code)]

use di_macros::Describe;

#[derive(Describe)]
struct Port(pub u16);

fn main() {}
