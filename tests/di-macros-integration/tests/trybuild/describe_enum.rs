#![allow(dead_code)]

use di_macros::Describe;

#[derive(Describe)]
enum Mode {
    Fast,
    Safe,
}

fn main() {}
