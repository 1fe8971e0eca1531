#![allow(dead_code)]

use di_macros::Describe;

#[derive(Describe)]
#[describe(flavor)]
struct Mailer;

fn main() {}
