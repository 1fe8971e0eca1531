//! trybuild compile-time tests for di_macros

#[test]
fn trybuild_describe() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/describe_ok.rs");
    t.pass("tests/trybuild/describe_unit.rs");
}

#[test]
fn trybuild_describe_rejects() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/trybuild/describe_generic.rs");
    t.compile_fail("tests/trybuild/describe_tuple_struct.rs");
    t.compile_fail("tests/trybuild/describe_enum.rs");
    t.compile_fail("tests/trybuild/describe_unknown_key.rs");
}
