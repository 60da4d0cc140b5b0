use pretty_assertions::assert_eq;

use super::*;

fn parse(input: &str) -> TypeRepr {
    match parse_type(input) {
        Ok(ty) => ty,
        Err(err) => panic!("failed to parse `{input}`: {err}"),
    }
}

#[test]
fn parses_plain_and_generic_paths() {
    assert_eq!(parse("i32"), TypeRepr::path("i32"));
    assert_eq!(
        parse("core::option::Option<alloc::string::String>"),
        TypeRepr::generic(
            "core::option::Option",
            vec![TypeRepr::path("alloc::string::String")]
        )
    );
    assert_eq!(
        parse("Result<Vec<u8>, ()>"),
        TypeRepr::generic(
            "Result",
            vec![
                TypeRepr::generic("Vec", vec![TypeRepr::path("u8")]),
                TypeRepr::unit(),
            ]
        )
    );
}

#[test]
fn nested_closing_angles_are_split() {
    let ty = parse("Vec<Vec<u8>>");
    assert_eq!(
        ty,
        TypeRepr::generic(
            "Vec",
            vec![TypeRepr::generic("Vec", vec![TypeRepr::path("u8")])]
        )
    );
}

#[test]
fn parses_tuples_and_grouping() {
    assert_eq!(parse("()"), TypeRepr::unit());
    assert_eq!(parse("(i32,)"), TypeRepr::tuple(vec![TypeRepr::path("i32")]));
    assert_eq!(parse("(i32)"), TypeRepr::path("i32"));
    assert_eq!(
        parse("(i32, bool)"),
        TypeRepr::tuple(vec![TypeRepr::path("i32"), TypeRepr::path("bool")])
    );
}

#[test]
fn parses_references_pointers_slices_and_arrays() {
    assert_eq!(parse("&str"), TypeRepr::reference(TypeRepr::path("str"), false));
    assert_eq!(
        parse("&'static mut [u8]"),
        TypeRepr::reference(TypeRepr::slice(TypeRepr::path("u8")), true)
    );
    assert_eq!(
        parse("*const u8"),
        TypeRepr::pointer(TypeRepr::path("u8"), false)
    );
    assert_eq!(parse("[u8; 32]"), TypeRepr::array(TypeRepr::path("u8"), "32"));
}

#[test]
fn parses_fn_pointers_and_never() {
    assert_eq!(
        parse("fn(i32, &str) -> bool"),
        TypeRepr::function(
            vec![
                TypeRepr::path("i32"),
                TypeRepr::reference(TypeRepr::path("str"), false)
            ],
            TypeRepr::path("bool")
        )
    );
    assert_eq!(
        parse("fn()"),
        TypeRepr::function(Vec::new(), TypeRepr::unit())
    );
    assert_eq!(parse("!"), TypeRepr::Never);
}

#[test]
fn parses_trait_objects_with_fn_sugar_and_lifetimes() {
    let ty = parse(
        "alloc::boxed::Box<dyn core::ops::function::Fn(i32) -> i32 \
         + core::marker::Send + 'static>",
    );
    let TypeRepr::Path(boxed) = ty else {
        panic!("expected path");
    };
    assert_eq!(&*boxed.path, "alloc::boxed::Box");
    let GenericArgs::Angle(args) = boxed.args else {
        panic!("expected angle args");
    };
    assert_eq!(
        args,
        vec![GenericArg::Type(TypeRepr::Dyn(vec![
            PathType {
                path: "core::ops::function::Fn".into(),
                args: GenericArgs::Parenthesized {
                    inputs: vec![TypeRepr::path("i32")],
                    output: Box::new(TypeRepr::path("i32")),
                },
            },
            PathType::new("core::marker::Send"),
        ]))]
    );
}

#[test]
fn parses_bindings_and_const_args() {
    let ty = parse("dyn Iterator<Item = u8>");
    assert_eq!(
        ty,
        TypeRepr::Dyn(vec![PathType {
            path: "Iterator".into(),
            args: GenericArgs::Angle(vec![GenericArg::Binding {
                name: "Item".into(),
                ty: TypeRepr::path("u8"),
            }]),
        }])
    );

    let ty = parse("crate::Buf<16, true>");
    assert_eq!(
        ty,
        TypeRepr::Path(PathType {
            path: "crate::Buf".into(),
            args: GenericArgs::Angle(vec![
                GenericArg::Const("16".into()),
                GenericArg::Const("true".into()),
            ]),
        })
    );
}

#[test]
fn closure_segments_are_path_segments() {
    assert_eq!(
        parse("my_app::main::{{closure}}"),
        TypeRepr::path("my_app::main::{{closure}}")
    );
}

#[test]
fn inner_segment_arguments_fold_into_the_path() {
    assert_eq!(
        parse("my_app::run<u8>::{{closure}}"),
        TypeRepr::path("my_app::run<u8>::{{closure}}")
    );
}

#[test]
fn placeholder_parses_as_infer() {
    assert_eq!(
        parse("Vec<_>"),
        TypeRepr::generic("Vec", vec![TypeRepr::Infer])
    );
}

#[test]
fn reported_names_match_hand_written_paths() {
    assert_eq!(
        parse(std::any::type_name::<Option<String>>()),
        parse("core::option::Option<alloc::string::String>")
    );
    assert_eq!(
        parse(std::any::type_name::<(u8, &'static str)>()),
        parse("(u8, &str)")
    );
}

#[test]
fn errors_carry_input_and_offset() {
    let err = parse_type("Vec<u8").unwrap_err();
    assert_eq!(err.input, "Vec<u8");
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "expected `>` to close generic arguments");

    let err = parse_type("u8 u16").unwrap_err();
    assert_eq!(err.offset, 3);
    assert_eq!(err.message, "unexpected trailing input");

    let err = parse_type("*u8").unwrap_err();
    assert_eq!(err.message, "expected `const` or `mut` after `*`");

    assert!(parse_type("").is_err());
    assert!(parse_type("<T as Trait>::Out").is_err());
    assert!(parse_type("impl Fn()").is_err());
    assert!(parse_type("Vec<#>").is_err());
}

#[test]
fn deep_nesting_is_rejected_without_overflow() {
    let refs = format!("{}u8", "&".repeat(20_000));
    let err = parse_type(&refs).unwrap_err();
    assert_eq!(err.message, "type is nested too deeply");
    assert_eq!(err.offset, MAX_TYPE_NESTING);

    let options = format!("{}u8{}", "Option<".repeat(20_000), ">".repeat(20_000));
    let err = parse_type(&options).unwrap_err();
    assert_eq!(err.message, "type is nested too deeply");

    let tuples = format!("{}u8{}", "(".repeat(20_000), ",)".repeat(20_000));
    assert!(parse_type(&tuples).is_err());
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let mut expected = TypeRepr::path("u8");
    for _ in 1..MAX_TYPE_NESTING {
        expected = TypeRepr::reference(expected, false);
    }
    let text = format!("{}u8", "&".repeat(MAX_TYPE_NESTING - 1));
    assert_eq!(parse(&text), expected);

    let text = format!("{}u8", "&".repeat(MAX_TYPE_NESTING));
    assert!(parse_type(&text).is_err());
}

mod proptest_display {
    use super::super::parse_type;
    use crate::repr::TypeRepr;
    use proptest::prelude::*;

    fn leaf() -> impl Strategy<Value = TypeRepr> {
        prop_oneof![
            Just(TypeRepr::path("u8")),
            Just(TypeRepr::path("bool")),
            Just(TypeRepr::path("alloc::string::String")),
            Just(TypeRepr::path("str")),
            Just(TypeRepr::Never),
        ]
    }

    fn type_repr() -> impl Strategy<Value = TypeRepr> {
        leaf().prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3)
                    .prop_map(|args| TypeRepr::generic("alloc::vec::Vec", args)),
                prop::collection::vec(inner.clone(), 0..4).prop_map(TypeRepr::tuple),
                inner.clone().prop_map(TypeRepr::slice),
                (inner.clone(), any::<bool>())
                    .prop_map(|(ty, mutable)| TypeRepr::reference(ty, mutable)),
                (inner.clone(), 0u8..64).prop_map(|(ty, len)| TypeRepr::array(ty, len.to_string())),
                (prop::collection::vec(inner.clone(), 0..3), inner)
                    .prop_map(|(params, ret)| TypeRepr::function(params, ret)),
            ]
        })
    }

    proptest! {
        #[test]
        fn display_output_parses_back(ty in type_repr()) {
            let text = ty.to_string();
            prop_assert_eq!(parse_type(&text).unwrap(), ty, "text: {}", text);
        }
    }
}
