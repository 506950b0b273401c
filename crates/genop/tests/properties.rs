//! Properties of the parse and generate pipeline over arbitrary tables.

use proptest::prelude::*;
use rhizome_genop::{
    FORMAT_NUMBER_MARKER, GenerationContext, Opcode, format_source, generate, parse,
};

/// Decode the `Opcodes` entries of a generated module back into opcodes.
fn opcode_entries(code: &str) -> Vec<Opcode> {
    let file = syn::parse_file(code).expect("generated code should parse");
    let expr = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Static(item) if item.ident == "Opcodes" => Some(&*item.expr),
            _ => None,
        })
        .expect("Opcodes static not found");

    let syn::Expr::Reference(reference) = expr else {
        panic!("Opcodes should be a slice reference");
    };
    let syn::Expr::Array(array) = &*reference.expr else {
        panic!("Opcodes should reference an array literal");
    };

    array
        .elems
        .iter()
        .map(|elem| {
            let syn::Expr::Call(call) = elem else {
                panic!("expected an op(..) call");
            };
            let args: Vec<_> = call.args.iter().collect();
            assert_eq!(args.len(), 3);
            Opcode::new(int_arg(args[0]), str_arg(args[1]), int_arg(args[2]) as u64)
        })
        .collect()
}

fn int_arg(expr: &syn::Expr) -> i64 {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(lit),
            ..
        }) => lit.base10_parse().unwrap(),
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => -int_arg(expr),
        other => panic!("expected integer literal, got {:?}", other),
    }
}

fn str_arg(expr: &syn::Expr) -> String {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit),
            ..
        }) => lit.value(),
        other => panic!("expected string literal, got {:?}", other),
    }
}

fn beam() -> GenerationContext {
    GenerationContext::new("beam").unwrap()
}

fn definition() -> impl Strategy<Value = Opcode> {
    // Names stop at the first '/', so they never contain one. A name holding
    // the directive marker would turn its line into a directive.
    let name = "[^/\n]*".prop_filter("name contains the directive marker", |name: &String| {
        !name.contains(FORMAT_NUMBER_MARKER)
    });
    (-1_000_000i64..1_000_000, name, 0u64..256)
        .prop_map(|(id, name, arity)| Opcode::new(id, name, arity))
}

proptest! {
    #[test]
    fn parse_never_loses_the_sentinel(raw in any::<String>()) {
        let table = parse(&raw);
        prop_assert_eq!(&table.opcodes()[0], &Opcode::sentinel());
    }

    #[test]
    fn generate_never_fails_on_table_text(raw in any::<String>()) {
        let code = generate(&beam(), &raw);
        prop_assert!(code.is_ok(), "{:?}", code.err());
    }

    #[test]
    fn generated_entries_match_definitions(
        version in any::<i32>(),
        defs in prop::collection::vec(definition(), 0..32),
    ) {
        let mut raw = format!("BEAM_FORMAT_NUMBER={}\n", version);
        for op in &defs {
            raw.push_str(&format!("{}: {}/{}\n", op.id, op.name, op.arity));
        }

        let table = parse(&raw);
        prop_assert_eq!(table.format_version(), i64::from(version));
        prop_assert_eq!(table.defined(), &defs[..]);

        let code = generate(&beam(), &raw).unwrap();
        let expected_version = format!("pub const BEAM_FORMAT_NUMBER: i64 = {};", version);
        prop_assert!(code.contains(&expected_version));
        prop_assert_eq!(opcode_entries(&code), table.opcodes().to_vec());
    }

    #[test]
    fn formatting_is_idempotent(defs in prop::collection::vec(definition(), 0..16)) {
        let raw: String = defs
            .iter()
            .map(|op| format!("{}: {}/{}\n", op.id, op.name, op.arity))
            .collect();
        let once = generate(&beam(), &raw).unwrap();
        prop_assert_eq!(format_source(&once).unwrap(), once);
    }
}
