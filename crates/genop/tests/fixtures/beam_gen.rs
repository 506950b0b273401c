//! Opcode table for the `beam` package.
//!
//! This module is auto-generated by genop.
//! Do not edit manually.
pub const BEAM_FORMAT_NUMBER: i64 = 0;
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub Id: i64,
    pub Name: &'static str,
    pub Arity: u64,
}
const fn op(id: i64, name: &'static str, arity: u64) -> Opcode {
    Opcode {
        Id: id,
        Name: name,
        Arity: arity,
    }
}
#[allow(non_upper_case_globals)]
pub static Opcodes: &[Opcode] = &[
    op(0, "", 0),
    op(1, "label", 1),
    op(2, "func_info", 3),
];
