//! Opcode table parsing.
//!
//! The table is line oriented:
//! - `# ...` is a comment
//! - `BEAM_FORMAT_NUMBER=<n>` sets the format version
//! - `<id>: <name>/<arity>` defines an opcode
//!
//! Parsing is total. Numeric fields that fail to parse are recorded as
//! [`Lenient::Defaulted`] and collapse to `0`, so any text produces a table.
//! Lines are split on `\n` only; a trailing `\r` stays in the line and makes
//! the arity of a CRLF table default to `0`.

use std::str::FromStr;

use tracing::{debug, trace, warn};

/// Substring that marks the format version directive.
pub const FORMAT_NUMBER_MARKER: &str = "BEAM_FORMAT_NUMBER";

const FORMAT_NUMBER_PREFIX: &str = "BEAM_FORMAT_NUMBER=";

/// Separator between the opcode id and the rest of a definition line.
const ID_SEPARATOR: &str = ": ";

/// A single opcode definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opcode {
    /// Numeric opcode id
    pub id: i64,
    /// Instruction name, as written in the table
    pub name: String,
    /// Operand count
    pub arity: u64,
}

impl Opcode {
    pub fn new(id: i64, name: impl Into<String>, arity: u64) -> Self {
        Self {
            id,
            name: name.into(),
            arity,
        }
    }

    /// The placeholder that reserves id 0 at the head of every table.
    pub fn sentinel() -> Self {
        Self::new(0, "", 0)
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == 0 && self.name.is_empty() && self.arity == 0
    }
}

/// Result of a best-effort numeric parse.
///
/// A field that does not parse is not an error: it becomes `Defaulted` and
/// reads back as the type's default (`0` for the integer fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lenient<T> {
    Parsed(T),
    Defaulted,
}

impl<T: FromStr + Default> Lenient<T> {
    pub fn parse(text: &str) -> Self {
        text.parse().map_or(Lenient::Defaulted, Lenient::Parsed)
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Lenient::Defaulted)
    }

    pub fn value(self) -> T {
        match self {
            Lenient::Parsed(value) => value,
            Lenient::Defaulted => T::default(),
        }
    }
}

/// Parsed opcode table: format version plus opcodes in table order.
///
/// The opcode list always starts with [`Opcode::sentinel`] and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
    format_version: i64,
    opcodes: Vec<Opcode>,
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    /// An empty table: version 0 and only the sentinel.
    pub fn new() -> Self {
        Self {
            format_version: 0,
            opcodes: vec![Opcode::sentinel()],
        }
    }

    pub fn format_version(&self) -> i64 {
        self.format_version
    }

    /// All opcodes, sentinel first.
    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    /// Opcodes defined by the table itself, without the sentinel.
    pub fn defined(&self) -> &[Opcode] {
        &self.opcodes[1..]
    }

    /// Find the first opcode with the given name.
    pub fn find(&self, name: &str) -> Option<&Opcode> {
        self.defined().iter().find(|op| op.name == name)
    }

    /// Find the first opcode with the given id. Id 0 resolves to the sentinel.
    pub fn get(&self, id: i64) -> Option<&Opcode> {
        self.opcodes.iter().find(|op| op.id == id)
    }
}

/// Classification of one table line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    FormatNumber(&'a str),
    Definition { id: &'a str, rest: &'a str },
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with('#') {
        return Line::Comment;
    }
    if line.contains(FORMAT_NUMBER_MARKER) {
        let value = line
            .find(FORMAT_NUMBER_PREFIX)
            .map_or("", |pos| &line[pos + FORMAT_NUMBER_PREFIX.len()..]);
        return Line::FormatNumber(value);
    }
    match line.split_once(ID_SEPARATOR) {
        Some((id, rest)) => Line::Definition { id, rest },
        None => Line::Other,
    }
}

fn lenient_field<T: FromStr + Default>(line_no: usize, field: &str, text: &str) -> T {
    let parsed = Lenient::parse(text);
    if parsed.is_defaulted() {
        warn!(line = line_no, field, text, "malformed numeric field, using 0");
    }
    parsed.value()
}

fn parse_definition(line_no: usize, id: &str, rest: &str) -> Opcode {
    // Only the first '/' separates name and arity; the arity token stops at
    // the next '/'.
    let (name, arity) = match rest.split_once('/') {
        Some((name, tail)) => (name, tail.split('/').next().unwrap_or(tail)),
        None => (rest, ""),
    };

    Opcode {
        id: lenient_field(line_no, "id", id),
        name: name.to_string(),
        arity: lenient_field(line_no, "arity", arity),
    }
}

/// Parse raw table text. Never fails.
pub fn parse(raw: &str) -> OpcodeTable {
    let mut table = OpcodeTable::new();

    for (idx, line) in raw.split('\n').enumerate() {
        let line_no = idx + 1;
        match classify(line) {
            Line::Blank | Line::Comment => {}
            Line::FormatNumber(value) => {
                table.format_version = lenient_field(line_no, "format number", value);
            }
            Line::Definition { id, rest } => {
                table.opcodes.push(parse_definition(line_no, id, rest));
            }
            Line::Other => trace!(line = line_no, "ignoring unrecognized line"),
        }
    }

    debug!(
        format_version = table.format_version,
        opcodes = table.defined().len(),
        "parsed opcode table"
    );
    table
}
