//! The IPPcode22 data model.
//!
//! This module holds the instruction table and the types a parsed program is
//! made of. The key types are:
//! - [`Opcode`]: the closed set of instruction mnemonics, each carrying its
//!   required operand kinds ([`Opcode::operand_kinds`])
//! - [`Operand`]: a classified operand value
//! - [`Instruction`] and [`Program`]: the parsed representation
//!
//! The instruction set is versioned and closed, so the opcode table is a
//! static map baked into the [`Opcode`] enum rather than an extensible
//! registry.

/// Raised when parsing a word that is not part of the closed word set for its
/// position (a mnemonic, a frame prefix, or a type keyword).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownWordErr;
impl std::fmt::Display for UnknownWordErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("word is not part of the IPPcode22 vocabulary")
    }
}
impl std::error::Error for UnknownWordErr {}

/// A variable storage scope, referenced by the prefix of a variable operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// The global frame (`GF@`).
    Global,
    /// The top local frame (`LF@`).
    Local,
    /// The temporary frame (`TF@`).
    Temporary,
}
impl std::str::FromStr for Frame {
    type Err = UnknownWordErr;

    // Frame prefixes are case-sensitive: `gf@x` is not a variable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GF" => Ok(Self::Global),
            "LF" => Ok(Self::Local),
            "TF" => Ok(Self::Temporary),
            _ => Err(UnknownWordErr),
        }
    }
}
impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("GF"),
            Self::Local => f.write_str("LF"),
            Self::Temporary => f.write_str("TF"),
        }
    }
}

/// A data-type keyword, used as the operand of `READ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    #[allow(missing_docs)]
    Int,
    #[allow(missing_docs)]
    Bool,
    #[allow(missing_docs)]
    String,
    #[allow(missing_docs)]
    Nil,
}
impl std::str::FromStr for DataType {
    type Err = UnknownWordErr;

    // Type keywords are case-sensitive lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "nil" => Ok(Self::Nil),
            _ => Err(UnknownWordErr),
        }
    }
}
impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Nil => f.write_str("nil"),
        }
    }
}

/// The kind of operand an instruction position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A variable reference (`GF@x`).
    Var,
    /// A variable reference or any literal constant.
    Symb,
    /// A label identifier.
    Label,
    /// A type keyword (`int`, `bool`, `string`, `nil`).
    Type,
}
impl std::fmt::Display for OperandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Var => f.write_str("var"),
            Self::Symb => f.write_str("symb"),
            Self::Label => f.write_str("label"),
            Self::Type => f.write_str("type"),
        }
    }
}

macro_rules! instruction_table {
    ($($opcode:ident => [$($kind:ident),*]),+ $(,)?) => {
        /// An IPPcode22 instruction mnemonic.
        ///
        /// Mnemonics are case-insensitive in source code; [`FromStr`] accepts
        /// any casing and [`Display`] prints the canonical uppercase form.
        /// Each mnemonic carries its required operand kinds in the fixed
        /// instruction table exposed by [`Opcode::operand_kinds`].
        ///
        /// [`FromStr`]: std::str::FromStr
        /// [`Display`]: std::fmt::Display
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $(
                #[allow(missing_docs)]
                $opcode
            ),+
        }

        impl Opcode {
            /// The operand kinds this opcode requires, in positional order.
            pub fn operand_kinds(self) -> &'static [OperandKind] {
                match self {
                    $(Self::$opcode => &[$(OperandKind::$kind),*]),+
                }
            }
        }

        impl std::str::FromStr for Opcode {
            type Err = UnknownWordErr;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match &*s.to_uppercase() {
                    $(stringify!($opcode) => Ok(Self::$opcode)),+,
                    _ => Err(UnknownWordErr)
                }
            }
        }

        impl std::fmt::Display for Opcode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$opcode => f.write_str(stringify!($opcode))),+
                }
            }
        }
    };
}
instruction_table! {
    MOVE        => [Var, Symb],
    CREATEFRAME => [],
    PUSHFRAME   => [],
    POPFRAME    => [],
    DEFVAR      => [Var],
    CALL        => [Label],
    RETURN      => [],
    PUSH        => [Symb],
    POPS        => [Var],
    ADD         => [Var, Symb, Symb],
    SUB         => [Var, Symb, Symb],
    MUL         => [Var, Symb, Symb],
    IDIV        => [Var, Symb, Symb],
    LT          => [Var, Symb, Symb],
    GT          => [Var, Symb, Symb],
    EQ          => [Var, Symb, Symb],
    AND         => [Var, Symb, Symb],
    OR          => [Var, Symb, Symb],
    NOT         => [Var, Symb, Symb],
    INT2CHAR    => [Var, Symb],
    STRI2INT    => [Var, Symb, Symb],
    READ        => [Var, Type],
    WRITE       => [Symb],
    CONCAT      => [Var, Symb, Symb],
    STRLEN      => [Var, Symb],
    GETCHAR     => [Var, Symb, Symb],
    SETCHAR     => [Var, Symb, Symb],
    TYPE        => [Var, Symb],
    LABEL       => [Label],
    JUMP        => [Label],
    JUMPIFEQ    => [Label, Symb, Symb],
    JUMPIFNEQ   => [Label, Symb, Symb],
    EXIT        => [Symb],
    DPRINT      => [Symb],
    BREAK       => [],
}

/// A classified instruction operand.
///
/// Produced by the recognizers in [`parse::lex`](crate::parse::lex) and
/// immutable from then on. The [`Display`] implementation yields exactly the
/// text content the operand carries in the XML output.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A variable reference (`GF@x`).
    Var {
        /// The storage frame named by the prefix.
        frame: Frame,
        /// The variable identifier after the `@`.
        name: String,
    },
    /// An integer literal; the digits are kept as written, sign included.
    Int(String),
    /// A boolean literal.
    Bool(bool),
    /// A string literal, XML-escaped at classification time.
    /// `\ddd` escape sequences are kept verbatim for the interpreter.
    Str(String),
    /// The nil literal (`nil@nil`).
    Nil,
    /// A label reference.
    Label(String),
    /// A type keyword.
    Type(DataType),
}

impl Operand {
    /// The value of the `type` attribute this operand carries in the XML
    /// output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Var { .. } => "var",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Nil => "nil",
            Self::Label(_) => "label",
            Self::Type(_) => "type",
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Var { frame, name } => write!(f, "{frame}@{name}"),
            Self::Int(digits) => f.write_str(digits),
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Str(text) => f.write_str(text),
            Self::Nil => f.write_str("nil"),
            Self::Label(name) => f.write_str(name),
            Self::Type(ty) => ty.fmt(f),
        }
    }
}

/// One parsed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The 1-based position of this instruction in the program.
    pub order: u32,
    /// The instruction mnemonic.
    pub opcode: Opcode,
    /// The classified operands; the length and positional kinds match
    /// `opcode.operand_kinds()`.
    pub operands: Vec<Operand>,
}

/// A parsed IPPcode22 program: the instructions in source order.
///
/// Built once per run, append-only, and never mutated after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The instructions, with `order` values running `1..=len`.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// The language tag carried by the rendered document's root element.
    pub const LANGUAGE: &'static str = "IPPcode22";
}
