//! Parsing IPPcode22 source code into a [`Program`].
//!
//! This module converts a source string into the parsed program
//! representation in one strict left-to-right pass: the language header is
//! located first, then each non-empty line is parsed as one instruction and
//! validated against the fixed instruction table. The first error aborts the
//! whole run — there is no recovery and no partial result, so a caller either
//! gets a complete valid [`Program`] or a single [`ParseErr`].
//!
//! The parser module consists of:
//! - [`lex`]: the token stream and the operand literal recognizers
//! - [`Parser`]: the main logic for the parser
//! - [`parse_program`]: the one-call entry point

pub mod lex;

use std::borrow::Cow;

use logos::{Logos, Span};

use crate::ast::{Instruction, Opcode, OperandKind, Program};
use lex::Token;

/// The header token required before any instruction line, identifying the
/// source dialect. Matched case-insensitively.
pub const HEADER: &str = ".IPPCODE22";

/// Parses IPPcode22 source into a [`Program`].
///
/// This is a shortcut for constructing a [`Parser`] and driving it to the
/// end of input.
pub fn parse_program(src: &str) -> Result<Program, ParseErr> {
    Parser::new(src).parse()
}

/// The failure classes of the parser.
///
/// All of these are fatal: the run stops at the first one, and each maps to
/// exactly one reserved exit code (see [`ParseErr::exit_code`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrKind {
    /// End of input, or a non-matching line, was reached before the
    /// language header.
    HeaderMissing,
    /// The first word of a line is not a known mnemonic.
    /// Carries the offending word, upper-cased.
    UnknownOpcode(String),
    /// The number of operands does not match the instruction table.
    ArityMismatch {
        /// The instruction whose operands were counted.
        opcode: Opcode,
        /// The operand count the table requires.
        expected: usize,
        /// The operand count the line supplied.
        received: usize,
    },
    /// An operand word matched no form acceptable in its position.
    BadOperand {
        /// The offending operand word.
        token: String,
        /// The instruction being parsed.
        opcode: Opcode,
        /// The kind the position required.
        kind: OperandKind,
    },
}

/// Any error that occurs during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErr {
    /// The failure class.
    kind: ParseErrKind,
    /// The location of this error.
    span: Span,
}

impl ParseErr {
    fn new(kind: ParseErrKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> &ParseErrKind {
        &self.kind
    }

    /// The reserved process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ParseErrKind::HeaderMissing => crate::err::MISSING_HEADER,
            ParseErrKind::UnknownOpcode(_) => crate::err::UNKNOWN_OPCODE,
            ParseErrKind::ArityMismatch { .. } | ParseErrKind::BadOperand { .. } => {
                crate::err::BAD_SYNTAX
            }
        }
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrKind::HeaderMissing => {
                f.write_str("wrong or no header found in the provided code")
            }
            ParseErrKind::UnknownOpcode(word) => {
                write!(f, "unknown instruction: '{word}'")
            }
            ParseErrKind::ArityMismatch { opcode, expected, received } => {
                write!(
                    f,
                    "invalid amount of arguments ({received} instead of {expected}) \
                     for instruction: '{opcode}'"
                )
            }
            ParseErrKind::BadOperand { token, opcode, .. } => {
                write!(f, "bad argument: '{token}' for instruction: '{opcode}'")
            }
        }
    }
}

impl std::error::Error for ParseErr {}

impl crate::err::Error for ParseErr {
    fn span(&self) -> Option<Span> {
        Some(self.span.clone())
    }

    fn help(&self) -> Option<Cow<str>> {
        match &self.kind {
            ParseErrKind::HeaderMissing => {
                Some(format!("the first non-empty line must be '{HEADER}' (any casing)").into())
            }
            ParseErrKind::UnknownOpcode(_) => {
                Some(Cow::Borrowed("this is not an IPPcode22 mnemonic"))
            }
            ParseErrKind::ArityMismatch { opcode, .. } => {
                let kinds = opcode.operand_kinds();
                match kinds.is_empty() {
                    true => Some(format!("'{opcode}' takes no operands").into()),
                    false => {
                        let list = kinds
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" ");
                        Some(format!("the operands of '{opcode}' are: {list}").into())
                    }
                }
            }
            ParseErrKind::BadOperand { kind, .. } => Some(Cow::Borrowed(match kind {
                OperandKind::Var => "expected a variable, e.g. 'GF@counter'",
                OperandKind::Symb => {
                    "expected a variable or an 'int@', 'bool@', 'string@' or 'nil@nil' literal"
                }
                OperandKind::Label => "expected a label identifier",
                OperandKind::Type => "expected one of 'int', 'bool', 'string', 'nil'",
            })),
        }
    }
}

/// The main parser struct, which holds the main logic for the parser.
///
/// The token stream is fixed at construction; parsing is a single forward
/// scan over it with no lookahead past the current line.
pub struct Parser<'s> {
    tokens: Vec<(Token<'s>, Span)>,
    index: usize,
}

impl<'s> Parser<'s> {
    /// Creates a new parser from a given string, tokenizing it up front.
    pub fn new(src: &'s str) -> Self {
        let tokens = Token::lexer(src)
            .spanned()
            .map(|(m_token, span)| match m_token {
                Ok(token) => (token, span),
                // Word is a catch-all, so the token set covers every character.
                Err(()) => unreachable!("input characters are all lexable"),
            })
            .filter(|(t, _)| !matches!(t, Token::Comment)) // filter comments
            .collect();

        Self { tokens, index: 0 }
    }

    /// Drives the full parse: the header scan, then one instruction per
    /// non-empty line until end of input.
    pub fn parse(mut self) -> Result<Program, ParseErr> {
        self.scan_header()?;

        let mut instructions = Vec::new();
        while let Some(line) = self.next_nonempty_line() {
            let order = instructions.len() as u32 + 1;
            instructions.push(parse_instruction(order, &line)?);
        }

        Ok(Program { instructions })
    }

    /// Scans past empty lines for the language header and consumes it.
    ///
    /// The first non-empty line must be the header; the scanner does not
    /// skip past a non-matching line to look for it further down.
    fn scan_header(&mut self) -> Result<(), ParseErr> {
        match self.next_nonempty_line() {
            Some(line) => match line.as_slice() {
                [(word, _)] if word.eq_ignore_ascii_case(HEADER) => Ok(()),
                _ => Err(ParseErr::new(ParseErrKind::HeaderMissing, line_span(&line))),
            },
            None => Err(ParseErr::new(ParseErrKind::HeaderMissing, self.eof_span())),
        }
    }

    /// Returns the words of the next non-empty line, or `None` at end of
    /// input. Lines holding only whitespace or a comment are skipped.
    fn next_nonempty_line(&mut self) -> Option<Vec<(&'s str, Span)>> {
        let mut words = Vec::new();
        while let Some((token, span)) = self.tokens.get(self.index) {
            self.index += 1;
            match token {
                Token::Word(word) => words.push((*word, span.clone())),
                Token::NewLine if words.is_empty() => {}
                Token::NewLine => return Some(words),
                Token::Comment => {} // filtered at construction
            }
        }
        (!words.is_empty()).then_some(words)
    }

    /// An empty range at the end of the input, for errors raised at EOF.
    fn eof_span(&self) -> Span {
        match self.tokens.last() {
            Some((_, span)) => span.end..span.end,
            None => 0..0,
        }
    }
}

/// Parses one non-empty line as an instruction with the given order number.
///
/// The first word is the opcode (upper-cased for the table lookup), the rest
/// are positional operands checked for count and kind.
fn parse_instruction(order: u32, line: &[(&str, Span)]) -> Result<Instruction, ParseErr> {
    let [(raw_opcode, opcode_span), raw_operands @ ..] = line else {
        unreachable!("lines handed to the instruction parser are non-empty");
    };

    let opcode: Opcode = raw_opcode.parse().map_err(|_| {
        ParseErr::new(
            ParseErrKind::UnknownOpcode(raw_opcode.to_uppercase()),
            opcode_span.clone(),
        )
    })?;

    let kinds = opcode.operand_kinds();
    if raw_operands.len() != kinds.len() {
        return Err(ParseErr::new(
            ParseErrKind::ArityMismatch {
                opcode,
                expected: kinds.len(),
                received: raw_operands.len(),
            },
            line_span(line),
        ));
    }

    let operands = kinds
        .iter()
        .zip(raw_operands)
        .map(|(&kind, (word, span))| {
            lex::classify(kind, word).ok_or_else(|| {
                ParseErr::new(
                    ParseErrKind::BadOperand { token: word.to_string(), opcode, kind },
                    span.clone(),
                )
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(Instruction { order, opcode, operands })
}

fn line_span(line: &[(&str, Span)]) -> Span {
    match (line.first(), line.last()) {
        (Some((_, first)), Some((_, last))) => first.start..last.end,
        _ => 0..0,
    }
}

#[cfg(test)]
mod test {
    use crate::ast::{DataType, Frame, Opcode, Operand};

    use super::{parse_program, ParseErrKind};

    fn kind_of(src: &str) -> ParseErrKind {
        parse_program(src).expect_err("expected a parse failure").kind().clone()
    }

    #[test]
    fn header_any_casing() {
        for header in [".IPPcode22", ".IPPCODE22", ".ippcode22", ".IppCode22"] {
            let program = parse_program(&format!("{header}\n")).unwrap();
            assert!(program.instructions.is_empty());
        }
    }

    #[test]
    fn header_surrounded_by_noise() {
        // blank and comment-only lines may precede it; a trailing comment is fine
        let program = parse_program("\n   \n# intro\n.IPPcode22 # header\nBREAK\n").unwrap();
        assert_eq!(program.instructions.len(), 1);
    }

    #[test]
    fn header_missing() {
        assert_eq!(kind_of(""), ParseErrKind::HeaderMissing);
        assert_eq!(kind_of("\n\n# only comments\n"), ParseErrKind::HeaderMissing);
        assert_eq!(kind_of("MOVE GF@x GF@y\n"), ParseErrKind::HeaderMissing);
        // the scanner does not search past a non-matching line
        assert_eq!(kind_of("garbage\n.IPPcode22\n"), ParseErrKind::HeaderMissing);
        // the header must be the whole line
        assert_eq!(kind_of(".IPPcode22 extra\n"), ParseErrKind::HeaderMissing);
    }

    #[test]
    fn orders_run_from_one() {
        let src = ".IPPcode22\nDEFVAR GF@x\n\n\nMOVE GF@x int@5\nWRITE GF@x\n";
        let program = parse_program(src).unwrap();
        let orders: Vec<_> = program.instructions.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn instruction_operands_are_classified() {
        let src = ".IPPcode22\nMOVE GF@x int@5\n";
        let program = parse_program(src).unwrap();
        let instr = &program.instructions[0];
        assert_eq!(instr.opcode, Opcode::MOVE);
        assert_eq!(
            instr.operands,
            vec![
                Operand::Var { frame: Frame::Global, name: "x".to_string() },
                Operand::Int("5".to_string()),
            ]
        );
    }

    #[test]
    fn opcode_casing_is_flattened() {
        let program = parse_program(".IPPcode22\ncReAtEfRaMe\n").unwrap();
        assert_eq!(program.instructions[0].opcode, Opcode::CREATEFRAME);
    }

    #[test]
    fn comments_do_not_change_parses() {
        let with = parse_program(".IPPcode22\nMOVE GF@x GF@y # comment\n").unwrap();
        let without = parse_program(".IPPcode22\nMOVE GF@x GF@y\n").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn unknown_opcode() {
        assert_eq!(
            kind_of(".IPPcode22\nFROBNICATE GF@x\n"),
            ParseErrKind::UnknownOpcode("FROBNICATE".to_string())
        );
    }

    #[test]
    fn arity_checked_both_ways() {
        assert_eq!(
            kind_of(".IPPcode22\nADD GF@x GF@y\n"),
            ParseErrKind::ArityMismatch { opcode: Opcode::ADD, expected: 3, received: 2 }
        );
        assert_eq!(
            kind_of(".IPPcode22\nADD GF@x GF@y GF@z GF@w\n"),
            ParseErrKind::ArityMismatch { opcode: Opcode::ADD, expected: 3, received: 4 }
        );
        assert!(parse_program(".IPPcode22\nADD GF@x GF@y GF@z\n").is_ok());
    }

    #[test]
    fn bad_operand_names_token_and_opcode() {
        let ParseErrKind::BadOperand { token, opcode, .. } =
            kind_of(".IPPcode22\nMOVE GF@x int@12\n")
        else {
            panic!("expected BadOperand");
        };
        assert_eq!(token, "int@12");
        assert_eq!(opcode, Opcode::MOVE);
    }

    #[test]
    fn label_and_type_positions() {
        let src = ".IPPcode22\nLABEL loop\nJUMPIFEQ loop GF@x nil@nil\nREAD GF@x string\n";
        let program = parse_program(src).unwrap();
        assert_eq!(program.instructions[0].operands, vec![Operand::Label("loop".to_string())]);
        assert_eq!(program.instructions[2].operands[1], Operand::Type(DataType::String));

        // a variable is not acceptable where a label is required
        assert!(matches!(
            kind_of(".IPPcode22\nJUMP GF@x\n"),
            ParseErrKind::BadOperand { .. }
        ));
    }

    #[test]
    fn first_error_aborts() {
        // the bad second line must be reported even though a third line follows
        let err = parse_program(".IPPcode22\nDEFVAR GF@x\nMOVE GF@x\nBREAK\n").unwrap_err();
        assert_eq!(
            *err.kind(),
            ParseErrKind::ArityMismatch { opcode: Opcode::MOVE, expected: 2, received: 1 }
        );
    }

    #[test]
    fn no_trailing_newline() {
        let program = parse_program(".IPPcode22\nBREAK").unwrap();
        assert_eq!(program.instructions.len(), 1);
    }

    #[test]
    fn classification_is_stable() {
        use crate::ast::OperandKind;
        use crate::parse::lex::classify;

        // re-classifying a rendered operand yields the identical value
        let src = ".IPPcode22\nMOVE GF@x int@5\nWRITE bool@true\nPUSH nil@nil\n";
        let program = parse_program(src).unwrap();
        for instr in &program.instructions {
            for (operand, &kind) in instr.operands.iter().zip(instr.opcode.operand_kinds()) {
                let rendered = operand.to_string();
                // strings are stored escaped, so only non-string kinds round-trip
                if !matches!(operand, Operand::Str(_)) {
                    let reclassified = match operand {
                        Operand::Var { .. } => classify(kind, &rendered),
                        Operand::Int(_) => classify(kind, &format!("int@{rendered}")),
                        Operand::Bool(_) => classify(kind, &format!("bool@{rendered}")),
                        Operand::Nil => classify(kind, &format!("nil@{rendered}")),
                        _ => classify(kind, &rendered),
                    };
                    assert_eq!(reclassified.as_ref(), Some(operand));
                }
            }
        }
    }
}
