//! Tokenizing IPPcode22 source.
//!
//! This module has two layers:
//! - [`Token`], the stream the parser reads. IPPcode22 is line-oriented with
//!   `#` comments, so the stream is just words, line breaks, and comments
//!   (which the parser filters out).
//! - the literal recognizers behind [`classify`], which decide what kind of
//!   value an operand word is. These encode the reference grammar exactly,
//!   including its deliberate oddities (single-digit integer literals,
//!   identifiers that may not contain the digit `0`).

use logos::Logos;

use crate::ast::{Operand, OperandKind};

/// A unit of information in IPPcode22 source code.
///
/// Every input character lexes to some token: anything that is not
/// whitespace, a line break, or a comment is a [`Word`](Token::Word).
/// Words carry no meaning on their own; the parser interprets them by
/// position (header, opcode, operand).
#[derive(Debug, Logos, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token<'s> {
    /// A comment, from `#` to the end of the line. Comments are not
    /// escapable; `#` cannot occur inside any token.
    #[regex(r"#[^\n]*")]
    Comment,

    /// A line break.
    #[regex(r"\r?\n")]
    NewLine,

    /// A maximal run of non-whitespace, non-`#` characters.
    #[regex(r"[^ \t\r\n#]+", |lx| lx.slice())]
    Word(&'s str),
}

/// Classifies a raw operand word against the kind its position requires.
///
/// Symbol positions try the literal forms in fixed precedence — variable,
/// integer, boolean, string, nil — and the first match wins. The order
/// matters: it is what keeps malformed tokens from being ambiguous across
/// categories.
///
/// Returns `None` if the word matches no acceptable form.
pub fn classify(kind: OperandKind, word: &str) -> Option<Operand> {
    match kind {
        OperandKind::Var => match_var(word),
        OperandKind::Symb => match_var(word)
            .or_else(|| match_int(word))
            .or_else(|| match_bool(word))
            .or_else(|| match_string(word))
            .or_else(|| match_nil(word)),
        OperandKind::Label => match_label(word),
        OperandKind::Type => match_type(word),
    }
}

/// First character of an identifier: an ASCII letter or one of `_-$&%*!?`.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

/// Later characters additionally allow digits 1-9.
/// The digit `0` is absent from the reference grammar and stays excluded.
fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || matches!(c, '1'..='9')
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}

/// A character allowed in a string literal outside of a `\ddd` escape:
/// printable ASCII except space, `#`, and `\`.
fn is_string_char(c: char) -> bool {
    matches!(c, '!' | '"' | '$'..='[' | ']'..='~')
}

fn match_var(word: &str) -> Option<Operand> {
    let (frame, name) = word.split_once('@')?;
    let frame = frame.parse().ok()?;
    is_ident(name).then(|| Operand::Var { frame, name: name.to_string() })
}

fn match_int(word: &str) -> Option<Operand> {
    let digits = word.strip_prefix("int@")?;
    let unsigned = digits.strip_prefix(['+', '-']).unwrap_or(digits);

    // The grammar accepts exactly one digit after the optional sign.
    let mut chars = unsigned.chars();
    let ok = chars.next().is_some_and(|c| c.is_ascii_digit()) && chars.next().is_none();
    ok.then(|| Operand::Int(digits.to_string()))
}

fn match_bool(word: &str) -> Option<Operand> {
    match word {
        "bool@true" => Some(Operand::Bool(true)),
        "bool@false" => Some(Operand::Bool(false)),
        _ => None,
    }
}

fn match_string(word: &str) -> Option<Operand> {
    let text = word.strip_prefix("string@")?;

    // The grammar requires at least one character after `string@`.
    if text.is_empty() {
        return None;
    }

    let mut rest = text;
    while !rest.is_empty() {
        if let Some(esc) = rest.strip_prefix('\\') {
            // A backslash must be followed by exactly three decimal digits.
            let mut digits = esc.chars();
            let valid = (0..3).all(|_| digits.next().is_some_and(|c| c.is_ascii_digit()));
            if !valid {
                return None;
            }
            rest = &esc[3..];
        } else {
            let c = rest.chars().next()?;
            if !is_string_char(c) {
                return None;
            }
            rest = &rest[c.len_utf8()..];
        }
    }

    Some(Operand::Str(escape_xml(text)))
}

fn match_nil(word: &str) -> Option<Operand> {
    (word == "nil@nil").then_some(Operand::Nil)
}

fn match_label(word: &str) -> Option<Operand> {
    is_ident(word).then(|| Operand::Label(word.to_string()))
}

fn match_type(word: &str) -> Option<Operand> {
    word.parse().ok().map(Operand::Type)
}

/// Replaces the XML-special characters `&`, `<`, `>`, `"`, `'` with their
/// entity equivalents. Applied to string literal text once, at
/// classification time; the renderer writes the stored text verbatim.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
