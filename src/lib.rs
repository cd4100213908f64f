//! An IPPcode22 parser and XML serializer.
//!
//! IPPcode22 is a small teaching assembly language: a required `.IPPcode22`
//! header followed by one instruction per line. This crate is the front end
//! of its toolchain — it validates source code against the fixed instruction
//! table and produces the XML program representation that the downstream
//! interpreter consumes.
//!
//! The crate consists of:
//! - [`parse`]: tokenization and parsing into a [`Program`](ast::Program)
//! - [`ast`]: the instruction table and the operand data model
//! - [`xml`]: rendering a parsed program as an XML document
//! - [`err`]: the unified error interface and reserved exit codes

#![warn(missing_docs)]

pub mod ast;
pub mod err;
pub mod parse;
pub mod xml;
