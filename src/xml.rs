//! Rendering a [`Program`] as an XML document.
//!
//! The document shape is fixed: a `<program>` root carrying the language
//! attribute, one `<instruction>` child per instruction with `order` and
//! `opcode` attributes, and one `<argN>` child per operand carrying a `type`
//! attribute and the operand text. The output is pretty-printed (two-space
//! indent, childless elements self-closed) to match the reference formatter,
//! but consumers compare documents through a canonicalizing comparator, so
//! the indentation carries no semantic weight.
//!
//! String operand text is already XML-escaped when it is classified
//! (see [`parse::lex`](crate::parse::lex)); every other operand kind is
//! unable to contain markup characters by grammar construction. The renderer
//! therefore writes operand text verbatim.

use std::fmt;

use crate::ast::{Instruction, Program};

/// A lazily-rendered XML view of a program.
///
/// The [`Display`](fmt::Display) implementation produces the complete
/// document, declaration and trailing newline included, so it can be written
/// straight to an output stream without an intermediate buffer.
pub struct Document<'p>(&'p Program);

/// Wraps the program in its renderable XML view.
pub fn document(program: &Program) -> Document<'_> {
    Document(program)
}

/// Renders the program into an owned XML string.
pub fn render(program: &Program) -> String {
    document(program).to_string()
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Document(program) = *self;

        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        if program.instructions.is_empty() {
            return writeln!(f, r#"<program language="{}"/>"#, Program::LANGUAGE);
        }

        writeln!(f, r#"<program language="{}">"#, Program::LANGUAGE)?;
        for instr in &program.instructions {
            write_instruction(f, instr)?;
        }
        writeln!(f, "</program>")
    }
}

fn write_instruction(f: &mut fmt::Formatter<'_>, instr: &Instruction) -> fmt::Result {
    if instr.operands.is_empty() {
        return writeln!(
            f,
            r#"  <instruction order="{}" opcode="{}"/>"#,
            instr.order, instr.opcode
        );
    }

    writeln!(f, r#"  <instruction order="{}" opcode="{}">"#, instr.order, instr.opcode)?;
    for (i, operand) in instr.operands.iter().enumerate() {
        writeln!(
            f,
            r#"    <arg{n} type="{ty}">{operand}</arg{n}>"#,
            n = i + 1,
            ty = operand.type_name(),
        )?;
    }
    writeln!(f, "  </instruction>")
}

#[cfg(test)]
mod test {
    use crate::ast::Program;
    use crate::parse::parse_program;

    use super::render;

    fn xml_of(src: &str) -> String {
        render(&parse_program(src).unwrap())
    }

    #[test]
    fn empty_program_self_closes() {
        assert_eq!(
            render(&Program::default()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <program language=\"IPPcode22\"/>\n"
        );
    }

    #[test]
    fn full_document() {
        let xml = xml_of(".IPPcode22\nDEFVAR GF@x\nMOVE GF@x int@5\n");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <program language=\"IPPcode22\">\n\
             \x20 <instruction order=\"1\" opcode=\"DEFVAR\">\n\
             \x20   <arg1 type=\"var\">GF@x</arg1>\n\
             \x20 </instruction>\n\
             \x20 <instruction order=\"2\" opcode=\"MOVE\">\n\
             \x20   <arg1 type=\"var\">GF@x</arg1>\n\
             \x20   <arg2 type=\"int\">5</arg2>\n\
             \x20 </instruction>\n\
             </program>\n"
        );
    }

    #[test]
    fn zero_operand_instruction_self_closes() {
        let xml = xml_of(".IPPcode22\nBREAK\n");
        assert!(xml.contains("<instruction order=\"1\" opcode=\"BREAK\"/>"));
    }

    #[test]
    fn string_text_is_pre_escaped() {
        let xml = xml_of(".IPPcode22\nWRITE string@a&b<c\n");
        assert!(xml.contains("<arg1 type=\"string\">a&amp;b&lt;c</arg1>"));
    }

    #[test]
    fn operand_positions_are_one_based() {
        let xml = xml_of(".IPPcode22\nJUMPIFEQ end int@1 int@2\n");
        assert!(xml.contains("<arg1 type=\"label\">end</arg1>"));
        assert!(xml.contains("<arg2 type=\"int\">1</arg2>"));
        assert!(xml.contains("<arg3 type=\"int\">2</arg3>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let src = ".IPPcode22\nDEFVAR GF@x\nWRITE string@hi\n";
        assert_eq!(xml_of(src), xml_of(src));
    }
}
