use std::io::Read as _;
use std::process::ExitCode;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use clap::Parser;
use ippcode22::err::{self, Error as _};
use ippcode22::parse::{parse_program, ParseErr};
use ippcode22::xml;

const SRC_NAME: &str = "<stdin>";

/// Parse IPPcode22 source from stdin and write its XML representation to stdout.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() -> ExitCode {
    let Args {} = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            use clap::error::ErrorKind;

            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(err::CLI_MISUSE),
            };
        }
    };

    let mut input = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut input) {
        eprintln!("could not read stdin: {e}");
        return ExitCode::from(err::CLI_MISUSE);
    }
    // The reference tool is byte-oriented; stray non-UTF-8 bytes become
    // replacement characters and fail classification the same way.
    let src = String::from_utf8_lossy(&input);

    match parse_program(&src) {
        Ok(program) => {
            print!("{}", xml::document(&program));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e, &src).unwrap();
            ExitCode::from(e.exit_code())
        }
    }
}

fn report_error(err: &ParseErr, src: &str) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    let span = err.span().unwrap_or(0..0);

    let mut label = Label::new((SRC_NAME, span.clone())).with_color(colors.next());
    if let Some(help) = err.help() {
        label = label.with_message(help);
    }

    Report::build(ReportKind::Error, SRC_NAME, span.start)
        .with_message(err.to_string())
        .with_label(label)
        .finish()
        .eprint((SRC_NAME, Source::from(src.to_string())))
}
