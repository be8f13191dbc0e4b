//! User-facing output for the CLI: colored diffs, traces and error reports.

use std::io::{self, IsTerminal, Write};

use difference::{Changeset, Difference};
use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::errors::FilterError;

/// Color only when stdout is a terminal.
pub fn color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints an error as a `miette` report on stderr.
pub fn print_error(error: FilterError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

/// Writes a line diff between two renderings, `-` for removed and `+` for
/// added lines.
pub fn write_diff<W: WriteColor>(out: &mut W, before: &str, after: &str) -> io::Result<()> {
    let changeset = Changeset::new(before, after, "\n");
    for diff in &changeset.diffs {
        let (prefix, color) = match diff {
            Difference::Same(_) => (' ', None),
            Difference::Add(_) => ('+', Some(Color::Green)),
            Difference::Rem(_) => ('-', Some(Color::Red)),
        };
        let chunk = match diff {
            Difference::Same(x) | Difference::Add(x) | Difference::Rem(x) => x,
        };
        match color {
            Some(color) => out.set_color(ColorSpec::new().set_fg(Some(color)))?,
            None => out.reset()?,
        }
        for line in chunk.split('\n') {
            writeln!(out, "{}{}", prefix, line)?;
        }
    }
    out.reset()
}

/// Writes a section header for batch output.
pub fn write_header<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(out, "--- {} ---", title)?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn diff_marks_removed_and_added_lines() {
        let mut out = NoColor::new(Vec::new());
        write_diff(&mut out, "a\nb\nc", "a\nc").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, " a\n-b\n c\n");
    }

    #[test]
    fn header_is_plain_without_color() {
        let mut out = NoColor::new(Vec::new());
        write_header(&mut out, "demo.sexp").unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "--- demo.sexp ---\n");
    }
}
