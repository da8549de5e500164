use std::io::{self, Write};

use indent_write::io::IndentWriter;
use lazy_format::lazy_format;

use crate::{Command, Tags, flags::Flag};

/// Usage messages are wrapped to this many columns
const WIDTH: usize = 80;

const INDENT: &str = "  ";

/// Space between the columns of a table
const GUTTER: usize = 3;

/*
Overall structure:

Usage: app sub [flags] <args>

SYNOPSIS

  DETAILS

Subcommands:

  name   synopsis

Flags:

  -f, --foo <placeholder>   usage (default: ..)

Positional arguments:

  DETAILS

 */
impl Command {
    /// This command's usage message
    #[must_use]
    pub fn usage(&self) -> String {
        let mut buffer = Vec::new();

        match self.write_usage(&mut buffer) {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => unreachable!("writing to a Vec is infallible"),
        }
    }

    /// Write this command's usage message to `out`
    pub fn write_usage<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let flags = lazy_format!(match (self.has_flags()) {
            true => " [flags]",
            false => "",
        });

        let positional = lazy_format!(match (self.positional_spec()) {
            Some(spec) => (" {usage}", usage = spec.usage_text()),
            None => "",
        });

        writeln!(out, "Usage: {name}{flags}{positional}\n", name = self.name)?;

        if !self.synopsis.is_empty() {
            writeln!(out, "{}\n", self.synopsis)?;
        }

        if let Some(details) = self.details()
            && !details.is_empty()
        {
            write_wrapped(out, details)?;
            writeln!(out)?;
        }

        if !self.subcommands.is_empty() {
            section(out, "Subcommands", |out| {
                let rows = self
                    .subcommands
                    .iter()
                    .map(|(name, child)| (name.clone(), child.synopsis.to_string()));

                write_table(out, rows)
            })?;
        }

        if self.has_flags() {
            section(out, "Flags", |out| {
                let rows = self
                    .flags
                    .sorted()
                    .into_iter()
                    .map(|flag| (flag_label(flag), flag_description(flag)));

                write_table(out, rows)
            })?;
        }

        if let Some(details) = self.positional_spec().and_then(|spec| spec.details_text()) {
            section(out, "Positional arguments", |out| writeln!(out, "{}", wrap(details)))?;
        }

        Ok(())
    }
}

/// Write a section: the `header`, then a blank line, then the indented
/// `body`, then another blank line
fn section<W: Write + ?Sized>(
    out: &mut W,
    header: &str,
    body: impl FnOnce(&mut IndentWriter<&mut W>) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "{header}:\n")?;
    body(&mut IndentWriter::new(INDENT, &mut *out))?;
    writeln!(out)
}

/// Write some text, word wrapped and indented
fn write_wrapped<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    let mut out = IndentWriter::new(INDENT, out);
    writeln!(out, "{}", wrap(text))
}

/// Word wrap text that will be indented once
fn wrap(text: &str) -> String {
    textwrap::fill(text, WIDTH - INDENT.len())
}

/// Write two columns, aligning the second one
fn write_table(
    out: &mut impl Write,
    rows: impl Iterator<Item = (String, String)>,
) -> io::Result<()> {
    let rows: Vec<(String, String)> = rows.collect();

    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        + GUTTER;

    rows.iter().try_for_each(|(label, description)| match description.is_empty() {
        true => writeln!(out, "{label}"),
        false => writeln!(out, "{label:width$}{description}"),
    })
}

fn flag_label(flag: &Flag) -> String {
    let tags = lazy_format!(match (flag.tags) {
        Tags::Short { short } => "-{short}",
        Tags::Long { long } => "    --{long}",
        Tags::LongShort { short, long } => "-{short}, --{long}",
    });

    let label = lazy_format!(match (flag.placeholder()) {
        None => "{tags}",
        Some(placeholder) => "{tags} <{placeholder}>",
    });

    label.to_string()
}

fn flag_description(flag: &Flag) -> String {
    match flag.default_value() {
        None => flag.usage.clone(),
        Some(default) if flag.usage.is_empty() => format!("(default: {default})"),
        Some(default) => format!("{} (default: {default})", flag.usage),
    }
}
