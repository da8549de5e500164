use std::borrow::Cow;

use crate::output::Output;

/// What [`Command::parse`][crate::Command::parse] does when the arguments
/// don't fit the command tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorHandling {
    /// Return the error to the caller
    Propagate,

    /// Exit the process with status 2, or status 0 if the "error" was a
    /// request for a usage message
    #[default]
    Exit,

    /// Panic with the error message
    Panic,
}

/// Options for the root of a command tree. Everything here is inherited by
/// the whole tree, except the synopsis and details.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) name: Option<String>,
    pub(crate) synopsis: Option<Cow<'static, str>>,
    pub(crate) details: Option<Cow<'static, str>>,
    pub(crate) error_handling: ErrorHandling,
    pub(crate) output: Output,
}

impl Options {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The name of the root command, as it appears in usage and error
    /// messages. Defaults to the name the process was invoked with.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    /// A one-line description of the root command
    #[must_use]
    pub fn synopsis(self, synopsis: impl Into<Cow<'static, str>>) -> Self {
        Self {
            synopsis: Some(synopsis.into()),
            ..self
        }
    }

    /// A longer description of the root command, printed word-wrapped in its
    /// usage message
    #[must_use]
    pub fn details(self, details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            details: Some(details.into()),
            ..self
        }
    }

    #[must_use]
    pub fn error_handling(self, error_handling: ErrorHandling) -> Self {
        Self {
            error_handling,
            ..self
        }
    }

    /// Where usage messages and flag errors are written. Defaults to
    /// standard error.
    #[must_use]
    pub fn output(self, output: Output) -> Self {
        Self { output, ..self }
    }
}

/// Options for a subcommand
#[derive(Debug, Clone, Default)]
pub struct SubcommandOptions {
    pub(crate) details: Option<Cow<'static, str>>,
}

impl SubcommandOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A longer description of the subcommand, printed word-wrapped in its
    /// usage message
    #[must_use]
    pub fn details(self, details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            details: Some(details.into()),
        }
    }
}
