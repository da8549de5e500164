/*!
Error types for everything that can go wrong while parsing an argument vector
against a command tree.

Errors bubble up through the tree: a failure in `app remote add` is an
[`Error::Subcommand`] for `app`, wrapping an [`Error::Subcommand`] for
`app remote`, wrapping the actual [`Error::Flags`] or [`Error::Positional`]
for `app remote add`. The rendered message shows the whole path:

```text
app > app remote > app remote add: bad positional args: required 2 positional args, got [origin]
```
 */

use core::fmt::Display;

use cmdtree_parser::Arg;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{Tags, parameter};

/// An error trying to parse a typed value from a flag. These errors are
/// produced by the primitive types, like bools and strings and vectors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParameterError {
    /// An option was given without its argument
    #[error("requires an argument")]
    MissingArgument,

    /// This parameter is a switch; it got an argument and didn't want one
    #[error("doesn't take an argument (got {0:?})")]
    UnexpectedArgument(String),

    /// A flag that can only be given once was repeated
    #[error("appeared too many times")]
    Repeated,

    /// The argument wasn't a valid value of the flag's type
    #[error("failed to parse {arg:?}: {message}")]
    ParseError { arg: String, message: String },

    /// Any other complaint from the flag's type
    #[error("{message}")]
    Custom { message: String },
}

impl<'arg> parameter::Error<'arg> for ParameterError {
    fn missing_argument() -> Self {
        Self::MissingArgument
    }

    fn unexpected_argument(argument: Arg<'arg>) -> Self {
        Self::UnexpectedArgument(argument.to_string())
    }

    fn repeated() -> Self {
        Self::Repeated
    }

    fn invalid_utf8(arg: Arg<'arg>) -> Self {
        Self::ParseError {
            arg: arg.to_string(),
            message: "argument wasn't valid utf-8".to_owned(),
        }
    }

    fn parse_error(arg: &str, message: impl Display) -> Self {
        Self::ParseError {
            arg: arg.to_owned(),
            message: message.to_string(),
        }
    }

    fn custom(message: impl Display) -> Self {
        Self::Custom {
            message: message.to_string(),
        }
    }
}

/// Errors from a single command's flags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FlagError {
    /// A `--long` option that this command doesn't define
    #[error("unrecognized option --{0}")]
    UnrecognizedLong(String),

    /// A `-s` option that this command doesn't define
    #[error("unrecognized option -{0}")]
    UnrecognizedShort(char),

    /// The flag was recognized, but its value type rejected it
    #[error("option {tags}: {error}")]
    Parameter {
        tags: Tags<'static>,
        #[source]
        error: ParameterError,
    },

    /// `-h` or `--help` was given and the command doesn't define them
    #[error("usage message was requested")]
    HelpRequested,
}

/// Errors binding the leftover arguments of a command to its positional
/// arguments
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PositionalError {
    /// The command doesn't accept positional arguments, but got some
    #[error("positional args not expected, got {}", bracketed(.args))]
    NotExpected { args: Vec<String> },

    /// The command accepts an exact number of positional arguments, and got
    /// a different number
    #[error("required {expected} positional args, got {}", bracketed(.args))]
    WrongCount { expected: usize, args: Vec<String> },

    /// A positional argument wasn't valid UTF-8
    #[error("positional arg {arg:?} wasn't valid utf-8")]
    InvalidUtf8 { arg: String },
}

/// Render a list of arguments like `[a b c]`
fn bracketed(args: &[String]) -> impl Display + '_ {
    lazy_format!("[{}]", args.iter().join_with(' '))
}

/// The broad category of an [`Error`], regardless of where in the tree it
/// happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A malformed or unknown flag
    BadFlags,

    /// `-h` or `--help` was given. The usage message was already printed.
    HelpRequested,

    /// Positional arguments didn't match what the command accepts
    BadPositional,
}

/**
A parse error, tagged with the fully qualified name of the command where it
happened and the chain of ancestor commands it bubbled through.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The command's flags failed to parse
    #[error("{command}: bad flags: {error}")]
    Flags {
        command: String,
        #[source]
        error: FlagError,
    },

    /// The command's leftover arguments didn't fit its positional arguments
    #[error("{command}: bad positional args: {error}")]
    Positional {
        command: String,
        #[source]
        error: PositionalError,
    },

    /// Parsing failed somewhere below this command
    #[error("{command} > {error}")]
    Subcommand {
        command: String,
        #[source]
        error: Box<Error>,
    },
}

impl Error {
    pub(crate) fn flags(command: &str, error: FlagError) -> Self {
        Self::Flags {
            command: command.to_owned(),
            error,
        }
    }

    pub(crate) fn positional(command: &str, error: PositionalError) -> Self {
        Self::Positional {
            command: command.to_owned(),
            error,
        }
    }

    pub(crate) fn subcommand(command: &str, error: Self) -> Self {
        Self::Subcommand {
            command: command.to_owned(),
            error: Box::new(error),
        }
    }

    /// The innermost error, where parsing actually failed
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut error = self;

        while let Self::Subcommand { error: inner, .. } = error {
            error = &**inner;
        }

        error
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::Flags {
                error: FlagError::HelpRequested,
                ..
            } => ErrorKind::HelpRequested,
            Self::Flags { .. } => ErrorKind::BadFlags,
            Self::Positional { .. } => ErrorKind::BadPositional,
            Self::Subcommand { ref error, .. } => error.kind(),
        }
    }

    #[must_use]
    pub fn is_help_request(&self) -> bool {
        self.kind() == ErrorKind::HelpRequested
    }

    /// The fully qualified name of the command where parsing failed
    #[must_use]
    pub fn command(&self) -> &str {
        match self.root_cause() {
            Self::Flags { command, .. }
            | Self::Positional { command, .. }
            | Self::Subcommand { command, .. } => command,
        }
    }

    /// The names of every command the error passed through, from the root
    /// down to the command where parsing failed
    pub fn path(&self) -> impl Iterator<Item = &str> {
        let mut next = Some(self);

        core::iter::from_fn(move || {
            let error = next?;

            Some(match error {
                Self::Subcommand { command, error } => {
                    next = Some(&**error);
                    command.as_str()
                }
                Self::Flags { command, .. } | Self::Positional { command, .. } => {
                    next = None;
                    command.as_str()
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Error {
        Error::subcommand(
            "app",
            Error::subcommand(
                "app remote",
                Error::positional(
                    "app remote add",
                    PositionalError::WrongCount {
                        expected: 2,
                        args: vec!["origin".to_owned()],
                    },
                ),
            ),
        )
    }

    #[test]
    fn message_shows_the_whole_path() {
        assert_eq!(
            nested().to_string(),
            "app > app remote > app remote add: bad positional args: \
            required 2 positional args, got [origin]"
        );
    }

    #[test]
    fn path_and_command() {
        let error = nested();

        assert_eq!(
            error.path().collect::<Vec<_>>(),
            ["app", "app remote", "app remote add"]
        );
        assert_eq!(error.command(), "app remote add");
        assert_eq!(error.kind(), ErrorKind::BadPositional);
    }

    #[test]
    fn help_is_its_own_kind() {
        let error = Error::subcommand("app", Error::flags("app sub", FlagError::HelpRequested));

        assert!(error.is_help_request());
        assert_eq!(error.to_string(), "app > app sub: bad flags: usage message was requested");
    }

    #[test]
    fn flag_errors() {
        let error = Error::flags(
            "app",
            FlagError::Parameter {
                tags: Tags::LongShort {
                    long: "level",
                    short: 'l',
                },
                error: ParameterError::ParseError {
                    arg: "high".to_owned(),
                    message: "invalid digit found in string".to_owned(),
                },
            },
        );

        assert_eq!(
            error.to_string(),
            "app: bad flags: option --level: failed to parse \"high\": \
            invalid digit found in string"
        );
        assert_eq!(error.kind(), ErrorKind::BadFlags);
    }

    #[test]
    fn empty_args_render_as_empty_brackets() {
        let error = PositionalError::WrongCount {
            expected: 1,
            args: Vec::new(),
        };

        assert_eq!(error.to_string(), "required 1 positional args, got []");
    }
}
