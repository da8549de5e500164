use std::borrow::Cow;

use cmdtree_parser::Arg;

use crate::{binding::Binding, errors::PositionalError};

/**
Describes the positional arguments a command accepts.

Only a command that declared a [`Positional`] (with
[`Command::positional`][crate::Command::positional]) accepts positional
arguments at all; anything left over on a command that didn't is an error.
*/
#[derive(Debug, Clone, Default)]
pub struct Positional {
    count: usize,
    usage: Option<Cow<'static, str>>,
    details: Option<Cow<'static, str>>,
}

impl Positional {
    /// Accept any number of positional arguments, including none
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept exactly `count` positional arguments. A `count` of 0 is the
    /// same as [`any`][Self::any].
    #[inline]
    #[must_use]
    pub fn exactly(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// A short description of the arguments for the usage line, such as
    /// `<source> <destination>`. The default is `[args]`.
    #[must_use]
    pub fn usage(self, usage: impl Into<Cow<'static, str>>) -> Self {
        Self {
            usage: Some(usage.into()),
            ..self
        }
    }

    /// A longer explanation of the arguments for the usage message
    #[must_use]
    pub fn details(self, details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            details: Some(details.into()),
            ..self
        }
    }

    /// The required number of arguments, if there is one
    #[inline]
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self.count {
            0 => None,
            count => Some(count),
        }
    }

    #[must_use]
    pub fn usage_text(&self) -> &str {
        self.usage.as_deref().unwrap_or("[args]")
    }

    #[must_use]
    pub fn details_text(&self) -> Option<&str> {
        self.details.as_deref().filter(|details| !details.is_empty())
    }

    /// Check `args` against this spec, converting them to strings
    fn accept(&self, args: &[Arg<'_>]) -> Result<Vec<String>, PositionalError> {
        if let Some(expected) = self.count()
            && args.len() != expected
        {
            return Err(PositionalError::WrongCount {
                expected,
                args: lossy(args),
            });
        }

        args.iter()
            .map(|arg| match arg.as_str() {
                Some(arg) => Ok(arg.to_owned()),
                None => Err(PositionalError::InvalidUtf8 {
                    arg: arg.to_string(),
                }),
            })
            .collect()
    }
}

/// A command's declared positional arguments, along with where to put them
#[derive(Debug)]
pub(crate) struct PositionalSlot {
    pub spec: Positional,
    pub binding: Binding<Vec<String>>,
}

impl PositionalSlot {
    pub fn new(spec: Positional) -> Self {
        Self {
            spec,
            binding: Binding::new(Vec::new()),
        }
    }
}

/**
Bind whatever a command has left over after its flags and subcommand to its
positional arguments. On success, nothing is left over.
*/
pub(crate) fn bind(slot: Option<&PositionalSlot>, args: &[Arg<'_>]) -> Result<(), PositionalError> {
    match slot {
        None if args.is_empty() => Ok(()),
        None => Err(PositionalError::NotExpected { args: lossy(args) }),
        Some(slot) => {
            slot.binding.set(slot.spec.accept(args)?);
            Ok(())
        }
    }
}

fn lossy(args: &[Arg<'_>]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}
