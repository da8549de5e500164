/*!
The per-command flag registry.

Every [`Command`][crate::Command] owns one [`FlagSet`]. Flags are declared
with a [`Tags`] and a typed default; the set parses the command's flags from
the front of its arguments, stopping at the first operand, and hands back
whatever is left for the subcommand or positional arguments.
 */

use core::fmt::Debug;
use std::iter;

use cmdtree_parser::{Arg, ArgAccess, ArgumentsParser, Token, Visitor};

use crate::{
    Tags,
    binding::Binding,
    errors::{FlagError, ParameterError},
    parameter::{Parameter, ParameterUsage},
};

/**
A type that can be the value of a flag. Implemented automatically for
everything that has both a [`Parameter`] and a [`ParameterUsage`]
implementation, which includes all the primitive types, [`String`],
[`PathBuf`][std::path::PathBuf], [`Duration`][std::time::Duration],
[`Count`][crate::Count], and [`Option`] and [`Vec`] of value types.
*/
pub trait FlagValue: for<'arg> Parameter<'arg> + ParameterUsage + Clone + Debug + 'static {}

impl<T> FlagValue for T where T: for<'arg> Parameter<'arg> + ParameterUsage + Clone + Debug + 'static {}

/// Object-safe version of [`ArgAccess`], so that flags of every type can live
/// in the same set.
trait TakeArgument<'arg> {
    fn take_argument(&mut self) -> Option<Arg<'arg>>;
}

impl<'arg, A: ArgAccess<'arg>> TakeArgument<'arg> for Option<A> {
    fn take_argument(&mut self) -> Option<Arg<'arg>> {
        self.take().and_then(ArgAccess::take)
    }
}

struct ErasedAccess<'a, 'arg>(&'a mut dyn TakeArgument<'arg>);

impl<'arg> ArgAccess<'arg> for ErasedAccess<'_, 'arg> {
    fn take(self) -> Option<Arg<'arg>> {
        self.0.take_argument()
    }
}

/// A single typed flag, minus the type
trait Slot {
    fn present<'arg>(&mut self, access: &mut dyn TakeArgument<'arg>) -> Result<(), ParameterError>;
    fn argument<'arg>(&mut self, argument: Arg<'arg>) -> Result<(), ParameterError>;
    fn reset(&mut self);
    fn placeholder(&self) -> Option<&'static str>;
    fn default_value(&self) -> Option<String>;
}

struct TypedSlot<T> {
    default: T,
    binding: Binding<T>,
    seen: bool,
}

impl<T: FlagValue> Slot for TypedSlot<T> {
    fn present<'arg>(&mut self, access: &mut dyn TakeArgument<'arg>) -> Result<(), ParameterError> {
        let access = ErasedAccess(access);

        let value: Result<T, ParameterError> = match self.seen {
            false => T::from_flag(access),
            true => self
                .binding
                .replace(self.default.clone())
                .merge_flag(access),
        };

        self.binding.set(value?);
        self.seen = true;
        Ok(())
    }

    fn argument<'arg>(&mut self, argument: Arg<'arg>) -> Result<(), ParameterError> {
        let value: Result<T, ParameterError> = match self.seen {
            false => T::from_argument(argument),
            true => self
                .binding
                .replace(self.default.clone())
                .merge_argument(argument),
        };

        self.binding.set(value?);
        self.seen = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.binding.set(self.default.clone());
        self.seen = false;
    }

    fn placeholder(&self) -> Option<&'static str> {
        T::PLACEHOLDER
    }

    fn default_value(&self) -> Option<String> {
        match self.default.is_zero() {
            true => None,
            false => Some(format!("{:?}", self.default)),
        }
    }
}

/// A declared flag
pub(crate) struct Flag {
    pub tags: Tags<'static>,
    pub usage: String,
    slot: Box<dyn Slot>,
}

impl Flag {
    pub fn placeholder(&self) -> Option<&'static str> {
        self.slot.placeholder()
    }

    /// The flag's default, if it's worth mentioning in a usage message
    pub fn default_value(&self) -> Option<String> {
        self.slot.default_value()
    }

    /// The key flags are sorted by in usage messages
    fn sort_key(&self) -> (&str, char) {
        match self.tags {
            Tags::Long { long } => (long, '\0'),
            Tags::LongShort { long, short } => (long, short),
            Tags::Short { short } => ("", short),
        }
    }
}

/// The set of flags belonging to a single command
#[derive(Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    /**
    Declare a new flag.

    # Panics

    Panics if a long or short tag is already used by another flag in this
    set. That's a defect in the program, not in its arguments.
    */
    pub fn add<T: FlagValue>(
        &mut self,
        tags: Tags<'static>,
        default: T,
        usage: impl Into<String>,
    ) -> Binding<T> {
        if let Some(existing) = self.flags.iter().find(|flag| conflicts(flag.tags, tags)) {
            panic!("flag {tags} conflicts with already defined flag {}", existing.tags);
        }

        let binding = Binding::new(default.clone());

        self.flags.push(Flag {
            tags,
            usage: usage.into(),
            slot: Box::new(TypedSlot {
                default,
                binding: binding.clone(),
                seen: false,
            }),
        });

        binding
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Every flag, sorted by long tag (short tag if there's no long tag)
    pub(crate) fn sorted(&self) -> Vec<&Flag> {
        let mut flags: Vec<&Flag> = self.flags.iter().collect();
        flags.sort_by(|lhs, rhs| lhs.sort_key().cmp(&rhs.sort_key()));
        flags
    }

    /// Put every flag back to its default
    pub(crate) fn reset(&mut self) {
        self.flags.iter_mut().for_each(|flag| flag.slot.reset());
    }

    fn find_long(&mut self, option: Arg<'_>) -> Option<&mut Flag> {
        let long = option.as_str()?;

        self.flags
            .iter_mut()
            .find(|flag| flag.tags.long() == Some(long))
    }

    fn find_short(&mut self, short: char) -> Option<&mut Flag> {
        self.flags
            .iter_mut()
            .find(|flag| flag.tags.short() == Some(short))
    }

    /**
    Parse flags from the front of `args`, stopping at the first operand or
    after a `--`. Returns everything from that operand onward.
    */
    pub(crate) fn parse<'arg>(&mut self, args: &[Arg<'arg>]) -> Result<Vec<Arg<'arg>>, FlagError> {
        let mut parser = ArgumentsParser::new(args.iter().map(|arg| arg.bytes()));

        loop {
            match parser.next_token(FlagVisitor { flags: &mut *self }) {
                None => return Ok(Vec::new()),
                Some(Token::Flag(result)) => result?,
                Some(Token::Operand(operand)) => {
                    return Ok(iter::once(operand)
                        .chain(parser.into_remaining())
                        .collect());
                }
            }
        }
    }
}

impl Debug for FlagSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.flags.iter().map(|flag| flag.tags))
            .finish()
    }
}

/// True if the two sets of tags share a long or short tag
fn conflicts(lhs: Tags<'_>, rhs: Tags<'_>) -> bool {
    (lhs.long().is_some() && lhs.long() == rhs.long())
        || (lhs.short().is_some() && lhs.short() == rhs.short())
}

struct FlagVisitor<'a> {
    flags: &'a mut FlagSet,
}

impl<'arg> Visitor<'arg> for FlagVisitor<'_> {
    type Value = Result<(), FlagError>;

    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value {
        let flag = self
            .flags
            .find_long(option)
            .ok_or_else(|| FlagError::UnrecognizedLong(option.to_string()))?;

        tracing::trace!(flag = %flag.tags, %argument, "flag");

        flag.slot
            .argument(argument)
            .map_err(|error| FlagError::Parameter {
                tags: flag.tags,
                error,
            })
    }

    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Self::Value {
        let flag = match self.flags.find_long(option) {
            Some(flag) => flag,
            None if option == "help" => return Err(FlagError::HelpRequested),
            None => return Err(FlagError::UnrecognizedLong(option.to_string())),
        };

        tracing::trace!(flag = %flag.tags, "flag");

        flag.slot
            .present(&mut Some(arg))
            .map_err(|error| FlagError::Parameter {
                tags: flag.tags,
                error,
            })
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value {
        let flag = match self.flags.find_short(option) {
            Some(flag) => flag,
            None if option == 'h' => return Err(FlagError::HelpRequested),
            None => return Err(FlagError::UnrecognizedShort(option)),
        };

        tracing::trace!(flag = %flag.tags, "flag");

        flag.slot
            .present(&mut Some(arg))
            .map_err(|error| FlagError::Parameter {
                tags: flag.tags,
                error,
            })
    }
}
