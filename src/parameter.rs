/*!
How a flag's value type turns command-line arguments into a value.

Every flag is declared with a default and a type; the type decides whether
the flag takes an argument, how that argument is parsed, and what happens
when the flag is repeated. Plain values only need [`ParsedValue`] (anything
that's [`FromStr`]) or [`Value`]; implement [`Parameter`] directly for
switches, or for types that collect repeated flags.
 */

use core::{fmt::Display, str::FromStr};

use cmdtree_parser::{Arg, ArgAccess};

/**
The parsing half of a flag's value type.

A flag's default covers its absence, so only appearances reach this trait:
the first appearance constructs a value with [`from_argument`] or
[`from_flag`], and each further appearance folds into it with
[`merge_argument`] or [`merge_flag`].

A type should either always or never take an argument. A flag that sometimes
takes one makes `--flag word` ambiguous.

[`from_argument`]: Parameter::from_argument
[`from_flag`]: Parameter::from_flag
[`merge_argument`]: Parameter::merge_argument
[`merge_flag`]: Parameter::merge_flag
*/
pub trait Parameter<'arg>: Sized {
    /// The flag was written as `--flag=argument`. Switches reject this.
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E>;

    /// The flag was written as `--flag` or `-f`. Options call
    /// [`take`][ArgAccess::take] to get their argument; switches leave it
    /// alone, so that the next argument is parsed on its own.
    fn from_flag<E: Error<'arg>>(argument: impl ArgAccess<'arg>) -> Result<Self, E>;

    /// The flag was repeated as `--flag=argument`
    fn merge_argument<E: Error<'arg>>(self, argument: Arg<'arg>) -> Result<Self, E>;

    /// The flag was repeated as `--flag` or `-f`
    fn merge_flag<E: Error<'arg>>(self, argument: impl ArgAccess<'arg>) -> Result<Self, E>;
}

/// Constructors for the errors a [`Parameter`] can report
pub trait Error<'arg> {
    fn missing_argument() -> Self;

    fn unexpected_argument(argument: Arg<'arg>) -> Self;

    /// The flag appeared again, and its type doesn't accumulate
    fn repeated() -> Self;

    fn invalid_utf8(argument: Arg<'arg>) -> Self;

    fn parse_error(argument: &str, message: impl Display) -> Self;

    fn custom(message: impl Display) -> Self;
}

/**
A type parsed from exactly one UTF-8 argument.

Every [`Value`] is a [`Parameter`] that always takes an argument and can only
be given once.
*/
pub trait Value<'arg>: Sized {
    fn parse_value<E: Error<'arg>>(argument: &'arg str) -> Result<Self, E>;
}

impl<'arg, T: Value<'arg>> Parameter<'arg> for T {
    #[inline]
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E> {
        T::parse_value(arg_as_str(argument)?)
    }

    #[inline]
    fn from_flag<E: Error<'arg>>(argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        required(argument).and_then(Self::from_argument)
    }

    #[inline]
    fn merge_argument<E: Error<'arg>>(self, _argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::repeated())
    }

    #[inline]
    fn merge_flag<E: Error<'arg>>(self, _argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Err(E::repeated())
    }
}

/// Marker for [`FromStr`] types, making them a [`Value`]
pub trait ParsedValue: FromStr {}

impl<'arg, T> Value<'arg> for T
where
    T: ParsedValue,
    T::Err: Display,
{
    #[inline]
    fn parse_value<E: Error<'arg>>(argument: &'arg str) -> Result<Self, E> {
        argument
            .parse()
            .map_err(|err| E::parse_error(argument, err))
    }
}

/// How a flag's type shows up in usage messages
pub trait ParameterUsage {
    /// Printed after the flag's tags, as in `--level <int>`. `None` for
    /// switches.
    const PLACEHOLDER: Option<&'static str>;

    /// Defaults equal to the type's zero value aren't printed
    fn is_zero(&self) -> bool;
}

#[inline]
pub(crate) fn arg_as_str<'arg, E: Error<'arg>>(argument: Arg<'arg>) -> Result<&'arg str, E> {
    argument.as_str().ok_or_else(|| E::invalid_utf8(argument))
}

/// Take the argument an option needs
#[inline]
pub(crate) fn required<'arg, E: Error<'arg>>(argument: impl ArgAccess<'arg>) -> Result<Arg<'arg>, E> {
    argument.take().ok_or_else(E::missing_argument)
}
