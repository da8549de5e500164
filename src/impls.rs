/*!
Flag value types: numbers, strings, paths, switches, counters, durations,
and optional or repeated versions of all of those
 */

use std::{path::PathBuf, time::Duration};

use cmdtree_parser::{Arg, ArgAccess};

use crate::parameter::{Error, Parameter, ParameterUsage, ParsedValue, Value, required};

macro_rules! from_str {
    ($($placeholder:literal => [$($type:ty),*],)*) => {
        $($(
            impl ParsedValue for $type {}

            impl ParameterUsage for $type {
                const PLACEHOLDER: Option<&'static str> = Some($placeholder);

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == <$type>::default()
                }
            }
        )*)*
    };
}

from_str! {
    "uint" => [u8, u16, u32, u64, u128, usize],
    "int" => [i8, i16, i32, i64, i128, isize],
    "float" => [f32, f64],
    "char" => [char],
    "string" => [String],
    "path" => [PathBuf],
}

/// `--flag` sets it; it can't be given twice, and never takes an argument
impl<'arg> Parameter<'arg> for bool {
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::unexpected_argument(argument))
    }

    fn from_flag<E: Error<'arg>>(_argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Ok(true)
    }

    fn merge_argument<E: Error<'arg>>(self, argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::unexpected_argument(argument))
    }

    fn merge_flag<E: Error<'arg>>(self, _argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Err(E::repeated())
    }
}

impl ParameterUsage for bool {
    const PLACEHOLDER: Option<&'static str> = None;

    fn is_zero(&self) -> bool {
        !*self
    }
}

/// A switch that counts how many times it appeared, as in `-vvv`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(pub u32);

impl Count {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl<'arg> Parameter<'arg> for Count {
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::unexpected_argument(argument))
    }

    fn from_flag<E: Error<'arg>>(_argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Ok(Self(1))
    }

    fn merge_argument<E: Error<'arg>>(self, argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::unexpected_argument(argument))
    }

    fn merge_flag<E: Error<'arg>>(self, _argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        match self.0.checked_add(1) {
            Some(count) => Ok(Self(count)),
            None => Err(E::custom("appeared too many times to count")),
        }
    }
}

impl ParameterUsage for Count {
    const PLACEHOLDER: Option<&'static str> = None;

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// An option whose default is "not given"
impl<'arg, T: Value<'arg>> Parameter<'arg> for Option<T> {
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E> {
        T::from_argument(argument).map(Some)
    }

    fn from_flag<E: Error<'arg>>(argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        required(argument).and_then(Self::from_argument)
    }

    fn merge_argument<E: Error<'arg>>(self, _argument: Arg<'arg>) -> Result<Self, E> {
        Err(E::repeated())
    }

    fn merge_flag<E: Error<'arg>>(self, _argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Err(E::repeated())
    }
}

impl<T: ParameterUsage> ParameterUsage for Option<T> {
    const PLACEHOLDER: Option<&'static str> = T::PLACEHOLDER;

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// An option that can be repeated, collecting every argument in order
impl<'arg, T: Value<'arg>> Parameter<'arg> for Vec<T> {
    fn from_argument<E: Error<'arg>>(argument: Arg<'arg>) -> Result<Self, E> {
        Self::new().merge_argument(argument)
    }

    fn from_flag<E: Error<'arg>>(argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        Self::new().merge_flag(argument)
    }

    fn merge_argument<E: Error<'arg>>(mut self, argument: Arg<'arg>) -> Result<Self, E> {
        self.push(T::from_argument(argument)?);
        Ok(self)
    }

    fn merge_flag<E: Error<'arg>>(self, argument: impl ArgAccess<'arg>) -> Result<Self, E> {
        required(argument).and_then(|argument| self.merge_argument(argument))
    }
}

impl<T: ParameterUsage> ParameterUsage for Vec<T> {
    const PLACEHOLDER: Option<&'static str> = T::PLACEHOLDER;

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// Durations are written as a sequence of decimal numbers, each with a unit
/// suffix, such as `300ms`, `1.5h` or `2h45m`. Valid units are `ns`, `us`
/// (or `µs`), `ms`, `s`, `m` and `h`.
impl<'arg> Value<'arg> for Duration {
    fn parse_value<E: Error<'arg>>(arg: &'arg str) -> Result<Self, E> {
        parse_duration(arg).map_err(|message| E::parse_error(arg, message))
    }
}

impl ParameterUsage for Duration {
    const PLACEHOLDER: Option<&'static str> = Some("duration");

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }
}

fn parse_duration(input: &str) -> Result<Duration, &'static str> {
    const UNITS: &[(&str, f64)] = &[
        ("ns", 1.0),
        ("us", 1e3),
        ("µs", 1e3),
        ("ms", 1e6),
        ("s", 1e9),
        ("m", 60e9),
        ("h", 3600e9),
    ];

    if input == "0" {
        return Ok(Duration::ZERO);
    }

    if input.is_empty() {
        return Err("empty duration");
    }

    let mut rest = input;
    let mut nanos: f64 = 0.0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or("missing unit in duration")?;

        let (number, tail) = rest.split_at(number_len);
        let number: f64 = number.parse().map_err(|_| "invalid number in duration")?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let &(_, scale) = UNITS
            .iter()
            .find(|&&(name, _)| name == unit)
            .ok_or("unknown unit in duration")?;

        nanos += number * scale;
        rest = tail;
    }

    match nanos.round() {
        nanos if nanos < u64::MAX as f64 => Ok(Duration::from_nanos(nanos as u64)),
        _ => Err("duration out of range"),
    }
}
