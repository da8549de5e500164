/*!
Nested subcommands with their own flags and positional arguments, parsed from a
single argument vector in one pass.

Build a tree of [`Command`]s, declare flags and positional arguments on the
commands that need them, then call [`Command::parse`] (or
[`Command::parse_env`]). Declarations hand back [`Binding`]s, which hold the
parsed values once parsing succeeds:

```no_run
use cmdtree::{Command, Options, Positional};

let mut root = Command::root(Options::new().name("vcs").synopsis("a toy version control tool"));
let verbose = root.flag(('v', "verbose"), false, "print more");

let clone = root.subcommand("clone", "clone a repository");
let depth = clone.flag("depth", 0u32, "history depth to fetch");
let paths = clone.positional(Positional::exactly(2).usage("<source> <destination>"));

root.parse_env().unwrap();

if root.get_subcommand("clone").is_some_and(|clone| clone.parsed()) {
    println!("{} {:?} {}", verbose.get(), paths.get(), depth.get());
}
```

Each command parses its own flags before looking for a subcommand, so a flag
belongs to the command it's written after: `vcs -v clone a b` works, while
`vcs clone -v a b` fails, because `-v` is not a flag of `vcs clone`.

At most one command along any path from the root may accept positional
arguments; [`Command::parse`] panics if that's violated, since it's a defect
in how the tree was built rather than in the arguments.
*/

pub mod arguments;
mod binding;
mod command;
pub mod errors;
pub mod flags;
mod impls;
mod options;
mod output;
mod parse;
pub mod parameter;
mod positional;
mod printers;
mod validate;

use core::fmt;

pub use binding::Binding;
pub use cmdtree_parser::Arg;
pub use command::Command;
pub use errors::{Error, ErrorKind};
pub use impls::Count;
pub use options::{ErrorHandling, Options, SubcommandOptions};
pub use output::{Captured, Output};
pub use positional::Positional;

/// The names a flag answers to: `--long`, `-s`, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tags<'a> {
    Long { long: &'a str },

    Short { short: char },

    LongShort { long: &'a str, short: char },
}

impl<'a> Tags<'a> {
    /// The `--long` name, without the dashes
    #[inline]
    #[must_use]
    pub const fn long(self) -> Option<&'a str> {
        match self {
            Self::Long { long } | Self::LongShort { long, .. } => Some(long),
            Self::Short { .. } => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn short(self) -> Option<char> {
        match self {
            Self::Short { short } | Self::LongShort { short, .. } => Some(short),
            Self::Long { .. } => None,
        }
    }
}

impl<'a> From<&'a str> for Tags<'a> {
    fn from(long: &'a str) -> Self {
        Tags::Long { long }
    }
}

impl From<char> for Tags<'_> {
    fn from(short: char) -> Self {
        Tags::Short { short }
    }
}

impl<'a> From<(char, &'a str)> for Tags<'a> {
    fn from((short, long): (char, &'a str)) -> Self {
        Tags::LongShort { long, short }
    }
}

/// Prints the tag a user would most likely have typed: the long one, if
/// there is one.
impl fmt::Display for Tags<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tags::Long { long } | Tags::LongShort { long, .. } => write!(f, "--{long}"),
            Tags::Short { short } => write!(f, "-{short}"),
        }
    }
}
