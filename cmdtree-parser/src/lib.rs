#![no_std]

/*!
Tokenizer for the flags at the front of one command's arguments.

Each call to [`ArgumentsParser::next_token`] recognizes one option, in any of
the usual forms (`--long`, `--long=value`, `--long value`, `-s`, `-svalue`,
`-s value`, and clusters like `-abc`), and hands it to a [`Visitor`]. The
first operand ends flag parsing, and it's returned along with everything
after it, untouched: in `app --flag sub --other`, the parser for `app` sees
`--flag` and stops at `sub`. Whether `--other` is a flag is up to whoever
parses `sub`.

Nothing here knows about value types or subcommands.
*/

#[cfg(test)]
extern crate std;

mod arg;
mod cluster;

pub use arg::Arg;

use cluster::Cluster;

/// Receives the options found by an [`ArgumentsParser`], one per call.
pub trait Visitor<'arg> {
    type Value;

    /// `--option=argument`
    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value;

    /// `--option`, which may or may not take the next argument
    fn visit_long(self, option: Arg<'arg>, argument: impl ArgAccess<'arg>) -> Self::Value;

    /// `-o`, which may or may not take the rest of its cluster or the next
    /// argument. Bytes that aren't UTF-8 arrive as
    /// [`char::REPLACEMENT_CHARACTER`].
    fn visit_short(self, option: char, argument: impl ArgAccess<'arg>) -> Self::Value;
}

/**
Lets a [`Visitor`] claim an argument for the option it was given.

Only the visitor knows whether `--name value` is an option and its argument,
or a switch followed by an operand, and whether `-xvalue` is one option or a
cluster. An [`ArgAccess`] defers that decision: options call
[`take`][ArgAccess::take], and switches drop it unused.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Claim the option's argument: the rest of the short option cluster if
    there is any, or else the next command-line argument.

    Returns [`None`] if there are no more arguments, or if the next one is
    `--`, which is never an option's argument.
    */
    fn take(self) -> Option<Arg<'arg>>;
}

/// What [`ArgumentsParser::next_token`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'arg, T> {
    /// The visitor's result for an option
    Flag(T),

    /// The first operand. Flag parsing is over; the operand and
    /// [the arguments after it][ArgumentsParser::into_remaining] belong to
    /// someone else.
    Operand(Arg<'arg>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'arg> {
    Ready,

    /// A `--` was consumed; everything after it is an operand
    Terminated,

    /// Partway through a `-abc` cluster
    ShortInProgress(Cluster<'arg>),
}

/**
Parses the options at the front of a list of arguments, stopping at the
first operand.

Arguments are borrowed for `'arg` throughout: they're expected to be
collected once, early on, and outlive the parse.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State<'arg>,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /// Create a parser over some raw arguments. These shouldn't include the
    /// name of the command.
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter(),
        }
    }

    /// An option's argument will be the next argument in the list
    #[inline]
    fn next_arg_access(&mut self) -> NextArgAccess<'_, 'arg, I> {
        debug_assert_ne!(self.state, State::Terminated);

        self.state = State::Ready;
        NextArgAccess { parser: self }
    }

    /// An option's argument will be the rest of its cluster. If the visitor
    /// doesn't take it, the cluster continues on the next call.
    #[inline]
    fn cluster_access(&mut self, cluster: Cluster<'arg>) -> ClusterArgAccess<'_, 'arg> {
        debug_assert_ne!(self.state, State::Terminated);

        self.state = State::ShortInProgress(cluster);
        ClusterArgAccess {
            cluster,
            state: &mut self.state,
        }
    }

    #[inline]
    fn visit_cluster<V>(&mut self, cluster: Cluster<'arg>, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        match cluster.split() {
            (option, None) => visitor.visit_short(option, self.next_arg_access()),
            (option, Some(rest)) => visitor.visit_short(option, self.cluster_access(rest)),
        }
    }

    /// The first operand after a `--`, if any
    #[inline]
    fn terminated(&mut self) -> Option<Arg<'arg>> {
        self.state = State::Terminated;
        self.args.next().map(Arg::new)
    }

    /**
    Find the next option and pass it to `visitor`.

    Returns [`None`] once the arguments run out, and [`Token::Operand`] when
    flag parsing is over. A lone `-` is an operand. A `--` is consumed, and
    the argument after it is an operand no matter what it looks like.
     */
    pub fn next_token<V>(&mut self, visitor: V) -> Option<Token<'arg, V::Value>>
    where
        V: Visitor<'arg>,
    {
        let value = match self.state {
            State::Terminated => return self.terminated().map(Token::Operand),
            State::ShortInProgress(cluster) => self.visit_cluster(cluster, visitor),
            State::Ready => match self.args.next()? {
                b"--" => return self.terminated().map(Token::Operand),
                [b'-', b'-', long @ ..] => match split_argument(long) {
                    Some((option, argument)) => {
                        visitor.visit_long_option(Arg::new(option), Arg::new(argument))
                    }
                    None => visitor.visit_long(Arg::new(long), self.next_arg_access()),
                },
                [b'-', short @ ..] => match Cluster::new(short) {
                    Some(cluster) => self.visit_cluster(cluster, visitor),
                    None => return Some(Token::Operand(Arg::new(b"-"))),
                },
                operand => return Some(Token::Operand(Arg::new(operand))),
            },
        };

        Some(Token::Flag(value))
    }

    /**
    The arguments the parser hasn't looked at yet. After
    [`next_token`][Self::next_token] returns a [`Token::Operand`], these are
    the arguments after that operand.
     */
    #[inline]
    pub fn into_remaining(self) -> impl Iterator<Item = Arg<'arg>> {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.args.map(Arg::new)
    }
}

/// Takes the next argument in the list, unless it's `--`
struct NextArgAccess<'a, 'arg, I> {
    parser: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for NextArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    fn take(self) -> Option<Arg<'arg>> {
        match self.parser.args.next()? {
            b"--" => {
                self.parser.state = State::Terminated;
                None
            }
            argument => Some(Arg::new(argument)),
        }
    }
}

/// Takes the rest of a short option cluster, as in `-ovalue`
struct ClusterArgAccess<'a, 'arg> {
    cluster: Cluster<'arg>,
    state: &'a mut State<'arg>,
}

impl<'arg> ArgAccess<'arg> for ClusterArgAccess<'_, 'arg> {
    fn take(self) -> Option<Arg<'arg>> {
        debug_assert_eq!(*self.state, State::ShortInProgress(self.cluster));

        *self.state = State::Ready;
        Some(Arg::new(self.cluster.bytes()))
    }
}

/// Split `option=argument`
fn split_argument(long: &[u8]) -> Option<(&[u8], &[u8])> {
    let equals = memchr::memchr(b'=', long)?;
    let (option, argument) = long.split_at(equals);

    Some((option, &argument[1..]))
}

#[cfg(test)]
mod tests {
    use std::{format, string::String, vec::Vec};

    use super::*;

    /// Records every option as a string. Options named `o` or `output` take
    /// an argument; everything else is a switch.
    struct Recorder;

    impl<'arg> Visitor<'arg> for Recorder {
        type Value = String;

        fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> String {
            format!("--{option}={argument}")
        }

        fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> String {
            match option == "output" {
                true => match arg.take() {
                    Some(arg) => format!("--{option} {arg}"),
                    None => format!("--{option} <missing>"),
                },
                false => format!("--{option}"),
            }
        }

        fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> String {
            match option == 'o' {
                true => match arg.take() {
                    Some(arg) => format!("-{option} {arg}"),
                    None => format!("-{option} <missing>"),
                },
                false => format!("-{option}"),
            }
        }
    }

    /// Parse flags until the first operand, returning the visited flags and
    /// the operands
    fn run(args: &[&str]) -> (Vec<String>, Vec<String>) {
        let mut parser = ArgumentsParser::new(args.iter().map(|arg| arg.as_bytes()));
        let mut flags = Vec::new();

        loop {
            match parser.next_token(Recorder) {
                None => return (flags, Vec::new()),
                Some(Token::Flag(flag)) => flags.push(flag),
                Some(Token::Operand(operand)) => {
                    let operands = core::iter::once(operand)
                        .chain(parser.into_remaining())
                        .map(|arg| format!("{arg}"))
                        .collect();

                    return (flags, operands);
                }
            }
        }
    }

    #[test]
    fn stops_at_first_operand() {
        let (flags, operands) = run(&["--verbose", "sub", "--other", "x"]);

        assert_eq!(flags, ["--verbose"]);
        assert_eq!(operands, ["sub", "--other", "x"]);
    }

    #[test]
    fn long_option_with_equals() {
        let (flags, operands) = run(&["--level=3", "--output", "file", "rest"]);

        assert_eq!(flags, ["--level=3", "--output file"]);
        assert_eq!(operands, ["rest"]);
    }

    #[test]
    fn short_clusters() {
        let (flags, operands) = run(&["-abofile", "-o", "x", "-c"]);

        assert_eq!(flags, ["-a", "-b", "-o file", "-o x", "-c"]);
        assert!(operands.is_empty());
    }

    #[test]
    fn non_ascii_short_options() {
        let (flags, operands) = run(&["-éa", "-oπ", "-ñ", "x"]);

        assert_eq!(flags, ["-é", "-a", "-o π", "-ñ"]);
        assert_eq!(operands, ["x"]);
    }

    #[test]
    fn terminator_is_consumed() {
        let (flags, operands) = run(&["-a", "--", "--not-a-flag", "-b"]);

        assert_eq!(flags, ["-a"]);
        assert_eq!(operands, ["--not-a-flag", "-b"]);
    }

    #[test]
    fn terminator_at_end_leaves_nothing() {
        let (flags, operands) = run(&["-a", "--"]);

        assert_eq!(flags, ["-a"]);
        assert!(operands.is_empty());
    }

    #[test]
    fn lone_dash_is_an_operand() {
        let (flags, operands) = run(&["-a", "-", "b"]);

        assert_eq!(flags, ["-a"]);
        assert_eq!(operands, ["-", "b"]);
    }

    #[test]
    fn option_argument_cannot_be_terminator() {
        let (flags, operands) = run(&["--output", "--", "-a"]);

        assert_eq!(flags, ["--output <missing>"]);
        assert_eq!(operands, ["-a"]);
    }
}
