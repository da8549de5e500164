use std::{borrow::Cow, collections::BTreeMap, ffi::OsString, io, process};

use crate::{
    Tags,
    arguments::{self, Arguments},
    binding::Binding,
    errors::{Error, ErrorKind},
    flags::{FlagSet, FlagValue},
    options::{ErrorHandling, Options, SubcommandOptions},
    output::Output,
    positional::{Positional, PositionalSlot},
};

/**
A command in a tree of subcommands.

A [`Command`] owns its flags, its subcommands, and (optionally) a
description of the positional arguments it accepts. Build the tree from the
root with [`subcommand`][Command::subcommand], [`flag`][Command::flag] and
[`positional`][Command::positional], then parse arguments with
[`parse`][Command::parse].
*/
#[derive(Debug)]
pub struct Command {
    /// Fully qualified: the root's name, followed by each subcommand's name,
    /// separated by spaces
    pub(crate) name: String,
    pub(crate) synopsis: Cow<'static, str>,
    pub(crate) details: Option<Cow<'static, str>>,
    pub(crate) error_handling: ErrorHandling,
    pub(crate) output: Output,
    pub(crate) flags: FlagSet,
    pub(crate) positional: Option<PositionalSlot>,
    pub(crate) subcommands: BTreeMap<String, Command>,
    pub(crate) parsed: bool,
}

impl Command {
    /// Create the root of a command tree.
    #[must_use]
    pub fn root(options: Options) -> Self {
        let Options {
            name,
            synopsis,
            details,
            error_handling,
            output,
        } = options;

        Self {
            name: name.unwrap_or_else(arguments::invocation_name),
            synopsis: synopsis.unwrap_or_default(),
            details,
            error_handling,
            output,
            flags: FlagSet::default(),
            positional: None,
            subcommands: BTreeMap::new(),
            parsed: false,
        }
    }

    /**
    Add a subcommand to this command, and return it so that flags, positional
    arguments, and further subcommands can be added to it. The subcommand
    inherits this command's error handling and output.

    # Panics

    Panics if this command already has a subcommand called `name`.
    */
    pub fn subcommand(&mut self, name: &str, synopsis: impl Into<Cow<'static, str>>) -> &mut Self {
        self.subcommand_with(name, synopsis, SubcommandOptions::default())
    }

    /**
    Add a subcommand to this command, with extra options.

    # Panics

    Panics if this command already has a subcommand called `name`.
    */
    pub fn subcommand_with(
        &mut self,
        name: &str,
        synopsis: impl Into<Cow<'static, str>>,
        options: SubcommandOptions,
    ) -> &mut Self {
        if self.subcommands.contains_key(name) {
            panic!("sub command {name:?} already exists in {:?}", self.name);
        }

        let child = Self {
            name: format!("{} {name}", self.name),
            synopsis: synopsis.into(),
            details: options.details,
            error_handling: self.error_handling,
            output: self.output.clone(),
            flags: FlagSet::default(),
            positional: None,
            subcommands: BTreeMap::new(),
            parsed: false,
        };

        self.subcommands.entry(name.to_owned()).or_insert(child)
    }

    /**
    Declare that this command accepts positional arguments, and get the
    binding they're collected into. Any command that doesn't call this
    rejects positional arguments.

    # Panics

    Panics if called more than once on the same command. Also, at most one
    command on any path through the tree may accept positional arguments;
    [`parse`][Command::parse] panics if that isn't the case.
    */
    pub fn positional(&mut self, spec: Positional) -> Binding<Vec<String>> {
        if self.positional.is_some() {
            panic!("positional() called more than once on {:?}", self.name);
        }

        let slot = PositionalSlot::new(spec);
        let binding = slot.binding.clone();
        self.positional = Some(slot);
        binding
    }

    /**
    Declare a flag on this command. The flag is only recognized when it's
    written after this command and before any of its subcommands.

    `tags` is a long name (`"verbose"`), a short character (`'v'`), or both
    (`('v', "verbose")`).

    # Panics

    Panics if one of the tags is already used by another flag of this command.
    */
    pub fn flag<T: FlagValue>(
        &mut self,
        tags: impl Into<Tags<'static>>,
        default: T,
        usage: impl Into<String>,
    ) -> Binding<T> {
        self.flags.add(tags.into(), default, usage)
    }

    /// The fully qualified name of this command
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn synopsis(&self) -> &str {
        &self.synopsis
    }

    #[inline]
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// The names of this command's subcommands, in alphabetical order
    pub fn subcommand_names(&self) -> impl Iterator<Item = &str> {
        self.subcommands.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn get_subcommand(&self, name: &str) -> Option<&Self> {
        self.subcommands.get(name)
    }

    #[inline]
    #[must_use]
    pub fn get_subcommand_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.subcommands.get_mut(name)
    }

    /// The positional arguments spec, if this command accepts any
    #[inline]
    #[must_use]
    pub fn positional_spec(&self) -> Option<&Positional> {
        self.positional.as_ref().map(|slot| &slot.spec)
    }

    /// The positional arguments collected by the last successful parse, if
    /// this command accepts any
    #[must_use]
    pub fn args(&self) -> Option<Vec<String>> {
        self.positional.as_ref().map(|slot| slot.binding.get())
    }

    /// True if this command was reached by the last parse; that is, it's the
    /// root, or it and all its ancestors were named on the command line.
    #[inline]
    #[must_use]
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /**
    Parse an argument vector against this command tree. The first argument
    is the name the program was invoked with, and is otherwise ignored.

    On success, every [`Binding`] of every command that was reached holds its
    parsed value. On failure, what happens depends on the tree's
    [`ErrorHandling`].

    # Panics

    Panics if the tree is malformed (more than one command on one path
    accepts positional arguments) or `args` is empty.
    */
    pub fn parse<I>(&mut self, args: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        self.parse_arguments(&Arguments::new(args))
    }

    /// Parse the process's real arguments. See [`parse`][Command::parse].
    pub fn parse_env(&mut self) -> Result<(), Error> {
        self.parse_arguments(&Arguments::from_env())
    }

    fn parse_arguments(&mut self, arguments: &Arguments) -> Result<(), Error> {
        self.validate();
        self.reset();

        let result = self.parse_node(&arguments.args()).map(drop);
        self.handle_error(result)
    }

    /// Write this command's usage message to its output
    pub fn print_usage(&self) -> io::Result<()> {
        self.output.with(|out| self.write_usage(out))
    }

    /// Forget the results of any previous parse, throughout the tree
    fn reset(&mut self) {
        self.parsed = false;
        self.flags.reset();

        if let Some(slot) = &self.positional {
            slot.binding.set(Vec::new());
        }

        self.subcommands.values_mut().for_each(Self::reset);
    }

    fn handle_error(&self, result: Result<(), Error>) -> Result<(), Error> {
        let error = match result {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };

        match self.error_handling {
            ErrorHandling::Propagate => Err(error),
            ErrorHandling::Panic => panic!("{error}"),
            ErrorHandling::Exit => match error.kind() {
                ErrorKind::HelpRequested => process::exit(0),
                // The flag error and usage were already printed
                ErrorKind::BadFlags => process::exit(2),
                ErrorKind::BadPositional => {
                    if let Err(err) = self.output.with(|out| writeln!(out, "{error}")) {
                        tracing::debug!(command = %self.name, error = %err, "failed to write error");
                    }

                    process::exit(2)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Command {
        Command::root(Options::new().name("app").error_handling(ErrorHandling::Propagate))
    }

    #[test]
    fn names_are_fully_qualified() {
        let mut root = root();
        let remote = root.subcommand("remote", "manage remotes");
        let add = remote.subcommand("add", "add a remote");

        assert_eq!(add.name(), "app remote add");
        assert_eq!(add.synopsis(), "add a remote");
        assert_eq!(add.error_handling, ErrorHandling::Propagate);
    }

    #[test]
    fn subcommand_names_are_sorted() {
        let mut root = root();

        for name in ["zebra", "apple", "mango", "banana"] {
            root.subcommand(name, "");
        }

        assert_eq!(
            root.subcommand_names().collect::<Vec<_>>(),
            ["apple", "banana", "mango", "zebra"]
        );
    }

    #[test]
    #[should_panic(expected = "sub command \"dup\" already exists")]
    fn duplicate_subcommand_panics() {
        let mut root = root();
        root.subcommand("dup", "");
        root.subcommand("other", "");
        root.subcommand("dup", "");
    }

    #[test]
    #[should_panic(expected = "positional() called more than once")]
    fn duplicate_positional_panics() {
        let mut root = root();
        root.positional(Positional::any());
        root.positional(Positional::exactly(1));
    }

    #[test]
    fn details_are_per_command() {
        let mut root = Command::root(Options::new().name("app").details("root details"));
        let sub = root.subcommand_with("sub", "", SubcommandOptions::new().details("sub details"));
        assert_eq!(sub.details(), Some("sub details"));

        let bare = root.subcommand("bare", "");
        assert_eq!(bare.details(), None);

        assert_eq!(root.details(), Some("root details"));
    }

    #[test]
    fn reset_clears_previous_results() {
        let mut root = root();
        let verbose = root.flag('v', false, "");
        let sub = root.subcommand("sub", "");
        let args = sub.positional(Positional::any());

        root.parse(["app", "-v", "sub", "x"]).unwrap();
        assert!(verbose.get());
        assert_eq!(args.get(), ["x"]);
        assert!(root.get_subcommand("sub").unwrap().parsed());

        root.parse(["app"]).unwrap();
        assert!(!verbose.get());
        assert!(args.get().is_empty());
        assert!(!root.get_subcommand("sub").unwrap().parsed());
    }

    #[test]
    #[should_panic(expected = "app: bad positional args")]
    fn panic_policy() {
        let mut root = Command::root(Options::new().name("app").error_handling(ErrorHandling::Panic));
        let _ = root.parse(["app", "stray"]);
    }
}
