use std::time::Duration;

use cmdtree::{
    Command, Count, ErrorHandling, ErrorKind, Options, Output, Positional,
    errors::{Error, FlagError, ParameterError, PositionalError},
};

fn root(name: &str) -> Command {
    Command::root(
        Options::new()
            .name(name)
            .error_handling(ErrorHandling::Propagate)
            .output(Output::capture().0),
    )
}

/// A git-like tree:
///
/// ```text
/// vcs [-v] [-C dir]
///   clone [--depth n] <src> <dst>
///   remote
///     add [-f] <name> <url>
///     list
///   log [--since d] [-a author]... [paths...]
/// ```
struct Vcs {
    root: Command,
    verbose: cmdtree::Binding<Count>,
    depth: cmdtree::Binding<u32>,
    clone: cmdtree::Binding<Vec<String>>,
    fetch: cmdtree::Binding<bool>,
    add: cmdtree::Binding<Vec<String>>,
    since: cmdtree::Binding<Duration>,
    authors: cmdtree::Binding<Vec<String>>,
    paths: cmdtree::Binding<Vec<String>>,
}

impl Vcs {
    fn new() -> Self {
        let mut root = root("vcs");
        let verbose = root.flag(('v', "verbose"), Count::default(), "");

        let clone = root.subcommand("clone", "clone a repository");
        let depth = clone.flag("depth", 0u32, "");
        let clone_args = clone.positional(Positional::exactly(2));

        let remote = root.subcommand("remote", "manage remotes");
        let add = remote.subcommand("add", "add a remote");
        let fetch = add.flag('f', false, "");
        let add_args = add.positional(Positional::exactly(2));
        remote.subcommand("list", "list remotes");

        let log = root.subcommand("log", "show history");
        let since = log.flag("since", Duration::ZERO, "");
        let authors = log.flag(('a', "author"), Vec::new(), "");
        let paths = log.positional(Positional::any());

        Self {
            root,
            verbose,
            depth,
            clone: clone_args,
            fetch,
            add: add_args,
            since,
            authors,
            paths,
        }
    }

    fn reached(&self, path: &[&str]) -> bool {
        path.iter()
            .try_fold(&self.root, |command, name| command.get_subcommand(name))
            .is_some_and(Command::parsed)
    }
}

#[test]
fn parses_a_deep_path() {
    let mut vcs = Vcs::new();

    vcs.root
        .parse(["vcs", "-vv", "remote", "add", "-f", "origin", "https://example.com"])
        .unwrap();

    assert_eq!(vcs.verbose.get(), Count(2));
    assert!(vcs.fetch.get());
    assert_eq!(vcs.add.get(), ["origin", "https://example.com"]);

    assert!(vcs.reached(&[]));
    assert!(vcs.reached(&["remote"]));
    assert!(vcs.reached(&["remote", "add"]));
    assert!(!vcs.reached(&["remote", "list"]));
    assert!(!vcs.reached(&["clone"]));

    assert_eq!(
        vcs.root
            .get_subcommand("remote")
            .and_then(|remote| remote.get_subcommand("add"))
            .and_then(Command::args),
        Some(vec!["origin".to_owned(), "https://example.com".to_owned()])
    );
}

#[test]
fn leaf_flags_and_positionals() {
    let mut vcs = Vcs::new();

    vcs.root
        .parse(["vcs", "log", "--since=1h", "-a", "ann", "--author", "bob", "src", "docs"])
        .unwrap();

    assert_eq!(vcs.since.get(), Duration::from_secs(3600));
    assert_eq!(vcs.authors.get(), ["ann", "bob"]);
    assert_eq!(vcs.paths.get(), ["src", "docs"]);
    assert_eq!(vcs.verbose.get(), Count(0));
}

#[test]
fn any_arity_accepts_nothing() {
    let mut vcs = Vcs::new();

    vcs.root.parse(["vcs", "log"]).unwrap();

    assert!(vcs.paths.get().is_empty());
    assert!(vcs.reached(&["log"]));
}

#[test]
fn exact_arity() {
    let mut vcs = Vcs::new();

    vcs.root
        .parse(["vcs", "clone", "--depth", "1", "a", "b"])
        .unwrap();
    assert_eq!(vcs.depth.get(), 1);
    assert_eq!(vcs.clone.get(), ["a", "b"]);

    for args in [&["a"][..], &["a", "b", "c"][..]] {
        let error = vcs
            .root
            .parse(["vcs", "clone"].iter().chain(args))
            .unwrap_err();

        assert_eq!(
            error,
            Error::Subcommand {
                command: "vcs".to_owned(),
                error: Box::new(Error::Positional {
                    command: "vcs clone".to_owned(),
                    error: PositionalError::WrongCount {
                        expected: 2,
                        args: args.iter().map(|arg| arg.to_string()).collect(),
                    },
                }),
            }
        );
    }
}

#[test]
fn parent_flags_must_come_first() {
    let mut vcs = Vcs::new();

    vcs.root.parse(["vcs", "-v", "remote", "list"]).unwrap();
    assert_eq!(vcs.verbose.get(), Count(1));

    let error = vcs.root.parse(["vcs", "remote", "list", "-v"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::BadFlags);
    assert_eq!(error.command(), "vcs remote list");
    assert_eq!(
        error.to_string(),
        "vcs > vcs remote > vcs remote list: bad flags: unrecognized option -v"
    );
}

#[test]
fn intermediate_command_without_positionals() {
    let mut vcs = Vcs::new();

    let error = vcs.root.parse(["vcs", "remote", "rename", "a", "b"]).unwrap_err();

    assert_eq!(
        error.to_string(),
        "vcs > vcs remote: bad positional args: positional args not expected, got [rename a b]"
    );
    assert_eq!(error.path().collect::<Vec<_>>(), ["vcs", "vcs remote"]);
}

#[test]
fn flag_value_errors() {
    let mut vcs = Vcs::new();

    let error = vcs.root.parse(["vcs", "clone", "--depth", "-1", "a", "b"]).unwrap_err();
    let Error::Flags { error, .. } = error.root_cause() else {
        panic!("expected a flag error, got {error:?}");
    };
    assert!(matches!(
        error,
        FlagError::Parameter {
            error: ParameterError::ParseError { .. },
            ..
        }
    ));

    let error = vcs.root.parse(["vcs", "log", "--since", "soon"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::BadFlags);

    let error = vcs
        .root
        .parse(["vcs", "clone", "--depth=1", "--depth=2", "a", "b"])
        .unwrap_err();
    assert_eq!(
        error.root_cause(),
        &Error::Flags {
            command: "vcs clone".to_owned(),
            error: FlagError::Parameter {
                tags: "depth".into(),
                error: ParameterError::Repeated,
            },
        }
    );
}

#[test]
fn every_parse_starts_fresh() {
    let mut vcs = Vcs::new();

    vcs.root.parse(["vcs", "-v", "log", "-a", "ann", "x"]).unwrap();
    vcs.root.parse(["vcs", "log"]).unwrap();

    assert_eq!(vcs.verbose.get(), Count(0));
    assert!(vcs.authors.get().is_empty());
    assert!(vcs.paths.get().is_empty());
}

#[test]
fn help_request() {
    let (output, captured) = Output::capture();
    let mut root = Command::root(
        Options::new()
            .name("vcs")
            .synopsis("version control")
            .error_handling(ErrorHandling::Propagate)
            .output(output),
    );
    root.flag('v', false, "verbose");
    let remote = root.subcommand("remote", "manage remotes");
    remote.subcommand("add", "add a remote");

    let error = root.parse(["vcs", "remote", "-h"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::HelpRequested);
    assert_eq!(
        captured.contents(),
        "Usage: vcs remote\n\
         \n\
         manage remotes\n\
         \n\
         Subcommands:\n\
         \n\
         \x20 add   add a remote\n\
         \n"
    );
}

#[test]
fn trees_can_grow_between_parses() {
    let mut root = root("app");
    root.positional(Positional::any());
    root.parse(["app", "x"]).unwrap();

    root.subcommand("sub", "");
    root.parse(["app", "sub"]).unwrap();
    assert!(root.get_subcommand("sub").unwrap().parsed());
}

#[test]
#[should_panic(expected = "parent \"app\" and sub command \"app a b\" both define positional arguments")]
fn validation_runs_on_every_parse() {
    let mut root = root("app");
    root.positional(Positional::any());
    root.parse(["app"]).unwrap();

    root.subcommand("a", "")
        .subcommand("b", "")
        .positional(Positional::exactly(1));
    let _ = root.parse(["app"]);
}

#[test]
#[should_panic(expected = "sub command \"list\" already exists")]
fn duplicate_child_panics() {
    let mut vcs = Vcs::new();
    vcs.root
        .get_subcommand_mut("remote")
        .unwrap()
        .subcommand("list", "again");
}

#[test]
fn writes_to_a_custom_output() {
    let (output, captured) = Output::capture();
    let mut root = Command::root(Options::new().name("app").output(output));
    let sub = root.subcommand("sub", "does a thing");
    sub.flag("x", 0u8, "");

    root.get_subcommand("sub").unwrap().print_usage().unwrap();

    assert_eq!(
        captured.contents(),
        "Usage: app sub [flags]\n\
         \n\
         does a thing\n\
         \n\
         Flags:\n\
         \n\
         \x20     --x <uint>\n\
         \n"
    );
}
