use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use cmdtree::{Command, Count, Options, Positional, SubcommandOptions};
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

/// True if the command at `path` below `root` was named on the command line
fn selected(root: &Command, path: &[&str]) -> bool {
    path.iter()
        .try_fold(root, |command, name| command.get_subcommand(name))
        .is_some_and(Command::parsed)
}

/// `RUST_LOG` directives, plus a floor of `level` for everything else
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(level.into())
}

fn main() -> anyhow::Result<()> {
    // Installed before parsing, so that `RUST_LOG=cmdtree=trace` shows the
    // parse itself. `--verbose` raises the level once it's known.
    let (filter, filter_handle) = reload::Layer::new(env_filter(Level::WARN));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut root = Command::root(
        Options::new()
            .synopsis("a toy version control tool")
            .details(
                "Demonstrates nested subcommands. Flags belong to the command \
                they follow, so global flags like --verbose go before the \
                subcommand name.",
            ),
    );

    let verbose = root.flag(('v', "verbose"), Count::default(), "print more, repeat for even more");
    let directory = root.flag(
        ('C', "directory"),
        PathBuf::from("."),
        "run as if started in this directory",
    );

    let clone = root.subcommand("clone", "clone a repository into a new directory");
    let depth = clone.flag("depth", 0u32, "how much history to fetch, 0 for all of it");
    let bare = clone.flag("bare", false, "don't check out a working tree");
    let clone_args = clone.positional(
        Positional::exactly(2)
            .usage("<repository> <directory>")
            .details("The repository to clone from, and the directory to clone into."),
    );

    let remote = root.subcommand_with(
        "remote",
        "manage tracked repositories",
        SubcommandOptions::new().details("Each remote is a named URL that can be fetched from."),
    );

    let add = remote.subcommand("add", "add a remote");
    let fetch = add.flag(('f', "fetch"), false, "fetch from the remote right away");
    let add_args = add.positional(Positional::exactly(2).usage("<name> <url>"));

    remote.subcommand("list", "list remotes");

    let log = root.subcommand("log", "show commit logs");
    let since = log.flag("since", Duration::ZERO, "only show commits more recent than this");
    let authors = log.flag(
        ('a', "author"),
        Vec::<String>::new(),
        "only show commits by this author, may be repeated",
    );
    let paths = log.positional(Positional::any().usage("[paths...]"));

    root.parse_env()?;

    let level = match verbose.get().get() {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    filter_handle
        .reload(env_filter(level))
        .context("failed to set the log level")?;

    let directory = directory.get();
    debug!(directory = %directory.display(), "working directory");

    if selected(&root, &["clone"]) {
        let args = clone_args.get();
        let [repository, target] = args.as_slice() else {
            anyhow::bail!("clone takes exactly two arguments");
        };

        info!(%repository, %target, depth = depth.get(), bare = bare.get(), "cloning");
        println!("cloning {repository} into {}", directory.join(target).display());
    } else if selected(&root, &["remote", "add"]) {
        let args = add_args.get();
        let [name, url] = args.as_slice() else {
            anyhow::bail!("remote add takes exactly two arguments");
        };

        info!(%name, %url, fetch = fetch.get(), "adding remote");
        println!("added remote {name} ({url})");
    } else if selected(&root, &["remote", "list"]) {
        println!("no remotes configured");
    } else if selected(&root, &["log"]) {
        let since = since.get();
        let authors = authors.get();

        info!(?since, ?authors, paths = ?paths.get(), "showing log");
        println!("no commits");
    } else if selected(&root, &["remote"]) {
        root.get_subcommand("remote")
            .context("remote command is always defined")?
            .print_usage()
            .context("failed to print usage")?;
    } else {
        root.print_usage().context("failed to print usage")?;
    }

    Ok(())
}
