use std::ffi::{OsStr, OsString};

use cmdtree_parser::Arg;

/// An owned argument vector, the first element of which is the name the
/// command was invoked with. [`Command::parse`][crate::Command::parse]
/// collects one of these and borrows [`Arg`]s from it for the rest of the
/// parse.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    arguments: Vec<OsString>,
}

impl Arguments {
    pub fn new<I>(arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Capture the process's real arguments
    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }

    /// The name the command was invoked with, if there is one
    pub fn argv0(&self) -> Option<&OsStr> {
        self.arguments.first().map(OsString::as_os_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Every argument, including the invocation name, as raw [`Arg`]s
    pub fn args(&self) -> Vec<Arg<'_>> {
        self.arguments
            .iter()
            .map(|arg| Arg::new(arg.as_encoded_bytes()))
            .collect()
    }
}

/// The name the process was invoked with, used as the default name of a root
/// command
pub(crate) fn invocation_name() -> String {
    std::env::args_os()
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::Arguments;

    #[test]
    fn args_borrow_from_the_vector() {
        let arguments = Arguments::new(["app", "sub", "-v"]);

        assert_eq!(arguments.len(), 3);
        assert_eq!(arguments.argv0().unwrap(), "app");

        let args = arguments.args();
        assert_eq!(args[1], "sub");
        assert_eq!(args[2], "-v");
    }
}
