use cmdtree_parser::Arg;

use crate::{
    Command,
    errors::{Error, FlagError},
    positional,
};

impl Command {
    /**
    Parse the front of `args` as an invocation of this command. `args[0]` is
    the token that selected this command (the program name, for the root),
    and is skipped.

    Flags come first, up to the first operand. If that operand names one of
    this command's subcommands, the rest of the arguments are handed to it.
    Whatever's left after that is bound to this command's positional
    arguments. Returns any arguments that weren't consumed, which is always
    nothing on success.

    # Panics

    Panics if `args` is empty.
    */
    pub(crate) fn parse_node<'arg>(&mut self, args: &[Arg<'arg>]) -> Result<Vec<Arg<'arg>>, Error> {
        let Some((_, args)) = args.split_first() else {
            panic!("must be at least the command in arguments");
        };

        self.parsed = true;
        tracing::debug!(command = %self.name, args = args.len(), "parsing command");

        let rest = match self.flags.parse(args) {
            Ok(rest) => rest,
            Err(error) => {
                self.report_flag_error(&error);
                return Err(Error::flags(&self.name, error));
            }
        };

        let child = rest
            .first()
            .and_then(|token| token.as_str())
            .and_then(|name| self.subcommands.get_mut(name));

        let leftover = match child {
            None => rest,
            Some(child) => {
                tracing::debug!(parent = %self.name, child = %child.name, "selected sub command");

                match child.parse_node(&rest) {
                    Ok(leftover) => leftover,
                    Err(error) => return Err(Error::subcommand(&self.name, error)),
                }
            }
        };

        tracing::debug!(command = %self.name, args = leftover.len(), "binding positional args");

        positional::bind(self.positional.as_ref(), &leftover)
            .map_err(|error| Error::positional(&self.name, error))?;

        Ok(Vec::new())
    }

    /// Write a flag error (or just the usage, for a help request) to this
    /// command's output. Nothing is reported if the output itself fails.
    fn report_flag_error(&self, error: &FlagError) {
        let result = self.output.with(|out| {
            if *error != FlagError::HelpRequested {
                writeln!(out, "{error}")?;
            }

            self.write_usage(out)
        });

        if let Err(err) = result {
            tracing::debug!(command = %self.name, error = %err, "failed to write usage");
        }
    }
}
