use crate::Command;

impl Command {
    /**
    Check that no command and one of its descendants both accept positional
    arguments. Otherwise it would be ambiguous which of them gets the leftover
    arguments.

    # Panics

    Panics, naming both commands, if the tree is malformed.
    */
    pub(crate) fn validate(&self) {
        self.validate_positional(None);
    }

    fn validate_positional(&self, claimed_by: Option<&str>) {
        let claimed_by = match (&self.positional, claimed_by) {
            (Some(_), Some(parent)) => panic!(
                "illegal: parent {parent:?} and sub command {:?} both define positional arguments",
                self.name
            ),
            (Some(_), None) => Some(self.name.as_str()),
            (None, claimed_by) => claimed_by,
        };

        self.subcommands
            .values()
            .for_each(|child| child.validate_positional(claimed_by));
    }
}
