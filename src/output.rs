use std::{
    cell::RefCell,
    fmt,
    io::{self, Write},
    rc::Rc,
};

/**
Where a command writes usage messages and flag errors.

A command tree shares one [`Output`]: subcommands inherit their parent's when
they're created, so every message from a tree lands in the same place.
*/
#[derive(Clone, Default)]
pub enum Output {
    /// The process's standard error
    #[default]
    Stderr,

    /// The process's standard output
    Stdout,

    /// Any other writer
    Writer(Rc<RefCell<dyn Write>>),
}

impl Output {
    #[inline]
    #[must_use]
    pub fn stderr() -> Self {
        Self::Stderr
    }

    #[inline]
    #[must_use]
    pub fn stdout() -> Self {
        Self::Stdout
    }

    #[must_use]
    pub fn new(writer: impl Write + 'static) -> Self {
        Self::Writer(Rc::new(RefCell::new(writer)))
    }

    /// An in-memory output, along with the handle used to read back what was
    /// written to it.
    #[must_use]
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::new(captured.clone()), captured)
    }

    /// Run `op` against the underlying writer
    pub(crate) fn with<T>(&self, op: impl FnOnce(&mut dyn Write) -> io::Result<T>) -> io::Result<T> {
        match self {
            Self::Stderr => op(&mut io::stderr().lock()),
            Self::Stdout => op(&mut io::stdout().lock()),
            Self::Writer(writer) => op(&mut *writer.borrow_mut()),
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => f.write_str("Stderr"),
            Self::Stdout => f.write_str("Stdout"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// The read side of [`Output::capture`].
#[derive(Debug, Clone, Default)]
pub struct Captured {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl Captured {
    /// Everything written so far, lossily converted to a string
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Forget everything written so far
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
