use core::fmt::{self, Debug, Display, Write};

/**
One command-line argument, or a piece of one (the name in `--name=value`,
or the rest of a `-ovalue` cluster), exactly as the OS provided it.

Arguments aren't guaranteed to be UTF-8, so an [`Arg`] is a byte slice;
[`as_str`][Arg::as_str] checks it.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arg<'arg>(&'arg [u8]);

impl<'arg> Arg<'arg> {
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'arg [u8]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'arg [u8] {
        self.0
    }

    /// Get this argument as a `str`, if it's valid UTF-8
    #[inline]
    pub fn as_str(&self) -> Option<&'arg str> {
        core::str::from_utf8(self.0).ok()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<str> for Arg<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Arg<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Quoted like a string, with any bytes that aren't UTF-8 shown in hex, as in
/// `"ab"..[0xff]`
impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
            f.write_char('[')?;

            bytes.iter().enumerate().try_for_each(|(i, byte)| match i {
                0 => write!(f, "{byte:#x}"),
                _ => write!(f, ",{byte:#x}"),
            })?;

            f.write_char(']')
        }

        if self.0.is_empty() {
            return f.write_str("\"\"");
        }

        let mut separator = "";

        for chunk in self.0.utf8_chunks() {
            f.write_str(separator)?;
            separator = "..";

            let (valid, invalid) = (chunk.valid(), chunk.invalid());

            if !valid.is_empty() {
                write!(f, "{valid:?}")?;
            }

            if !invalid.is_empty() {
                if !valid.is_empty() {
                    f.write_str("..")?;
                }

                hex(f, invalid)?;
            }
        }

        Ok(())
    }
}

/// Display an arg as text, replacing invalid UTF-8 with U+FFFD
impl Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.utf8_chunks().try_for_each(|chunk| {
            f.write_str(chunk.valid())?;

            match chunk.invalid() {
                b"" => Ok(()),
                _ => f.write_char(char::REPLACEMENT_CHARACTER),
            }
        })
    }
}
