/// What's left of a cluster of short options like `-abc`, after the leading
/// `-` and any options that were already handled. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster<'arg> {
    bytes: &'arg [u8],
}

impl<'arg> Cluster<'arg> {
    #[inline]
    pub fn new(bytes: &'arg [u8]) -> Option<Self> {
        match bytes.is_empty() {
            true => None,
            false => Some(Self { bytes }),
        }
    }

    /// Split off the next option character, along with the rest of the
    /// cluster, if there is any. Options are decoded as UTF-8; an invalid
    /// sequence is a single [`char::REPLACEMENT_CHARACTER`].
    #[inline]
    pub fn split(self) -> (char, Option<Self>) {
        let (option, width) = match self.bytes.utf8_chunks().next() {
            Some(chunk) => match chunk.valid().chars().next() {
                Some(option) => (option, option.len_utf8()),
                None => (char::REPLACEMENT_CHARACTER, chunk.invalid().len()),
            },
            None => unreachable!("short option clusters are never empty"),
        };

        (option, Self::new(&self.bytes[width..]))
    }

    #[inline(always)]
    pub fn bytes(self) -> &'arg [u8] {
        self.bytes
    }
}
