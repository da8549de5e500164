use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

/**
A handle to a value that gets filled in by [`Command::parse`][crate::Command::parse].

Declaring a flag or positional arguments on a [`Command`][crate::Command]
returns a [`Binding`]. The command keeps a second handle to the same value
and overwrites it during every parse, so the binding can be read once parsing
has succeeded. Before that (and after a failed parse) it holds the default.

Bindings are cheap to clone; clones all observe the same value.
*/
pub struct Binding<T> {
    value: Rc<RefCell<T>>,
}

impl<T> Binding<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get a copy of the current value
    #[inline]
    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Borrow the current value. The borrow must be released before the
    /// next call to `parse`.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    pub(crate) fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    pub(crate) fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.try_borrow() {
            Ok(value) => f.debug_tuple("Binding").field(&*value).finish(),
            Err(_) => f.write_str("Binding(<borrowed>)"),
        }
    }
}
