use std::fmt;

/// Placeholder printed for absent fields.
pub(crate) const NIL: &str = "<nil>";

/// Displays the wrapped value, or [`NIL`] when absent.
pub(crate) struct OrNil<'a, T: ?Sized>(pub(crate) Option<&'a T>);

impl<T: fmt::Display + ?Sized> fmt::Display for OrNil<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(NIL),
        }
    }
}
