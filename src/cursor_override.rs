// Scoped replacement of the visible system pointer.
// Visual: the normal arrow disappears only while the enlarged overlay is on screen and
// comes back as soon as it hides. When the guard drops, on any exit path including a
// panic, the arrow is shown again if it was still hidden.

use std::ops::{Deref, DerefMut};

/// Something that can hide and re-show the system pointer.
pub trait SystemCursor {
    fn set_cursor_hidden(&mut self, hidden: bool);
}

/// Owns the cursor host for the process lifetime and tracks whether the pointer
/// is currently hidden, so hide/show are idempotent and drop always restores.
pub struct CursorOverride<C: SystemCursor> {
    inner: C,
    hidden: bool,
}

impl<C: SystemCursor> CursorOverride<C> {
    /// Take ownership of the cursor host. The pointer stays visible until `hide_pointer`.
    pub fn acquire(inner: C) -> Self {
        Self { inner, hidden: false }
    }

    pub fn hide_pointer(&mut self) {
        if !self.hidden {
            self.inner.set_cursor_hidden(true);
            self.hidden = true;
            tracing::debug!("system cursor hidden");
        }
    }

    pub fn show_pointer(&mut self) {
        if self.hidden {
            self.inner.set_cursor_hidden(false);
            self.hidden = false;
            tracing::debug!("system cursor shown");
        }
    }

    pub fn is_pointer_hidden(&self) -> bool {
        self.hidden
    }
}

impl<C: SystemCursor> Deref for CursorOverride<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: SystemCursor> DerefMut for CursorOverride<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: SystemCursor> Drop for CursorOverride<C> {
    fn drop(&mut self) {
        self.show_pointer();
        tracing::debug!("cursor override released");
    }
}
