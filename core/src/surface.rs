use crate::style::CursorStyle;
use crate::types::Size;

/// The trait that backends implement so the manager can reach the platform's cursor and viewport.
///
/// Every call is best-effort. Implementations must not call back into the
/// [`CursorManager`][crate::CursorManager] from these methods.
pub trait CursorSurface {
    /// Set the platform cursor. Backends should support at least the named [`CursorStyle`] variants,
    /// and fall back to the default cursor for [`CursorStyle::Custom`] tokens they don't know.
    /// [`CursorStyle::None`] hides the cursor.
    fn set_cursor(&self, _style: &CursorStyle) {}

    /// Logical size of the viewport, if it is known yet.
    fn viewport_size(&self) -> Option<Size> {
        None
    }

    /// Whether there is a display surface behind this handle at all.
    fn has_handle(&self) -> bool {
        true
    }
}
