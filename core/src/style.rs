//! Cursor style tokens and the override stack.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A platform cursor hint. Backends map these onto whatever their windowing system supports.
///
/// Unknown tokens are kept as [`CursorStyle::Custom`] so that they survive a round trip to the host.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Grab,
    Grabbing,
    Text,
    Crosshair,
    Move,
    NotAllowed,
    Wait,
    /// Hides the platform cursor.
    None,
    Custom(String),
}

impl CursorStyle {
    pub fn as_str(&self) -> &str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::Text => "text",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Move => "move",
            CursorStyle::NotAllowed => "not-allowed",
            CursorStyle::Wait => "wait",
            CursorStyle::None => "none",
            CursorStyle::Custom(token) => token,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CursorStyle::None)
    }
}

impl fmt::Display for CursorStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CursorStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "default" | "auto" => CursorStyle::Default,
            "pointer" => CursorStyle::Pointer,
            "grab" => CursorStyle::Grab,
            "grabbing" => CursorStyle::Grabbing,
            "text" => CursorStyle::Text,
            "crosshair" => CursorStyle::Crosshair,
            "move" => CursorStyle::Move,
            "not-allowed" => CursorStyle::NotAllowed,
            "wait" => CursorStyle::Wait,
            "none" => CursorStyle::None,
            other => CursorStyle::Custom(other.to_string()),
        })
    }
}

impl From<&str> for CursorStyle {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl From<String> for CursorStyle {
    fn from(s: String) -> Self {
        CursorStyle::from(s.as_str())
    }
}

impl From<CursorStyle> for String {
    fn from(style: CursorStyle) -> Self {
        match style {
            CursorStyle::Custom(token) => token,
            other => other.as_str().to_string(),
        }
    }
}

/// Ordered cursor style overrides. The most recent push wins.
///
/// The stack is never empty: index 0 holds the base style and can only be replaced, never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleStack {
    styles: Vec<CursorStyle>,
}

impl Default for StyleStack {
    fn default() -> Self {
        Self::new(CursorStyle::Default)
    }
}

impl StyleStack {
    pub fn new(base: CursorStyle) -> Self {
        Self { styles: vec![base] }
    }

    /// The style currently in effect.
    pub fn current(&self) -> &CursorStyle {
        // `styles` always holds the base
        &self.styles[self.styles.len() - 1]
    }

    pub fn base(&self) -> &CursorStyle {
        &self.styles[0]
    }

    /// Number of entries, base included. Always at least 1.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether only the base style remains.
    pub fn is_base(&self) -> bool {
        self.styles.len() == 1
    }

    pub fn push(&mut self, style: CursorStyle) {
        self.styles.push(style);
    }

    /// Remove the top override. Returns `None` and leaves the stack untouched if only the base remains.
    pub fn pop(&mut self) -> Option<CursorStyle> {
        if self.is_base() {
            None
        } else {
            self.styles.pop()
        }
    }

    /// Replace the base style, returning the previous one.
    pub fn set_base(&mut self, style: CursorStyle) -> CursorStyle {
        std::mem::replace(&mut self.styles[0], style)
    }

    /// Pop every trailing [`CursorStyle::None`] above the base. Returns how many were removed.
    pub fn pop_hidden(&mut self) -> usize {
        let mut popped = 0;
        while !self.is_base() && self.current().is_none() {
            self.styles.pop();
            popped += 1;
        }
        popped
    }

    pub fn iter(&self) -> impl Iterator<Item = &CursorStyle> {
        self.styles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tokens() {
        assert_eq!(CursorStyle::from("pointer"), CursorStyle::Pointer);
        assert_eq!(CursorStyle::from("not-allowed").to_string(), "not-allowed");
        assert_eq!(
            CursorStyle::from("zoom-in"),
            CursorStyle::Custom("zoom-in".to_string())
        );
        assert_eq!(String::from(CursorStyle::from("zoom-in")), "zoom-in");
    }

    #[test]
    fn test_pop_keeps_base() {
        let mut stack = StyleStack::default();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current(), &CursorStyle::Default);
    }

    #[test]
    fn test_push_pop() {
        let mut stack = StyleStack::default();
        stack.push(CursorStyle::Pointer);
        stack.push(CursorStyle::Grab);
        assert_eq!(stack.current(), &CursorStyle::Grab);
        assert_eq!(stack.pop(), Some(CursorStyle::Grab));
        assert_eq!(stack.current(), &CursorStyle::Pointer);
    }

    #[test]
    fn test_set_base() {
        let mut stack = StyleStack::default();
        stack.push(CursorStyle::Pointer);
        let previous = stack.set_base(CursorStyle::Crosshair);
        assert_eq!(previous, CursorStyle::Default);
        assert_eq!(stack.base(), &CursorStyle::Crosshair);
        assert_eq!(stack.current(), &CursorStyle::Pointer);
    }

    #[test]
    fn test_pop_hidden_stops_at_visible_style() {
        let mut stack = StyleStack::default();
        stack.push(CursorStyle::Pointer);
        stack.push(CursorStyle::None);
        stack.push(CursorStyle::None);
        assert_eq!(stack.pop_hidden(), 2);
        assert_eq!(stack.current(), &CursorStyle::Pointer);
    }

    #[test]
    fn test_pop_hidden_never_removes_base() {
        let mut stack = StyleStack::new(CursorStyle::None);
        stack.push(CursorStyle::None);
        assert_eq!(stack.pop_hidden(), 1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current(), &CursorStyle::None);
    }
}
