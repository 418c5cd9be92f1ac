pub use cursorkit_core::*;
