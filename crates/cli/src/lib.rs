//! Interactive console for the stockroom inventory.
//!
//! The console is generic over its input and output streams so sessions can
//! be scripted in tests.

pub mod console;
pub mod error;
pub mod menu;
pub mod prompt;

pub use console::Console;
pub use error::ConsoleError;
pub use menu::MenuCommand;
