//! Terminal front end
//!
//! Business logic talks to the terminal only through two traits, so the
//! browse loop runs the same against dialoguer/stdout and against scripted
//! input and a buffer in tests.
//!
//! - **`UserInput`** - prompts (text, confirmation, selection)
//! - **`OutputWriter`** - messages with severity levels
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  Browser (ui::browse)        │──── SearchController
//! └──────┬───────────────┬───────┘
//!        │ prompts       │ render::render_view
//!        ▼               ▼
//!   UserInput       OutputWriter
//!   - Dialoguer     - StdoutWriter
//!   - Scripted      - BufferWriter
//! ```
//!
//! ## Output Messages
//!
//! ```
//! use swillan::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::new();
//! output.success("Imported 12 courses");
//! output.warning("No courses found. Here are some recommended ones.");
//! output.info("Additional info");
//! ```

pub mod browse;
pub mod input;
pub mod output;
pub mod render;

#[cfg(test)]
pub mod mock;

pub use browse::{BrowseAction, BrowseSummary, Browser};
pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{BufferWriter, MessageLevel, OutputWriter, StdoutWriter};
