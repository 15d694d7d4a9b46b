//! Parser and serializer for the [todo.txt](https://github.com/todotxt/todo.txt) format.
//!
//! ```
//! use todotxt::{Stringify, parse, stringify};
//!
//! let mut tasks = parse("(A) Call mom @phone\n\nx 2015-03-19 Pay rent +Home");
//! assert_eq!(tasks.len(), 3);
//! assert!(tasks[1].is_none());
//!
//! if let Some(task) = tasks[0].as_mut() {
//!     task.add_project("Family");
//!     task.remove_context("phone");
//! }
//! assert_eq!(
//!     stringify(&tasks)?.as_deref(),
//!     Some("(A) Call mom +Family\n\nx 2015-03-19 Pay rent +Home")
//! );
//! assert_eq!(stringify(Stringify::Null)?, None);
//! # Ok::<(), todotxt::TodoTxtError>(())
//! ```

/// Codec bound to explicit options.
pub mod codec;
/// Codec options read from TOML.
pub mod config;
/// Calendar dates as they appear in todo.txt lines (`YYYY-MM-DD`).
pub mod date;
/// Character encodings accepted for byte input.
pub mod encoding;
/// Error types for todo.txt codec operations.
pub mod error;
/// Line grammar: todo.txt text to task records.
pub mod parse;
/// Task records back to canonical todo.txt text.
pub mod stringify;
/// Context (`@name`) and project (`+name`) tags embedded in task text.
pub mod tags;
/// Task record and tag mutators.
pub mod task;

pub use codec::{Codec, parse_bytes};
pub use config::{CodecConfig, LineEnding};
pub use date::{TaskDate, format_date, parse_date};
pub use encoding::Encoding;
pub use error::{Result, TodoTxtError};
pub use parse::{Source, parse, parse_line};
pub use stringify::{MAX_KEYED_SLOT, Stringify, stringify, stringify_value};
pub use tags::{TagKind, Tags, extract_tags};
pub use task::{Task, TaskFields, make_task};
