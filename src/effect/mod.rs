//! Effect types for deferred computation.
//!
//! This module provides three computation descriptions that defer their work
//! until explicitly run:
//!
//! - [`Task`]: deferred asynchronous computations with a rejection channel,
//!   the core of the crate. Tasks compose under a sequential discipline
//!   (`apply`, `flat_map`) or a parallel discipline (`apply_par`,
//!   `traverse_par`), and combine under a first-to-settle race monoid
//!   ([`RaceMonoid`]).
//! - [`IO`]: synchronous, never-failing side effects.
//! - [`Reader`]: pure functions from an immutable environment to a result.
//!
//! `IO` and `Reader` exist in their own right but also lift into `Task` via
//! [`Task::from_io`] and [`Task::from_reader`].
//!
//! # Do-Notation with the task! Macro
//!
//! The `task!` macro provides a convenient syntax for chaining `Task`
//! operations, similar to Haskell's do-notation:
//!
//! ```rust
//! use deferred::task;
//! use deferred::effect::Task;
//!
//! #[tokio::main]
//! async fn main() {
//!     let result: Task<i32, &str> = task! {
//!         x <= Task::pure(5);
//!         y <= Task::pure(10);
//!         let z = x + y;
//!         Task::pure(z * 2)
//!     };
//!     assert_eq!(result.run().await, Ok(30));
//! }
//! ```

mod io;
mod reader;
mod task;

mod task_macro;

pub use io::IO;
pub use reader::Reader;
pub use task::{RaceMonoid, Task};
