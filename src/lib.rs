//! # deferred
//!
//! Composable deferred asynchronous computations for Rust.
//!
//! ## Overview
//!
//! The crate is built around [`effect::Task`], a re-invokable description of
//! asynchronous work that settles with either a success value or a rejection
//! payload. Tasks compose under two disciplines:
//!
//! - **Sequential**: a dependent step is not started until its predecessor's
//!   result is available (`apply`, `flat_map`, `traverse_seq`).
//! - **Parallel**: independent steps are started concurrently and awaited
//!   without ordering constraints between them (`apply_par`, `traverse_par`).
//!
//! On top of these the crate provides bulk traversal and sequencing of task
//! collections, a race monoid whose combination settles with whichever
//! operand settles first, and adapters lifting the synchronous [`effect::IO`]
//! and environment-reading [`effect::Reader`] primitives into `Task`.
//!
//! ## Example
//!
//! ```rust
//! use deferred::effect::Task;
//!
//! #[tokio::main]
//! async fn main() {
//!     let task: Task<i32, &str> = Task::pure(20)
//!         .fmap(|x| x * 2)
//!         .flat_map(|x| Task::pure(x + 2));
//!     assert_eq!(task.run().await, Ok(42));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use deferred::prelude::*;
/// ```
pub mod prelude {
    pub use crate::effect::*;
}

pub mod effect;
