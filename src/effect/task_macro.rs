//! Do-notation macro for the `Task` type.
//!
//! This module provides the `task!` macro, which allows for Haskell-style
//! do-notation when building up named intermediate results through
//! sequential composition.
//!
//! # Syntax
//!
//! The `task!` macro uses `<=` as the bind operator (since `<-` cannot be
//! matched in Rust macros).
//!
//! ```text
//! task! {
//!     pattern <= task_expression;   // bind: pattern receives the settled value
//!     let pattern = expression;     // pure let: regular let binding
//!     ...
//!     task_expression               // final expression: must return a Task
//! }
//! ```
//!
//! Because binds desugar to `flat_map`, the first task to fail
//! short-circuits the whole block and its payload propagates unchanged.
//!
//! # Examples
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

/// Do-notation macro for the `Task` type.
///
/// This macro provides a convenient syntax for chaining `Task` operations,
/// similar to Haskell's do-notation. Each bound value stays in scope for the
/// rest of the block, which covers the "build a record of named intermediate
/// results" pattern directly.
///
/// # Syntax
///
/// - `pattern <= task_expr;` - Bind: runs the task and binds the settled value
/// - `let pattern = expr;` - Pure let: regular Rust let binding
/// - `task_expr` - Final expression: must return a `Task`
///
/// # Note
///
/// The `<=` operator is used instead of `<-` because Rust macros cannot
/// match the `<-` token sequence. Bound values are captured by the
/// continuation closures, so non-`Copy` values should be cloned where they
/// are used more than once.
///
/// # Examples
///
/// ```rust
/// use deferred::task;
/// use deferred::effect::Task;
///
/// #[tokio::main]
/// async fn main() {
///     let result: Task<i32, &str> = task! {
///         x <= Task::pure(1);
///         y <= Task::pure(2);
///         Task::pure(x + y)
///     };
///     assert_eq!(result.run().await, Ok(3));
/// }
/// ```
#[macro_export]
macro_rules! task {
    // Terminal case: single expression (must be a Task)
    ($result:expr) => {
        $result
    };

    // Bind with identifier pattern: `identifier <= task; rest`
    ($pattern:ident <= $monad:expr ; $($rest:tt)+) => {
        $monad.flat_map(move |$pattern| {
            $crate::task!($($rest)+)
        })
    };

    // Bind with tuple pattern: `(pattern1, pattern2) <= task; rest`
    (($($pattern:tt)*) <= $monad:expr ; $($rest:tt)+) => {
        $monad.flat_map(move |($($pattern)*)| {
            $crate::task!($($rest)+)
        })
    };

    // Bind with wildcard pattern: `_ <= task; rest`
    (_ <= $monad:expr ; $($rest:tt)+) => {
        $monad.flat_map(move |_| {
            $crate::task!($($rest)+)
        })
    };

    // Pure let binding with identifier: `let identifier = expr; rest`
    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::task!($($rest)+)
        }
    };

    // Pure let binding with tuple pattern: `let (a, b) = expr; rest`
    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::task!($($rest)+)
        }
    };

    // Pure let binding with type annotation: `let identifier: Type = expr; rest`
    (let $pattern:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $expr;
            $crate::task!($($rest)+)
        }
    };
}
