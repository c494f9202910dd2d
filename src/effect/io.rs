//! IO - deferred synchronous side effect handling.
//!
//! The `IO` type represents a synchronous computation that may perform side
//! effects and never fails. Side effects are not executed until `run` is
//! called, maintaining referential transparency in pure code.
//!
//! # Design Philosophy
//!
//! IO "describes" side effects but doesn't "execute" them. Execution happens
//! only via `run`, which should be called at the program's "edge" — directly,
//! or through [`Task::from_io`](super::Task::from_io) which lifts an IO into
//! the deferred asynchronous world.
//!
//! # Examples
//!
//! ```rust
//! use deferred::effect::IO;
//!
//! // Create a pure IO action
//! let io = IO::pure(42);
//! assert_eq!(io.run(), 42);
//!
//! // Chain IO actions
//! let io = IO::pure(10)
//!     .fmap(|x| x * 2)
//!     .flat_map(|x| IO::pure(x + 1));
//! assert_eq!(io.run(), 21);
//! ```
//!
//! # Side Effect Deferral
//!
//! ```rust
//! use deferred::effect::IO;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let executed = Arc::new(AtomicBool::new(false));
//! let executed_clone = executed.clone();
//!
//! let io = IO::new(move || {
//!     executed_clone.store(true, Ordering::SeqCst);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.load(Ordering::SeqCst));
//!
//! // Execute the IO action
//! let result = io.run();
//! assert!(executed.load(Ordering::SeqCst));
//! assert_eq!(result, 42);
//! ```

use std::sync::Arc;

/// A description of a synchronous, never-failing side effect.
///
/// `IO<A>` wraps a computation that produces a value of type `A` and may
/// perform side effects. The computation is not executed until `run` is
/// called, and may be run any number of times; the shared-function
/// representation makes the description cheap to clone into [`Task`]s.
///
/// [`Task`]: super::Task
///
/// # Monad Laws
///
/// `IO` satisfies the monad laws:
///
/// 1. **Left Identity**: `IO::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(IO::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct IO<A> {
    /// The wrapped computation that produces a value of type `A`.
    run_io: Arc<dyn Fn() -> A + Send + Sync>,
}

impl<A> Clone for IO<A> {
    fn clone(&self) -> Self {
        Self {
            run_io: Arc::clone(&self.run_io),
        }
    }
}

impl<A: 'static> IO<A> {
    /// Creates a new IO action from a closure.
    ///
    /// The closure will not be executed until `run` is called.
    ///
    /// # Arguments
    ///
    /// * `action` - A closure that produces a value of type `A`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::new(|| 10 + 20);
    /// assert_eq!(io.run(), 30);
    /// ```
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            run_io: Arc::new(action),
        }
    }

    /// Executes the IO action and returns the result.
    ///
    /// This is the only way to extract a value from an IO action. It never
    /// fails; calling it is what performs the described side effect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::pure(42);
    /// assert_eq!(io.run(), 42);
    /// // IO can be run multiple times; each run performs the effect afresh.
    /// assert_eq!(io.run(), 42);
    /// ```
    pub fn run(&self) -> A {
        (self.run_io)()
    }

    /// Transforms the result of an IO action using a function.
    ///
    /// This is the `fmap` operation from Functor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::pure(21).fmap(|x| x * 2);
    /// assert_eq!(io.run(), 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: 'static,
    {
        IO::new(move || function(self.run()))
    }

    /// Chains IO actions, passing the result of the first to a function
    /// that produces the second.
    ///
    /// This is the `bind` operation from Monad.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::pure(10).flat_map(|x| IO::pure(x * 2));
    /// assert_eq!(io.run(), 20);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
        B: 'static,
    {
        IO::new(move || {
            let value = self.run();
            let next = function(value);
            next.run()
        })
    }

    /// Alias for `flat_map`.
    ///
    /// This is the conventional Rust name for monadic bind.
    pub fn and_then<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two IO actions, discarding the result of the first.
    ///
    /// The first action is still executed for its side effects.
    #[must_use]
    pub fn then<B>(self, next: IO<B>) -> IO<B>
    where
        B: 'static,
    {
        IO::new(move || {
            self.run();
            next.run()
        })
    }

    /// Combines two IO actions using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::pure(10).map2(IO::pure(20), |a, b| a + b);
    /// assert_eq!(io.run(), 30);
    /// ```
    pub fn map2<B, C, F>(self, other: IO<B>, function: F) -> IO<C>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: 'static,
        C: 'static,
    {
        IO::new(move || {
            let first = self.run();
            let second = other.run();
            function(first, second)
        })
    }

    /// Combines two IO actions into a tuple.
    #[must_use]
    pub fn product<B>(self, other: IO<B>) -> IO<(A, B)>
    where
        B: 'static,
    {
        self.map2(other, |first, second| (first, second))
    }
}

impl<A: Clone + Send + Sync + 'static> IO<A> {
    /// Wraps a pure value in an IO action.
    ///
    /// This creates an IO action that returns the given value without
    /// performing any side effects. `A: Clone` because every run yields the
    /// value afresh.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::IO;
    ///
    /// let io = IO::pure(42);
    /// assert_eq!(io.run(), 42);
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(move || value.clone())
    }
}

impl<A> std::fmt::Display for IO<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<IO>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_pure_and_run() {
        let io = IO::pure(42);
        assert_eq!(io.run(), 42);
    }

    #[test]
    fn test_io_new_and_run() {
        let io = IO::new(|| 10 + 20);
        assert_eq!(io.run(), 30);
    }

    #[test]
    fn test_io_fmap() {
        let io = IO::pure(21).fmap(|x| x * 2);
        assert_eq!(io.run(), 42);
    }

    #[test]
    fn test_io_flat_map() {
        let io = IO::pure(10).flat_map(|x| IO::pure(x * 2));
        assert_eq!(io.run(), 20);
    }

    #[test]
    fn test_io_and_then() {
        let io = IO::pure(10).and_then(|x| IO::pure(x + 5));
        assert_eq!(io.run(), 15);
    }

    #[test]
    fn test_io_then() {
        let io = IO::pure(10).then(IO::pure(20));
        assert_eq!(io.run(), 20);
    }

    #[test]
    fn test_io_map2() {
        let io = IO::pure(10).map2(IO::pure(20), |a, b| a + b);
        assert_eq!(io.run(), 30);
    }

    #[test]
    fn test_io_product() {
        let io = IO::pure(10).product(IO::pure(20));
        assert_eq!(io.run(), (10, 20));
    }

    #[test]
    fn test_io_display() {
        let io = IO::pure(1);
        assert_eq!(format!("{io}"), "<IO>");
    }
}
