//! Reader - environment reading computation.
//!
//! The Reader type represents pure computations that depend on an immutable
//! environment. It is useful for dependency injection, configuration access,
//! and other patterns where computations need read-only access to some
//! shared context.
//!
//! # Overview
//!
//! A `Reader<R, A>` encapsulates a function `R -> A`, where `R` is the
//! environment type and `A` is the result type. Wrapping the function lets
//! multiple such computations compose while the environment is threaded
//! through all of them implicitly. A reader lifts into the deferred
//! asynchronous world via [`Task::from_reader`](super::Task::from_reader).
//!
//! # Laws
//!
//! Reader satisfies the Functor and Monad laws:
//!
//! - Identity: `reader.fmap(|x| x) == reader`
//! - Composition: `reader.fmap(f).fmap(g) == reader.fmap(|x| g(f(x)))`
//! - Left Identity: `Reader::pure(a).flat_map(f) == f(a)`
//! - Right Identity: `m.flat_map(Reader::pure) == m`
//! - Associativity: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!
//! # Examples
//!
//! ```rust
//! use deferred::effect::Reader;
//!
//! // Create a reader that doubles the environment
//! let reader: Reader<i32, i32> = Reader::new(|environment| environment * 2);
//! assert_eq!(reader.run(21), 42);
//!
//! // Transform the result
//! let string_reader = Reader::new(|environment: i32| environment)
//!     .fmap(|value| value.to_string());
//! assert_eq!(string_reader.run(42), "42");
//! ```
//!
//! Dependency injection pattern:
//!
//! ```rust
//! use deferred::effect::Reader;
//!
//! #[derive(Clone)]
//! struct Config {
//!     port: u16,
//!     host: String,
//! }
//!
//! fn get_port() -> Reader<Config, u16> {
//!     Reader::asks(|config: Config| config.port)
//! }
//!
//! fn get_host() -> Reader<Config, String> {
//!     Reader::asks(|config: Config| config.host)
//! }
//!
//! fn get_address() -> Reader<Config, String> {
//!     get_host().map2(get_port(), |host, port| format!("{host}:{port}"))
//! }
//!
//! let config = Config {
//!     port: 8080,
//!     host: "localhost".to_string(),
//! };
//!
//! assert_eq!(get_address().run(config), "localhost:8080");
//! ```

use std::sync::Arc;

/// A pure computation that reads from an environment.
///
/// `Reader<R, A>` represents a computation that, given an environment of
/// type `R`, produces a value of type `A`. The environment is immutable and
/// shared across all composed computations. The shared-function
/// representation (`Arc<dyn Fn>`) keeps readers cheap to clone and lets them
/// be re-run against fresh environments any number of times.
///
/// # Type Parameters
///
/// - `R`: The environment type (read-only context)
/// - `A`: The result type
pub struct Reader<R, A>
where
    R: 'static,
    A: 'static,
{
    /// The wrapped function from environment to result.
    run_function: Arc<dyn Fn(R) -> A + Send + Sync>,
}

impl<R, A> Clone for Reader<R, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<R, A> Reader<R, A>
where
    R: 'static,
    A: 'static,
{
    /// Creates a new Reader from a function.
    ///
    /// # Arguments
    ///
    /// * `function` - A function that takes an environment and produces a result
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<i32, i32> = Reader::new(|environment| environment * 2);
    /// assert_eq!(reader.run(21), 42);
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(function),
        }
    }

    /// Runs the Reader computation with the given environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<i32, i32> = Reader::new(|environment| environment + 1);
    /// assert_eq!(reader.run(41), 42);
    /// // Reader can be run multiple times
    /// assert_eq!(reader.run(0), 1);
    /// ```
    pub fn run(&self, environment: R) -> A {
        (self.run_function)(environment)
    }

    /// Creates a Reader that applies a selector to the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<(i32, i32), i32> = Reader::asks(|pair: (i32, i32)| pair.0);
    /// assert_eq!(reader.run((1, 2)), 1);
    /// ```
    pub fn asks<F>(selector: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::new(selector)
    }

    /// Transforms the result of a Reader using a function.
    ///
    /// This is the `fmap` operation from Functor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader = Reader::new(|environment: i32| environment).fmap(|x| x * 2);
    /// assert_eq!(reader.run(21), 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Reader<R, B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: 'static,
    {
        Reader::new(move |environment| function(self.run(environment)))
    }
}

impl<R, A> Reader<R, A>
where
    R: Clone + 'static,
    A: 'static,
{
    /// Chains Reader computations, threading the environment through both.
    ///
    /// This is the `bind` operation from Monad. `R: Clone` because the same
    /// environment feeds both steps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<i32, i32> = Reader::ask()
    ///     .flat_map(|environment| Reader::pure(environment * 2));
    /// assert_eq!(reader.run(21), 42);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Reader<R, B>
    where
        F: Fn(A) -> Reader<R, B> + Send + Sync + 'static,
        B: 'static,
    {
        Reader::new(move |environment: R| {
            let value = self.run(environment.clone());
            let next = function(value);
            next.run(environment)
        })
    }

    /// Combines two Readers using a function, sharing the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let left: Reader<i32, i32> = Reader::new(|environment| environment + 1);
    /// let right: Reader<i32, i32> = Reader::new(|environment| environment * 2);
    /// assert_eq!(left.map2(right, |a, b| a + b).run(10), 31);
    /// ```
    pub fn map2<B, C, F>(self, other: Reader<R, B>, function: F) -> Reader<R, C>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: 'static,
        C: 'static,
    {
        Reader::new(move |environment: R| {
            let first = self.run(environment.clone());
            let second = other.run(environment);
            function(first, second)
        })
    }
}

impl<R, A> Reader<R, A>
where
    R: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Creates a Reader that returns a constant value, ignoring the
    /// environment.
    ///
    /// This is equivalent to `Applicative::pure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<i32, &str> = Reader::pure("constant");
    /// assert_eq!(reader.run(0), "constant");
    /// assert_eq!(reader.run(100), "constant");
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(move |_| value.clone())
    }
}

impl<R> Reader<R, R>
where
    R: 'static,
{
    /// Creates a Reader that returns the environment itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Reader;
    ///
    /// let reader: Reader<i32, i32> = Reader::ask();
    /// assert_eq!(reader.run(42), 42);
    /// ```
    #[must_use]
    pub fn ask() -> Self {
        Self::new(|environment| environment)
    }
}

impl<R, A> std::fmt::Display for Reader<R, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Reader>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_new_and_run() {
        let reader: Reader<i32, i32> = Reader::new(|environment| environment * 2);
        assert_eq!(reader.run(21), 42);
    }

    #[test]
    fn test_reader_pure_ignores_environment() {
        let reader: Reader<i32, &str> = Reader::pure("constant");
        assert_eq!(reader.run(0), "constant");
        assert_eq!(reader.run(100), "constant");
    }

    #[test]
    fn test_reader_ask() {
        let reader: Reader<i32, i32> = Reader::ask();
        assert_eq!(reader.run(42), 42);
    }

    #[test]
    fn test_reader_fmap() {
        let reader = Reader::new(|environment: i32| environment).fmap(|x| x + 1);
        assert_eq!(reader.run(41), 42);
    }

    #[test]
    fn test_reader_flat_map() {
        let reader: Reader<i32, i32> =
            Reader::ask().flat_map(|environment| Reader::pure(environment * 2));
        assert_eq!(reader.run(21), 42);
    }

    #[test]
    fn test_reader_map2() {
        let left: Reader<i32, i32> = Reader::new(|environment| environment + 1);
        let right: Reader<i32, i32> = Reader::new(|environment| environment * 2);
        assert_eq!(left.map2(right, |a, b| a + b).run(10), 31);
    }

    #[test]
    fn test_reader_display() {
        let reader: Reader<i32, i32> = Reader::ask();
        assert_eq!(format!("{reader}"), "<Reader>");
    }
}
