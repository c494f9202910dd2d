//! Task - deferred asynchronous computation with a rejection channel.
//!
//! A [`Task`] describes asynchronous work that, when run, settles with either
//! a success value or a rejection payload. Nothing executes until `run` is
//! called, and a task may be run any number of times: every run starts the
//! described work afresh, no result is ever memoized.
//!
//! # Composition Disciplines
//!
//! Tasks compose under two distinct disciplines, chosen by combinator rather
//! than stored in the value:
//!
//! - **Sequential** (`apply`, `map2`, `flat_map`, `traverse_seq`): a
//!   dependent step is not started until its predecessor's result is
//!   available.
//! - **Parallel** (`apply_par`, `map2_par`, `traverse_par`): independent
//!   steps are started concurrently on the runtime and awaited without
//!   ordering constraints between them.
//!
//! Both disciplines satisfy the applicative laws; they differ only in when
//! the operands' side effects are started and in which of several concurrent
//! failures is surfaced (first in start order vs. first to arrive in
//! wall-clock time).
//!
//! # Racing
//!
//! [`Task::race`] combines two tasks into one that adopts the outcome of
//! whichever settles first, success or failure alike. Together with
//! [`Task::never`] as identity this forms the [`RaceMonoid`]. The crate has
//! no cancellation primitive: a race's loser keeps running detached until it
//! settles on its own.
//!
//! # Examples
//!
//! ```rust
//! use deferred::effect::Task;
//!
//! #[tokio::main]
//! async fn main() {
//!     let task: Task<i32, &str> = Task::pure(10)
//!         .fmap(|x| x * 2)
//!         .flat_map(|x| Task::pure(x + 1));
//!     assert_eq!(task.run().await, Ok(21));
//!
//!     let failing: Task<i32, &str> = Task::fail("boom");
//!     assert_eq!(failing.fmap(|x| x * 2).run().await, Err("boom"));
//! }
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinError;

use super::io::IO;
use super::reader::Reader;

/// A boxed, sendable future, the deferred-value channel of a [`Task`].
type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A deferred asynchronous computation settling with `Result<A, E>`.
///
/// `Task<A, E>` wraps a factory of futures: each call to [`run`](Self::run)
/// asks the factory for a fresh future and awaits it. Holding a task means
/// holding a description of work, nothing more; cloning shares the
/// description, never a result.
///
/// # Type Parameters
///
/// - `A`: the success value type.
/// - `E`: the rejection payload type.
///
/// # Invariants
///
/// - Running never panics synchronously for well-behaved closures; failure
///   surfaces only through the `Err` arm of the settled result.
/// - Concurrent runs of the same task are independent of one another.
///
/// # Monad Laws
///
/// `Task` satisfies the monad laws:
///
/// 1. **Left Identity**: `Task::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Task::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Task<A, E> {
    /// Factory producing one fresh deferred computation per invocation.
    run_task: Arc<dyn Fn() -> BoxFuture<Result<A, E>> + Send + Sync>,
}

impl<A, E> Clone for Task<A, E> {
    fn clone(&self) -> Self {
        Self {
            run_task: Arc::clone(&self.run_task),
        }
    }
}

// =============================================================================
// Join Helpers
// =============================================================================

/// Unwraps a spawned task's outcome, resuming any panic on the awaiting side.
///
/// The engine never aborts the tasks it spawns, so a `JoinError` can only be
/// a panic in user code or a runtime shutting down mid-flight.
fn settle<T>(joined: Result<T, JoinError>) -> T {
    match joined {
        Ok(value) => value,
        Err(join_error) => match join_error.try_into_panic() {
            Ok(panic_payload) => std::panic::resume_unwind(panic_payload),
            Err(join_error) => panic!("spawned task failed to settle: {join_error}"),
        },
    }
}

/// Spawns both deferred computations immediately and awaits both outcomes.
///
/// Whichever operand settles first is inspected first: if it failed, its
/// payload is surfaced at once and the other operand is left running
/// detached. Failure selection therefore follows wall-clock arrival order,
/// not operand order.
async fn join_settled<A, B, E>(
    left: BoxFuture<Result<A, E>>,
    right: BoxFuture<Result<B, E>>,
) -> Result<(A, B), E>
where
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    let mut left_handle = tokio::spawn(left);
    let mut right_handle = tokio::spawn(right);

    tokio::select! {
        left_outcome = &mut left_handle => {
            let left_value = settle(left_outcome)?;
            let right_value = settle(right_handle.await)?;
            Ok((left_value, right_value))
        }
        right_outcome = &mut right_handle => {
            let right_value = settle(right_outcome)?;
            let left_value = settle(left_handle.await)?;
            Ok((left_value, right_value))
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<A: 'static, E: 'static> Task<A, E> {
    /// Creates a task from a factory of deferred computations.
    ///
    /// The factory is called once per [`run`](Self::run), so every run
    /// starts fresh work.
    ///
    /// # Arguments
    ///
    /// * `action` - A closure producing a future that settles with
    ///   `Result<A, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::new(|| async { Ok(10 + 20) });
    ///     assert_eq!(task.run().await, Ok(30));
    /// }
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self {
            run_task: Arc::new(move || Box::pin(action())),
        }
    }

    /// Runs the task, settling with its deferred outcome.
    ///
    /// Each call starts the described work afresh; nothing is cached across
    /// runs. This is the only way to extract a value from a task and should
    /// be called at the program's "edge".
    ///
    /// # Errors
    ///
    /// Settles with `Err` carrying the rejection payload when the described
    /// computation fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::pure(42);
    ///     assert_eq!(task.run().await, Ok(42));
    ///     // Running again starts fresh work.
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    pub async fn run(&self) -> Result<A, E> {
        (self.run_task)().await
    }

    /// Starts one fresh deferred computation without awaiting it.
    fn invoke(&self) -> BoxFuture<Result<A, E>> {
        (self.run_task)()
    }
}

impl<A: Clone + Send + Sync + 'static, E: 'static> Task<A, E> {
    /// Wraps a pure value as an immediately-successful task.
    ///
    /// `A: Clone` because every run yields the value afresh.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::pure(42);
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    pub fn pure(value: A) -> Self {
        Self {
            run_task: Arc::new(move || {
                let value = value.clone();
                Box::pin(async move { Ok(value) })
            }),
        }
    }
}

impl<A: 'static, E: Clone + Send + Sync + 'static> Task<A, E> {
    /// Wraps a rejection payload as an immediately-failing task.
    ///
    /// The failure surfaces only through the deferred result; running a
    /// failing task never panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::fail("boom");
    ///     assert_eq!(task.run().await, Err("boom"));
    /// }
    /// ```
    pub fn fail(error: E) -> Self {
        Self {
            run_task: Arc::new(move || {
                let error = error.clone();
                Box::pin(async move { Err(error) })
            }),
        }
    }
}

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// A task that never settles, neither succeeding nor failing.
    ///
    /// This is the identity of the [`RaceMonoid`]: racing against a value
    /// that never arrives always resolves to the other operand.
    #[must_use]
    pub fn never() -> Self {
        Self::new(futures::future::pending)
    }
}

// =============================================================================
// Functor Operations
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Transforms the success value of a task using a pure function.
    ///
    /// This is the `fmap` operation from Functor. Failure propagates
    /// unchanged and the function is not called on failure.
    ///
    /// # Arguments
    ///
    /// * `function` - A function to apply to the success value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::pure(21).fmap(|x| x * 2);
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Task<B, E>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move { source.run().await.map(|value| function(value)) }
        })
    }
}

// =============================================================================
// Applicative Operations - Sequential Discipline
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Applies a task-wrapped function to this task's value, sequentially.
    ///
    /// The function-producing task runs to completion *before* the
    /// value-producing task is started; see [`apply_par`](Self::apply_par)
    /// for the concurrent alternative. The first failure in start order
    /// short-circuits: a failed function task means the value task is never
    /// started.
    ///
    /// # Arguments
    ///
    /// * `function_task` - A task settling with a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let function_task: Task<_, &str> = Task::pure(|x: i32| x * 2);
    ///     let task: Task<i32, &str> = Task::pure(21).apply(function_task);
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    #[must_use]
    pub fn apply<B, F>(self, function_task: Task<F, E>) -> Task<B, E>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: 'static,
    {
        Task::new(move || {
            let function_task = function_task.clone();
            let value_task = self.clone();
            async move {
                let function = function_task.run().await?;
                let value = value_task.run().await?;
                Ok(function(value))
            }
        })
    }

    /// Combines two tasks sequentially using a function.
    ///
    /// `self` runs to completion before `other` is started.
    ///
    /// # Arguments
    ///
    /// * `other` - The second task.
    /// * `function` - A function to combine both success values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> =
    ///         Task::pure(10).map2(Task::pure(20), |a, b| a + b);
    ///     assert_eq!(task.run().await, Ok(30));
    /// }
    /// ```
    pub fn map2<B, C, F>(self, other: Task<B, E>, function: F) -> Task<C, E>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let first = self.clone();
            let second = other.clone();
            let function = Arc::clone(&function);
            async move {
                let first_value = first.run().await?;
                let second_value = second.run().await?;
                Ok(function(first_value, second_value))
            }
        })
    }

    /// Pairs two tasks sequentially.
    #[must_use]
    pub fn zip<B>(self, other: Task<B, E>) -> Task<(A, B), E>
    where
        B: Send + 'static,
    {
        self.map2(other, |first, second| (first, second))
    }

    /// Runs both tasks sequentially, keeping the first result.
    ///
    /// The second task still runs for its effects.
    #[must_use]
    pub fn ap_first<B>(self, second: Task<B, E>) -> Self
    where
        B: Send + 'static,
    {
        self.map2(second, |first, _| first)
    }

    /// Runs both tasks sequentially, keeping the second result.
    ///
    /// The first task still runs for its effects.
    #[must_use]
    pub fn ap_second<B>(self, second: Task<B, E>) -> Task<B, E>
    where
        B: Send + 'static,
    {
        self.map2(second, |_, second| second)
    }
}

// =============================================================================
// Applicative Operations - Parallel Discipline
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Applies a task-wrapped function to this task's value, concurrently.
    ///
    /// Both operands are started immediately with no ordering dependency. If
    /// both succeed the function is applied; if either fails, the combined
    /// task fails with the **first failure to arrive in wall-clock time** —
    /// not the syntactically-first operand. The not-yet-settled operand is
    /// left running detached, never aborted.
    ///
    /// # Arguments
    ///
    /// * `function_task` - A task settling with a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let function_task: Task<_, &str> = Task::pure(|x: i32| x * 2);
    ///     let task: Task<i32, &str> = Task::pure(21).apply_par(function_task);
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    #[must_use]
    pub fn apply_par<B, F>(self, function_task: Task<F, E>) -> Task<B, E>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        Task::new(move || {
            let function_task = function_task.clone();
            let value_task = self.clone();
            async move {
                let (function, value) =
                    join_settled(function_task.invoke(), value_task.invoke()).await?;
                Ok(function(value))
            }
        })
    }

    /// Combines two tasks concurrently using a function.
    ///
    /// Failure selection follows wall-clock arrival order, as with
    /// [`apply_par`](Self::apply_par).
    pub fn map2_par<B, C, F>(self, other: Task<B, E>, function: F) -> Task<C, E>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let first = self.clone();
            let second = other.clone();
            let function = Arc::clone(&function);
            async move {
                let (first_value, second_value) =
                    join_settled(first.invoke(), second.invoke()).await?;
                Ok(function(first_value, second_value))
            }
        })
    }

    /// Pairs two tasks concurrently.
    #[must_use]
    pub fn zip_par<B>(self, other: Task<B, E>) -> Task<(A, B), E>
    where
        B: Send + 'static,
    {
        self.map2_par(other, |first, second| (first, second))
    }

    /// Runs both tasks concurrently, keeping the first result.
    #[must_use]
    pub fn ap_first_par<B>(self, second: Task<B, E>) -> Self
    where
        B: Send + 'static,
    {
        self.map2_par(second, |first, _| first)
    }

    /// Runs both tasks concurrently, keeping the second result.
    #[must_use]
    pub fn ap_second_par<B>(self, second: Task<B, E>) -> Task<B, E>
    where
        B: Send + 'static,
    {
        self.map2_par(second, |_, second| second)
    }
}

// =============================================================================
// Monad Operations
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Chains tasks, passing the success value of the first to a function
    /// that produces the second.
    ///
    /// This is the `bind` operation from Monad and the sequential dependency
    /// primitive: no work described by `function(a)` starts before `a` is
    /// available. Failure of the source short-circuits and the function is
    /// never called.
    ///
    /// # Arguments
    ///
    /// * `function` - A function from the success value to the next task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> =
    ///         Task::pure(10).flat_map(|x| Task::pure(x * 2));
    ///     assert_eq!(task.run().await, Ok(20));
    /// }
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Task<B, E>
    where
        F: Fn(A) -> Task<B, E> + Send + Sync + 'static,
        B: 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move {
                let value = source.run().await?;
                let next = function(value);
                next.run().await
            }
        })
    }

    /// Alias for `flat_map`.
    ///
    /// This is the conventional Rust name for monadic bind.
    pub fn and_then<B, F>(self, function: F) -> Task<B, E>
    where
        F: Fn(A) -> Task<B, E> + Send + Sync + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two tasks, discarding the result of the first.
    ///
    /// The first task still runs for its effects; its failure propagates.
    #[must_use]
    pub fn then<B>(self, next: Task<B, E>) -> Task<B, E>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }
}

impl<A: Clone + Send + Sync + 'static, E: Send + 'static> Task<A, E> {
    /// Chains a step for its effect, keeping the original value.
    ///
    /// Like `flat_map`, but the chained task's result is discarded while its
    /// failure still propagates. Used to sequence a side-effecting step
    /// without altering the carried value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> =
    ///         Task::pure(2).flat_tap(|x| Task::pure(x * 2));
    ///     assert_eq!(task.run().await, Ok(2));
    /// }
    /// ```
    pub fn flat_tap<B, F>(self, function: F) -> Self
    where
        F: Fn(A) -> Task<B, E> + Send + Sync + 'static,
        B: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move {
                let value = source.run().await?;
                let step = function(value.clone());
                step.run().await?;
                Ok(value)
            }
        })
    }
}

impl<A: Send + 'static, E: Send + 'static> Task<Task<A, E>, E> {
    /// Flattens a nested task, equivalent to `flat_map(identity)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let nested: Task<Task<i32, &str>, &str> = Task::pure(Task::pure(1));
    ///     assert_eq!(nested.flatten().run().await, Ok(1));
    /// }
    /// ```
    #[must_use]
    pub fn flatten(self) -> Task<A, E> {
        self.flat_map(|inner| inner)
    }
}

// =============================================================================
// Delay
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Suspends for at least `duration` before starting the source task.
    ///
    /// The source's outcome, success or failure, passes through unchanged,
    /// delayed. The suspension yields to the scheduler; it does not block.
    ///
    /// # Arguments
    ///
    /// * `duration` - The minimum elapsed time before the source starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> =
    ///         Task::pure(1).delay(Duration::from_millis(10));
    ///     assert_eq!(task.run().await, Ok(1));
    /// }
    /// ```
    #[must_use]
    pub fn delay(self, duration: Duration) -> Self {
        Task::new(move || {
            let source = self.clone();
            async move {
                tokio::time::sleep(duration).await;
                source.run().await
            }
        })
    }
}

// =============================================================================
// Racing
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Races two tasks, settling with whichever settles first.
    ///
    /// Both operands are started immediately. The winner's outcome is
    /// adopted verbatim: success stays success, failure stays failure. The
    /// loser's eventual outcome is discarded but the loser itself keeps
    /// running detached until it settles on its own — this layer has no
    /// cancellation primitive.
    ///
    /// When both operands settle at indistinguishable times the winner is
    /// implementation-defined (scheduler and timer granularity decide).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let fast: Task<&str, &str> =
    ///         Task::pure("fast").delay(Duration::from_millis(5));
    ///     let slow: Task<&str, &str> =
    ///         Task::pure("slow").delay(Duration::from_millis(50));
    ///     assert_eq!(fast.race(slow).run().await, Ok("fast"));
    /// }
    /// ```
    #[must_use]
    pub fn race(self, other: Self) -> Self {
        Task::new(move || {
            let first = self.clone();
            let second = other.clone();
            async move {
                let mut first_handle = tokio::spawn(first.invoke());
                let mut second_handle = tokio::spawn(second.invoke());
                tokio::select! {
                    outcome = &mut first_handle => settle(outcome),
                    outcome = &mut second_handle => settle(outcome),
                }
            }
        })
    }
}

/// The first-to-settle monoid over tasks.
///
/// `combine` races two tasks and adopts the earlier outcome verbatim;
/// `empty` is a task that never settles and therefore never wins a race,
/// which makes it a two-sided identity. Associativity holds because the
/// winner is determined purely by real settlement time, not by combinator
/// nesting.
///
/// # Examples
///
/// ```rust
/// use deferred::effect::{RaceMonoid, Task};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let monoid: RaceMonoid<i32, &str> = RaceMonoid::new();
///     let fast = Task::pure(1).delay(Duration::from_millis(5));
///     let combined = monoid.combine(fast, monoid.empty());
///     assert_eq!(combined.run().await, Ok(1));
/// }
/// ```
pub struct RaceMonoid<A, E> {
    _outcome: PhantomData<fn() -> Result<A, E>>,
}

impl<A: Send + 'static, E: Send + 'static> RaceMonoid<A, E> {
    /// Creates the race monoid for tasks of the given outcome type.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _outcome: PhantomData,
        }
    }

    /// The identity element: a task that never settles.
    #[must_use]
    pub fn empty(&self) -> Task<A, E> {
        Task::never()
    }

    /// Combines two tasks into one settling with the earlier outcome.
    #[must_use]
    pub fn combine(&self, first: Task<A, E>, second: Task<A, E>) -> Task<A, E> {
        first.race(second)
    }
}

impl<A: Send + 'static, E: Send + 'static> Default for RaceMonoid<A, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, E> Clone for RaceMonoid<A, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, E> Copy for RaceMonoid<A, E> {}

// =============================================================================
// Bulk Traversal and Sequencing
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Traverses a sequence one element at a time, in input order.
    ///
    /// Element `i + 1`'s task is not started until element `i`'s result is
    /// available. The first element to fail short-circuits in index order:
    /// later elements are never started. Results keep input order. An empty
    /// input settles immediately with `Ok(vec![])` without starting
    /// anything.
    ///
    /// # Arguments
    ///
    /// * `items` - The input sequence (`T: Clone` — elements are re-used
    ///   across runs of the resulting task).
    /// * `function` - The step producing a task per element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let items: Vec<i32> = (0..10).collect();
    ///     let task: Task<Vec<i32>, &str> = Task::traverse_seq(items.clone(), Task::pure);
    ///     assert_eq!(task.run().await, Ok(items));
    /// }
    /// ```
    pub fn traverse_seq<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let items = items.clone();
            let function = Arc::clone(&function);
            async move {
                let mut results = Vec::with_capacity(items.len());
                for item in items {
                    let step = function(item);
                    results.push(step.run().await?);
                }
                Ok(results)
            }
        })
    }

    /// Like [`traverse_seq`](Self::traverse_seq), with the element index
    /// passed to the step function.
    pub fn traverse_with_index_seq<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let items = items.clone();
            let function = Arc::clone(&function);
            async move {
                let mut results = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let step = function(index, item);
                    results.push(step.run().await?);
                }
                Ok(results)
            }
        })
    }

    /// Traverses a sequence with all elements started concurrently.
    ///
    /// Every element's task is spawned immediately, in index order; results
    /// are reassembled in input order regardless of completion order. When
    /// several elements fail, the surfaced payload is the first failure to
    /// arrive in wall-clock time — not the lowest index — and the remaining
    /// elements are left running detached. An empty input settles
    /// immediately with `Ok(vec![])` without starting anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::Task;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let items: Vec<i32> = (0..10).collect();
    ///     let task: Task<Vec<i32>, &str> = Task::traverse_par(items.clone(), Task::pure);
    ///     assert_eq!(task.run().await, Ok(items));
    /// }
    /// ```
    pub fn traverse_par<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_with_index_par(items, move |_, item| function(item))
    }

    /// Like [`traverse_par`](Self::traverse_par), with the element index
    /// passed to the step function.
    pub fn traverse_with_index_par<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let items = items.clone();
            let function = Arc::clone(&function);
            async move {
                let mut pending = FuturesUnordered::new();
                for (index, item) in items.into_iter().enumerate() {
                    let handle = tokio::spawn(function(index, item).invoke());
                    pending.push(async move { (index, settle(handle.await)) });
                }

                // Completion order decides which failure is surfaced; index
                // order decides where each success lands.
                let mut completed = Vec::with_capacity(pending.len());
                while let Some((index, outcome)) = pending.next().await {
                    completed.push((index, outcome?));
                }
                completed.sort_unstable_by_key(|(index, _)| *index);
                Ok(completed.into_iter().map(|(_, value)| value).collect())
            }
        })
    }

    /// Sequences already-built tasks one at a time, in input order.
    ///
    /// Equivalent to [`traverse_seq`](Self::traverse_seq) with the identity
    /// step.
    pub fn sequence_seq(tasks: Vec<Self>) -> Task<Vec<A>, E> {
        Self::traverse_seq(tasks, |task| task)
    }

    /// Sequences already-built tasks concurrently.
    ///
    /// Equivalent to [`traverse_par`](Self::traverse_par) with the identity
    /// step.
    pub fn sequence_par(tasks: Vec<Self>) -> Task<Vec<A>, E> {
        Self::traverse_par(tasks, |task| task)
    }
}

// =============================================================================
// Adapters from IO and Reader
// =============================================================================

impl<A: Send + 'static, E: Send + 'static> Task<A, E> {
    /// Lifts a synchronous effect into a task.
    ///
    /// Running the task invokes the `IO` synchronously and wraps its value
    /// as an immediately-available success. `IO` never fails, so neither
    /// does the lifted task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::{IO, Task};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<i32, &str> = Task::from_io(IO::new(|| 1));
    ///     assert_eq!(task.run().await, Ok(1));
    /// }
    /// ```
    pub fn from_io(io: IO<A>) -> Self {
        Task::new(move || {
            let io = io.clone();
            async move { Ok(io.run()) }
        })
    }

    /// Chains a synchronous-effect continuation after this task.
    ///
    /// Equivalent to `flat_map(|a| Task::from_io(function(a)))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::{IO, Task};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let task: Task<usize, &str> =
    ///         Task::pure("abc").flat_map_io(|s| IO::new(move || s.len()));
    ///     assert_eq!(task.run().await, Ok(3));
    /// }
    /// ```
    pub fn flat_map_io<B, F>(self, function: F) -> Task<B, E>
    where
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.flat_map(move |value| Task::from_io(function(value)))
    }

    /// Lifts an environment-reading computation into a task.
    ///
    /// Each run clones the environment and applies the reader to it as an
    /// immediately-available success. The environment is threaded read-only;
    /// the reader itself stays pure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferred::effect::{Reader, Task};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let reader: Reader<i32, i32> = Reader::new(|environment| environment * 2);
    ///     let task: Task<i32, &str> = Task::from_reader(reader, 21);
    ///     assert_eq!(task.run().await, Ok(42));
    /// }
    /// ```
    pub fn from_reader<R>(reader: Reader<R, A>, environment: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        Task::new(move || {
            let reader = reader.clone();
            let environment = environment.clone();
            async move { Ok(reader.run(environment)) }
        })
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<A, E> std::fmt::Display for Task<A, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Task>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_task() {
        let task: Task<i32, &str> = Task::pure(42);
        assert_eq!(format!("{task}"), "<Task>");
    }

    #[tokio::test]
    async fn test_task_pure_and_run() {
        let task: Task<i32, &str> = Task::pure(42);
        assert_eq!(task.run().await, Ok(42));
    }

    #[tokio::test]
    async fn test_task_new_and_run() {
        let task: Task<i32, &str> = Task::new(|| async { Ok(10 + 20) });
        assert_eq!(task.run().await, Ok(30));
    }

    #[tokio::test]
    async fn test_task_fail() {
        let task: Task<i32, &str> = Task::fail("boom");
        assert_eq!(task.run().await, Err("boom"));
    }

    #[tokio::test]
    async fn test_task_fmap() {
        let task: Task<i32, &str> = Task::pure(21).fmap(|x| x * 2);
        assert_eq!(task.run().await, Ok(42));
    }

    #[tokio::test]
    async fn test_task_fmap_skips_function_on_failure() {
        let task: Task<i32, &str> = Task::fail("boom");
        assert_eq!(task.fmap(|x| x * 2).run().await, Err("boom"));
    }

    #[tokio::test]
    async fn test_task_flat_map() {
        let task: Task<i32, &str> = Task::pure(10).flat_map(|x| Task::pure(x * 2));
        assert_eq!(task.run().await, Ok(20));
    }

    #[tokio::test]
    async fn test_task_and_then() {
        let task: Task<i32, &str> = Task::pure(10).and_then(|x| Task::pure(x + 5));
        assert_eq!(task.run().await, Ok(15));
    }

    #[tokio::test]
    async fn test_task_then() {
        let task: Task<i32, &str> = Task::pure(10).then(Task::pure(20));
        assert_eq!(task.run().await, Ok(20));
    }

    #[tokio::test]
    async fn test_task_map2() {
        let task: Task<i32, &str> = Task::pure(10).map2(Task::pure(20), |a, b| a + b);
        assert_eq!(task.run().await, Ok(30));
    }

    #[tokio::test]
    async fn test_task_zip() {
        let task: Task<(i32, i32), &str> = Task::pure(10).zip(Task::pure(20));
        assert_eq!(task.run().await, Ok((10, 20)));
    }

    #[tokio::test]
    async fn test_task_zip_par() {
        let task: Task<(i32, i32), &str> = Task::pure(10).zip_par(Task::pure(20));
        assert_eq!(task.run().await, Ok((10, 20)));
    }

    #[tokio::test]
    async fn test_task_flatten() {
        let nested: Task<Task<&str, &str>, &str> = Task::pure(Task::pure("a"));
        assert_eq!(nested.flatten().run().await, Ok("a"));
    }

    #[tokio::test]
    async fn test_task_is_reinvokable() {
        let task: Task<i32, &str> = Task::pure(1);
        assert_eq!(task.run().await, Ok(1));
        assert_eq!(task.run().await, Ok(1));
    }
}
