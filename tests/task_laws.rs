//! Property-based tests for Task type class laws.
//!
//! This module verifies that the Task type satisfies:
//!
//! - the Functor laws (identity, composition),
//! - the Applicative laws (identity, homomorphism, interchange,
//!   composition) — separately for the sequential `apply` and the parallel
//!   `apply_par`, since the two disciplines share `pure`/`fmap` but differ
//!   in how operands are scheduled,
//! - the Monad laws (left identity, right identity, associativity).

use deferred::effect::Task;
use proptest::prelude::*;

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Functor Identity Law: fmap(id) == id
    #[test]
    fn prop_task_functor_identity(value: i32) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.fmap(|x| x).run().await
        });

        prop_assert_eq!(left_result, Ok(value));
    }

    /// Functor Composition Law: fmap(f . g) == fmap(f) . fmap(g)
    #[test]
    fn prop_task_functor_composition(value: i32) {
        let add_one = |x: i32| x.wrapping_add(1);
        let double = |x: i32| x.wrapping_mul(2);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.fmap(move |x| double(add_one(x))).run().await
        });
        let right_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.fmap(add_one).fmap(double).run().await
        });

        prop_assert_eq!(left_result, right_result);
    }
}

// =============================================================================
// Applicative Laws - Sequential Discipline
// =============================================================================

proptest! {
    /// Applicative Identity Law: pure(id).ap(v) == v
    #[test]
    fn prop_task_seq_applicative_identity(value: i32) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.apply(Task::pure(|x: i32| x)).run().await
        });

        prop_assert_eq!(left_result, Ok(value));
    }

    /// Applicative Homomorphism Law: pure(f).ap(pure(x)) == pure(f(x))
    #[test]
    fn prop_task_seq_applicative_homomorphism(value: i32) {
        let double = |x: i32| x.wrapping_mul(2);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.apply(Task::pure(double)).run().await
        });
        let right_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(double(value));
            task.run().await
        });

        prop_assert_eq!(left_result, right_result);
    }

    /// Applicative Interchange Law: u.ap(pure(y)) == pure(|f| f(y)).ap(u)
    #[test]
    fn prop_task_seq_applicative_interchange(value: i32) {
        let add_one: fn(i32) -> i32 = |x| x.wrapping_add(1);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let function_task: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            Task::pure(value).apply(function_task).run().await
        });
        let right_result = runtime.block_on(async {
            let function_task: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            function_task
                .apply(Task::pure(move |f: fn(i32) -> i32| f(value)))
                .run()
                .await
        });

        prop_assert_eq!(left_result, right_result);
    }

    /// Applicative Composition Law:
    /// w.ap(v).ap(u) == w.ap(v.ap(u.fmap(compose)))
    #[test]
    fn prop_task_seq_applicative_composition(value: i32) {
        let add_one: fn(i32) -> i32 = |x| x.wrapping_add(1);
        let double: fn(i32) -> i32 = |x| x.wrapping_mul(2);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let u: Task<fn(i32) -> i32, &str> = Task::pure(double);
            let v: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            Task::pure(value).apply(v).apply(u).run().await
        });
        let right_result = runtime.block_on(async {
            let u: Task<fn(i32) -> i32, &str> = Task::pure(double);
            let v: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            let composed = v.apply(u.fmap(|outer: fn(i32) -> i32| {
                move |inner: fn(i32) -> i32| move |x: i32| outer(inner(x))
            }));
            Task::pure(value).apply(composed).run().await
        });

        prop_assert_eq!(left_result, right_result);
    }
}

// =============================================================================
// Applicative Laws - Parallel Discipline
// =============================================================================

proptest! {
    /// Applicative Identity Law under the parallel discipline.
    #[test]
    fn prop_task_par_applicative_identity(value: i32) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.apply_par(Task::pure(|x: i32| x)).run().await
        });

        prop_assert_eq!(left_result, Ok(value));
    }

    /// Applicative Homomorphism Law under the parallel discipline.
    #[test]
    fn prop_task_par_applicative_homomorphism(value: i32) {
        let double = |x: i32| x.wrapping_mul(2);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.apply_par(Task::pure(double)).run().await
        });
        let right_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(double(value));
            task.run().await
        });

        prop_assert_eq!(left_result, right_result);
    }

    /// Applicative Interchange Law under the parallel discipline.
    #[test]
    fn prop_task_par_applicative_interchange(value: i32) {
        let add_one: fn(i32) -> i32 = |x| x.wrapping_add(1);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let function_task: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            Task::pure(value).apply_par(function_task).run().await
        });
        let right_result = runtime.block_on(async {
            let function_task: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            function_task
                .apply_par(Task::pure(move |f: fn(i32) -> i32| f(value)))
                .run()
                .await
        });

        prop_assert_eq!(left_result, right_result);
    }

    /// Applicative Composition Law under the parallel discipline.
    #[test]
    fn prop_task_par_applicative_composition(value: i32) {
        let add_one: fn(i32) -> i32 = |x| x.wrapping_add(1);
        let double: fn(i32) -> i32 = |x| x.wrapping_mul(2);

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let u: Task<fn(i32) -> i32, &str> = Task::pure(double);
            let v: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            Task::pure(value).apply_par(v).apply_par(u).run().await
        });
        let right_result = runtime.block_on(async {
            let u: Task<fn(i32) -> i32, &str> = Task::pure(double);
            let v: Task<fn(i32) -> i32, &str> = Task::pure(add_one);
            let composed = v.apply_par(u.fmap(|outer: fn(i32) -> i32| {
                move |inner: fn(i32) -> i32| move |x: i32| outer(inner(x))
            }));
            Task::pure(value).apply_par(composed).run().await
        });

        prop_assert_eq!(left_result, right_result);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: pure(a).flat_map(f) == f(a)
    #[test]
    fn prop_task_monad_left_identity(value: i32) {
        let function = |n: i32| -> Task<i32, &'static str> { Task::pure(n.wrapping_mul(2)) };

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            Task::pure(value).flat_map(function).run().await
        });
        let right_result = runtime.block_on(async {
            function(value).run().await
        });

        prop_assert_eq!(left_result, right_result);
    }

    /// Right Identity Law: m.flat_map(pure) == m
    #[test]
    fn prop_task_monad_right_identity(value: i32) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            let task: Task<i32, &str> = Task::pure(value);
            task.flat_map(Task::pure).run().await
        });

        prop_assert_eq!(left_result, Ok(value));
    }

    /// Associativity Law:
    /// m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_task_monad_associativity(value: i32) {
        let function1 = |n: i32| -> Task<i32, &'static str> { Task::pure(n.wrapping_add(1)) };
        let function2 = |n: i32| -> Task<i32, &'static str> { Task::pure(n.wrapping_mul(2)) };

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left_result = runtime.block_on(async {
            Task::pure(value)
                .flat_map(function1)
                .flat_map(function2)
                .run()
                .await
        });
        let right_result = runtime.block_on(async {
            Task::pure(value)
                .flat_map(move |x| function1(x).flat_map(function2))
                .run()
                .await
        });

        prop_assert_eq!(left_result, right_result);
    }
}
