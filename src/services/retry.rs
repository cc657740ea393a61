// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bounded retry for fallible async operations.

use std::future::Future;

/// Run `op` up to `attempts` times, returning the first success.
///
/// `op` receives the 1-based attempt number. `on_failure` is called after
/// every failed attempt, including the last. There is no backoff between
/// attempts. An `attempts` of zero still runs once.
pub async fn retry<T, E, F, Fut, L>(attempts: u32, mut op: F, mut on_failure: L) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    L: FnMut(u32, &E),
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                on_failure(attempt, &err);
                if attempt >= attempts {
                    return Err(err);
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_returns_first_success() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = retry(
            3,
            |attempt| {
                calls.set(calls.get() + 1);
                async move {
                    if attempt < 2 {
                        Err(format!("fail {attempt}"))
                    } else {
                        Ok(attempt)
                    }
                }
            },
            |_, _| {},
        )
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_attempts_with_last_error() {
        let mut failures = Vec::new();
        let result: Result<(), String> = retry(
            3,
            |attempt| async move { Err(format!("fail {attempt}")) },
            |attempt, err: &String| failures.push((attempt, err.clone())),
        )
        .await;

        assert_eq!(result, Err("fail 3".to_string()));
        assert_eq!(
            failures,
            vec![
                (1, "fail 1".to_string()),
                (2, "fail 2".to_string()),
                (3, "fail 3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_attempts_runs_once() {
        let calls = Cell::new(0);
        let result: Result<(), &str> = retry(
            0,
            |_| {
                calls.set(calls.get() + 1);
                async { Err("nope") }
            },
            |_, _| {},
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
