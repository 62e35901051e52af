//! Ordered-fallback combinator.

use std::future::Future;

/// Try candidates left to right; the first `Some` wins and later
/// candidates are never attempted. `None` from a candidate means
/// "no match, keep going" rather than an error.
pub async fn first_match<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut try_one: F,
) -> Option<T>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for candidate in candidates {
        if let Some(hit) = try_one(candidate).await {
            return Some(hit);
        }
    }
    None
}
