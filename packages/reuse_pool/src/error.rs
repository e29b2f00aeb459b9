use thiserror::Error;

/// Errors returned by pool operations.
///
/// The pool surface is deliberately almost total: `get()` always succeeds and by-value
/// `release()` cannot fail because the type system rules out an absent instance. The
/// only fallible operation is [`try_release()`][crate::ReusePool::try_release], which
/// accepts an `Option<E>` and rejects `None` without touching any pool state.
///
/// Allocation failure during growth is not represented here; it is fatal and
/// propagates as the standard library's allocation failure behavior.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum PoolError {
    /// An absent instance was offered for release.
    ///
    /// Returned by [`try_release(None)`][crate::ReusePool::try_release]. The pool is
    /// left exactly as it was.
    #[error("an absent instance cannot be released back into the pool")]
    MissingInstance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let message = PoolError::MissingInstance.to_string();
        assert!(message.contains("absent instance"));
    }
}
