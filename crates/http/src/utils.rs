//! Internal helper macros.

/// Returns `Err($error)` early unless `$predicate` holds.
///
/// ```ignore
/// ensure!(!name.is_empty(), SendError::invalid_header("empty header name"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
