use std::error::Error;

/// Renders an error and all of its `source()`s, one cause per line.
///
/// ```
/// use storefront_core::error_handling::format_error_chain;
/// use storefront_core::CoreError;
///
/// let err = CoreError::not_found("p1");
/// assert_eq!(format_error_chain(&err), "product not found: p1");
/// ```
pub fn format_error_chain<E: Error + ?Sized>(error: &E) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();

    while let Some(err) = source {
        chain.push(format!("  caused by: {}", err));
        source = err.source();
    }

    chain.join("\n")
}

/// Reports an unrecoverable-at-this-point failure with its full chain.
pub fn log_error<E: Error + ?Sized>(context: &str, error: &E) {
    let error_chain = format_error_chain(error);
    tracing::error!(
        context = context,
        error = %error_chain,
        "error occurred"
    );
}

/// Same as [`log_error`], for failures that were recovered locally.
pub fn log_warning<E: Error + ?Sized>(context: &str, error: &E) {
    let error_chain = format_error_chain(error);
    tracing::warn!(
        context = context,
        error = %error_chain,
        "recovered from error"
    );
}
