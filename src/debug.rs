/// Returns whether development checks are active for this build.
///
/// [`assert`] and [`print`] run the same logic in every build; this only
/// decides whether they emit anything.
#[must_use]
pub const fn enabled() -> bool {
    cfg!(debug_assertions)
}

/// Logs `message` at error level when `condition` does not hold.
///
/// Never panics. Returns `condition` so call sites can count failures in tests.
pub fn assert(condition: bool, message: &str) -> bool {
    if enabled() && !condition {
        tracing::error!(reason = message, "debug assertion failed");
    }
    condition
}

/// Logs `message` at debug level.
pub fn print(message: &str) {
    if enabled() {
        tracing::debug!("{message}");
    }
}
