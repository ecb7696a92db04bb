//! The response transformer extension point.
//!
//! A host invokes every applicable transformer after it has produced the stub
//! response and before that response reaches the client.

use crate::response::Response;
use crate::serve_event::ServeEvent;

/// A named callback that rewrites a stub response.
///
/// Implementations are shared across request-handling threads, so they must
/// not hold unsynchronized mutable state. `transform` has no error channel: a
/// failure is a panic, and the host's dispatch policy decides what happens to
/// the request (see [`crate::registry::FailurePolicy`]).
pub trait ResponseTransformer: Send + Sync {
    /// Produce a new response from `response`. The input is left untouched.
    fn transform(&self, response: &Response, event: &ServeEvent) -> Response;

    /// Stable, non-empty identifier. Stubs reference a transformer by this name.
    fn name(&self) -> &str;

    /// `true` runs on every matched stub; `false` only on stubs that reference
    /// [`ResponseTransformer::name`]. Read once at registration.
    fn apply_globally(&self) -> bool {
        false
    }
}

/// Last path segment of `T`'s type name, e.g. `SelfNamedTransformer`.
pub fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Generic arguments may contain `::` themselves.
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    struct Local;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn test_simple_type_name_strips_module_path() {
        assert_eq!(simple_type_name::<Local>(), "Local");
        assert_eq!(simple_type_name::<String>(), "String");
    }

    #[test]
    fn test_simple_type_name_ignores_generic_arguments() {
        assert_eq!(
            simple_type_name::<Wrapper<std::time::Duration>>(),
            "Wrapper"
        );
    }
}
