//! Host-interface contracts (§6.1): the traits an embedder implements to wire
//! variables, properties, methods, and operator overloads into the
//! evaluation core. Kept as narrow traits rather than one monolithic `Host`
//! object, the same way the teacher splits `VmTracer`/`PrintWriter` as
//! separate pluggable seams instead of a single do-everything interface.

use crate::errors::{EvalError, EvalResult};
use crate::operators::Operator;
use crate::value::Value;

/// Top-level variable lookup/assignment (§6.1).
pub trait Context {
    /// # Errors
    /// Implementations may return `Err` for a backing store failure; a
    /// missing name is `Ok(None)`, not an error.
    fn get(&self, name: &str) -> EvalResult<Option<Value>>;

    /// # Errors
    /// `Err` if `name` is not assignable in this context.
    fn set(&mut self, name: &str, value: Value) -> EvalResult<()>;

    fn has(&self, name: &str) -> bool;

    /// Resolves a `namespace:name` pragma-qualified reference (§6.2
    /// `NAMESPACE_PRAGMA`). Hosts that don't register namespaces can accept
    /// the default, which always reports unresolved.
    fn resolve_namespace(&self, _namespace: &str) -> Option<&dyn Namespace> {
        None
    }
}

/// A registered namespace (§6.2): a second `Context`-like lookup scope keyed
/// by a pragma-declared prefix, e.g. `math:abs(x)`.
pub trait Namespace {
    fn invoke(&self, method: &str, args: &[Value]) -> EvalResult<Value>;
}

/// Reflective access into host/`Host`-kind values (§6.1): properties, method
/// dispatch, and constructors. The evaluation core never matches on a
/// `Host` payload directly — only through this trait.
pub trait Introspection {
    /// # Errors
    /// `Property` error on an unknown or inaccessible property.
    fn property_get(&self, target: &Value, name: &str) -> EvalResult<Value>;

    /// # Errors
    /// `Property` error on an unknown or read-only property.
    fn property_set(&self, target: &Value, name: &str, value: Value) -> EvalResult<()>;

    /// # Errors
    /// `Method` error when no overload matches `name`/`args`.
    fn method_invoke(&self, target: &Value, name: &str, args: &[Value]) -> EvalResult<Value>;

    /// # Errors
    /// `Method` error when no constructor matches `class_name`/`args`.
    fn construct(&self, class_name: &str, args: &[Value]) -> EvalResult<Value>;
}

/// Sentinel returned by a `try`-construct body when the host wants the
/// surrounding `try` to treat the call as failed without raising a concrete
/// [`EvalError`] (§6.1): e.g. a host function signaling "no result" distinct
/// from `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFailed;

/// Host-supplied operator overload hook (§6.1): consulted when a built-in
/// operator's operands aren't values the core's own ladder knows how to
/// combine (e.g. two `Host` values, or a `Host` value and a number).
/// Built-in semantics are always tried first; this is the fallback, not an
/// override — §6.1: "default-to-builtin: only consulted when the built-in
/// ladder has no defined result for the operand kinds".
pub trait ArithmeticExt {
    /// # Errors
    /// Returns `Ok(None)` (not an error) when this hook declines to handle
    /// the operator/operand combination, deferring to `Arithmetic` failure
    /// upstream; returns `Err` only for a genuine overload failure.
    fn overload(&self, op: Operator, operands: &[Value]) -> EvalResult<Option<Value>>;
}

/// Blanket `ArithmeticExt` that never overloads anything, the default for
/// hosts that don't extend the built-in arithmetic ladder.
pub struct NoArithmeticExt;

impl ArithmeticExt for NoArithmeticExt {
    fn overload(&self, _op: Operator, _operands: &[Value]) -> EvalResult<Option<Value>> {
        Ok(None)
    }
}

/// Diagnostic sink for the `silent` option (§4.6): when set, errors that
/// would otherwise abort evaluation are reported here and evaluation
/// continues with `Null` in their place.
pub trait DiagnosticSink {
    fn report(&mut self, error: &EvalError);
}

/// A [`DiagnosticSink`] that discards everything, for hosts that set
/// `silent` but don't care to observe what was swallowed.
pub struct NullDiagnosticSink;

impl DiagnosticSink for NullDiagnosticSink {
    fn report(&mut self, _error: &EvalError) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arithmetic_ext_always_declines() {
        let ext = NoArithmeticExt;
        let result = ext.overload(Operator::Add, &[Value::I32(1), Value::I32(2)]).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn null_diagnostic_sink_accepts_without_panicking() {
        let mut sink = NullDiagnosticSink;
        sink.report(&EvalError::arithmetic("test"));
    }
}
