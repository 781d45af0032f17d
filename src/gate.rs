use crate::notify::Notify;

/// Checks a precondition, emitting a diagnostic when it does not hold.
///
/// Returns the condition unchanged. A false condition emits exactly one
/// `"Gate failed: {message}"` line on `notify`; a true condition emits
/// nothing. The gate never raises: a step that wants a failed gate to stop
/// the workflow must turn the `false` into an error itself.
///
/// # Examples
///
/// ```
/// use kumiko::{gate, MemoryNotify};
///
/// let notify = MemoryNotify::new();
///
/// assert!(gate(&notify, true, "input present"));
/// assert!(!gate(&notify, false, "input present"));
/// assert_eq!(notify.messages(), vec!["Gate failed: input present".to_string()]);
/// ```
pub fn gate(notify: &dyn Notify, condition: bool, message: &str) -> bool {
    if !condition {
        notify.emit(&format!("Gate failed: {message}"));
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotify;

    #[test]
    fn test_failed_gate_emits_once() {
        let notify = MemoryNotify::new();
        assert!(!gate(&notify, false, "x"));

        let messages = notify.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("x"));
        assert_eq!(messages[0], "Gate failed: x");
    }

    #[test]
    fn test_passing_gate_is_silent() {
        let notify = MemoryNotify::new();
        assert!(gate(&notify, true, "x"));
        assert!(notify.messages().is_empty());
    }
}
