//! Error types for subscription composition.

/// Errors raised when composing subscriptions from possibly absent inputs.
///
/// These signal programming errors at the call site. Nothing is released when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    /// The list of subscriptions to combine is absent.
    #[error("subscription list is absent")]
    AbsentList,

    /// The subscription at the given index of the list is absent.
    #[error("subscription at index {0} is absent")]
    AbsentElement(usize),

    /// The operand of `and` is absent.
    #[error("`and` operand is absent")]
    AbsentOperand,
}
