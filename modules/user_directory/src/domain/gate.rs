use crate::domain::error::DomainError;

/// Two-step guard in front of a destructive operation.
///
/// `request` arms the gate with a target; only `confirm` hands the target
/// back for execution. `cancel` disarms it without effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationGate<K> {
    Closed,
    Pending(K),
}

impl<K> Default for ConfirmationGate<K> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<K> ConfirmationGate<K> {
    /// Arm the gate. A target that was already pending is replaced.
    pub fn request(&mut self, target: K) {
        *self = Self::Pending(target);
    }

    /// Release the pending target and close the gate.
    pub fn confirm(&mut self) -> Result<K, DomainError> {
        match std::mem::take(self) {
            Self::Pending(target) => Ok(target),
            Self::Closed => Err(DomainError::NoPendingDelete),
        }
    }

    /// Close the gate; returns the dropped target, if any.
    pub fn cancel(&mut self) -> Option<K> {
        match std::mem::take(self) {
            Self::Pending(target) => Some(target),
            Self::Closed => None,
        }
    }

    pub fn pending(&self) -> Option<&K> {
        match self {
            Self::Pending(target) => Some(target),
            Self::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}
