use serde::{Deserialize, Serialize};

/// A two-state guard on a semester or a single course placement.
///
/// Semester locks and course locks are tracked independently: locking a
/// semester never changes the locks of the courses inside it.
///
/// Serialized as a plain boolean (`true` when locked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Lock {
    /// Structural mutation is permitted.
    #[default]
    Unlocked,
    /// Structural mutation is rejected.
    Locked,
}

impl Lock {
    /// Whether the guard is engaged.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Transition to the requested state.
    ///
    /// Returns `true` if the state changed.
    pub const fn set(&mut self, locked: bool) -> bool {
        let changed = self.is_locked() != locked;
        *self = Self::from_bool(locked);
        changed
    }

    const fn from_bool(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }
}

impl From<bool> for Lock {
    fn from(locked: bool) -> Self {
        Self::from_bool(locked)
    }
}

impl From<Lock> for bool {
    fn from(lock: Lock) -> Self {
        lock.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::Lock;

    #[test]
    fn transitions_report_changes() {
        let mut lock = Lock::default();
        assert!(!lock.is_locked());
        assert!(lock.set(true));
        assert!(lock.is_locked());
        assert!(!lock.set(true), "locking twice is idempotent");
        assert!(lock.set(false));
        assert_eq!(lock, Lock::Unlocked);
    }

    #[test]
    fn serializes_as_bool() {
        assert_eq!(serde_json::to_string(&Lock::Locked).unwrap(), "true");
        let lock: Lock = serde_json::from_str("false").unwrap();
        assert_eq!(lock, Lock::Unlocked);
    }
}
