/// Destructive actions parked behind the two-step confirmation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteStudent { student_id: String },
    DeleteMedicalRecord { student_id: String, index: usize },
    DeleteAcademicResult { student_id: String, index: usize },
}

/// Idle -> Pending -> (accepted | cancelled) -> Idle. A new request while
/// one is pending replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    Pending {
        message: String,
        action: PendingAction,
    },
}

impl ConfirmState {
    pub fn request(&mut self, message: impl Into<String>, action: PendingAction) {
        *self = ConfirmState::Pending {
            message: message.into(),
            action,
        };
    }

    /// Accept: hand the pending action to the caller and return to idle.
    pub fn take(&mut self) -> Option<PendingAction> {
        match std::mem::take(self) {
            ConfirmState::Pending { action, .. } => Some(action),
            ConfirmState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = ConfirmState::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmState::Pending { .. })
    }
}
