use cortex_core::{ConflictKind, OpError, OpResult};
use cortex_models::{CollaborationStatus, ProjectStatus};

/// What a store has to do to honor a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Already in the target status; nothing to write
    Unchanged,
    /// Write the new status and, for terminal targets, cascade it
    Apply {
        to: ProjectStatus,
        cascade: Option<CollaborationStatus>,
    },
}

/// `open -> active -> {completed, dropped}`, with `open` allowed to close
/// directly. Nothing leaves a terminal status.
pub struct ProjectLifecycle;

impl ProjectLifecycle {
    pub fn can_transition(from: ProjectStatus, to: ProjectStatus) -> bool {
        use ProjectStatus::*;
        matches!(
            (from, to),
            (Open, Active) | (Open | Active, Completed) | (Open | Active, Dropped)
        )
    }

    /// Plan a transition, rejecting unreachable targets
    ///
    /// Asking for the current status is a no-op rather than an error, so
    /// repeating a transition is safe.
    pub fn plan(from: ProjectStatus, to: ProjectStatus) -> OpResult<TransitionPlan> {
        if from == to {
            return Ok(TransitionPlan::Unchanged);
        }
        if !Self::can_transition(from, to) {
            return Err(OpError::invalid_transition(from, to));
        }
        Ok(TransitionPlan::Apply {
            to,
            cascade: CollaborationStatus::cascaded_from(to),
        })
    }

    /// Descriptive fields stay editable until the project closes
    pub fn ensure_editable(status: ProjectStatus) -> Result<(), ConflictKind> {
        if status.is_terminal() {
            Err(ConflictKind::ProjectClosed(status.to_string()))
        } else {
            Ok(())
        }
    }

    /// Whether accepting a request moves a project in `status` to `active`
    pub fn activates_on_accept(status: ProjectStatus) -> bool {
        status == ProjectStatus::Open
    }
}
