//! License application workflow: domain rows, the close-application
//! lifecycle, the expert step phase registry, and the HTTP router that
//! composes the role guard around each entry point.

pub mod domain;
pub mod lifecycle;
pub mod phases;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, ApplicationStatus, LicenseApplication};
pub use lifecycle::{ApplicationLifecycle, CloseError, CloseOutcome, CloseReceipt};
pub use phases::{
    phase_rank, sort_by_phase, PhaseOption, DEFAULT_EXPERT_STEP_PHASE, EXPERT_STEP_PHASES,
    EXPERT_STEP_PHASE_ORDER,
};
pub use router::{licensing_router, LicensingState};
