//! Static taxonomy of expert workflow phases. The catalog is process-wide
//! constant state: it orders and groups expert-authored steps and seeds the
//! phase selection control, nothing more.

use serde::Serialize;

/// One `(value, label)` entry of the phase catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Ordered catalog of the five canonical phases.
pub const EXPERT_STEP_PHASES: [PhaseOption; 5] = [
    PhaseOption {
        value: "client_intake",
        label: "Client Intake",
    },
    PhaseOption {
        value: "application_preparation",
        label: "Application Preparation",
    },
    PhaseOption {
        value: "application_submission",
        label: "Application Submission",
    },
    PhaseOption {
        value: "survey_preparation",
        label: "Survey Preparation",
    },
    PhaseOption {
        value: "survey_guidance",
        label: "Survey Guidance",
    },
];

/// Phase preselected for newly created expert steps.
pub const DEFAULT_EXPERT_STEP_PHASE: &str = EXPERT_STEP_PHASES[0].value;

/// Phase values in display rank order.
pub const EXPERT_STEP_PHASE_ORDER: [&str; 5] = [
    EXPERT_STEP_PHASES[0].value,
    EXPERT_STEP_PHASES[1].value,
    EXPERT_STEP_PHASES[2].value,
    EXPERT_STEP_PHASES[3].value,
    EXPERT_STEP_PHASES[4].value,
];

/// Rank of a canonical phase value, `None` for legacy strings.
pub fn phase_rank(value: &str) -> Option<usize> {
    EXPERT_STEP_PHASE_ORDER
        .iter()
        .position(|phase| *phase == value)
}

/// Stable sort by phase rank. Steps carrying a legacy phase name sort after
/// every canonical phase, keeping their encounter order among themselves.
pub fn sort_by_phase<T, F>(items: &mut [T], phase_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| phase_rank(phase_of(item)).unwrap_or(usize::MAX));
}
