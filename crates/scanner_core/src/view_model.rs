use crate::locale::Language;
use crate::payload::AnalysisPayload;
use crate::state::LifecycleState;

/// Read-only projection of the session consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub lifecycle: LifecycleState,
    pub asset_input: String,
    pub language: Language,
    /// Present iff the lifecycle is `Complete`.
    pub report: Option<AnalysisPayload>,
    /// Present iff the lifecycle is `Error`.
    pub error_message: Option<String>,
    /// Cosmetic phase advances still scheduled for the active scan.
    pub pending_phases: usize,
    pub can_submit: bool,
    pub can_reset: bool,
    pub dirty: bool,
}
