use crate::locale::Language;
use crate::state::{Generation, LifecycleState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the external analysis call for the active scan.
    BeginAnalysis {
        generation: Generation,
        asset: String,
        language: Language,
    },
    /// Schedule a cosmetic phase advance at a fixed offset from scan start.
    SchedulePhase {
        generation: Generation,
        phase: LifecycleState,
        delay_ms: u64,
    },
    /// Drop any timers still scheduled for the generation. Idempotent.
    CancelPhases { generation: Generation },
}
