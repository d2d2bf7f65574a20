use crate::locale::Language;
use crate::payload::AnalysisPayload;
use crate::state::{Generation, LifecycleState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the asset input box.
    InputChanged(String),
    /// User submitted the current asset input for analysis.
    AssetSubmitted,
    /// User switched the interface language.
    LanguageSelected(Language),
    /// User clicked Reset on the error panel.
    ResetClicked,
    /// A cosmetic phase timer fired.
    PhaseElapsed {
        generation: Generation,
        phase: LifecycleState,
    },
    /// The external analysis call resolved with a payload.
    AnalysisCompleted {
        generation: Generation,
        payload: AnalysisPayload,
    },
    /// The external analysis call failed. The cause is logged at the
    /// boundary; only the generic localized message reaches the user.
    AnalysisFailed { generation: Generation },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
