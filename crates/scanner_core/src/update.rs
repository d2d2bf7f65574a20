use crate::locale::{text, TextKey};
use crate::state::{LifecycleState, PHASE_LEVELS_DELAY_MS, PHASE_STRUCTURE_DELAY_MS};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            state.set_input(input);
            Vec::new()
        }
        Msg::LanguageSelected(language) => {
            // Language is independent of the lifecycle: an in-progress scan
            // keeps running and its timers stay scheduled.
            state.set_language(language);
            Vec::new()
        }
        Msg::AssetSubmitted => {
            let asset = state.asset_input().trim().to_string();
            if asset.is_empty() {
                return (state, Vec::new());
            }
            // Single-flight: only idle and error accept a new submission.
            if !state.lifecycle().accepts_submit() {
                return (state, Vec::new());
            }

            let generation = state.begin_scan();
            let language = state.language();
            vec![
                Effect::BeginAnalysis {
                    generation,
                    asset,
                    language,
                },
                Effect::SchedulePhase {
                    generation,
                    phase: LifecycleState::AnalyzingStructure,
                    delay_ms: PHASE_STRUCTURE_DELAY_MS,
                },
                Effect::SchedulePhase {
                    generation,
                    phase: LifecycleState::CalculatingLevels,
                    delay_ms: PHASE_LEVELS_DELAY_MS,
                },
            ]
        }
        Msg::PhaseElapsed { generation, phase } => {
            state.advance_phase(generation, phase);
            Vec::new()
        }
        Msg::AnalysisCompleted {
            generation,
            payload,
        } => {
            if state.settle_success(generation, payload) {
                vec![Effect::CancelPhases { generation }]
            } else {
                Vec::new()
            }
        }
        Msg::AnalysisFailed { generation } => {
            // The message is chosen by the language current at failure time,
            // not the one active when the scan started.
            let message = text(TextKey::ScanFailedBody, state.language()).to_string();
            if state.settle_failure(generation, message) {
                vec![Effect::CancelPhases { generation }]
            } else {
                Vec::new()
            }
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
