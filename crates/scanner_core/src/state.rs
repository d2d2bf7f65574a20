use crate::locale::Language;
use crate::payload::AnalysisPayload;
use crate::view_model::AppViewModel;

/// Session generation counter. Timer and settlement callbacks carry the
/// generation they were scheduled under; stale generations are ignored.
pub type Generation = u64;

/// Offset from scan start to the structure-detection phase, in milliseconds.
pub const PHASE_STRUCTURE_DELAY_MS: u64 = 1500;
/// Offset from scan start to the level-calculation phase, in milliseconds.
pub const PHASE_LEVELS_DELAY_MS: u64 = 3000;

/// Lifecycle of the single in-flight analysis request.
///
/// The ordering is meaningful: scan-log lines become visible once the
/// lifecycle has reached their minimum state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    ScanningMarket,
    AnalyzingStructure,
    CalculatingLevels,
    Complete,
    Error,
}

impl LifecycleState {
    /// True while a scan is outstanding (between submit and settlement).
    pub fn is_scanning(self) -> bool {
        matches!(
            self,
            LifecycleState::ScanningMarket
                | LifecycleState::AnalyzingStructure
                | LifecycleState::CalculatingLevels
        )
    }

    /// True in the states that accept a new submission.
    pub fn accepts_submit(self) -> bool {
        matches!(self, LifecycleState::Idle | LifecycleState::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    asset_input: String,
    language: Language,
    lifecycle: LifecycleState,
    report: Option<AnalysisPayload>,
    error_message: Option<String>,
    pending_phases: Vec<LifecycleState>,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn asset_input(&self) -> &str {
        &self.asset_input
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            lifecycle: self.lifecycle,
            asset_input: self.asset_input.clone(),
            language: self.language,
            report: self.report.clone(),
            error_message: self.error_message.clone(),
            pending_phases: self.pending_phases.len(),
            can_submit: self.lifecycle.accepts_submit(),
            can_reset: self.lifecycle == LifecycleState::Error,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The shell uses this to coalesce
    /// renders.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.asset_input != text {
            self.asset_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.dirty = true;
        }
    }

    /// Starts a new scan: clears any prior outcome, pends both cosmetic
    /// phases, and bumps the generation. Returns the new generation.
    pub(crate) fn begin_scan(&mut self) -> Generation {
        self.report = None;
        self.error_message = None;
        self.lifecycle = LifecycleState::ScanningMarket;
        self.pending_phases = vec![
            LifecycleState::AnalyzingStructure,
            LifecycleState::CalculatingLevels,
        ];
        self.generation += 1;
        self.dirty = true;
        self.generation
    }

    /// Applies a cosmetic phase advance. Stale generations, settled scans,
    /// and phases no longer pending are all ignored.
    pub(crate) fn advance_phase(&mut self, generation: Generation, phase: LifecycleState) -> bool {
        if generation != self.generation || !self.lifecycle.is_scanning() {
            return false;
        }
        if !self.pending_phases.contains(&phase) || phase <= self.lifecycle {
            return false;
        }
        self.lifecycle = phase;
        // A phase reveal implies every earlier reveal; drop them too.
        self.pending_phases.retain(|pending| *pending > phase);
        self.dirty = true;
        true
    }

    /// Stores the analysis result and completes the scan. Pending phase
    /// timers are cleared so none can fire behind the final state.
    pub(crate) fn settle_success(
        &mut self,
        generation: Generation,
        payload: AnalysisPayload,
    ) -> bool {
        if generation != self.generation || !self.lifecycle.is_scanning() {
            return false;
        }
        self.pending_phases.clear();
        self.report = Some(payload);
        self.lifecycle = LifecycleState::Complete;
        self.dirty = true;
        true
    }

    /// Stores the localized failure message and moves to the error state.
    pub(crate) fn settle_failure(&mut self, generation: Generation, message: String) -> bool {
        if generation != self.generation || !self.lifecycle.is_scanning() {
            return false;
        }
        self.pending_phases.clear();
        self.error_message = Some(message);
        self.lifecycle = LifecycleState::Error;
        self.dirty = true;
        true
    }

    /// Returns from the error state to idle. A no-op anywhere else.
    pub(crate) fn reset(&mut self) -> bool {
        if self.lifecycle != LifecycleState::Error {
            return false;
        }
        self.error_message = None;
        self.lifecycle = LifecycleState::Idle;
        self.dirty = true;
        true
    }
}
