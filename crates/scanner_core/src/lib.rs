//! Scanner core: pure analysis-lifecycle state machine and view-model helpers.
mod effect;
mod locale;
mod msg;
mod payload;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use locale::{phase_caption, scan_log, text, Language, TextKey};
pub use msg::Msg;
pub use payload::{
    AnalysisPayload, MarketLevels, MarketStructure, Signal, Technicals, TradeSetup,
};
pub use state::{
    AppState, Generation, LifecycleState, PHASE_LEVELS_DELAY_MS, PHASE_STRUCTURE_DELAY_MS,
};
pub use update::update;
pub use view_model::AppViewModel;
