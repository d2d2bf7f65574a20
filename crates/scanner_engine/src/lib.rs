//! Scanner engine: the external inference call and its dispatch loop.
mod client;
mod engine;
mod types;

pub use client::{Analyst, AnalystSettings, HttpAnalyst};
pub use engine::EngineHandle;
pub use types::{
    AnalysisReport, AnalyzeError, EngineEvent, MarketLevels, MarketStructure, ReportLanguage,
    ScanId, Signal, Technicals, TradeSetup,
};
