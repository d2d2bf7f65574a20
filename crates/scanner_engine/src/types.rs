use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ScanId = u64;

/// Language tag forwarded to the inference service so the commentary comes
/// back in the user's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportLanguage {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "id")]
    Id,
}

/// Wire format of a completed analysis, as returned by the inference
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub asset: String,
    #[serde(default)]
    pub current_price: Option<String>,
    pub market_structure: MarketStructure,
    pub market_structure_details: String,
    pub levels: MarketLevels,
    pub technicals: Technicals,
    pub setup: TradeSetup,
    pub veteran_insight: String,
    #[serde(default)]
    pub grounding_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStructure {
    #[serde(rename = "Trending Bullish")]
    TrendingBullish,
    #[serde(rename = "Trending Bearish")]
    TrendingBearish,
    #[serde(rename = "Ranging")]
    Ranging,
    #[serde(rename = "Correction")]
    Correction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLevels {
    pub supports: Vec<String>,
    pub resistances: Vec<String>,
    pub fibonacci: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technicals {
    pub ema: String,
    pub momentum: String,
    pub volume: String,
    pub volatility: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSetup {
    pub signal: Signal,
    pub entry_zone: String,
    pub stop_loss: String,
    pub take_profits: Vec<String>,
    pub risk_reward_ratio: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScanCompleted {
        scan_id: ScanId,
        result: Result<AnalysisReport, AnalyzeError>,
    },
}

/// Failure of the single-shot analysis call. The shell collapses every
/// variant into one generic user-facing message; the variants exist for
/// diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
