//! Data model of a completed market analysis.
//!
//! The orchestrator stores and forwards the payload without inspecting it;
//! only the presentation layer reads the fields.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPayload {
    pub asset: String,
    pub current_price: Option<String>,
    pub market_structure: MarketStructure,
    pub market_structure_details: String,
    pub levels: MarketLevels,
    pub technicals: Technicals,
    pub setup: TradeSetup,
    pub veteran_insight: String,
    pub grounding_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketStructure {
    TrendingBullish,
    TrendingBearish,
    Ranging,
    Correction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketLevels {
    pub supports: Vec<String>,
    pub resistances: Vec<String>,
    pub fibonacci: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technicals {
    pub ema: String,
    pub momentum: String,
    pub volume: String,
    pub volatility: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSetup {
    pub signal: Signal,
    pub entry_zone: String,
    pub stop_loss: String,
    pub take_profits: Vec<String>,
    pub risk_reward_ratio: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Long,
    Short,
    Neutral,
}
