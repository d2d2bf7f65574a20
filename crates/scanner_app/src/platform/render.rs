use std::fmt::Write as _;

use chrono::Utc;
use scanner_core::{
    phase_caption, scan_log, text, AnalysisPayload, AppViewModel, Language, LifecycleState,
    MarketStructure, Signal, TextKey,
};

pub(crate) const SUGGESTED_ASSETS: [&str; 6] = [
    "BTC/USDT",
    "ETH/USDT",
    "XAU/USD",
    "EUR/USD",
    "NVDA",
    "TSLA",
];

/// Renders the whole frame as plain terminal text.
pub(crate) fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let clock = Utc::now().format("%H:%M");
    let language_tag = match view.language {
        Language::En => "EN",
        Language::Id => "ID",
    };
    let _ = writeln!(out, "== VETERANTRADER // UTC {clock} // {language_tag} ==");

    match view.lifecycle {
        LifecycleState::Idle => render_idle(&mut out, view),
        LifecycleState::ScanningMarket
        | LifecycleState::AnalyzingStructure
        | LifecycleState::CalculatingLevels => render_scanning(&mut out, view),
        LifecycleState::Complete => {
            if let Some(report) = &view.report {
                render_report(&mut out, report);
            }
        }
        LifecycleState::Error => render_error(&mut out, view),
    }

    out
}

fn render_idle(out: &mut String, view: &AppViewModel) {
    let language = view.language;
    let _ = writeln!(
        out,
        "{} {}",
        text(TextKey::Headline, language),
        text(TextKey::HeadlineAccent, language)
    );
    let _ = writeln!(out, "{}", text(TextKey::Tagline, language));
    let _ = writeln!(out);
    if view.asset_input.is_empty() {
        let _ = writeln!(out, "> {}", text(TextKey::InputPlaceholder, language));
    } else {
        let _ = writeln!(out, "> {}", view.asset_input);
    }
    let _ = writeln!(
        out,
        "[{}] {}",
        text(TextKey::SubmitLabel, language),
        SUGGESTED_ASSETS.join("  ")
    );
}

fn render_scanning(out: &mut String, view: &AppViewModel) {
    let language = view.language;
    let _ = writeln!(out, "{}", phase_caption(view.lifecycle, language));
    let _ = writeln!(out, "{}", text(TextKey::ProcessingSubCaption, language));
    let _ = writeln!(out);
    for line in scan_log(view.lifecycle, language, view.asset_input.trim()) {
        let _ = writeln!(out, "> {line}");
    }
}

fn render_error(out: &mut String, view: &AppViewModel) {
    let language = view.language;
    let _ = writeln!(out, "!! {}", text(TextKey::ScanFailedTitle, language));
    if let Some(message) = &view.error_message {
        let _ = writeln!(out, "{message}");
    }
    let _ = writeln!(out, "[reset] {}", text(TextKey::ResetLabel, language));
}

fn render_report(out: &mut String, report: &AnalysisPayload) {
    let _ = writeln!(out, "-- {} --", report.asset);
    if let Some(price) = &report.current_price {
        let _ = writeln!(out, "Price: {price}");
    }
    let _ = writeln!(
        out,
        "Structure: {} | {}",
        structure_label(report.market_structure),
        report.market_structure_details
    );
    let _ = writeln!(out, "Supports: {}", report.levels.supports.join(", "));
    let _ = writeln!(out, "Resistances: {}", report.levels.resistances.join(", "));
    let _ = writeln!(out, "Fibonacci: {}", report.levels.fibonacci.join(", "));
    let _ = writeln!(
        out,
        "Technicals: EMA {} | momentum {} | volume {} | volatility {}",
        report.technicals.ema,
        report.technicals.momentum,
        report.technicals.volume,
        report.technicals.volatility
    );
    let _ = writeln!(
        out,
        "Setup: {} | entry {} | stop {} | targets {} | R:R {}",
        signal_label(report.setup.signal),
        report.setup.entry_zone,
        report.setup.stop_loss,
        report.setup.take_profits.join(", "),
        report.setup.risk_reward_ratio
    );
    let _ = writeln!(out, "Insight: {}", report.veteran_insight);
    for url in &report.grounding_urls {
        let _ = writeln!(out, "Source: {url}");
    }
}

fn structure_label(structure: MarketStructure) -> &'static str {
    match structure {
        MarketStructure::TrendingBullish => "Trending Bullish",
        MarketStructure::TrendingBearish => "Trending Bearish",
        MarketStructure::Ranging => "Ranging",
        MarketStructure::Correction => "Correction",
    }
}

fn signal_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Long => "LONG",
        Signal::Short => "SHORT",
        Signal::Neutral => "NEUTRAL",
    }
}
