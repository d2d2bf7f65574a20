use std::sync::Once;

use scanner_core::{
    update, AnalysisPayload, AppState, Effect, Generation, LifecycleState, MarketLevels,
    MarketStructure, Msg, Signal, Technicals, TradeSetup,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scanner_logging::initialize_for_tests);
}

fn submit_asset(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::AssetSubmitted)
}

fn scan_generation(effects: &[Effect]) -> Generation {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::BeginAnalysis { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("begin-analysis effect")
}

fn payload(asset: &str) -> AnalysisPayload {
    AnalysisPayload {
        asset: asset.to_string(),
        current_price: Some("64,250".to_string()),
        market_structure: MarketStructure::TrendingBullish,
        market_structure_details: "Higher highs and higher lows on the daily.".to_string(),
        levels: MarketLevels {
            supports: vec!["62,800".to_string()],
            resistances: vec!["66,400".to_string()],
            fibonacci: vec!["0.618 @ 61,900".to_string()],
        },
        technicals: Technicals {
            ema: "Price above EMA 50/200".to_string(),
            momentum: "RSI 58, rising".to_string(),
            volume: "Above 20-day average".to_string(),
            volatility: "Contracting".to_string(),
        },
        setup: TradeSetup {
            signal: Signal::Long,
            entry_zone: "63,000-63,400".to_string(),
            stop_loss: "61,700".to_string(),
            take_profits: vec!["66,400".to_string(), "68,000".to_string()],
            risk_reward_ratio: "1:2.4".to_string(),
        },
        veteran_insight: "Wait for the retest before sizing up.".to_string(),
        grounding_urls: Vec::new(),
    }
}

#[test]
fn phase_timers_advance_the_scan_in_order() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);

    let (state, effects) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::AnalyzingStructure,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::AnalyzingStructure);
    assert_eq!(state.view().pending_phases, 1);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::CalculatingLevels,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::CalculatingLevels);
    assert_eq!(state.view().pending_phases, 0);
    assert!(effects.is_empty());
}

#[test]
fn completion_before_any_timer_cancels_both() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);

    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            generation,
            payload: payload("BTC/USDT"),
        },
    );
    let view = state.view();

    assert_eq!(view.lifecycle, LifecycleState::Complete);
    assert_eq!(view.pending_phases, 0);
    assert_eq!(view.report.as_ref().map(|r| r.asset.as_str()), Some("BTC/USDT"));
    assert_eq!(effects, vec![Effect::CancelPhases { generation }]);
}

#[test]
fn full_scan_sequence_reaches_complete() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);
    assert_eq!(state.view().lifecycle, LifecycleState::ScanningMarket);

    let (state, _) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::AnalyzingStructure,
        },
    );
    let (state, _) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::CalculatingLevels,
        },
    );
    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            generation,
            payload: payload("BTC/USDT"),
        },
    );
    let view = state.view();

    assert_eq!(view.lifecycle, LifecycleState::Complete);
    assert_eq!(view.pending_phases, 0);
    assert_eq!(effects, vec![Effect::CancelPhases { generation }]);
}

#[test]
fn failure_clears_timers_and_report() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);

    let (state, _) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::AnalyzingStructure,
        },
    );
    let (state, effects) = update(state, Msg::AnalysisFailed { generation });
    let view = state.view();

    assert_eq!(view.lifecycle, LifecycleState::Error);
    assert!(view.report.is_none());
    assert!(view.error_message.is_some());
    assert_eq!(view.pending_phases, 0);
    assert_eq!(effects, vec![Effect::CancelPhases { generation }]);
}

#[test]
fn stale_generation_timer_is_ignored() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let first_generation = scan_generation(&effects);

    // Fail the first scan, then start a second one.
    let (state, _) = update(state, Msg::AnalysisFailed { generation: first_generation });
    let (state, effects) = submit_asset(state, "ETH/USDT");
    let second_generation = scan_generation(&effects);
    assert!(second_generation > first_generation);

    // A timer left over from the first scan must not advance the second.
    let (state, effects) = update(
        state,
        Msg::PhaseElapsed {
            generation: first_generation,
            phase: LifecycleState::CalculatingLevels,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::ScanningMarket);
    assert_eq!(state.view().pending_phases, 2);
    assert!(effects.is_empty());
}

#[test]
fn timer_after_settlement_cannot_corrupt_terminal_state() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            generation,
            payload: payload("BTC/USDT"),
        },
    );

    let (state, effects) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::CalculatingLevels,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::Complete);
    assert!(effects.is_empty());
}

#[test]
fn stale_settlement_is_ignored() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let first_generation = scan_generation(&effects);

    let (state, _) = update(state, Msg::AnalysisFailed { generation: first_generation });
    let (state, effects) = submit_asset(state, "ETH/USDT");
    let second_generation = scan_generation(&effects);

    // A late success from the superseded scan must not complete the new one.
    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            generation: first_generation,
            payload: payload("BTC/USDT"),
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::ScanningMarket);
    assert!(state.view().report.is_none());
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            generation: second_generation,
            payload: payload("ETH/USDT"),
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::Complete);
    assert_eq!(state.view().report.as_ref().map(|r| r.asset.as_str()), Some("ETH/USDT"));
}

#[test]
fn out_of_order_levels_timer_supersedes_structure_phase() {
    init_logging();
    let (state, effects) = submit_asset(AppState::new(), "BTC/USDT");
    let generation = scan_generation(&effects);

    // If the later timer is delivered first, the earlier reveal is subsumed.
    let (state, _) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::CalculatingLevels,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::CalculatingLevels);
    assert_eq!(state.view().pending_phases, 0);

    // The straggler must not move the lifecycle backwards.
    let (state, _) = update(
        state,
        Msg::PhaseElapsed {
            generation,
            phase: LifecycleState::AnalyzingStructure,
        },
    );
    assert_eq!(state.view().lifecycle, LifecycleState::CalculatingLevels);
}
