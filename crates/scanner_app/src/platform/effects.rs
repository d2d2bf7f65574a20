use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scanner_core::{
    AnalysisPayload, Effect, Language, LifecycleState, MarketLevels, MarketStructure, Msg,
    Signal, Technicals, TradeSetup,
};
use scanner_engine::{AnalystSettings, EngineEvent, EngineHandle, ReportLanguage};
use scanner_logging::{scan_info, scan_warn};

/// Runs the orchestrator's effects: dispatches the analysis call to the
/// engine, spawns the cosmetic phase timers, and forwards settlements back
/// into the message pump.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    msg_tx: mpsc::Sender<Msg>,
    // The generation whose timers are allowed to deliver. Timers re-check it
    // after sleeping, so cancellation is a single store.
    live_generation: Arc<AtomicU64>,
}

impl EffectRunner {
    pub fn new(settings: AnalystSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self::with_engine(Arc::new(EngineHandle::new(settings)), msg_tx)
    }

    fn with_engine(engine: Arc<EngineHandle>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self {
            engine,
            msg_tx,
            live_generation: Arc::new(AtomicU64::new(0)),
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BeginAnalysis {
                    generation,
                    asset,
                    language,
                } => {
                    scan_info!("BeginAnalysis generation={} asset={}", generation, asset);
                    self.live_generation.store(generation, Ordering::SeqCst);
                    self.engine.request(generation, asset, map_language(language));
                }
                Effect::SchedulePhase {
                    generation,
                    phase,
                    delay_ms,
                } => {
                    self.spawn_phase_timer(generation, phase, delay_ms);
                }
                Effect::CancelPhases { generation } => {
                    // Idempotent: only clears if the generation is still live.
                    let _ = self.live_generation.compare_exchange(
                        generation,
                        0,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                }
            }
        }
    }

    fn spawn_phase_timer(&self, generation: u64, phase: LifecycleState, delay_ms: u64) {
        let live_generation = self.live_generation.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay_ms));
            if live_generation.load(Ordering::SeqCst) == generation {
                let _ = msg_tx.send(Msg::PhaseElapsed { generation, phase });
            }
        });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::ScanCompleted { scan_id, result } => {
                        let msg = match result {
                            Ok(report) => Msg::AnalysisCompleted {
                                generation: scan_id,
                                payload: map_report(report),
                            },
                            Err(err) => {
                                // The cause stays in the log; the user gets
                                // the generic localized message.
                                scan_warn!("scan {} failed: {}", scan_id, err);
                                Msg::AnalysisFailed {
                                    generation: scan_id,
                                }
                            }
                        };
                        let _ = msg_tx.send(msg);
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_language(language: Language) -> ReportLanguage {
    match language {
        Language::En => ReportLanguage::En,
        Language::Id => ReportLanguage::Id,
    }
}

fn map_report(report: scanner_engine::AnalysisReport) -> AnalysisPayload {
    AnalysisPayload {
        asset: report.asset,
        current_price: report.current_price,
        market_structure: map_structure(report.market_structure),
        market_structure_details: report.market_structure_details,
        levels: MarketLevels {
            supports: report.levels.supports,
            resistances: report.levels.resistances,
            fibonacci: report.levels.fibonacci,
        },
        technicals: Technicals {
            ema: report.technicals.ema,
            momentum: report.technicals.momentum,
            volume: report.technicals.volume,
            volatility: report.technicals.volatility,
        },
        setup: TradeSetup {
            signal: map_signal(report.setup.signal),
            entry_zone: report.setup.entry_zone,
            stop_loss: report.setup.stop_loss,
            take_profits: report.setup.take_profits,
            risk_reward_ratio: report.setup.risk_reward_ratio,
        },
        veteran_insight: report.veteran_insight,
        grounding_urls: report.grounding_urls,
    }
}

fn map_structure(structure: scanner_engine::MarketStructure) -> MarketStructure {
    match structure {
        scanner_engine::MarketStructure::TrendingBullish => MarketStructure::TrendingBullish,
        scanner_engine::MarketStructure::TrendingBearish => MarketStructure::TrendingBearish,
        scanner_engine::MarketStructure::Ranging => MarketStructure::Ranging,
        scanner_engine::MarketStructure::Correction => MarketStructure::Correction,
    }
}

fn map_signal(signal: scanner_engine::Signal) -> Signal {
    match signal {
        scanner_engine::Signal::Long => Signal::Long,
        scanner_engine::Signal::Short => Signal::Short,
        scanner_engine::Signal::Neutral => Signal::Neutral,
    }
}
