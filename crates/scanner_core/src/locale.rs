//! Bilingual string table.
//!
//! Every user-visible string lives here, keyed by `(TextKey, Language)`.
//! The exhaustive match makes totality a compile-time property: adding a key
//! or a language without covering every combination fails the build.

use crate::state::LifecycleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    En,
    #[default]
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    InputPlaceholder,
    SubmitLabel,
    ResetLabel,
    Headline,
    HeadlineAccent,
    Tagline,
    ProcessingSubCaption,
    ScanFailedTitle,
    ScanFailedBody,
    PhaseScanningMarket,
    PhaseAnalyzingStructure,
    PhaseCalculatingLevels,
    PhaseFallback,
    LogInitFeeds,
    LogFetchOhlcv,
    LogDetectZones,
    LogFibonacci,
    LogVolumeProfile,
}

impl TextKey {
    /// Every key, for table-coverage tests.
    pub const ALL: [TextKey; 18] = [
        TextKey::InputPlaceholder,
        TextKey::SubmitLabel,
        TextKey::ResetLabel,
        TextKey::Headline,
        TextKey::HeadlineAccent,
        TextKey::Tagline,
        TextKey::ProcessingSubCaption,
        TextKey::ScanFailedTitle,
        TextKey::ScanFailedBody,
        TextKey::PhaseScanningMarket,
        TextKey::PhaseAnalyzingStructure,
        TextKey::PhaseCalculatingLevels,
        TextKey::PhaseFallback,
        TextKey::LogInitFeeds,
        TextKey::LogFetchOhlcv,
        TextKey::LogDetectZones,
        TextKey::LogFibonacci,
        TextKey::LogVolumeProfile,
    ];
}

pub fn text(key: TextKey, language: Language) -> &'static str {
    use Language::{En, Id};
    use TextKey::*;
    match (key, language) {
        (InputPlaceholder, En) => "ENTER ASSET (e.g., BTC/USDT, XAUUSD, NVDA)",
        (InputPlaceholder, Id) => "MASUKKAN ASET (misal: BTC/USDT, GOLD, NVDA)",
        (SubmitLabel, En) => "SCAN",
        (SubmitLabel, Id) => "PINDAI",
        (ResetLabel, En) => "Reset System",
        (ResetLabel, Id) => "Reset Sistem",
        (Headline, En) => "Institutional Grade",
        (Headline, Id) => "Analisis Pasar Kelas",
        (HeadlineAccent, En) => "Market Analysis",
        (HeadlineAccent, Id) => "Institusional",
        (Tagline, En) => {
            "Deploying 30 years of trading experience to scan structure, trends, and traps."
        }
        (Tagline, Id) => {
            "Menerapkan 30 tahun pengalaman trading untuk memindai struktur, tren, dan jebakan pasar."
        }
        (ProcessingSubCaption, En) => "Processing massive dataset...",
        (ProcessingSubCaption, Id) => "Memproses dataset masif...",
        (ScanFailedTitle, En) => "Scan Failed",
        (ScanFailedTitle, Id) => "Pemindaian Gagal",
        (ScanFailedBody, En) => {
            "Market scan failed. The sector might be offline or the asset is unrecognizable."
        }
        (ScanFailedBody, Id) => {
            "Pemindaian pasar gagal. Sektor mungkin sedang offline atau aset tidak dikenali."
        }
        (PhaseScanningMarket, En) => "Initializing global feed & scanning asset price action...",
        (PhaseScanningMarket, Id) => "Menginisialisasi feed global & memindai harga...",
        (PhaseAnalyzingStructure, En) => "Identifying market structure & smart money flow...",
        (PhaseAnalyzingStructure, Id) => "Mengidentifikasi struktur pasar & arus uang pintar...",
        (PhaseCalculatingLevels, En) => {
            "Calculating institutional supply/demand zones & volatility..."
        }
        (PhaseCalculatingLevels, Id) => "Menghitung zona supply/demand & volatilitas...",
        (PhaseFallback, En) => "Processing...",
        (PhaseFallback, Id) => "Sedang memproses...",
        (LogInitFeeds, En) => "Initializing connection to global exchanges...",
        (LogInitFeeds, Id) => "Menginisialisasi koneksi bursa global...",
        (LogFetchOhlcv, En) => "Fetching OHLCV data for ",
        (LogFetchOhlcv, Id) => "Mengambil data OHLCV untuk ",
        (LogDetectZones, En) => "Detecting Support/Resistance zones...",
        (LogDetectZones, Id) => "Mendeteksi zona Support/Resistansi...",
        (LogFibonacci, En) => "Calculating Fibonacci retracements...",
        (LogFibonacci, Id) => "Menghitung retracement Fibonacci...",
        (LogVolumeProfile, En) => "Analyzing Volume Profile...",
        (LogVolumeProfile, Id) => "Menganalisis Profil Volume...",
    }
}

/// Caption shown next to the spinner for the current loading phase.
pub fn phase_caption(lifecycle: LifecycleState, language: Language) -> &'static str {
    let key = match lifecycle {
        LifecycleState::ScanningMarket => TextKey::PhaseScanningMarket,
        LifecycleState::AnalyzingStructure => TextKey::PhaseAnalyzingStructure,
        LifecycleState::CalculatingLevels => TextKey::PhaseCalculatingLevels,
        _ => TextKey::PhaseFallback,
    };
    text(key, language)
}

// Each line carries the minimum lifecycle state required to display it, so
// later lines appear as the scan progresses.
const SCAN_LOG: &[(LifecycleState, TextKey)] = &[
    (LifecycleState::ScanningMarket, TextKey::LogInitFeeds),
    (LifecycleState::ScanningMarket, TextKey::LogFetchOhlcv),
    (LifecycleState::AnalyzingStructure, TextKey::LogDetectZones),
    (LifecycleState::CalculatingLevels, TextKey::LogFibonacci),
    (LifecycleState::CalculatingLevels, TextKey::LogVolumeProfile),
];

/// Scan-log lines visible at the given lifecycle state, in display order.
///
/// Empty outside the active-scan states.
pub fn scan_log(lifecycle: LifecycleState, language: Language, asset: &str) -> Vec<String> {
    if !lifecycle.is_scanning() {
        return Vec::new();
    }
    SCAN_LOG
        .iter()
        .filter(|(min_state, _)| lifecycle >= *min_state)
        .map(|(_, key)| match key {
            TextKey::LogFetchOhlcv => format!("{}{}...", text(*key, language), asset),
            _ => text(*key, language).to_string(),
        })
        .collect()
}
