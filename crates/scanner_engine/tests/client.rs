use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scanner_engine::{
    Analyst, AnalysisReport, AnalystSettings, AnalyzeError, EngineEvent, EngineHandle,
    HttpAnalyst, MarketLevels, MarketStructure, ReportLanguage, Signal, Technicals, TradeSetup,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn report_json() -> serde_json::Value {
    serde_json::json!({
        "asset": "BTC/USDT",
        "currentPrice": "64,250",
        "marketStructure": "Trending Bullish",
        "marketStructureDetails": "Higher highs and higher lows on the daily.",
        "levels": {
            "supports": ["62,800"],
            "resistances": ["66,400"],
            "fibonacci": ["0.618 @ 61,900"]
        },
        "technicals": {
            "ema": "Price above EMA 50/200",
            "momentum": "RSI 58, rising",
            "volume": "Above 20-day average",
            "volatility": "Contracting"
        },
        "setup": {
            "signal": "LONG",
            "entryZone": "63,000-63,400",
            "stopLoss": "61,700",
            "takeProfits": ["66,400", "68,000"],
            "riskRewardRatio": "1:2.4"
        },
        "veteranInsight": "Wait for the retest before sizing up.",
        "groundingUrls": ["https://example.com/btc"]
    })
}

fn expected_report() -> AnalysisReport {
    AnalysisReport {
        asset: "BTC/USDT".to_string(),
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
        grounding_urls: vec!["https://example.com/btc".to_string()],
    }
}

fn settings_for(server: &MockServer) -> AnalystSettings {
    AnalystSettings {
        endpoint: format!("{}/v1/analyze", server.uri()),
        api_key: Some("test-key".to_string()),
        ..AnalystSettings::default()
    }
}

#[tokio::test]
async fn analyst_posts_request_and_parses_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "asset": "BTC/USDT",
            "language": "en",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json()))
        .mount(&server)
        .await;

    let analyst = HttpAnalyst::new(settings_for(&server));
    let report = analyst
        .analyze("BTC/USDT", ReportLanguage::En)
        .await
        .expect("analysis ok");

    assert_eq!(report, expected_report());
}

#[tokio::test]
async fn optional_fields_default_when_absent() {
    let server = MockServer::start().await;
    let mut body = report_json();
    body.as_object_mut().unwrap().remove("currentPrice");
    body.as_object_mut().unwrap().remove("groundingUrls");
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let analyst = HttpAnalyst::new(settings_for(&server));
    let report = analyst
        .analyze("BTC/USDT", ReportLanguage::Id)
        .await
        .expect("analysis ok");

    assert_eq!(report.current_price, None);
    assert!(report.grounding_urls.is_empty());
}

#[tokio::test]
async fn analyst_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let analyst = HttpAnalyst::new(settings_for(&server));
    let err = analyst
        .analyze("BTC/USDT", ReportLanguage::En)
        .await
        .unwrap_err();
    assert_eq!(err, AnalyzeError::HttpStatus(503));
}

#[tokio::test]
async fn analyst_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(report_json()),
        )
        .mount(&server)
        .await;

    let settings = AnalystSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let analyst = HttpAnalyst::new(settings);
    let err = analyst
        .analyze("BTC/USDT", ReportLanguage::En)
        .await
        .unwrap_err();
    assert_eq!(err, AnalyzeError::Timeout);
}

#[tokio::test]
async fn analyst_rejects_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("not a report", "application/json"),
        )
        .mount(&server)
        .await;

    let analyst = HttpAnalyst::new(settings_for(&server));
    let err = analyst
        .analyze("BTC/USDT", ReportLanguage::En)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::MalformedResponse(_)));
}

#[tokio::test]
async fn analyst_rejects_invalid_endpoint() {
    let settings = AnalystSettings {
        endpoint: "not an endpoint".to_string(),
        ..AnalystSettings::default()
    };
    let analyst = HttpAnalyst::new(settings);
    let err = analyst
        .analyze("BTC/USDT", ReportLanguage::En)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidEndpoint(_)));
}

#[tokio::test]
async fn engine_handle_forwards_settlement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json()))
        .mount(&server)
        .await;

    let analyst: Arc<dyn Analyst> = Arc::new(HttpAnalyst::new(settings_for(&server)));
    let engine = EngineHandle::with_analyst(analyst);
    engine.request(7, "BTC/USDT", ReportLanguage::En);

    let mut event = None;
    for _ in 0..100 {
        if let Some(found) = engine.try_recv() {
            event = Some(found);
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    match event.expect("engine event") {
        EngineEvent::ScanCompleted { scan_id, result } => {
            assert_eq!(scan_id, 7);
            assert_eq!(result.expect("report"), expected_report());
        }
    }
}
