use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use scanner_logging::scan_debug;

use crate::client::{Analyst, AnalystSettings, HttpAnalyst};
use crate::{EngineEvent, ReportLanguage, ScanId};

enum EngineCommand {
    Analyze {
        scan_id: ScanId,
        asset: String,
        language: ReportLanguage,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    // Mutex so the handle can be shared across shell threads.
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: AnalystSettings) -> Self {
        Self::with_analyst(Arc::new(HttpAnalyst::new(settings)))
    }

    /// Seam for tests and alternative transports.
    pub fn with_analyst(analyst: Arc<dyn Analyst>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let analyst = analyst.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(analyst.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn request(&self, scan_id: ScanId, asset: impl Into<String>, language: ReportLanguage) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            scan_id,
            asset: asset.into(),
            language,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    analyst: &dyn Analyst,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze {
            scan_id,
            asset,
            language,
        } => {
            scan_debug!("scan {} dispatched for {}", scan_id, asset);
            let result = analyst.analyze(&asset, language).await;
            let _ = event_tx.send(EngineEvent::ScanCompleted { scan_id, result });
        }
    }
}
