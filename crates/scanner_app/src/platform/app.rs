use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scanner_core::{update, AppState, Language, Msg};
use scanner_logging::{scan_info, scan_warn};

use super::effects::EffectRunner;
use super::{render, settings};

pub fn run_app() -> io::Result<()> {
    let settings_path = Path::new(settings::SETTINGS_FILENAME);
    let settings = settings::load(settings_path);
    scanner_logging::initialize(settings.log_destination());
    scan_info!("scanner starting against {}", settings.endpoint);

    // Seed an editable settings file on first run.
    if !settings_path.exists() {
        if let Err(err) = settings::save(settings_path, &settings) {
            scan_warn!("Failed to write default settings: {}", err);
        }
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let quit = Arc::new(AtomicBool::new(false));
    let runner = EffectRunner::new(settings.analyst_settings(), msg_tx.clone());
    spawn_input_reader(msg_tx.clone(), quit.clone());

    let mut state = AppState::with_language(settings.language());
    print_frame(&render::render(&state.view()))?;
    let _ = msg_tx.send(Msg::Tick);

    while !quit.load(Ordering::SeqCst) {
        let msg = match msg_rx.recv_timeout(Duration::from_millis(75)) {
            Ok(msg) => msg,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            print_frame(&render::render(&state.view()))?;
        }
    }

    scan_info!("scanner shutting down");
    Ok(())
}

enum InputCommand {
    Quit,
    Submit(String),
    SetLanguage(Language),
    Reset,
    Ignore,
}

fn parse_input(line: &str) -> InputCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputCommand::Ignore;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "quit" | "exit" => InputCommand::Quit,
        "reset" => InputCommand::Reset,
        "lang en" => InputCommand::SetLanguage(Language::En),
        "lang id" => InputCommand::SetLanguage(Language::Id),
        _ => InputCommand::Submit(trimmed.to_string()),
    }
}

fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_input(&line) {
                InputCommand::Quit => break,
                InputCommand::Submit(asset) => {
                    let _ = msg_tx.send(Msg::InputChanged(asset));
                    let _ = msg_tx.send(Msg::AssetSubmitted);
                }
                InputCommand::SetLanguage(language) => {
                    let _ = msg_tx.send(Msg::LanguageSelected(language));
                }
                InputCommand::Reset => {
                    let _ = msg_tx.send(Msg::ResetClicked);
                }
                InputCommand::Ignore => {}
            }
        }
        quit.store(true, Ordering::SeqCst);
        // Wake the main loop so it notices the flag.
        let _ = msg_tx.send(Msg::NoOp);
    });
}

fn print_frame(frame: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}
