use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event;
use obras::app::App;
use obras::core::InputEvent;
use obras::services::settings::{ensure_settings_file, load_settings, Settings};
use obras::tui::terminal_guard::{install_termination_signals, TerminalGuard};
use obras::ui::backend::terminal::RatatuiTerminal;

mod logging;

const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let mut logging = logging::init();
    let alert_rx = logging.as_mut().and_then(|guard| guard.take_alert_rx());

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "settings file unavailable");
    }
    let settings = load_settings().unwrap_or_else(Settings::default);

    let mut app = App::new(&settings);
    app.theme_mut().adapt_to_terminal_capabilities();

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    if let Err(err) = install_termination_signals(guard.restorer(), signal_tx) {
        tracing::warn!(error = %err, "signal handler unavailable");
    }

    let mut terminal = RatatuiTerminal::new(io::stdout())?;
    let mut dirty = true;
    let mut exit_code = None;

    loop {
        if let Some(rx) = &alert_rx {
            while let Ok(message) = rx.try_recv() {
                app.set_status(message);
                dirty = true;
            }
        }

        if dirty {
            terminal.draw(|backend, area| app.render(backend, area))?;
            dirty = false;
        }

        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            let input = InputEvent::from(event::read()?);
            dirty |= app.handle_input(&input, Instant::now());
        }
        dirty |= app.tick(Instant::now());

        if let Ok(signal) = signal_rx.try_recv() {
            exit_code = Some(signal.exit_code());
            break;
        }
        if app.should_quit() {
            break;
        }
    }

    drop(terminal);
    drop(guard);
    tracing::info!("exit");
    drop(logging);

    if let Some(code) = exit_code {
        std::process::exit(code);
    }
    Ok(())
}
