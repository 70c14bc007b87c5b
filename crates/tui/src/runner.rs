//! Full-screen event loop: interleaves terminal input, loader progress and
//! a redraw tick.

use crate::{
    app::{Action, App},
    loader, ui,
};
use arc_swap::ArcSwap;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use discotui_config::Config;
use discotui_types::ReleaseCatalog;
use futures_util::StreamExt as _;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

/// Redraw often enough for footer messages to expire on time.
const TICK: Duration = Duration::from_millis(250);

/// Restores the terminal on every exit path, including panics.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI for `username` until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run(
    catalog: Arc<dyn ReleaseCatalog>,
    config: Arc<ArcSwap<Config>>,
    username: String,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(username, config.load().grid);
    let (load_tx, mut load_rx) = mpsc::channel(16);
    let (reload_tx, reload_rx) = mpsc::channel(1);
    let loader = loader::spawn(catalog, config.clone(), reload_rx, load_tx);

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        app.set_grid(config.load().grid);
        if let Err(e) = terminal.draw(|frame| ui::render(frame, &app)) {
            break Err(e.into());
        }

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Action::Quit => break Ok(()),
                        Action::Reload => {
                            if reload_tx.try_send(()).is_err() {
                                tracing::debug!("reload already pending");
                            }
                        }
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
            Some(event) = load_rx.recv() => app.apply(event),
            _ = tick.tick() => {}
        }
    };

    loader.abort();
    result
}
