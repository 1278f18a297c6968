//! Terminal session loop.

use ghrepos_gateway::RepoGateway;
use ratatui::DefaultTerminal;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::event::{self, Event};
use crate::menu::Menu;
use crate::session::{Farewell, Session};
use crate::ui::{self, SPINNER_INTERVAL, Theme};

/// Runs the dashboard until the session quits. The terminal is restored on
/// every exit path.
pub async fn run<G: RepoGateway + 'static>(
    gateway: Arc<G>,
    theme: &Theme,
) -> anyhow::Result<Farewell> {
    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, gateway, theme).await;
    ratatui::restore();
    result
}

async fn event_loop<G: RepoGateway + 'static>(
    terminal: &mut DefaultTerminal,
    gateway: Arc<G>,
    theme: &Theme,
) -> anyhow::Result<Farewell> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let input = event::spawn_input_reader(tx.clone());

    let mut session = Session::new(gateway, tx);
    let mut menu = Menu::default();
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);
    let mut tick = 0usize;

    session.start();

    let farewell = loop {
        terminal.draw(|frame| ui::draw(frame, &session.screen(), &menu, theme, tick))?;

        if let Some(farewell) = session.farewell() {
            break farewell;
        }

        tokio::select! {
            _ = spinner.tick() => {
                tick = tick.wrapping_add(1);
            }

            event = rx.recv() => match event {
                Some(Event::Key(key)) => {
                    if let Some(command) = menu.handle_key(key) {
                        tracing::debug!(?command, "command");
                        session.handle_command(command);
                    }
                }
                Some(Event::Resize) => {}
                Some(Event::Completed(completion)) => session.handle_completion(completion),
                // The session holds a sender, so this only happens on teardown.
                None => break Farewell::UserQuit,
            },
        }
    };

    input.abort();
    Ok(farewell)
}
