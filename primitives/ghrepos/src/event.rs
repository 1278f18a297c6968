//! The single event queue the session loop consumes.

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ghrepos_gateway::{GatewayError, Repository};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

/// Result of one gateway call, delivered exactly once per dispatch.
#[derive(Debug)]
pub enum Completion {
    Fetched(Result<Vec<Repository>, GatewayError>),
    Updated(Result<Repository, GatewayError>),
    Deleted {
        name: String,
        result: Result<(), GatewayError>,
    },
    Opened,
}

/// Everything the loop reacts to, in arrival order.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Completed(Completion),
}

/// Forwards terminal input into the event queue until the queue closes.
pub fn spawn_input_reader(events: UnboundedSender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stream = EventStream::new();

        while let Some(read) = stream.next().await {
            let event = match read {
                Ok(TerminalEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(TerminalEvent::Resize(..)) => Event::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal input failed");
                    break;
                }
            };

            if events.send(event).is_err() {
                break;
            }
        }
    })
}
