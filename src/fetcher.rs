use crate::error::FetchError;
use crate::model::{GenreCount, TimeWindow};
use crate::source::GenreDataSource;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub id: u64,
    pub window: TimeWindow,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub outcome: Result<Vec<GenreCount>, FetchError>,
}

// One thread per fetch; completions may arrive in any order.
pub struct GenreFetcher {
    source: Arc<dyn GenreDataSource>,
    done_tx: Sender<FetchCompletion>,
    done_rx: Receiver<FetchCompletion>,
}

impl GenreFetcher {
    pub fn new(source: Arc<dyn GenreDataSource>) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            source,
            done_tx,
            done_rx,
        }
    }

    pub fn dispatch(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let done_tx = self.done_tx.clone();
        debug!(id = ticket.id, window = ticket.window.query_value(), "dispatching fetch");
        thread::spawn(move || {
            let outcome = source.fetch(ticket.window);
            // The receiver only disappears when the app is shutting down.
            let _ = done_tx.send(FetchCompletion { ticket, outcome });
        });
    }

    pub fn try_recv(&self) -> Option<FetchCompletion> {
        match self.done_rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchCompletion> {
        match self.done_rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
