//! Background weather lookups
//!
//! Runs each fetch on a tokio task so the UI keeps drawing while the request
//! is outstanding, and hands the outcome back over a channel.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::data::{FetchError, Query, WeatherClient, WeatherSnapshot};

/// Messages sent from a lookup task to the main app
#[derive(Debug)]
pub enum LookupMessage {
    /// A lookup finished, successfully or not
    Completed {
        query: Query,
        result: Result<WeatherSnapshot, FetchError>,
    },
}

/// Handle that starts lookups and receives their results
#[derive(Debug)]
pub struct LookupHandle {
    client: WeatherClient,
    sender: mpsc::Sender<LookupMessage>,
    receiver: mpsc::Receiver<LookupMessage>,
}

impl LookupHandle {
    /// Creates a handle that fetches through the given client
    pub fn new(client: WeatherClient) -> Self {
        let (sender, receiver) = mpsc::channel(4);
        Self {
            client,
            sender,
            receiver,
        }
    }

    /// Spawns a task that fetches weather for `query`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, query: Query) {
        let client = self.client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            info!(city = %query, "starting weather lookup");
            let result = client.fetch(&query).await;
            if let Err(ref e) = result {
                warn!(city = %query, error = %e, "weather lookup failed");
            }
            let _ = tx.send(LookupMessage::Completed { query, result }).await;
        });
    }

    /// Waits for the next finished lookup
    pub async fn recv(&mut self) -> Option<LookupMessage> {
        self.receiver.recv().await
    }

    /// Checks for a finished lookup without blocking
    ///
    /// # Returns
    /// * `Some(LookupMessage)` if a lookup completed since the last check
    /// * `None` if nothing is pending
    pub fn try_recv(&mut self) -> Option<LookupMessage> {
        self.receiver.try_recv().ok()
    }
}
