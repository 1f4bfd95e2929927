//! Drives the canvas state machine against a live API.

use super::api::PolygonApiClient;
use super::render::{render, DrawOp};
use super::state::{update, CanvasState, Command, Message};

/// Owns the current `CanvasState` and executes the commands its transitions emit.
///
/// Each `dispatch` runs to completion: a request either resolves or rejects,
/// and both outcomes are fed back as messages, so no flag is left set.
pub struct CanvasSession {
    state: CanvasState,
    api: PolygonApiClient,
}

impl CanvasSession {
    /// Builds the session and performs the initial fetch.
    pub async fn start(api: PolygonApiClient) -> Self {
        let (state, cmd) = CanvasState::init();
        let mut session = Self { state, api };
        session.run(cmd).await;
        session
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn frame(&self) -> Vec<DrawOp> {
        render(&self.state)
    }

    pub async fn dispatch(&mut self, msg: Message) {
        if let Some(cmd) = self.step(msg) {
            self.run(cmd).await;
        }
    }

    fn step(&mut self, msg: Message) -> Option<Command> {
        let (next, cmd) = update(std::mem::take(&mut self.state), msg);
        self.state = next;
        cmd
    }

    async fn run(&mut self, cmd: Command) {
        let mut pending = Some(cmd);
        while let Some(cmd) = pending.take() {
            let outcome = self.execute(cmd).await;
            pending = self.step(outcome);
        }
    }

    async fn execute(&self, cmd: Command) -> Message {
        match cmd {
            Command::FetchPolygons => {
                let result = self.api.fetch_polygons().await.map_err(|e| {
                    tracing::warn!(error = %e, "fetching polygons failed");
                    e.to_string()
                });
                Message::PolygonsLoaded(result)
            }
            Command::CreatePolygon { name, points } => {
                let result = self.api.create_polygon(&name, &points).await.map_err(|e| {
                    tracing::warn!(error = %e, %name, "saving polygon failed");
                    e.to_string()
                });
                Message::Saved(result)
            }
            Command::DeletePolygon { id } => {
                let result = self.api.delete_polygon(&id).await.map_err(|e| {
                    tracing::warn!(error = %e, %id, "deleting polygon failed");
                    e.to_string()
                });
                Message::Deleted { id, result }
            }
        }
    }
}
