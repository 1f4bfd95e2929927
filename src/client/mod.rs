//! Canvas client: the drawing UI's state, rendering, and API access.

pub mod api;
pub mod render;
pub mod session;
pub mod state;

pub use api::{ClientError, PolygonApiClient};
pub use render::{render, DrawOp};
pub use session::CanvasSession;
pub use state::{update, CanvasState, Command, Message};
