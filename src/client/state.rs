//! Canvas client state machine.
//!
//! `CanvasState` is the whole UI state; `update` is the only way it changes.
//! Transitions are pure: anything that needs the network comes back as a
//! `Command` for the caller to run, and its outcome re-enters as a `Message`.

use crate::domain::polygon::{validate_name, validate_points, Point, Polygon, PolygonSummary};
use std::collections::BTreeSet;

pub const NAME_REQUIRED: &str = "Polygon name is required";

/// Name check for the input field. A blank field reads as "required" rather
/// than the server's "cannot be empty".
pub fn name_error(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(NAME_REQUIRED.to_string());
    }
    validate_name(name).err().map(|e| e.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    /// Last known server list, in display order.
    pub polygons: Vec<PolygonSummary>,
    /// Contents of the name field, untrimmed.
    pub name: String,
    /// Live name validation, shown under the input.
    pub name_error: Option<String>,
    /// In-progress vertices.
    pub points: Vec<Point>,
    /// Initial fetch in flight.
    pub loading: bool,
    /// Create request in flight.
    pub saving: bool,
    /// Ids with a delete request in flight.
    pub deleting: BTreeSet<String>,
    /// Dismissible error banner.
    pub error: Option<String>,
    /// Background image finished loading.
    pub background_ready: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PolygonsLoaded(Result<Vec<PolygonSummary>, String>),
    CanvasClicked(Point),
    NameChanged(String),
    SaveClicked,
    Saved(Result<Polygon, String>),
    DeleteClicked(String),
    Deleted { id: String, result: Result<(), String> },
    ErrorDismissed,
    BackgroundLoaded,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchPolygons,
    CreatePolygon { name: String, points: Vec<Point> },
    DeletePolygon { id: String },
}

impl CanvasState {
    /// The state on mount, plus the initial fetch.
    pub fn init() -> (Self, Command) {
        let state = CanvasState {
            loading: true,
            ..Default::default()
        };
        (state, Command::FetchPolygons)
    }

    /// Mirrors the save button's enabled state.
    pub fn can_save(&self) -> bool {
        !self.name.is_empty() && self.points.len() >= 3 && !self.saving
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }
}

pub fn update(mut state: CanvasState, msg: Message) -> (CanvasState, Option<Command>) {
    match msg {
        Message::PolygonsLoaded(Ok(polygons)) => {
            state.polygons = polygons;
            state.loading = false;
        }
        Message::PolygonsLoaded(Err(e)) => {
            state.error = Some(e);
            state.loading = false;
        }

        Message::CanvasClicked(point) => {
            if !state.saving {
                state.points.push(point);
            }
        }

        Message::NameChanged(name) => {
            state.name_error = name_error(&name);
            state.name = name;
        }

        Message::SaveClicked => {
            if !state.can_save() {
                return (state, None);
            }
            state.error = None;
            state.name_error = None;

            if let Some(e) = name_error(&state.name) {
                state.name_error = Some(e);
                return (state, None);
            }
            if let Err(e) = validate_points(&state.points) {
                state.error = Some(e.to_string());
                return (state, None);
            }

            state.saving = true;
            let cmd = Command::CreatePolygon {
                name: state.name.trim().to_string(),
                points: state.points.clone(),
            };
            return (state, Some(cmd));
        }
        Message::Saved(Ok(polygon)) => {
            state.polygons.push(polygon.into());
            state.name.clear();
            state.points.clear();
            state.saving = false;
        }
        Message::Saved(Err(e)) => {
            state.error = Some(e);
            state.saving = false;
        }

        Message::DeleteClicked(id) => {
            if state.deleting.contains(&id) {
                return (state, None);
            }
            state.deleting.insert(id.clone());
            state.error = None;
            return (state, Some(Command::DeletePolygon { id }));
        }
        Message::Deleted { id, result } => {
            state.deleting.remove(&id);
            match result {
                Ok(()) => state.polygons.retain(|p| p.id.as_str() != id),
                Err(e) => state.error = Some(e),
            }
        }

        Message::ErrorDismissed => state.error = None,
        Message::BackgroundLoaded => state.background_ready = true,
    }
    (state, None)
}
