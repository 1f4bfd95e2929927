//! Canvas rendering as a pure function of `CanvasState`.
//!
//! `render` yields a display list; a backend (HTML canvas, SVG, a test)
//! replays it in order.

use super::state::CanvasState;
use crate::domain::polygon::{Point, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const SAVED_STROKE: Rgba = Rgba::new(0, 0, 255, 1.0);
pub const SAVED_FILL: Rgba = Rgba::new(0, 0, 255, 0.1);
pub const DRAFT_STROKE: Rgba = Rgba::new(255, 0, 0, 1.0);
pub const LINE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    /// Background image stretched over the canvas.
    Background { width: f64, height: f64 },
    Path {
        points: Vec<Point>,
        closed: bool,
        stroke: Rgba,
        line_width: f64,
        fill: Option<Rgba>,
    },
}

pub fn render(state: &CanvasState) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(state.polygons.len() + 3);
    ops.push(DrawOp::Clear {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    });

    if state.background_ready {
        ops.push(DrawOp::Background {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        });
    }

    for polygon in state.polygons.iter().filter(|p| !p.points.is_empty()) {
        ops.push(DrawOp::Path {
            points: polygon.points.clone(),
            closed: true,
            stroke: SAVED_STROKE,
            line_width: LINE_WIDTH,
            fill: Some(SAVED_FILL),
        });
    }

    if !state.points.is_empty() {
        ops.push(DrawOp::Path {
            points: state.points.clone(),
            closed: false,
            stroke: DRAFT_STROKE,
            line_width: LINE_WIDTH,
            fill: None,
        });
    }

    ops
}

/// Replays a display list as a standalone SVG document.
pub fn to_svg(ops: &[DrawOp]) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        CANVAS_WIDTH, CANVAS_HEIGHT
    );
    for op in ops {
        match op {
            DrawOp::Clear { width, height } => out.push_str(&format!(
                "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>",
                width, height
            )),
            DrawOp::Background { width, height } => out.push_str(&format!(
                "<rect class=\"background\" width=\"{}\" height=\"{}\" fill=\"lightgray\"/>",
                width, height
            )),
            DrawOp::Path {
                points,
                closed,
                stroke,
                line_width,
                fill,
            } => {
                let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                let tag = if *closed { "polygon" } else { "polyline" };
                let fill = fill.map(Rgba::to_css).unwrap_or_else(|| "none".to_string());
                out.push_str(&format!(
                    "<{} points=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\"/>",
                    tag,
                    coords.join(" "),
                    stroke.to_css(),
                    line_width,
                    fill
                ));
            }
        }
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polygon::{PolygonId, PolygonSummary};

    fn tri(offset: f64) -> Vec<Point> {
        vec![
            Point::new(offset, 0.0),
            Point::new(offset + 10.0, 0.0),
            Point::new(offset, 10.0),
        ]
    }

    #[test]
    fn empty_state_only_clears() {
        let ops = render(&CanvasState::default());
        assert_eq!(
            ops,
            vec![DrawOp::Clear {
                width: 800.0,
                height: 600.0
            }]
        );
    }

    #[test]
    fn draws_background_then_saved_then_draft() {
        let state = CanvasState {
            background_ready: true,
            polygons: vec![
                PolygonSummary {
                    id: PolygonId::generate(),
                    name: "a".into(),
                    points: tri(0.0),
                },
                PolygonSummary {
                    id: PolygonId::generate(),
                    name: "b".into(),
                    points: tri(50.0),
                },
            ],
            points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            ..Default::default()
        };
        let ops = render(&state);
        assert_eq!(ops.len(), 5);
        assert!(matches!(ops[1], DrawOp::Background { .. }));
        match &ops[2] {
            DrawOp::Path {
                points,
                closed,
                fill,
                stroke,
                ..
            } => {
                assert_eq!(points, &tri(0.0));
                assert!(*closed);
                assert_eq!(*fill, Some(SAVED_FILL));
                assert_eq!(*stroke, SAVED_STROKE);
            }
            other => panic!("unexpected op {:?}", other),
        }
        match &ops[4] {
            DrawOp::Path {
                closed,
                fill,
                stroke,
                ..
            } => {
                assert!(!*closed);
                assert!(fill.is_none());
                assert_eq!(*stroke, DRAFT_STROKE);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn background_is_skipped_until_loaded() {
        let state = CanvasState {
            points: tri(0.0),
            ..Default::default()
        };
        assert!(!render(&state)
            .iter()
            .any(|op| matches!(op, DrawOp::Background { .. })));
    }

    #[test]
    fn svg_uses_polygon_for_closed_and_polyline_for_draft() {
        let state = CanvasState {
            polygons: vec![PolygonSummary {
                id: PolygonId::generate(),
                name: "a".into(),
                points: tri(0.0),
            }],
            points: vec![Point::new(5.0, 5.0)],
            ..Default::default()
        };
        let svg = to_svg(&render(&state));
        assert!(svg.contains("<polygon points=\"0,0 10,0 0,10\""));
        assert!(svg.contains("<polyline points=\"5,5\""));
        assert!(svg.contains("rgba(0, 0, 255, 0.1)"));
    }
}
