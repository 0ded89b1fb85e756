//! Stroke model — the canonical freehand mark and its wire form.
//!
//! DESIGN
//! ======
//! A `Stroke` is immutable once committed. The pointer lifecycle accumulates
//! points in a mutable `CurrentStroke`, and `finish` freezes it into the
//! committed form with a freshly assigned id. Wire encoding is plain JSON
//! with the field names the browser clients already speak (`type`,
//! `lineWidth`, flat interleaved `points`). Missing style fields coalesce to
//! defaults on decode; beyond that nothing is validated — renderers must
//! tolerate strokes with fewer than two points.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Background color of the drawing surface. The eraser draws in this color.
pub const CANVAS_BACKGROUND: &str = "#f0f0f0";

fn default_color() -> String {
    "black".to_owned()
}

fn default_line_width() -> f64 {
    2.0
}

// =============================================================================
// TYPES
// =============================================================================

/// Kind of drawing event. Only `draw` exists today; reserved for future ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    #[default]
    Draw,
}

/// Geometric shape of a stroke path. Freehand input always produces `line`
/// polylines; the remaining variants mirror shapes the wire format reserves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Line,
    Rectangle,
    Circle,
    Triangle,
}

/// One committed freehand mark: an ordered point path plus style attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Globally unique, assigned at creation by the originating client.
    pub id: Uuid,
    #[serde(rename = "type", default)]
    pub kind: StrokeKind,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "lineWidth", default = "default_line_width")]
    pub line_width: f64,
    /// Reserved for future transforms; always 0 for 2D strokes.
    #[serde(default)]
    pub rotation: f64,
    /// Flat interleaved `x,y` pairs in insertion order. `[10,20,30,40]` is
    /// two points. May be shorter than one visible segment.
    #[serde(default)]
    pub points: Vec<f64>,
}

impl Stroke {
    /// Number of complete `(x, y)` pairs in the path.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }
}

// =============================================================================
// TOOL SETTINGS
// =============================================================================

/// Active drawing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// Primitive tool values supplied by the UI collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: String,
    pub line_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { tool: Tool::Pen, color: default_color(), line_width: default_line_width() }
    }
}

impl ToolSettings {
    /// Effective stroke color for the active tool. The eraser paints in the
    /// canvas background color rather than removing committed strokes.
    #[must_use]
    pub fn stroke_color(&self) -> &str {
        match self.tool {
            Tool::Pen => &self.color,
            Tool::Eraser => CANVAS_BACKGROUND,
        }
    }
}

// =============================================================================
// CURRENT STROKE
// =============================================================================

/// The in-progress stroke between pointer-down and pointer-up. Mutable and
/// not yet part of any committed list; `finish` freezes it.
#[derive(Debug, Clone)]
pub struct CurrentStroke {
    color: String,
    line_width: f64,
    points: Vec<f64>,
}

impl CurrentStroke {
    /// Begin a stroke at the pointer-down position, capturing the tool
    /// settings in effect at that moment.
    #[must_use]
    pub fn begin(settings: &ToolSettings, x: f64, y: f64) -> Self {
        Self {
            color: settings.stroke_color().to_owned(),
            line_width: settings.line_width,
            points: vec![x, y],
        }
    }

    /// Append a pointer-move position to the path.
    pub fn push_point(&mut self, x: f64, y: f64) {
        self.points.push(x);
        self.points.push(y);
    }

    /// The path accumulated so far, for live preview rendering.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Freeze into a committed stroke with a fresh id.
    #[must_use]
    pub fn finish(self) -> Stroke {
        Stroke {
            id: Uuid::new_v4(),
            kind: StrokeKind::Draw,
            shape: Shape::Line,
            color: self.color,
            line_width: self.line_width,
            rotation: 0.0,
            points: self.points,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_freezes_points_and_assigns_id() {
        let settings = ToolSettings::default();
        let mut current = CurrentStroke::begin(&settings, 10.0, 20.0);
        current.push_point(30.0, 40.0);

        let stroke = current.finish();
        assert_eq!(stroke.points, vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(stroke.point_count(), 2);
        assert_eq!(stroke.kind, StrokeKind::Draw);
        assert_eq!(stroke.shape, Shape::Line);
        assert_eq!(stroke.color, "black");
        assert!((stroke.line_width - 2.0).abs() < f64::EPSILON);
        assert!((stroke.rotation).abs() < f64::EPSILON);
    }

    #[test]
    fn eraser_paints_in_background_color() {
        let settings = ToolSettings { tool: Tool::Eraser, color: "red".into(), line_width: 8.0 };
        let stroke = CurrentStroke::begin(&settings, 0.0, 0.0).finish();
        assert_eq!(stroke.color, CANVAS_BACKGROUND);
        assert!((stroke.line_width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wire_field_names_match_the_browser_clients() {
        let stroke = CurrentStroke::begin(&ToolSettings::default(), 1.0, 2.0).finish();
        let json = serde_json::to_value(&stroke).expect("serialize");

        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("draw"));
        assert_eq!(json.get("shape").and_then(|v| v.as_str()), Some("line"));
        assert!(json.get("lineWidth").is_some());
        assert!(json.get("line_width").is_none());
    }

    #[test]
    fn missing_style_fields_coalesce_to_defaults() {
        let json = format!(r#"{{"id":"{}","points":[1,2,3,4]}}"#, Uuid::new_v4());
        let stroke: Stroke = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(stroke.color, "black");
        assert!((stroke.line_width - 2.0).abs() < f64::EPSILON);
        assert!(stroke.rotation.abs() < f64::EPSILON);
        assert_eq!(stroke.kind, StrokeKind::Draw);
        assert_eq!(stroke.shape, Shape::Line);
    }

    #[test]
    fn json_round_trip() {
        let original = Stroke {
            id: Uuid::new_v4(),
            kind: StrokeKind::Draw,
            shape: Shape::Line,
            color: "#336699".into(),
            line_width: 4.5,
            rotation: 0.0,
            points: vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        };

        let json = serde_json::to_string(&original).expect("serialize");
        let restored: Stroke = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, original);
    }

    #[test]
    fn zero_length_points_are_tolerated() {
        let json = format!(r#"{{"id":"{}"}}"#, Uuid::new_v4());
        let stroke: Stroke = serde_json::from_str(&json).expect("deserialize");
        assert!(stroke.points.is_empty());
        assert_eq!(stroke.point_count(), 0);
    }
}
