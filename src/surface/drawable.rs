//! Boundary traits implemented by the rendering layer.

use std::sync::Arc;

use crate::{
    effects::completion::CompletionHandle,
    foundation::core::{Point, Rect, Vec2},
    foundation::error::PentweenResult,
};

/// Shared handle to a drawable shape.
pub type DrawableRef = Arc<dyn Drawable>;
/// Shared handle to a vector shape that can be repositioned.
pub type VectorRef = Arc<dyn VectorShape>;
/// Shared handle to a message model.
pub type MessageRef = Arc<dyn MessageModel>;
/// Shared handle to the layer that positions message notes.
pub type ContainerRef = Arc<dyn MessageContainer>;

/// A shape the pen can draw.
pub trait Drawable: Send + Sync {
    /// Stable identifier for logs and snapshots.
    fn id(&self) -> String;

    /// Make the shape visible.
    fn show(&self);

    /// Make the shape invisible.
    fn hide(&self);

    /// Render the fully drawn shape without animating.
    fn render_end_state(&self);

    /// Turn the stroke on.
    fn enable_stroke(&self);

    /// Turn the stroke off.
    fn disable_stroke(&self);

    /// Start the pen animation, continuing from `pen_start` when given.
    ///
    /// `on_complete` must be fired once the stroke is finished. An error
    /// means the animation never started.
    fn render_with_animation(
        &self,
        pen_start: Option<Point>,
        on_complete: CompletionHandle,
    ) -> PentweenResult<()>;

    /// Halt a running pen animation.
    fn cancel_animation(&self) {}

    /// Where the pen rests once the shape is drawn.
    fn pen_end(&self) -> Option<Point> {
        None
    }
}

/// A drawn arrow whose endpoints can be moved after drawing.
pub trait VectorShape: Drawable {
    /// Move the arrow so it runs from `tail` to `head`.
    fn set_endpoints(&self, tail: Point, head: Point);

    /// Current `(tail, head)`.
    fn endpoints(&self) -> (Point, Point);
}

/// Animated text note.
pub trait MessageModel: Send + Sync {
    /// Stable identifier for logs and snapshots.
    fn id(&self) -> String;

    /// Make the note visible.
    fn show(&self);

    /// Make the note invisible.
    fn hide(&self);

    /// Animate the note in over `duration_secs` and fire `on_complete` at the end.
    fn render_with_animation(
        &self,
        on_complete: CompletionHandle,
        duration_secs: f64,
    ) -> PentweenResult<()>;

    /// Render the note already fully visible.
    fn render_end_state(&self);
}

/// Layer that owns note placement.
pub trait MessageContainer: Send + Sync {
    /// Position the note `note_id` inside `rect`.
    fn place_note(&self, note_id: &str, rect: Rect);
}

/// Geometry of a shape the rendering layer can build.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Dot.
    Point {
        /// Center.
        at: Point,
        /// Dot radius in model units.
        #[serde(default = "default_point_radius")]
        radius: f64,
    },
    /// Segment without an arrow head.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
    },
    /// Arrow from `from` to `to`.
    Vector {
        /// Tail.
        from: Point,
        /// Head.
        to: Point,
    },
    /// Full circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Closed polygon through `points`.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
    },
    /// Circular arc.
    Arc {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Start angle in degrees.
        start_deg: f64,
        /// Signed sweep in degrees.
        sweep_deg: f64,
    },
}

fn default_point_radius() -> f64 {
    4.0
}

impl ShapeSpec {
    /// Short name of the geometry family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::Line { .. } => "line",
            Self::Vector { .. } => "vector",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::Arc { .. } => "arc",
        }
    }

    /// Where a pen drawing this shape would finish.
    pub fn pen_end(&self) -> Point {
        match self {
            Self::Point { at, .. } => *at,
            Self::Line { to, .. } | Self::Vector { to, .. } => *to,
            Self::Circle { center, radius } => *center + Vec2::new(*radius, 0.0),
            Self::Polygon { points } => points.first().copied().unwrap_or(Point::ORIGIN),
            Self::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => {
                let end = (start_deg + sweep_deg).to_radians();
                *center + Vec2::new(radius * end.cos(), radius * end.sin())
            }
        }
    }
}

/// Stroke appearance of a shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Color name or hex string.
    pub color: String,
    /// Stroke width override.
    pub stroke_width: Option<f64>,
    /// SVG-style dash pattern, e.g. `"5,3"`.
    pub dash: Option<String>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            stroke_width: None,
            dash: None,
        }
    }
}

impl ShapeStyle {
    /// Style with the given color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }

    /// Same style with a dash pattern.
    pub fn dashed(mut self, pattern: impl Into<String>) -> Self {
        self.dash = Some(pattern.into());
        self
    }
}

/// Entrance animation of a message note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageAnimation {
    /// Fade in.
    #[default]
    #[serde(alias = "f")]
    Fade,
    /// Slide in from the left.
    #[serde(alias = "l")]
    SlideLeft,
    /// Slide in from the right.
    #[serde(alias = "r")]
    SlideRight,
    /// Slide in from the top.
    #[serde(alias = "t")]
    SlideTop,
    /// Slide in from the bottom.
    #[serde(alias = "b")]
    SlideBottom,
    /// Grow from the center.
    #[serde(alias = "c")]
    Center,
    /// Grow horizontally.
    #[serde(alias = "w")]
    Width,
}

/// Builder of drawables for one diagram surface.
pub trait ShapeFactory: Send + Sync {
    /// Build a shape, initially hidden by the caller.
    fn shape(&self, spec: &ShapeSpec, style: &ShapeStyle) -> PentweenResult<DrawableRef>;

    /// Build a repositionable arrow from `tail` to `head`.
    fn vector(&self, tail: Point, head: Point, style: &ShapeStyle) -> PentweenResult<VectorRef>;

    /// Build a message note.
    fn message(
        &self,
        text: &str,
        animation: MessageAnimation,
        style: &ShapeStyle,
    ) -> PentweenResult<MessageRef>;

    /// Layer that positions notes.
    fn note_container(&self) -> ContainerRef;

    /// Remove everything built so far from the surface.
    fn clear(&self);
}

#[cfg(test)]
#[path = "../../tests/unit/surface/drawable.rs"]
mod tests;
