//! Skeleton elements - the placeholder shapes composed on the canvas.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Rect, MAX_COORDINATE, MIN_ELEMENT_SIZE};
use crate::palette::Swatch;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an element ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shape of a skeleton element. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Rounded rectangle.
    #[serde(rename = "rect", alias = "rectangle")]
    Rectangle,
    /// Circle.
    #[serde(rename = "circle")]
    Circle,
    /// Thin bar standing in for a line of text.
    #[serde(rename = "text", alias = "text-bar")]
    TextBar,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 3] = [Self::Rectangle, Self::Circle, Self::TextBar];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Circle => "circle",
            Self::TextBar => "text",
        }
    }

    /// Size given to an element of this kind when dropped from the palette.
    #[must_use]
    pub const fn default_size(self) -> (i32, i32) {
        match self {
            Self::Rectangle => (100, 50),
            Self::Circle => (60, 60),
            Self::TextBar => (120, 16),
        }
    }

    /// Corner radius given to a new element of this kind.
    #[must_use]
    pub const fn default_corner_radius(self) -> i32 {
        match self {
            Self::Rectangle | Self::TextBar => 8,
            Self::Circle => 30,
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "text" | "textbar" | "text-bar" => Ok(Self::TextBar),
            _ => Err(format!("Unknown element kind: {s}")),
        }
    }
}

/// Shimmer animation applied to an element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    /// Static.
    #[default]
    None,
    /// Opacity pulse.
    Pulse,
    /// Sweeping highlight.
    Wave,
    /// Continuous rotation.
    Spin,
    /// Fade in and out.
    Fade,
    /// Vertical bounce.
    Bounce,
}

impl Animation {
    /// Every animation, in emission order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Pulse,
        Self::Wave,
        Self::Spin,
        Self::Fade,
        Self::Bounce,
    ];

    /// Wire name of the animation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pulse => "pulse",
            Self::Wave => "wave",
            Self::Spin => "spin",
            Self::Fade => "fade",
            Self::Bounce => "bounce",
        }
    }
}

impl FromStr for Animation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "pulse" => Ok(Self::Pulse),
            "wave" => Ok(Self::Wave),
            "spin" => Ok(Self::Spin),
            "fade" => Ok(Self::Fade),
            "bounce" => Ok(Self::Bounce),
            _ => Err(format!("Unknown animation: {s}")),
        }
    }
}

/// Visual style of an element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// Corner radius in pixels.
    pub corner_radius: i32,
    /// Palette swatch.
    pub color: Swatch,
    /// Shimmer animation.
    pub animation: Animation,
    /// CSS time value delaying the animation start, e.g. `0.2s`.
    pub animation_delay: Option<String>,
}

impl Style {
    /// Default style for a newly placed element of `kind`.
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            corner_radius: kind.default_corner_radius(),
            color: Swatch::Slate,
            animation: Animation::Pulse,
            animation_delay: None,
        }
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: i32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the swatch.
    #[must_use]
    pub fn with_color(mut self, color: Swatch) -> Self {
        self.color = color;
        self
    }

    /// Set the animation.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Set the animation delay.
    #[must_use]
    pub fn with_delay(mut self, delay: impl Into<String>) -> Self {
        self.animation_delay = Some(delay.into());
        self
    }
}

/// A skeleton element: geometry, style, stacking order and lock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Corner radius in pixels. Derived from the size for circles.
    #[serde(alias = "borderRadius")]
    pub corner_radius: i32,
    /// Palette swatch.
    #[serde(default)]
    pub color: Swatch,
    /// Shimmer animation.
    #[serde(default)]
    pub animation: Animation,
    /// CSS time value delaying the animation start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_delay: Option<String>,
    /// Stacking order; higher is drawn on top.
    #[serde(default)]
    pub z_index: i32,
    /// Locked elements ignore move, resize and marquee selection.
    #[serde(default)]
    pub locked: bool,
}

impl Element {
    /// Create a new element with a fresh id at z-index 0.
    ///
    /// Circles take half their smaller side as corner radius regardless of
    /// the radius in `style`.
    #[must_use]
    pub fn new(kind: ElementKind, rect: Rect, style: Style) -> Self {
        let corner_radius = if kind == ElementKind::Circle {
            rect.width.min(rect.height) / 2
        } else {
            style.corner_radius
        };
        Self {
            id: ElementId::new(),
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            corner_radius,
            color: style.color,
            animation: style.animation,
            animation_delay: style.animation_delay,
            z_index: 0,
            locked: false,
        }
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Element kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Current geometry.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            corner_radius: self.corner_radius,
            color: self.color,
            animation: self.animation,
            animation_delay: self.animation_delay.clone(),
        }
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the lock state.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Copy of this element moved to a new origin.
    #[must_use]
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    /// Copy of this element with new geometry.
    ///
    /// Circles keep their radius at half the larger side.
    #[must_use]
    pub fn resized(&self, rect: Rect) -> Self {
        let mut next = self.clone();
        next.x = rect.x;
        next.y = rect.y;
        next.width = rect.width;
        next.height = rect.height;
        if next.kind == ElementKind::Circle {
            next.corner_radius = circle_radius(rect.width, rect.height);
        }
        next
    }

    /// Copy under a fresh id, offset by `(dx, dy)`.
    #[must_use]
    pub fn duplicate(&self, dx: i32, dy: i32) -> Self {
        Self {
            id: ElementId::new(),
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self.clone()
        }
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

/// Largest accepted z-index magnitude in loaded layouts and patches.
pub const MAX_Z_INDEX: i32 = 1_000_000;

/// Radius keeping a resized circle round: half the larger side, rounded.
#[must_use]
pub fn circle_radius(width: i32, height: i32) -> i32 {
    let side = width.max(height);
    side / 2 + side % 2
}

/// Highest z-index in `elements`, or 0 when empty.
#[must_use]
pub fn max_z_index(elements: &[Element]) -> i32 {
    elements.iter().map(|e| e.z_index).max().unwrap_or(0)
}

/// Create an element stacked above everything in `existing`.
#[must_use]
pub fn create_element(
    existing: &[Element],
    kind: ElementKind,
    rect: Rect,
    style: Style,
) -> Element {
    Element::new(kind, rect, style).with_z_index(max_z_index(existing).saturating_add(1))
}

/// Partial update applied to an element.
///
/// `None` fields are left untouched. A radius on a circle is ignored; its
/// radius follows from the size. Sizes are floored at [`MIN_ELEMENT_SIZE`];
/// positions, sizes and z-index are clamped to [`MAX_COORDINATE`] and
/// [`MAX_Z_INDEX`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    /// New left edge.
    pub x: Option<i32>,
    /// New top edge.
    pub y: Option<i32>,
    /// New width.
    pub width: Option<i32>,
    /// New height.
    pub height: Option<i32>,
    /// New corner radius.
    #[serde(alias = "borderRadius")]
    pub corner_radius: Option<i32>,
    /// New swatch.
    pub color: Option<Swatch>,
    /// New animation.
    pub animation: Option<Animation>,
    /// New animation delay; `Some(None)` clears it.
    #[serde(deserialize_with = "present")]
    pub animation_delay: Option<Option<String>>,
    /// New z-index.
    pub z_index: Option<i32>,
}

impl ElementPatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Apply the patch, returning the updated element.
    #[must_use]
    pub fn apply(&self, element: &Element) -> Element {
        let mut next = element.clone();
        let position = |v: i32| v.clamp(-MAX_COORDINATE, MAX_COORDINATE);
        let size = |v: i32| v.clamp(MIN_ELEMENT_SIZE, MAX_COORDINATE);
        if let Some(x) = self.x {
            next.x = position(x);
        }
        if let Some(y) = self.y {
            next.y = position(y);
        }
        if let Some(width) = self.width {
            next.width = size(width);
        }
        if let Some(height) = self.height {
            next.height = size(height);
        }
        if let Some(color) = self.color {
            next.color = color;
        }
        if let Some(animation) = self.animation {
            next.animation = animation;
        }
        if let Some(delay) = &self.animation_delay {
            next.animation_delay.clone_from(delay);
        }
        if let Some(z_index) = self.z_index {
            next.z_index = z_index.clamp(-MAX_Z_INDEX, MAX_Z_INDEX);
        }
        if next.kind == ElementKind::Circle {
            if self.width.is_some() || self.height.is_some() {
                next.corner_radius = circle_radius(next.width, next.height);
            }
        } else if let Some(radius) = self.corner_radius {
            next.corner_radius = radius.clamp(0, MAX_COORDINATE);
        }
        next
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// How a batch update computes each element's patch.
pub enum BatchUpdate<'a> {
    /// The same patch for every target.
    Patch(ElementPatch),
    /// A patch computed from each target element.
    Transform(&'a dyn Fn(&Element) -> ElementPatch),
}

impl BatchUpdate<'_> {
    /// Apply to one element.
    #[must_use]
    pub fn apply(&self, element: &Element) -> Element {
        match self {
            Self::Patch(patch) => patch.apply(element),
            Self::Transform(f) => f(element).apply(element),
        }
    }
}

impl std::fmt::Debug for BatchUpdate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}
