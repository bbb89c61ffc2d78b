//! Canvas geometry: integer element rectangles, pointer points, marquee
//! rectangles and the eight resize handles.

use serde::{Deserialize, Serialize};

/// Fixed canvas width in pixels.
pub const CANVAS_WIDTH: i32 = 600;

/// Fixed canvas height in pixels.
pub const CANVAS_HEIGHT: i32 = 400;

/// Minimum width/height enforced by interactive resizing.
pub const MIN_ELEMENT_SIZE: i32 = 10;

/// Largest accepted coordinate magnitude or dimension in loaded and imported
/// layouts.
pub const MAX_COORDINATE: i32 = 1_000_000;

/// A marquee smaller than this in both dimensions counts as a click.
pub const MARQUEE_CLICK_THRESHOLD: f32 = 5.0;

/// Half the side length of the square hit area around a resize handle.
pub const HANDLE_HIT_HALF_SIZE: f32 = 6.0;

/// A pointer position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from the canvas left edge).
    pub x: f32,
    /// Y position (pixels from the canvas top edge).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer element geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether position and size lie within [`MAX_COORDINATE`] and the size
    /// is positive.
    #[must_use]
    pub fn is_within_limits(&self) -> bool {
        let limit = -MAX_COORDINATE..=MAX_COORDINATE;
        limit.contains(&self.x)
            && limit.contains(&self.y)
            && (1..=MAX_COORDINATE).contains(&self.width)
            && (1..=MAX_COORDINATE).contains(&self.height)
    }

    /// Check if a point lies within the rectangle (edges inclusive).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x as f32
            && point.x <= self.right() as f32
            && point.y >= self.y as f32
            && point.y <= self.bottom() as f32
    }

    /// Smallest rectangle enclosing every rectangle in `rects`.
    ///
    /// Returns `None` for an empty iterator.
    #[must_use]
    pub fn enclosing<I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        rects.into_iter().fold(None, |acc, r| {
            Some(match acc {
                None => r,
                Some(b) => {
                    let x = b.x.min(r.x);
                    let y = b.y.min(r.y);
                    let right = b.right().max(r.right());
                    let bottom = b.bottom().max(r.bottom());
                    Self::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
                }
            })
        })
    }
}

/// Normalized rubber-band rectangle spanned by two pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marquee {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl Marquee {
    /// Span a marquee between two points in any drag direction.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Marquee width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Marquee height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// A marquee under the click threshold in both dimensions is a click.
    #[must_use]
    pub fn is_click(&self) -> bool {
        self.width() < MARQUEE_CLICK_THRESHOLD && self.height() < MARQUEE_CLICK_THRESHOLD
    }

    /// Strict interval overlap on both axes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn intersects(&self, rect: Rect) -> bool {
        (rect.x as f32) < self.x2
            && (rect.right() as f32) > self.x1
            && (rect.y as f32) < self.y2
            && (rect.bottom() as f32) > self.y1
    }
}

/// Which edge of one axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisEdge {
    /// Axis untouched by the handle.
    Fixed,
    /// Left or top edge: moving it shifts the origin.
    Start,
    /// Right or bottom edge: moving it changes only the size.
    End,
}

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge midpoint.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge midpoint.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge midpoint.
    Left,
}

impl Handle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    const fn horizontal(self) -> AxisEdge {
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => AxisEdge::Start,
            Self::TopRight | Self::Right | Self::BottomRight => AxisEdge::End,
            Self::Top | Self::Bottom => AxisEdge::Fixed,
        }
    }

    const fn vertical(self) -> AxisEdge {
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => AxisEdge::Start,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => AxisEdge::End,
            Self::Left | Self::Right => AxisEdge::Fixed,
        }
    }

    /// Canvas position of this handle on `rect`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn anchor(self, rect: Rect) -> Point {
        let along = |edge: AxisEdge, start: i32, size: i32| match edge {
            AxisEdge::Start => start as f32,
            AxisEdge::End => start.saturating_add(size) as f32,
            AxisEdge::Fixed => start as f32 + size as f32 / 2.0,
        };
        Point::new(
            along(self.horizontal(), rect.x, rect.width),
            along(self.vertical(), rect.y, rect.height),
        )
    }

    /// Find the handle of `rect` whose hit square contains `point`.
    #[must_use]
    pub fn at(rect: Rect, point: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|handle| {
            let anchor = handle.anchor(rect);
            (point.x - anchor.x).abs() <= HANDLE_HIT_HALF_SIZE
                && (point.y - anchor.y).abs() <= HANDLE_HIT_HALF_SIZE
        })
    }

    /// Apply a pointer delta to the rectangle captured at gesture start.
    ///
    /// Dimensions never drop below [`MIN_ELEMENT_SIZE`] and the edge opposite
    /// the dragged one never moves.
    #[must_use]
    pub fn resize(self, start: Rect, dx: f32, dy: f32) -> Rect {
        let (x, width) = resize_axis(start.x, start.width, dx, self.horizontal());
        let (y, height) = resize_axis(start.y, start.height, dy, self.vertical());
        Rect::new(x, y, width, height)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn resize_axis(origin: i32, size: i32, delta: f32, edge: AxisEdge) -> (i32, i32) {
    match edge {
        AxisEdge::Fixed => (origin, size.max(MIN_ELEMENT_SIZE)),
        AxisEdge::End => {
            let size = (size as f32 + delta).round() as i32;
            (origin, size.max(MIN_ELEMENT_SIZE))
        }
        AxisEdge::Start => {
            let far = origin.saturating_add(size);
            let moved = (origin as f32 + delta).round() as i32;
            if far.saturating_sub(moved) < MIN_ELEMENT_SIZE {
                (far.saturating_sub(MIN_ELEMENT_SIZE), MIN_ELEMENT_SIZE)
            } else {
                (moved, far.saturating_sub(moved))
            }
        }
    }
}
