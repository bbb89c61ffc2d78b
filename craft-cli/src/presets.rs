//! Built-in layouts: content skeletons, loaders and spinners.

use std::f64::consts::PI;
use std::fmt;

use craft_core::{Animation, Element, ElementKind, Rect, Style, Swatch};

/// Preset group, as shown in a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetCategory {
    /// Content placeholders such as cards and lists.
    Skeleton,
    /// Small animated loading indicators.
    Loader,
    /// Rotating or ring-shaped indicators.
    Spinner,
}

impl PresetCategory {
    /// Every category, in gallery order.
    pub const ALL: [Self; 3] = [Self::Skeleton, Self::Loader, Self::Spinner];
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skeleton => "Skeletons",
            Self::Loader => "Loaders",
            Self::Spinner => "Spinners",
        })
    }
}

/// A named layout.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Display name.
    pub name: &'static str,
    /// Gallery group.
    pub category: PresetCategory,
    shapes: fn() -> Vec<Shape>,
}

impl Preset {
    /// Fresh elements for this preset, stacked in list order from z-index 1.
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        (self.shapes)()
            .into_iter()
            .zip(1..)
            .map(|(shape, z)| shape.into_element().with_z_index(z))
            .collect()
    }

    /// Lowercase, dash-separated name, e.g. `article-card`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.name)
    }
}

/// Every built-in preset.
#[must_use]
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Look a preset up by display name or slug, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<&'static Preset> {
    let wanted = slugify(name);
    PRESETS.iter().find(|p| p.slug() == wanted)
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

static PRESETS: [Preset; 16] = [
    Preset { name: "Article Card", category: PresetCategory::Skeleton, shapes: article_card },
    Preset { name: "User Profile Card", category: PresetCategory::Skeleton, shapes: user_profile_card },
    Preset { name: "Video Card", category: PresetCategory::Skeleton, shapes: video_card },
    Preset { name: "Email List", category: PresetCategory::Skeleton, shapes: email_list },
    Preset { name: "Dashboard Widgets", category: PresetCategory::Skeleton, shapes: dashboard_widgets },
    Preset { name: "Data Table", category: PresetCategory::Skeleton, shapes: data_table },
    Preset { name: "Bar Pulse", category: PresetCategory::Loader, shapes: bar_pulse },
    Preset { name: "Three Dots Fade", category: PresetCategory::Loader, shapes: three_dots_fade },
    Preset { name: "Shifting Squares", category: PresetCategory::Loader, shapes: shifting_squares },
    Preset { name: "Jumping Dots", category: PresetCategory::Loader, shapes: jumping_dots },
    Preset { name: "Heartbeat", category: PresetCategory::Loader, shapes: heartbeat },
    Preset { name: "Classic Spinner", category: PresetCategory::Spinner, shapes: classic_spinner },
    Preset { name: "Orbit", category: PresetCategory::Spinner, shapes: orbit },
    Preset { name: "Breathing Circle", category: PresetCategory::Spinner, shapes: breathing_circle },
    Preset { name: "Fading Dots", category: PresetCategory::Spinner, shapes: fading_dots },
    Preset { name: "Spinning Dashes", category: PresetCategory::Spinner, shapes: spinning_dashes },
];

// ============================================================================
// Shape builder
// ============================================================================

#[derive(Debug, Clone)]
struct Shape {
    kind: ElementKind,
    rect: Rect,
    radius: i32,
    color: Swatch,
    animation: Animation,
    delay: Option<String>,
}

impl Shape {
    fn new(kind: ElementKind, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, width, height),
            radius: 4,
            color: Swatch::Slate,
            animation: Animation::Pulse,
            delay: None,
        }
    }

    fn radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    fn color(mut self, color: Swatch) -> Self {
        self.color = color;
        self
    }

    fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    fn delay(mut self, delay: impl Into<String>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    fn into_element(self) -> Element {
        let mut style = Style::for_kind(self.kind)
            .with_corner_radius(self.radius)
            .with_color(self.color)
            .with_animation(self.animation);
        if let Some(delay) = self.delay {
            style = style.with_delay(delay);
        }
        Element::new(self.kind, self.rect, style)
    }
}

fn rect(x: i32, y: i32, width: i32, height: i32) -> Shape {
    Shape::new(ElementKind::Rectangle, x, y, width, height)
}

fn circle(x: i32, y: i32, size: i32) -> Shape {
    Shape::new(ElementKind::Circle, x, y, size, size)
}

/// `count` shapes evenly spaced on a circle around `center`, starting at
/// `offset` radians, each delayed `stagger` seconds after the previous one.
struct Ring {
    count: u32,
    radius: f64,
    center: (f64, f64),
    size: (i32, i32),
    kind: ElementKind,
    animation: Animation,
    stagger: f64,
    offset: f64,
}

impl Ring {
    #[allow(clippy::cast_possible_truncation)]
    fn shapes(&self) -> Vec<Shape> {
        let (w, h) = self.size;
        (0..self.count)
            .map(|i| {
                let angle = self.offset + f64::from(i) / f64::from(self.count) * 2.0 * PI;
                let x = self.center.0 + self.radius * angle.cos() - f64::from(w) / 2.0;
                let y = self.center.1 + self.radius * angle.sin() - f64::from(h) / 2.0;
                Shape::new(self.kind, x.round() as i32, y.round() as i32, w, h)
                    .animation(self.animation)
                    .delay(format!("{}s", f64::from(i) * self.stagger))
            })
            .collect()
    }
}

// ============================================================================
// Skeletons
// ============================================================================

fn article_card() -> Vec<Shape> {
    vec![
        rect(20, 20, 560, 200).radius(8),
        rect(20, 240, 400, 24),
        rect(20, 274, 560, 16),
        rect(20, 300, 520, 16),
    ]
}

fn user_profile_card() -> Vec<Shape> {
    vec![
        circle(250, 40, 100),
        rect(210, 160, 180, 28),
        rect(240, 198, 120, 16),
        rect(40, 250, 520, 16),
        rect(40, 276, 480, 16),
    ]
}

fn video_card() -> Vec<Shape> {
    vec![
        rect(20, 20, 360, 200).radius(8).animation(Animation::Wave),
        circle(20, 240, 48),
        rect(88, 240, 292, 20),
        rect(88, 270, 210, 16),
    ]
}

fn email_list() -> Vec<Shape> {
    [
        (Swatch::Slate, 20, 200, 450),
        (Swatch::Gray, 90, 250, 480),
        (Swatch::Zinc, 160, 180, 420),
    ]
    .into_iter()
    .flat_map(|(color, top, title, preview)| {
        [
            circle(20, top, 48).color(color),
            rect(88, top + 5, title, 18).color(color),
            rect(88, top + 33, preview, 14).color(color),
        ]
    })
    .collect()
}

fn dashboard_widgets() -> Vec<Shape> {
    vec![
        rect(20, 20, 270, 150).radius(12),
        rect(310, 20, 270, 150).radius(12),
        rect(20, 190, 560, 190)
            .radius(12)
            .color(Swatch::Gray)
            .animation(Animation::Wave),
    ]
}

fn data_table() -> Vec<Shape> {
    let mut shapes = vec![rect(20, 20, 560, 40).radius(6)];
    let stripes = [Swatch::Gray, Swatch::Zinc, Swatch::Gray, Swatch::Zinc, Swatch::Gray];
    shapes.extend(stripes.into_iter().zip((80..).step_by(42)).map(|(color, y)| {
        rect(20, y, 560, 32)
            .color(color)
            .animation(Animation::None)
    }));
    shapes
}

// ============================================================================
// Loaders
// ============================================================================

const STAGGERED: [(Swatch, &str); 4] = [
    (Swatch::Slate, "0s"),
    (Swatch::Gray, "0.2s"),
    (Swatch::Zinc, "0.4s"),
    (Swatch::Neutral, "0.6s"),
];

fn bar_pulse() -> Vec<Shape> {
    STAGGERED
        .into_iter()
        .zip((260..).step_by(20))
        .map(|((color, delay), x)| {
            rect(x, 180, 10, 40)
                .color(color)
                .animation(Animation::Bounce)
                .delay(delay)
        })
        .collect()
}

fn three_dots_fade() -> Vec<Shape> {
    [(Swatch::Slate, "0s"), (Swatch::Gray, "0.25s"), (Swatch::Zinc, "0.5s")]
        .into_iter()
        .zip((260..).step_by(40))
        .map(|((color, delay), x)| {
            circle(x, 190, 20)
                .color(color)
                .animation(Animation::Fade)
                .delay(delay)
        })
        .collect()
}

fn shifting_squares() -> Vec<Shape> {
    let cells = [(280, 180), (320, 180), (280, 220), (320, 220)];
    STAGGERED
        .into_iter()
        .zip(cells)
        .map(|((color, delay), (x, y))| {
            rect(x, y, 20, 20)
                .color(color)
                .animation(Animation::Bounce)
                .delay(delay)
        })
        .collect()
}

fn jumping_dots() -> Vec<Shape> {
    [(Swatch::Slate, "0s"), (Swatch::Gray, "0.1s"), (Swatch::Zinc, "0.2s")]
        .into_iter()
        .zip((270..).step_by(30))
        .map(|((color, delay), x)| {
            circle(x, 200, 15)
                .color(color)
                .animation(Animation::Bounce)
                .delay(delay)
        })
        .collect()
}

fn heartbeat() -> Vec<Shape> {
    vec![rect(290, 190, 40, 40).radius(8).delay("0s")]
}

// ============================================================================
// Spinners
// ============================================================================

const CENTER: (f64, f64) = (300.0, 200.0);

// The masking disc and notch share the ring's swatch.
fn classic_spinner() -> Vec<Shape> {
    vec![
        rect(275, 175, 50, 50).radius(25).animation(Animation::Spin).delay("0s"),
        rect(280, 180, 40, 40).radius(20).animation(Animation::None).delay("0s"),
        rect(295, 175, 10, 25).radius(5).animation(Animation::None).delay("0s"),
    ]
}

fn orbit() -> Vec<Shape> {
    Ring {
        count: 1,
        radius: 40.0,
        center: CENTER,
        size: (12, 12),
        kind: ElementKind::Circle,
        animation: Animation::Spin,
        stagger: 0.0,
        offset: 0.0,
    }
    .shapes()
}

fn breathing_circle() -> Vec<Shape> {
    vec![circle(280, 180, 40)]
}

fn fading_dots() -> Vec<Shape> {
    Ring {
        count: 8,
        radius: 35.0,
        center: CENTER,
        size: (10, 10),
        kind: ElementKind::Circle,
        animation: Animation::Fade,
        stagger: 0.125,
        offset: 0.0,
    }
    .shapes()
}

fn spinning_dashes() -> Vec<Shape> {
    let dashes = |offset| Ring {
        count: 4,
        radius: 35.0,
        center: CENTER,
        size: (6, 18),
        kind: ElementKind::Rectangle,
        animation: Animation::Spin,
        stagger: 0.0,
        offset,
    };
    let mut shapes = dashes(0.0).shapes();
    shapes.extend(dashes(PI / 4.0).shapes());
    shapes
}
