//! Align, distribute and z-order operations over a layout.
//!
//! Each function is pure: it takes the current layout plus the targeted ids
//! and returns the next layout. Locked elements contribute to bounding boxes
//! and spacing but are never moved.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::geometry::Rect;

/// Alignment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Left edges to the box's left.
    Left,
    /// Horizontal centres to the box's centre.
    CenterH,
    /// Right edges to the box's right.
    Right,
    /// Top edges to the box's top.
    Top,
    /// Vertical centres to the box's centre.
    CenterV,
    /// Bottom edges to the box's bottom.
    Bottom,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center-h" | "centerh" | "center" => Ok(Self::CenterH),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "center-v" | "centerv" | "middle" => Ok(Self::CenterV),
            "bottom" => Ok(Self::Bottom),
            _ => Err(format!("Unknown alignment: {s}")),
        }
    }
}

/// Distribution axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Equal horizontal gaps.
    Horizontal,
    /// Equal vertical gaps.
    Vertical,
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(format!("Unknown distribution: {s}")),
        }
    }
}

/// Z-order change for a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Swap with the next element up.
    Forward,
    /// Swap with the next element down.
    Backward,
    /// Move to the top.
    Front,
    /// Move to the bottom.
    Back,
}

impl FromStr for Arrangement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "bring-forward" => Ok(Self::Forward),
            "backward" | "send-backward" => Ok(Self::Backward),
            "front" | "bring-to-front" => Ok(Self::Front),
            "back" | "send-to-back" => Ok(Self::Back),
            _ => Err(format!("Unknown arrangement: {s}")),
        }
    }
}

/// Position and extent of an element along the distribution axis.
fn span_on(e: &Element, distribution: Distribution) -> (i32, i32) {
    match distribution {
        Distribution::Horizontal => (e.x, e.width),
        Distribution::Vertical => (e.y, e.height),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round(v: f64) -> i32 {
    v.round() as i32
}

/// Align the targeted elements to their common bounding box.
///
/// No-op with fewer than two targets.
#[must_use]
pub fn align(elements: &[Element], targets: &[ElementId], alignment: Alignment) -> Vec<Element> {
    let selected: Vec<&Element> = elements
        .iter()
        .filter(|e| targets.contains(&e.id()))
        .collect();
    if selected.len() < 2 {
        return elements.to_vec();
    }
    let Some(bounds) = Rect::enclosing(selected.iter().map(|e| e.rect())) else {
        return elements.to_vec();
    };
    let center_x = f64::from(bounds.x) + f64::from(bounds.width) / 2.0;
    let center_y = f64::from(bounds.y) + f64::from(bounds.height) / 2.0;

    elements
        .iter()
        .map(|e| {
            if e.locked || !targets.contains(&e.id()) {
                return e.clone();
            }
            let (x, y) = match alignment {
                Alignment::Left => (bounds.x, e.y),
                Alignment::Right => (bounds.right().saturating_sub(e.width), e.y),
                Alignment::CenterH => (round(center_x - f64::from(e.width) / 2.0), e.y),
                Alignment::Top => (e.x, bounds.y),
                Alignment::Bottom => (e.x, bounds.bottom().saturating_sub(e.height)),
                Alignment::CenterV => (e.x, round(center_y - f64::from(e.height) / 2.0)),
            };
            e.moved_to(x, y)
        })
        .collect()
}

/// Space the targeted elements with equal gaps between the two extremes.
///
/// No-op with fewer than three targets. The first and last elements along
/// the axis stay put.
#[must_use]
pub fn distribute(
    elements: &[Element],
    targets: &[ElementId],
    distribution: Distribution,
) -> Vec<Element> {
    let mut selected: Vec<&Element> = elements
        .iter()
        .filter(|e| targets.contains(&e.id()))
        .collect();
    if selected.len() < 3 {
        return elements.to_vec();
    }
    selected.sort_by_key(|e| span_on(e, distribution).0);

    let (first_pos, first_size) = span_on(selected[0], distribution);
    let (last_pos, last_size) = span_on(selected[selected.len() - 1], distribution);
    let span = f64::from(last_pos) + f64::from(last_size) - f64::from(first_pos);
    let total: f64 = selected.iter().map(|e| f64::from(span_on(e, distribution).1)).sum();
    #[allow(clippy::cast_precision_loss)]
    let gap = (span - total) / (selected.len() - 1) as f64;

    let mut placed: Vec<(ElementId, i32)> = Vec::with_capacity(selected.len() - 2);
    let mut cursor = f64::from(first_pos) + f64::from(first_size) + gap;
    for e in &selected[1..selected.len() - 1] {
        if !e.locked {
            placed.push((e.id(), round(cursor)));
        }
        cursor += f64::from(span_on(e, distribution).1) + gap;
    }

    elements
        .iter()
        .map(|e| match placed.iter().find(|(id, _)| *id == e.id()) {
            Some((_, pos)) => match distribution {
                Distribution::Horizontal => e.moved_to(*pos, e.y),
                Distribution::Vertical => e.moved_to(e.x, *pos),
            },
            None => e.clone(),
        })
        .collect()
}

/// Change the stacking position of `target` and renumber every z-index to
/// `1..=N` in stacking order.
///
/// Lock state does not matter here. Unknown targets leave the layout as is.
#[must_use]
pub fn arrange(elements: &[Element], target: ElementId, arrangement: Arrangement) -> Vec<Element> {
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z_index);

    let Some(pos) = order.iter().position(|&i| elements[i].id() == target) else {
        return elements.to_vec();
    };
    let last = order.len() - 1;
    match arrangement {
        Arrangement::Forward if pos < last => order.swap(pos, pos + 1),
        Arrangement::Backward if pos > 0 => order.swap(pos, pos - 1),
        Arrangement::Front => {
            let i = order.remove(pos);
            order.push(i);
        }
        Arrangement::Back => {
            let i = order.remove(pos);
            order.insert(0, i);
        }
        _ => {}
    }

    let mut next = elements.to_vec();
    for (z, &i) in (1..).zip(order.iter()) {
        next[i].z_index = z;
    }
    next
}
