//! Connector path geometry and arrowhead markers.

use std::collections::BTreeMap;

use log::trace;
use svg::node::element as svg_element;

use crate::{color::Color, draw::SvgNode, geometry::Point, scene::ConnectorStyle};

/// Builds the SVG path data for a connector between two absolute points.
///
/// # Examples
///
/// ```
/// # use enclave_core::draw::path_data;
/// # use enclave_core::geometry::Point;
/// # use enclave_core::scene::ConnectorStyle;
/// let d = path_data(Point::new(0.0, 0.0), Point::new(10.0, 4.0), ConnectorStyle::Straight);
/// assert_eq!(d, "M 0 0 L 10 4");
/// ```
pub fn path_data(start: Point, end: Point, style: ConnectorStyle) -> String {
    match style {
        ConnectorStyle::Straight => straight_path_data(start, end),
        ConnectorStyle::Curved => curved_path_data(start, end),
        ConnectorStyle::Orthogonal => orthogonal_path_data(start, end),
    }
}

fn straight_path_data(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

/// Cubic bezier with control points a quarter of the way in from each end.
fn curved_path_data(start: Point, end: Point) -> String {
    let ctrl1_x = start.x() + (end.x() - start.x()) / 4.0;
    let ctrl1_y = start.y() - (end.y() - start.y()) / 2.0;

    let ctrl2_x = end.x() - (end.x() - start.x()) / 4.0;
    let ctrl2_y = end.y() + (start.y() - end.y()) / 2.0;

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        ctrl1_x,
        ctrl1_y,
        ctrl2_x,
        ctrl2_y,
        end.x(),
        end.y()
    )
}

/// Horizontal and vertical segments only, bending at the midpoint of the
/// dominant axis.
fn orthogonal_path_data(start: Point, end: Point) -> String {
    let delta = end.sub_point(start);
    let mid = start.midpoint(end);

    if delta.x().abs() > delta.y().abs() {
        format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            mid.x(),
            start.y(),
            mid.x(),
            end.y(),
            end.x(),
            end.y()
        )
    } else {
        format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            start.x(),
            mid.y(),
            end.x(),
            mid.y(),
            end.x(),
            end.y()
        )
    }
}

/// Collects the stroke colors used by connectors and emits one arrowhead
/// marker definition per color.
///
/// Markers are keyed by their id in a sorted map so the emitted definitions
/// do not depend on insertion order.
#[derive(Debug, Default)]
pub struct ArrowMarkers {
    markers: BTreeMap<String, Color>,
}

impl ArrowMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `color` and returns the `url(#...)` reference for `marker-end`.
    pub fn marker_for(&mut self, color: Color) -> String {
        let id = Self::marker_id(&color);
        let reference = format!("url(#{id})");
        if self.markers.insert(id, color).is_none() {
            trace!(color:% = color; "Arrow marker registered");
        }
        reference
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Emits a `<defs>` element containing every registered marker.
    pub fn definitions(&self) -> SvgNode {
        self.markers
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(Self::create_marker(id, color))
            })
            .into()
    }

    fn marker_id(color: &Color) -> String {
        let sanitized: String = color
            .to_string()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("arrow-{sanitized}")
    }

    fn create_marker(id: &str, color: &Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color)
                    .set("fill-opacity", color.alpha()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curved_path_has_control_points() {
        let d = path_data(Point::new(0.0, 0.0), Point::new(8.0, 4.0), ConnectorStyle::Curved);
        assert_eq!(d, "M 0 0 C 2 -2, 6 6, 8 4");
    }

    #[test]
    fn test_orthogonal_path_prefers_dominant_axis() {
        let horizontal = path_data(
            Point::new(0.0, 0.0),
            Point::new(10.0, 2.0),
            ConnectorStyle::Orthogonal,
        );
        assert_eq!(horizontal, "M 0 0 L 5 0 L 5 2 L 10 2");

        let vertical = path_data(
            Point::new(0.0, 0.0),
            Point::new(2.0, 10.0),
            ConnectorStyle::Orthogonal,
        );
        assert_eq!(vertical, "M 0 0 L 0 5 L 2 5 L 2 10");
    }

    #[test]
    fn test_markers_are_deduplicated() {
        let mut markers = ArrowMarkers::new();
        assert!(markers.is_empty());

        let red = Color::new("red").unwrap();
        let first = markers.marker_for(red);
        let second = markers.marker_for(red);
        assert_eq!(first, second);
        assert!(first.starts_with("url(#arrow-"));

        let defs = markers.definitions().to_string();
        assert_eq!(defs.matches("<marker").count(), 1);
    }
}
