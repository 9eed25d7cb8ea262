//! Port attachment points and their containment check.
//!
//! Ports are validated after the enforcement walk, against the corrected
//! rectangle of their host. Unlike node containment, a port outside its
//! boundary is always an error: the boundary's mode does not apply.

use enclave_core::{
    diagnostic::{Actual, Diagnostic, DiagnosticCode, SuggestedFix},
    geometry::{Point, Rect},
    scene::{Port, Side},
};

/// Computes the absolute attachment point of a port on `host`.
///
/// # Examples
///
/// ```
/// # use enclave::port::port_point;
/// # use enclave_core::geometry::{Point, Rect};
/// # use enclave_core::scene::Side;
/// let host = Rect::new(0.0, 0.0, 50.0, 50.0);
/// assert_eq!(port_point(Side::Right, 10.0, host), Point::new(50.0, 10.0));
/// assert_eq!(port_point(Side::Top, 10.0, host), Point::new(10.0, 0.0));
/// ```
pub fn port_point(side: Side, offset: f32, host: Rect) -> Point {
    match side {
        Side::Left => Point::new(host.x(), host.y() + offset),
        Side::Right => Point::new(host.right(), host.y() + offset),
        Side::Top => Point::new(host.x() + offset, host.y()),
        Side::Bottom => Point::new(host.x() + offset, host.bottom()),
    }
}

/// The corrected geometry of the node a port is attached to.
#[derive(Debug, Clone, Copy)]
pub struct PortHost {
    /// Absolute rectangle after enforcement.
    pub rect: Rect,
    /// Absolute origin of the host's parent, used to express fixes locally.
    pub parent_origin: Point,
}

/// The boundary a port is measured against.
#[derive(Debug, Clone, Copy)]
pub struct PortBoundary<'a> {
    pub id: &'a str,
    pub rect: Rect,
    pub tolerance: f32,
}

/// Checks that a port's attachment point lies inside its boundary.
///
/// Returns a `PORT_OUTSIDE` error when it does not. The diagnostic is keyed
/// by the host node id and carries, as its suggested fix, the host rectangle
/// clamped into the boundary (in the host's local coordinates).
pub fn validate_port(port: &Port, host: PortHost, boundary: PortBoundary<'_>) -> Option<Diagnostic> {
    let point = port_point(port.side, port.offset, host.rect);
    if boundary.rect.contains_point(point, boundary.tolerance) {
        return None;
    }

    let clamped = host.rect.clamp_to(&boundary.rect);
    let diagnostic = Diagnostic::error(
        DiagnosticCode::PortOutside,
        &port.node_id,
        format!(
            "port `{}` at ({}, {}) is outside boundary `{}`",
            port.id,
            point.x(),
            point.y(),
            boundary.id
        ),
    )
    .with_boundary(boundary.id)
    .with_actual(Actual::Point(point))
    .with_suggested_fix(SuggestedFix::move_to(
        clamped.origin().sub_point(host.parent_origin),
    ));

    Some(diagnostic)
}

#[cfg(test)]
mod tests {
    use enclave_core::diagnostic::Severity;

    use super::*;

    fn boundary(rect: Rect) -> PortBoundary<'static> {
        PortBoundary {
            id: "b",
            rect,
            tolerance: 0.0,
        }
    }

    #[test]
    fn test_port_point_per_side() {
        let host = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(port_point(Side::Left, 5.0, host), Point::new(10.0, 25.0));
        assert_eq!(port_point(Side::Right, 5.0, host), Point::new(40.0, 25.0));
        assert_eq!(port_point(Side::Top, 5.0, host), Point::new(15.0, 20.0));
        assert_eq!(port_point(Side::Bottom, 5.0, host), Point::new(15.0, 60.0));
    }

    #[test]
    fn test_port_outside_scenario() {
        let port = Port::new("p", "host", Side::Right, 10.0);
        let host = PortHost {
            rect: Rect::new(0.0, 0.0, 50.0, 50.0),
            parent_origin: Point::default(),
        };

        let diag = validate_port(&port, host, boundary(Rect::new(0.0, 0.0, 40.0, 100.0))).unwrap();

        assert_eq!(diag.code(), DiagnosticCode::PortOutside);
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.node_id(), "host");
        assert_eq!(diag.boundary_id(), Some("b"));
        assert_eq!(diag.actual(), Some(Actual::Point(Point::new(50.0, 10.0))));
        // Host is wider than the boundary: pinned to its left edge.
        assert_eq!(
            diag.suggested_fix().and_then(|fix| fix.at),
            Some(Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_port_on_edge_is_inside() {
        let port = Port::new("p", "host", Side::Right, 10.0);
        let host = PortHost {
            rect: Rect::new(0.0, 0.0, 40.0, 50.0),
            parent_origin: Point::default(),
        };

        assert!(validate_port(&port, host, boundary(Rect::new(0.0, 0.0, 40.0, 100.0))).is_none());
    }

    #[test]
    fn test_port_tolerance_and_local_fix() {
        let port = Port::new("p", "host", Side::Bottom, 0.0);
        let host = PortHost {
            rect: Rect::new(110.0, 150.0, 20.0, 20.0),
            parent_origin: Point::new(100.0, 100.0),
        };
        let rect = Rect::new(100.0, 100.0, 50.0, 65.0);

        let within = PortBoundary {
            id: "b",
            rect,
            tolerance: 5.0,
        };
        assert!(validate_port(&port, host, within).is_none());

        let diag = validate_port(&port, host, boundary(rect)).unwrap();
        assert_eq!(
            diag.suggested_fix().and_then(|fix| fix.at),
            Some(Point::new(10.0, 45.0))
        );
    }
}
