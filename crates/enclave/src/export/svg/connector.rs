//! Connector, port, and flow painting.

use log::{debug, warn};
use svg::node::element as svg_element;

use enclave_core::{
    color::Color,
    draw::{ArrowMarkers, LayeredOutput, RenderLayer, SvgNode, path_data},
    geometry::Point,
    scene::{Connector, Flow, Port},
};

use super::{Svg, resolve_color};
use crate::{enforce::EnforcementResult, index::SceneIndex, port::port_point};

const CONNECTOR_STROKE: &str = "#475569";
const PORT_FILL: &str = "#0f172a";
const FLOW_FILL: &str = "#f59e0b";
const LABEL_FONT_SIZE: f32 = 11.0;

/// A connector with both endpoints resolved.
pub(super) struct RoutedConnector<'a> {
    pub connector: &'a Connector,
    pub path: String,
    pub midpoint: Point,
    /// Nearest boundary of the source endpoint.
    pub container: Option<&'a str>,
    pub stroke: Color,
    pub marker: String,
}

pub(super) struct PlacedPort<'a> {
    pub port: &'a Port,
    pub point: Point,
    pub container: Option<&'a str>,
}

pub(super) struct PlacedFlow<'a> {
    pub flow: &'a Flow,
    pub path: String,
    pub container: Option<&'a str>,
    pub color: Color,
}

/// Resolves every connector, dropping those with a missing endpoint.
pub(super) fn route_connectors<'a>(
    result: &'a EnforcementResult,
    index: &SceneIndex<'a>,
    markers: &mut ArrowMarkers,
) -> Vec<RoutedConnector<'a>> {
    result
        .scene
        .connectors
        .iter()
        .filter_map(|connector| {
            let endpoints = (
                index.resolve_endpoint(&connector.from, &result.rects),
                index.resolve_endpoint(&connector.to, &result.rects),
            );
            let (Some(from), Some(to)) = endpoints else {
                warn!(
                    connector_id = connector.id.as_str(),
                    from = connector.from.as_str(),
                    to = connector.to.as_str();
                    "Skipping connector with unresolved endpoint"
                );
                return None;
            };

            let stroke = resolve_color(
                connector.stroke.as_deref(),
                CONNECTOR_STROKE,
                &connector.id,
            );
            let container = index.endpoint_chain(from.host_id).first().copied();
            debug!(
                connector_id = connector.id.as_str(),
                container:? = container;
                "Connector routed"
            );

            Some(RoutedConnector {
                connector,
                path: path_data(from.point, to.point, connector.style),
                midpoint: from.point.midpoint(to.point),
                container,
                marker: markers.marker_for(stroke),
                stroke,
            })
        })
        .collect()
}

/// Places every port whose host has a corrected rectangle.
pub(super) fn place_ports<'a>(
    result: &'a EnforcementResult,
    index: &SceneIndex<'a>,
) -> Vec<PlacedPort<'a>> {
    result
        .scene
        .ports
        .iter()
        .filter_map(|port| {
            let Some(host) = result.rects.get(&port.node_id) else {
                warn!(
                    port_id = port.id.as_str(),
                    node_id = port.node_id.as_str();
                    "Skipping port with unknown host"
                );
                return None;
            };
            Some(PlacedPort {
                port,
                point: port_point(port.side, port.offset, host),
                container: index.enclosing_boundary_id(&port.node_id),
            })
        })
        .collect()
}

/// Attaches every flow to its routed connector.
pub(super) fn place_flows<'a>(
    result: &'a EnforcementResult,
    connectors: &[RoutedConnector<'a>],
) -> Vec<PlacedFlow<'a>> {
    result
        .scene
        .flows
        .iter()
        .filter_map(|flow| {
            let Some(routed) = connectors
                .iter()
                .find(|routed| routed.connector.id == flow.connector)
            else {
                warn!(
                    flow_id = flow.id.as_str(),
                    connector_id = flow.connector.as_str();
                    "Skipping flow on unknown connector"
                );
                return None;
            };
            Some(PlacedFlow {
                flow,
                path: routed.path.clone(),
                container: routed.container,
                color: resolve_color(flow.color.as_deref(), FLOW_FILL, &flow.id),
            })
        })
        .collect()
}

impl Svg<'_> {
    pub(super) fn render_connector(&self, routed: &RoutedConnector<'_>) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let path = svg_element::Path::new()
            .set("id", format!("connector-{}", routed.connector.id))
            .set("d", routed.path.as_str())
            .set("fill", "none")
            .set("stroke", &routed.stroke)
            .set("stroke-opacity", routed.stroke.alpha())
            .set("stroke-width", 1.5)
            .set("marker-end", routed.marker.as_str());
        output.add_to_layer(RenderLayer::Connector, Box::new(path));

        if let Some(label) = &routed.connector.label {
            let text = svg_element::Text::new(label.as_str())
                .set("x", routed.midpoint.x())
                .set("y", routed.midpoint.y() - 4.0)
                .set("text-anchor", "middle")
                .set("font-size", LABEL_FONT_SIZE)
                .set("fill", &routed.stroke);
            output.add_to_layer(RenderLayer::Label, Box::new(text));
        }

        output
    }

    pub(super) fn render_port(&self, placed: &PlacedPort<'_>) -> SvgNode {
        Box::new(
            svg_element::Circle::new()
                .set("id", format!("port-{}", placed.port.id))
                .set("cx", placed.point.x())
                .set("cy", placed.point.y())
                .set("r", self.config.render().port_radius())
                .set("fill", PORT_FILL),
        )
    }

    /// One circle per token, each animated along the connector path with
    /// `begin` offsets spread evenly over one duration.
    pub(super) fn render_flow(&self, placed: &PlacedFlow<'_>) -> SvgNode {
        let flow = placed.flow;
        let count = flow.count.max(1);
        let duration = flow.duration.max(f32::EPSILON);

        let group = svg_element::Group::new()
            .set("id", format!("flow-{}", flow.id))
            .set("data-kind", "flow");

        let group = (0..count).fold(group, |group, i| {
            let begin = duration * i as f32 / count as f32;
            let motion = svg_element::AnimateMotion::new()
                .set("dur", format!("{duration}s"))
                .set("begin", format!("{begin}s"))
                .set("repeatCount", "indefinite")
                .set("path", placed.path.as_str());
            group.add(
                svg_element::Circle::new()
                    .set("r", self.config.render().flow_radius())
                    .set("fill", &placed.color)
                    .set("fill-opacity", placed.color.alpha())
                    .add(motion),
            )
        });

        Box::new(group)
    }
}
