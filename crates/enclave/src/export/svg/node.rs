//! Node painting: boundaries, shapes, sprites, text, and raw content.

use svg::node::{Blob, element as svg_element};

use enclave_core::{
    draw::{LayeredOutput, RenderLayer, SvgNode},
    geometry::Rect,
    scene::{BoundaryNode, RawNode, ShapeKind, ShapeNode, SpriteNode, TextNode},
};

use super::{Svg, fill_or_none, resolve_color};

const FRAME_STROKE: &str = "#94a3b8";
const SHAPE_STROKE: &str = "#334155";
const TEXT_FILL: &str = "#0f172a";
const TITLE_FONT_SIZE: f32 = 12.0;
const DEFAULT_FONT_SIZE: f32 = 14.0;

impl Svg<'_> {
    /// A boundary becomes its own group: frame, title, then everything
    /// painted in its container. The group carries the containment
    /// attribute when the boundary needs containment.
    pub(super) fn render_boundary(&self, boundary: &BoundaryNode, rect: Rect) -> SvgNode {
        let mut output = LayeredOutput::new();

        let radius = boundary
            .radius
            .unwrap_or_else(|| self.config.style().border_radius());
        let frame = rect_element(rect)
            .set("rx", radius)
            .set("fill", fill_or_none(boundary.fill.as_deref(), &boundary.id))
            .set(
                "stroke",
                &resolve_color(boundary.stroke.as_deref(), FRAME_STROKE, &boundary.id),
            )
            .set("stroke-dasharray", "6 4");
        output.add_to_layer(RenderLayer::Frame, Box::new(frame));

        if let Some(title) = &boundary.title {
            let text = svg_element::Text::new(title.as_str())
                .set("x", rect.x() + radius.max(4.0))
                .set("y", rect.y() + TITLE_FONT_SIZE + 4.0)
                .set("font-size", TITLE_FONT_SIZE)
                .set("font-weight", "bold")
                .set("fill", FRAME_STROKE);
            output.add_to_layer(RenderLayer::Label, Box::new(text));
        }

        output.merge(self.render_container(Some(boundary.id.as_str())));

        let mut group = svg_element::Group::new()
            .set("id", boundary.id.as_str())
            .set("data-kind", "boundary");
        if let Some((name, reference)) = self.containment_attribute(&boundary.id) {
            group = group.set(name, reference);
        }

        Box::new(
            output
                .render()
                .into_iter()
                .fold(group, |group, node| group.add(node)),
        )
    }

    pub(super) fn render_shape(&self, shape: &ShapeNode, rect: Rect) -> SvgNode {
        let fill = fill_or_none(shape.fill.as_deref(), &shape.id);
        let stroke = resolve_color(shape.stroke.as_deref(), SHAPE_STROKE, &shape.id);

        match shape.shape {
            ShapeKind::Rect => Box::new(
                rect_element(rect)
                    .set("id", shape.id.as_str())
                    .set("rx", shape.radius.unwrap_or(0.0))
                    .set("fill", fill)
                    .set("stroke", &stroke),
            ),
            ShapeKind::Ellipse => {
                let center = rect.center();
                Box::new(
                    svg_element::Ellipse::new()
                        .set("id", shape.id.as_str())
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("rx", (rect.width() / 2.0).max(0.0))
                        .set("ry", (rect.height() / 2.0).max(0.0))
                        .set("fill", fill)
                        .set("stroke", &stroke),
                )
            }
        }
    }

    /// Sprites reference symbols supplied outside the scene.
    pub(super) fn render_sprite(&self, sprite: &SpriteNode, rect: Rect) -> SvgNode {
        Box::new(
            svg_element::Use::new()
                .set("id", sprite.id.as_str())
                .set("href", format!("#{}", sprite.symbol))
                .set("x", rect.x())
                .set("y", rect.y())
                .set("width", rect.width().max(0.0))
                .set("height", rect.height().max(0.0)),
        )
    }

    pub(super) fn render_text(&self, text: &TextNode, rect: Rect) -> SvgNode {
        let font_size = text.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        Box::new(
            svg_element::Text::new(text.content.as_str())
                .set("id", text.id.as_str())
                .set("x", rect.x())
                .set("y", rect.y() + font_size)
                .set("font-size", font_size)
                .set(
                    "fill",
                    &resolve_color(text.fill.as_deref(), TEXT_FILL, &text.id),
                ),
        )
    }

    /// Raw content is emitted verbatim inside a translated group.
    pub(super) fn render_raw(&self, raw: &RawNode, rect: Rect) -> SvgNode {
        Box::new(
            svg_element::Group::new()
                .set("id", raw.id.as_str())
                .set("data-kind", "raw-content")
                .set("transform", format!("translate({}, {})", rect.x(), rect.y()))
                .add(Blob::new(raw.content.as_str())),
        )
    }
}

/// A `<rect>` covering `rect`, with negative extents clamped to zero.
fn rect_element(rect: Rect) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width().max(0.0))
        .set("height", rect.height().max(0.0))
}
