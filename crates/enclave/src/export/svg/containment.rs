//! Clip and mask definitions.

use svg::node::element as svg_element;

use super::Svg;
use crate::containment::{ContainmentRegion, RegionKind};

impl Svg<'_> {
    /// A `<defs>` holding one definition per active region, or `None` when
    /// no boundary needs containment.
    pub(super) fn containment_definitions(&self) -> Option<svg_element::Definitions> {
        let mut regions = self.containment.active_regions().peekable();
        regions.peek()?;

        Some(regions.fold(svg_element::Definitions::new(), |defs, region| {
            match region.kind {
                RegionKind::Clip => defs.add(create_clip_path(region)),
                RegionKind::Mask => defs.add(create_mask(region)),
            }
        }))
    }

    /// The attribute attaching `boundary_id`'s region, if it is active.
    pub(super) fn containment_attribute(&self, boundary_id: &str) -> Option<(&'static str, String)> {
        let region = self.containment.region(boundary_id)?;
        if !region.active {
            return None;
        }
        let name = match region.kind {
            RegionKind::Clip => "clip-path",
            RegionKind::Mask => "mask",
        };
        Some((name, region.reference()))
    }
}

fn region_rect(region: &ContainmentRegion) -> svg_element::Rectangle {
    let rect = region.rect;
    svg_element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
        .set("rx", region.border_radius)
}

fn create_clip_path(region: &ContainmentRegion) -> svg_element::ClipPath {
    svg_element::ClipPath::new()
        .set("id", region.id())
        .set("clipPathUnits", "userSpaceOnUse")
        .add(region_rect(region))
}

/// White inside the region, transparent elsewhere.
fn create_mask(region: &ContainmentRegion) -> svg_element::Mask {
    let rect = region.rect;
    svg_element::Mask::new()
        .set("id", region.id())
        .set("maskUnits", "userSpaceOnUse")
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
        .add(region_rect(region).set("fill", "white"))
}
