//! Clip and mask regions derived from an enforcement result.
//!
//! Every boundary gets one [`ContainmentRegion`]. Only regions of boundaries
//! that need containment (strict mode with `clip`, `mask`, or `resize`
//! overflow) are marked active; the paint stage emits definitions and
//! `clip-path`/`mask` attributes for active regions alone.
//!
//! A connector is painted inside its source endpoint's nearest boundary, so a
//! contained boundary on that side would cut it where it crosses the edge.
//! For each contained boundary a connector leaves, a corridor is derived: the
//! bounding box of the boundary and the connector's far end, padded
//! vertically. A region then covers the composite bounding box of its
//! boundary and all of that boundary's corridors. This is a bounding-box
//! approximation, not a polygon union.

use log::debug;

use enclave_core::{
    geometry::{Insets, Rect},
    scene::{Node, Overflow},
};

use crate::{config::AppConfig, enforce::EnforcementResult, index::SceneIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Clip,
    Mask,
}

/// The clip or mask geometry of one boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentRegion {
    pub boundary_id: String,
    pub rect: Rect,
    pub border_radius: f32,
    pub kind: RegionKind,
    /// Whether the paint stage attaches this region to the boundary.
    pub active: bool,
}

impl ContainmentRegion {
    /// Id of the emitted `<clipPath>` or `<mask>` definition.
    pub fn id(&self) -> String {
        format!("clip-{}", self.boundary_id)
    }

    /// The `url(#...)` value for the `clip-path` or `mask` attribute.
    pub fn reference(&self) -> String {
        format!("url(#{})", self.id())
    }
}

/// A relaxed region letting a connector leave a contained boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    /// The contained boundary the connector leaves.
    pub from: String,
    /// The far end: the target's nearest boundary outside `from`, or the
    /// target host node itself.
    pub to: String,
    pub rect: Rect,
}

/// All regions of a scene, in walk order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Containment {
    pub clip_regions: Vec<ContainmentRegion>,
    pub mask_regions: Vec<ContainmentRegion>,
    pub corridors: Vec<Corridor>,
}

impl Containment {
    /// Finds the region of a boundary.
    pub fn region(&self, boundary_id: &str) -> Option<&ContainmentRegion> {
        self.clip_regions
            .iter()
            .chain(&self.mask_regions)
            .find(|region| region.boundary_id == boundary_id)
    }

    /// Active regions, clips first.
    pub fn active_regions(&self) -> impl Iterator<Item = &ContainmentRegion> {
        self.clip_regions
            .iter()
            .chain(&self.mask_regions)
            .filter(|region| region.active)
    }
}

/// Bounding box spanning two boundaries, padded vertically by `width`.
///
/// # Examples
///
/// ```
/// # use enclave::containment::corridor;
/// # use enclave_core::geometry::Rect;
/// let a = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let b = Rect::new(200.0, 20.0, 100.0, 100.0);
/// assert_eq!(corridor(a, b, 16.0), Rect::new(0.0, -16.0, 300.0, 152.0));
/// ```
pub fn corridor(a: Rect, b: Rect, width: f32) -> Rect {
    a.union(&b).add_padding(Insets::vertical(width))
}

/// Bounding box of all `rects`, or `None` when there are none.
pub fn composite(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, rect| acc.union(&rect))
}

/// Derives the containment regions of an enforced scene.
pub fn collect_containment(result: &EnforcementResult, config: &AppConfig) -> Containment {
    let index = SceneIndex::build(&result.scene);
    collect_with_index(result, &index, config)
}

pub(crate) fn collect_with_index(
    result: &EnforcementResult,
    index: &SceneIndex<'_>,
    config: &AppConfig,
) -> Containment {
    let render = config.render();
    let corridors = if render.corridors() {
        derive_corridors(result, index, render.corridor_width())
    } else {
        Vec::new()
    };

    let mut containment = Containment {
        corridors,
        ..Containment::default()
    };

    result.scene.walk(&mut |node| {
        let Node::Boundary(boundary) = node else {
            return;
        };
        let Some(rect) = result.rects.get(&boundary.id) else {
            return;
        };

        let rect = composite(
            std::iter::once(rect).chain(
                containment
                    .corridors
                    .iter()
                    .filter(|c| c.from == boundary.id || c.to == boundary.id)
                    .map(|c| c.rect),
            ),
        )
        .unwrap_or(rect);

        let kind = match boundary.policy.map(|policy| policy.overflow) {
            Some(Overflow::Mask) => RegionKind::Mask,
            _ => RegionKind::Clip,
        };
        let region = ContainmentRegion {
            boundary_id: boundary.id.clone(),
            rect,
            border_radius: boundary
                .radius
                .unwrap_or_else(|| config.style().border_radius()),
            kind,
            active: boundary.needs_containment(),
        };
        debug!(
            boundary_id = boundary.id.as_str(),
            kind:? = region.kind,
            active = region.active,
            rect:? = region.rect;
            "Containment region"
        );

        match kind {
            RegionKind::Clip => containment.clip_regions.push(region),
            RegionKind::Mask => containment.mask_regions.push(region),
        }
    });

    containment
}

/// One corridor per contained boundary a connector leaves, in connector
/// order. A boundary pair is joined at most once, whichever direction its
/// connectors run.
fn derive_corridors(result: &EnforcementResult, index: &SceneIndex<'_>, width: f32) -> Vec<Corridor> {
    let mut corridors: Vec<Corridor> = Vec::new();
    let contained = |id: &str| index.boundary(id).is_some_and(|node| node.needs_containment());

    for connector in &result.scene.connectors {
        let (Some(from), Some(to)) = (
            index.resolve_endpoint(&connector.from, &result.rects),
            index.resolve_endpoint(&connector.to, &result.rects),
        ) else {
            continue;
        };
        let source_chain = index.endpoint_chain(from.host_id);
        let target_chain = index.endpoint_chain(to.host_id);

        let far = target_chain
            .first()
            .copied()
            .filter(|id| !source_chain.contains(id))
            .unwrap_or(to.host_id);
        let Some(far_rect) = result.rects.get(far) else {
            continue;
        };

        for &boundary_id in source_chain
            .iter()
            .filter(|&&id| !target_chain.contains(&id) && contained(id))
        {
            let duplicate = corridors.iter().any(|c| {
                (c.from == boundary_id && c.to == far) || (c.from == far && c.to == boundary_id)
            });
            if duplicate {
                continue;
            }
            let Some(rect) = result.rects.get(boundary_id) else {
                continue;
            };

            debug!(
                connector_id = connector.id.as_str(),
                boundary_id,
                far;
                "Corridor derived"
            );
            corridors.push(Corridor {
                from: boundary_id.to_string(),
                to: far.to_string(),
                rect: corridor(rect, far_rect, width),
            });
        }
    }

    corridors
}
