//! Export backends for validated scenes.
//!
//! The paint pass is the final stage of the pipeline:
//!
//! ```text
//! Scene
//!     ↓ enforce (validate pass)
//! EnforcementResult (corrected scene, rect table, diagnostics)
//!     ↓ containment
//! Clip/mask regions
//!     ↓ export (this module, paint pass)
//! SVG markup
//! ```
//!
//! Painting never fails. Unresolved references are dropped from the output
//! and logged.

/// SVG export backend.
pub(crate) mod svg;
