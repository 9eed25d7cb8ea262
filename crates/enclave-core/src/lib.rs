//! Enclave Core Types and Definitions
//!
//! This crate provides the foundational types for containment-aware scenes.
//! It includes:
//!
//! - **Geometry**: Rectangle math, snapping, clamping, containment ([`geometry`] module)
//! - **Scene**: The typed node, port, connector, and flow document ([`scene`] module)
//! - **Diagnostics**: Violation records with severities and fixes ([`diagnostic`] module)
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Draw**: Layered SVG output and connector paths ([`draw`] module)

pub mod color;
pub mod diagnostic;
pub mod draw;
pub mod geometry;
pub mod scene;
