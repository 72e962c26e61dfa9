//! SchemaForge Core Types and Definitions
//!
//! This crate provides the foundational types shared by the SchemaForge
//! generator. It includes:
//!
//! - **Geometry**: Points, rectangles and overlap predicates ([`geometry`] module)
//! - **Catalogue**: The fixed set of circuit symbols ([`catalogue`] module)
//! - **Draw**: Backend-neutral drawing instructions ([`draw`] module)
//! - **Ground truth**: Serializable records of placed elements ([`ground_truth`] module)

pub mod catalogue;
pub mod draw;
pub mod geometry;
pub mod ground_truth;
