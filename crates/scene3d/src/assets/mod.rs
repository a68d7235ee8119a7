//! Geometry and material asset parsing
//!
//! Parses the line-oriented wavefront-style mesh and material formats into
//! GPU-ready flat vertex streams grouped by material. Material data must be
//! parsed before mesh data; geometry parsing fails without it.

pub mod material_parser;
pub mod mesh_parser;

pub use material_parser::{MaterialSet, parse_materials};
pub use mesh_parser::{MeshData, MeshParser};

use thiserror::Error;

/// Errors raised while parsing mesh or material sources.
///
/// A `ParseError` is fatal to renderable construction: the caller never
/// receives partial data. Malformed individual lines are *not* errors; the
/// tokenizer degrades them to empty fields by design.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The material source produced no materials; geometry cannot be grouped.
    #[error("material source contained no materials")]
    NoMaterials,

    /// The mesh source was empty or all-blank.
    #[error("mesh source contained no geometry")]
    EmptyMesh,

    /// An asset file could not be read.
    #[error("failed to read asset file: {0}")]
    Io(#[from] std::io::Error),
}
