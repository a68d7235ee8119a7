//! Mesh geometry parser
//!
//! Turns the line-oriented mesh format (`v `, `vt`, `vn`, `f `, `us`
//! directives) into flat, de-indexed triangle streams grouped by material,
//! ready for buffer upload without an index buffer. Faces reference
//! position/texel/normal indices 1-based with sparse sub-fields allowed;
//! each face carries the most recently selected material.
//!
//! Parsing material data first is a hard precondition: geometry is grouped
//! by material index during reorganization, so a mesh without materials is
//! unrenderable and fails cleanly.

use crate::foundation::math::{Aabb, Vec3};

use super::material_parser::{self, MaterialSet};
use super::ParseError;

/// One corner of a face: indices into the raw position/texel/normal streams,
/// already converted to 0-based. Missing sub-fields stay `None`.
#[derive(Debug, Clone, Copy, Default)]
struct FaceCorner {
    position: Option<usize>,
    texel: Option<usize>,
    normal: Option<usize>,
}

/// A triangle face tagged with its material index (-1 before any `us`
/// directive; such faces are dropped during reorganization).
#[derive(Debug, Clone, Copy)]
struct Face {
    corners: [FaceCorner; 3],
    material: i32,
}

/// Parsed, reorganized mesh ready for GPU upload.
///
/// `positions`, `normals` and `texels` are parallel per-corner streams;
/// material `i` owns the vertex range `firsts[i] .. firsts[i] + counts[i]`.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Flattened per-corner positions (no index buffer)
    pub positions: Vec<[f32; 3]>,
    /// Flattened per-corner texture coordinates (empty for untextured meshes)
    pub texels: Vec<[f32; 2]>,
    /// Flattened per-corner normals
    pub normals: Vec<[f32; 3]>,
    /// Materials in declaration order
    pub materials: MaterialSet,
    /// Start offset of each material's vertex range
    pub firsts: Vec<i32>,
    /// Vertex count of each material's range
    pub counts: Vec<i32>,
    /// Local-space bounding box over the flattened positions
    pub aabb: Aabb,
    /// Bounding-box center
    pub center: Vec3,
    /// Bounding-box extents (width, height, depth)
    pub size: Vec3,
    /// Largest extent. Not a true circumscribing radius; the approximation
    /// is part of the format's contract.
    pub radius: f32,
    /// Scale the mesh was loaded with. Geometry stays unscaled; the model
    /// matrix applies it.
    pub scale: f32,
}

impl Default for MeshData {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            texels: Vec::new(),
            normals: Vec::new(),
            materials: MaterialSet::default(),
            firsts: Vec::new(),
            counts: Vec::new(),
            aabb: Aabb::default(),
            center: Vec3::zeros(),
            size: Vec3::zeros(),
            radius: 0.0,
            scale: 1.0,
        }
    }
}

/// Parser for the mesh + material text formats.
pub struct MeshParser;

impl MeshParser {
    /// Parse in-memory mesh and material sources.
    ///
    /// Material definitions are parsed first; a source without materials
    /// fails with [`ParseError::NoMaterials`] and an empty mesh source with
    /// [`ParseError::EmptyMesh`]. Individual malformed lines never fail the
    /// parse: numeric fields degrade to 0.0 and unknown directives are
    /// skipped.
    pub fn parse(
        mesh_source: &str,
        material_source: &str,
        scale: f32,
    ) -> Result<MeshData, ParseError> {
        let materials = material_parser::parse_materials(material_source)?;

        if mesh_source.trim().is_empty() {
            return Err(ParseError::EmptyMesh);
        }

        let raw = RawMesh::extract(mesh_source, &materials);
        let mut data = raw.reorganize(materials);
        data.scale = scale;
        data.compute_bounds();
        data.flat_normals();

        log::debug!(
            "parsed mesh: {} corner(s), {} material(s), radius {}",
            data.positions.len(),
            data.materials.len(),
            data.radius
        );
        Ok(data)
    }

    /// Parse mesh and material files from disk.
    pub fn parse_files(
        mesh_path: &std::path::Path,
        material_path: &std::path::Path,
        scale: f32,
    ) -> Result<MeshData, ParseError> {
        let mesh_source = std::fs::read_to_string(mesh_path)?;
        let material_source = std::fs::read_to_string(material_path)?;
        Self::parse(&mesh_source, &material_source, scale)
    }
}

/// Raw streams as they appear in the source, before reorganization.
#[derive(Debug, Default)]
struct RawMesh {
    positions: Vec<[f32; 3]>,
    texels: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    faces: Vec<Face>,
}

impl RawMesh {
    fn extract(source: &str, materials: &MaterialSet) -> Self {
        let mut mesh = Self::default();
        let mut current_material = -1i32;

        for line in source.lines() {
            let (directive, content) = material_parser::split_directive(line);

            match directive {
                "v " => mesh.positions.push(material_parser::parse_vec3(content)),
                "vt" => mesh.texels.push(material_parser::parse_vec2(content)),
                "vn" => mesh.normals.push(material_parser::parse_vec3(content)),
                "us" => {
                    if let Some(index) = materials.index_of(content) {
                        current_material = index as i32;
                    }
                }
                "f " => {
                    if let Some(face) = parse_face(content, current_material) {
                        mesh.faces.push(face);
                    }
                }
                _ => {}
            }
        }

        mesh
    }

    /// Reorganize faces into per-material flat triangle lists.
    ///
    /// For each material in declaration order, every face tagged with it is
    /// de-indexed: positions, texels and normals are duplicated per corner
    /// rather than shared. This trades memory for draw-call simplicity.
    /// Faces tagged -1 (no `us` seen yet) are dropped here.
    fn reorganize(self, materials: MaterialSet) -> MeshData {
        let mut data = MeshData {
            firsts: vec![0; materials.len()],
            counts: vec![0; materials.len()],
            materials,
            ..MeshData::default()
        };

        for k in 0..data.materials.len() {
            for face in self.faces.iter().filter(|f| f.material == k as i32) {
                for corner in &face.corners {
                    if let Some(p) = corner.position.and_then(|i| self.positions.get(i)) {
                        data.positions.push(*p);
                    }
                    if let Some(t) = corner.texel.and_then(|i| self.texels.get(i)) {
                        data.texels.push(*t);
                    }
                    if let Some(n) = corner.normal.and_then(|i| self.normals.get(i)) {
                        data.normals.push(*n);
                    }
                }
                data.counts[k] += 3;
            }
        }

        for i in 0..data.counts.len().saturating_sub(1) {
            data.firsts[i + 1] = data.firsts[i] + data.counts[i];
        }

        data
    }
}

/// Parse a face record: whitespace-separated corners, each a
/// `position/texel/normal` index triple with empty sub-fields allowed.
/// Corners beyond the third are ignored; the formats in use are
/// pre-triangulated.
fn parse_face(content: &str, material: i32) -> Option<Face> {
    let mut corners = [FaceCorner::default(); 3];
    let mut count = 0;

    for part in content.split_whitespace() {
        if count == 3 {
            log::debug!("face has more than 3 corners; extra corners ignored");
            break;
        }

        let mut fields = part.split('/');
        // 1-based indices; 0 or a missing field means "absent".
        let mut next = || {
            fields
                .next()
                .and_then(|t| t.parse::<usize>().ok())
                .and_then(|i| i.checked_sub(1))
        };

        corners[count] = FaceCorner {
            position: next(),
            texel: next(),
            normal: next(),
        };
        count += 1;
    }

    (count == 3).then_some(Face { corners, material })
}

impl MeshData {
    /// Recompute the bounding volume from the flattened position stream.
    ///
    /// One linear scan producing the AABB, its center and size, and the
    /// radius as the largest of width/height/depth.
    pub fn compute_bounds(&mut self) {
        let points = self.positions.iter().map(|p| Vec3::from(*p));

        if let Some(aabb) = Aabb::from_points(points) {
            self.aabb = aabb;
            self.center = aabb.center();
            self.size = aabb.size();
            self.radius = self.size.x.max(self.size.y).max(self.size.z);
        }
    }

    /// Replace the normal stream with one flat normal per triangle.
    ///
    /// Each triangle's normal is the cross product of its two edge vectors
    /// out of the first corner, replicated to all three corners. The result
    /// is flat-shaded even under a Phong shader, and is the fallback for
    /// sources whose per-vertex normals are unreliable.
    pub fn flat_normals(&mut self) {
        self.normals.clear();

        for triangle in self.positions.chunks_exact(3) {
            let a = Vec3::from(triangle[0]);
            let b = Vec3::from(triangle[1]);
            let c = Vec3::from(triangle[2]);

            let normal = (c - a).cross(&(b - a));
            let normal = [normal.x, normal.y, normal.z];

            self.normals.push(normal);
            self.normals.push(normal);
            self.normals.push(normal);
        }
    }

    /// Whether any texture coordinates survived reorganization.
    pub fn has_texels(&self) -> bool {
        !self.texels.is_empty()
    }

    /// Total number of flattened corners.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
