//! Mesh-backed renderable
//!
//! A `MeshModel` owns parsed geometry grouped by material and draws it in
//! declaration order, one non-indexed draw call per material over its
//! `firsts/counts` range. Construction is fallible (parse errors and a
//! missing shader program are fatal); per-frame failures are silent and
//! recoverable.

use crate::assets::{MeshData, MeshParser};
use crate::foundation::math::Vec3;

use super::device::{
    DrawMode, ProgramHandle, RenderDevice, ShaderCache, ShaderKey, TextureHandle, TextureProvider,
    VertexAttribute,
};
use super::geometry_cache::{GeometryCache, VboSet};
use super::renderable::{DrawOutcome, RenderableState};
use super::{FrameContext, RenderError};

/// A 3D model loaded from mesh + material sources.
#[derive(Debug)]
pub struct MeshModel {
    id: String,
    mesh: MeshData,
    program: ProgramHandle,
    texture: Option<TextureHandle>,
    vbos: VboSet,
    /// Shared transform/visibility/lighting pipeline state.
    pub state: RenderableState,
}

impl MeshModel {
    /// Build a model from in-memory mesh and material sources.
    ///
    /// Parsing happens first; the Phong program (textured variant when a
    /// texture is supplied) must already be registered in the shader cache.
    /// Geometry buffers are deduplicated by `id` through the cache, so a
    /// second model with the same id reuses the uploaded buffers.
    pub fn from_sources(
        id: impl Into<String>,
        mesh_source: &str,
        material_source: &str,
        scale: f32,
        texture: Option<TextureHandle>,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<Self, RenderError> {
        let id = id.into();
        let mesh = MeshParser::parse(mesh_source, material_source, scale)?;

        let key = if texture.is_some() {
            ShaderKey::PhongTextured
        } else {
            ShaderKey::Phong
        };
        let program = shaders
            .program_for_key(key)
            .ok_or(RenderError::ShaderMissing(key))?;

        let (vbos, existed) = geometry.get_or_create(device, &id);
        if !existed {
            geometry.upload(device, &id, &mesh.positions, &mesh.normals, &mesh.texels);
        }

        let mut state = RenderableState::new();
        state.transform.set_scale(scale);

        log::info!(
            "model {id:?}: {} corners across {} material(s)",
            mesh.vertex_count(),
            mesh.materials.len()
        );

        Ok(Self {
            id,
            mesh,
            program,
            texture,
            vbos,
            state,
        })
    }

    /// Build a model from files, resolving the optional texture through the
    /// texture provider. A missing texture degrades to untextured rendering.
    pub fn from_files(
        id: impl Into<String>,
        mesh_path: &std::path::Path,
        material_path: &std::path::Path,
        scale: f32,
        texture_path: Option<&str>,
        textures: &mut dyn TextureProvider,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<Self, RenderError> {
        let texture = texture_path.and_then(|path| {
            let handle = textures.load_image(path);
            if handle.is_none() {
                log::warn!("texture {path:?} missing; rendering untextured");
            }
            handle
        });

        let mesh_source = std::fs::read_to_string(mesh_path)
            .map_err(crate::assets::ParseError::from)?;
        let material_source = std::fs::read_to_string(material_path)
            .map_err(crate::assets::ParseError::from)?;

        Self::from_sources(
            id,
            &mesh_source,
            &material_source,
            scale,
            texture,
            shaders,
            device,
            geometry,
        )
    }

    /// Asset identity used for buffer deduplication.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parsed mesh data.
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Model center: its 3D position.
    pub fn center(&self) -> Vec3 {
        self.state.transform.position()
    }

    /// Bounding radius scaled to the current uniform scale.
    pub fn radius(&self) -> f32 {
        self.mesh.radius * self.state.transform.scale()
    }

    /// Re-register and re-upload geometry after a GPU context loss purge.
    pub fn reupload(&mut self, device: &mut dyn RenderDevice, geometry: &mut GeometryCache) {
        let (vbos, existed) = geometry.get_or_create(device, &self.id);
        if !existed {
            geometry.upload(
                device,
                &self.id,
                &self.mesh.positions,
                &self.mesh.normals,
                &self.mesh.texels,
            );
        }
        self.vbos = vbos;
        self.state.invalidate_lights();
    }

    /// Evaluate the per-frame pipeline and issue this model's draw calls.
    ///
    /// Matrix refresh -> visibility -> light gather -> texture bind ->
    /// per-material draws. A culled object returns early with no device
    /// calls issued.
    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> DrawOutcome {
        self.state.refresh_matrices(&self.mesh.aabb, frame.layer);

        if !self.state.is_visible(frame.layer) {
            return DrawOutcome::Culled;
        }

        let program = self.program;
        frame.device.use_program(program);
        self.state.upload_matrices(frame.device, program);
        self.state.apply_lights(frame.layer, frame.device, program);

        self.bind_textures(frame, program);
        self.bind_geometry(frame.device);

        let mode = if self.state.wireframe {
            DrawMode::Lines
        } else {
            DrawMode::Triangles
        };

        for i in 0..self.mesh.materials.len() {
            frame
                .device
                .set_uniform_vec3(program, "u_diffuse", self.mesh.materials.diffuses[i]);
            frame
                .device
                .set_uniform_vec3(program, "u_specular", self.mesh.materials.speculars[i]);
            frame
                .device
                .draw_arrays(mode, self.mesh.firsts[i], self.mesh.counts[i]);
        }

        if self.state.show_bounds {
            self.state
                .draw_bounds_overlay(frame.device, frame.shaders, &self.mesh.aabb);
        }

        DrawOutcome::Drawn
    }

    fn bind_textures(&self, frame: &mut FrameContext<'_>, program: ProgramHandle) {
        if let Some(texture) = self.texture {
            frame.device.bind_texture(0, Some(texture));
            frame.device.set_uniform_i32(program, "u_textured", 1);
        } else {
            frame.device.bind_texture(0, None);
            frame.device.set_uniform_i32(program, "u_textured", 0);
        }

        if let Some(shadow) = frame.render_cache.shadow_map() {
            frame.device.bind_texture(1, Some(shadow));
            frame.device.set_uniform_i32(program, "u_shadow_map", 1);
            frame.device.set_uniform_i32(program, "u_has_shadow_map", 1);
        } else {
            frame.device.set_uniform_i32(program, "u_has_shadow_map", 0);
        }
    }

    fn bind_geometry(&self, device: &mut dyn RenderDevice) {
        device.bind_attribute_buffer(VertexAttribute::Position, 3, Some(self.vbos.vertices));
        device.bind_attribute_buffer(VertexAttribute::Normal, 3, Some(self.vbos.normals));
        if self.mesh.has_texels() {
            device.bind_attribute_buffer(VertexAttribute::TexCoord, 2, Some(self.vbos.texels));
        }
    }
}
