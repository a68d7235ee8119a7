//! Billboard renderable
//!
//! A flat quad used for sprite-like 3D objects: untextured and tinted, or
//! textured, optionally animated by flipping through a frame grid cut out
//! of the texture. A billboard can also be "hulled": its quad is resampled
//! into a denser triangle mesh whose duplicate-vertex groups carry signed
//! link weights, letting an animated shader deform the hull over time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::math::{Aabb, Vec3};
use crate::foundation::time::StepAccumulator;

use super::device::{
    BufferHandle, DrawMode, ProgramHandle, RenderDevice, ShaderCache, ShaderKey, TextureHandle,
    VertexAttribute,
};
use super::geometry_cache::{GeometryCache, VboSet};
use super::renderable::{DrawOutcome, RenderableState};
use super::{FrameContext, RenderError};

static NEXT_BILLBOARD: AtomicU64 = AtomicU64::new(0);

fn next_billboard_id() -> String {
    let n = NEXT_BILLBOARD.fetch_add(1, Ordering::Relaxed);
    format!("billboard_{n}")
}

/// A quad renderable, optionally textured, frame-animated, or hulled.
#[derive(Debug)]
pub struct Billboard {
    id: String,
    /// Shared transform/visibility/lighting pipeline state.
    pub state: RenderableState,
    program: ProgramHandle,
    shader_key: ShaderKey,
    texture: Option<TextureHandle>,
    color: Vec3,

    local_aabb: Aabb,
    positions: Vec<[f32; 3]>,
    texels: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    vbos: VboSet,
    links_vbo: Option<BufferHandle>,

    // Frame-grid animation
    frame_texels: Vec<Vec<[f32; 2]>>,
    rows: u32,
    cols: u32,
    current_frame: usize,
    frame_clock: StepAccumulator,
    frame_dirty: bool,

    // Hull deformation
    hulled: bool,
    animated_hull: bool,
    link_amplitude: f32,

    textured: bool,
    texture_to_alpha: bool,
    time: f32,
}

impl Billboard {
    /// Untextured billboard quad of the given size. A non-zero `thickness`
    /// is accepted for API compatibility; extrusion is not implemented and
    /// the flat quad is used.
    pub fn with_size(
        width: f32,
        height: f32,
        _thickness: f32,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<Self, RenderError> {
        let mut billboard = Self::bare(None, false, ShaderKey::Phong, shaders)?;
        billboard.create_quad(width, height);
        billboard.register_buffers(device, geometry);
        Ok(billboard)
    }

    /// Textured billboard sized to the texture.
    pub fn with_texture(
        texture: TextureHandle,
        texture_size: (f32, f32),
        _thickness: f32,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<Self, RenderError> {
        let mut billboard = Self::bare(Some(texture), true, ShaderKey::PhongTextured, shaders)?;
        billboard.create_quad(texture_size.0, texture_size.1);
        billboard.register_buffers(device, geometry);
        Ok(billboard)
    }

    /// Textured billboard animated through a grid of equally sized frames.
    ///
    /// The frame size must divide the texture evenly; otherwise animation
    /// is disabled and the full texture renders as a single frame.
    pub fn with_texture_grid(
        texture: TextureHandle,
        texture_size: (f32, f32),
        frame_size: (f32, f32),
        _thickness: f32,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<Self, RenderError> {
        let mut billboard = Self::bare(Some(texture), true, ShaderKey::PhongTextured, shaders)?;

        let rows = texture_size.1 / frame_size.1;
        let cols = texture_size.0 / frame_size.0;

        if rows.fract() == 0.0 && cols.fract() == 0.0 && rows >= 1.0 && cols >= 1.0 {
            billboard.rows = rows as u32;
            billboard.cols = cols as u32;
            billboard.create_animated_quad(texture_size, frame_size);
        } else {
            log::warn!(
                "frame size {frame_size:?} does not divide texture {texture_size:?}; animation disabled"
            );
            billboard.create_quad(texture_size.0, texture_size.1);
        }

        billboard.register_buffers(device, geometry);
        Ok(billboard)
    }

    fn bare(
        texture: Option<TextureHandle>,
        textured: bool,
        shader_key: ShaderKey,
        shaders: &dyn ShaderCache,
    ) -> Result<Self, RenderError> {
        let program = shaders
            .program_for_key(shader_key)
            .ok_or(RenderError::ShaderMissing(shader_key))?;

        Ok(Self {
            id: next_billboard_id(),
            state: RenderableState::new(),
            program,
            shader_key,
            texture,
            color: Vec3::new(1.0, 1.0, 1.0),
            local_aabb: Aabb::default(),
            positions: Vec::new(),
            texels: Vec::new(),
            normals: Vec::new(),
            vbos: VboSet {
                vertices: BufferHandle(0),
                normals: BufferHandle(0),
                texels: BufferHandle(0),
            },
            links_vbo: None,
            frame_texels: Vec::new(),
            rows: 0,
            cols: 0,
            current_frame: 0,
            frame_clock: StepAccumulator::new(0.0),
            frame_dirty: false,
            hulled: false,
            animated_hull: false,
            link_amplitude: 0.0,
            textured,
            texture_to_alpha: false,
            time: 0.0,
        })
    }

    /// Strip-ordered quad centered at the origin in the XY plane.
    fn create_quad(&mut self, width: f32, height: f32) {
        let (hw, hh) = (width / 2.0, height / 2.0);

        self.positions = vec![
            [-hw, -hh, 0.0],
            [-hw, hh, 0.0],
            [hw, -hh, 0.0],
            [hw, hh, 0.0],
        ];
        self.texels = vec![[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]];

        // One face normal from the two edges out of the first corner,
        // replicated to every corner.
        let u = Vec3::new(0.0, height, 0.0);
        let v = Vec3::new(width, 0.0, 0.0);
        let n = u.cross(&v);
        self.normals = vec![[n.x, n.y, n.z]; 4];

        self.local_aabb = Aabb::new(Vec3::new(-hw, -hh, 0.0), Vec3::new(hw, hh, 0.0));
    }

    /// Quad sized to one frame, plus one texel set per grid cell.
    fn create_animated_quad(&mut self, texture_size: (f32, f32), frame_size: (f32, f32)) {
        self.create_quad(frame_size.0, frame_size.1);

        let tw = frame_size.0 / texture_size.0;
        let th = frame_size.1 / texture_size.1;

        self.frame_texels.clear();
        for j in 0..self.rows {
            for i in 0..self.cols {
                let (i, j) = (i as f32, j as f32);
                self.frame_texels.push(vec![
                    [i * tw, (j + 1.0) * th],
                    [i * tw, j * th],
                    [(i + 1.0) * tw, (j + 1.0) * th],
                    [(i + 1.0) * tw, j * th],
                ]);
            }
        }

        self.texels = self.frame_texels[0].clone();
    }

    fn register_buffers(&mut self, device: &mut dyn RenderDevice, geometry: &mut GeometryCache) {
        let (vbos, existed) = geometry.get_or_create(device, &self.id);
        // Billboard ids are unique per instance, so the set is fresh unless
        // another object was deliberately given the same id.
        if !existed {
            geometry.upload(device, &self.id, &self.positions, &self.normals, &self.texels);
        }
        self.vbos = vbos;
    }

    /// Asset identity used for buffer registration.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Override the generated asset id (must happen before other objects
    /// share it).
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Tint color multiplied into the material diffuse.
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    /// Number of animation frames (0 when not frame-animated).
    pub fn frame_count(&self) -> usize {
        self.frame_texels.len()
    }

    /// Currently displayed frame.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Seconds between animation frames; zero pauses the animation.
    pub fn set_delay(&mut self, delay: f32) {
        self.frame_clock.set_interval(delay);
    }

    /// Route the texture's luminance to alpha (switches the shader program).
    pub fn set_texture_to_alpha(
        &mut self,
        enabled: bool,
        shaders: &dyn ShaderCache,
    ) -> Result<(), RenderError> {
        self.texture_to_alpha = enabled && self.textured;
        self.refresh_program(shaders)
    }

    /// Billboards report no bounding radius; culling uses the world AABB.
    pub fn radius(&self) -> f32 {
        0.0
    }

    /// The shader program key currently selected by this billboard's
    /// feature flags.
    pub fn shader_key(&self) -> ShaderKey {
        self.shader_key
    }

    fn select_shader_key(&self) -> ShaderKey {
        match (self.animated_hull, self.textured, self.texture_to_alpha) {
            (true, true, _) => ShaderKey::PhongTexturedAnimated,
            (true, false, _) => ShaderKey::PhongAnimated,
            (false, true, true) => ShaderKey::PhongTexturedToAlpha,
            (false, true, false) => ShaderKey::PhongTextured,
            (false, false, _) => ShaderKey::Phong,
        }
    }

    fn refresh_program(&mut self, shaders: &dyn ShaderCache) -> Result<(), RenderError> {
        let key = self.select_shader_key();
        self.program = shaders
            .program_for_key(key)
            .ok_or(RenderError::ShaderMissing(key))?;
        self.shader_key = key;
        Ok(())
    }

    /// Resample the quad into a denser triangle mesh for hull deformation.
    ///
    /// `factor` controls subdivision density. With `animated` set, duplicate
    /// vertices are grouped into links carrying alternating `+/- amplitude`
    /// weights in a dedicated attribute buffer, and the animated shader
    /// variant is selected.
    pub fn hull(
        &mut self,
        factor: u32,
        animated: bool,
        amplitude: f32,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<(), RenderError> {
        self.hulled = true;
        self.animated_hull = false;

        self.triangulate(factor);
        geometry.upload(device, &self.id, &self.positions, &self.normals, &self.texels);

        if animated {
            self.animated_hull = true;
            self.link_amplitude = amplitude;
            self.generate_links(device);
        }

        self.refresh_program(shaders)
    }

    /// Restore the plain quad after a hull.
    pub fn dehull(
        &mut self,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<(), RenderError> {
        if !self.hulled {
            return Ok(());
        }

        self.hulled = false;
        self.animated_hull = false;

        if let Some(links) = self.links_vbo.take() {
            device.delete_buffer(links);
        }

        let size = self.local_aabb.size();
        self.create_quad(size.x, size.y);
        geometry.upload(device, &self.id, &self.positions, &self.normals, &self.texels);

        self.refresh_program(shaders)
    }

    /// Uniform-grid resampling of the quad. Normals keep the hull
    /// convention (x, y, 1) so the deformation shader can displace along
    /// them; texels map the quad onto the full texture.
    fn triangulate(&mut self, factor: u32) {
        let n = ((factor as f32).sqrt().ceil() as usize).max(1);
        let min = self.local_aabb.min;
        let size = self.local_aabb.size();
        let (dx, dy) = (size.x / n as f32, size.y / n as f32);

        self.positions.clear();
        self.normals.clear();
        self.texels.clear();

        for j in 0..n {
            for i in 0..n {
                let (x0, y0) = (min.x + i as f32 * dx, min.y + j as f32 * dy);
                let (x1, y1) = (x0 + dx, y0 + dy);

                for (x, y) in [(x0, y0), (x1, y0), (x1, y1), (x0, y0), (x1, y1), (x0, y1)] {
                    self.positions.push([x, y, 0.0]);
                    self.normals.push([x, y, 1.0]);
                    self.texels.push([x / size.x + 0.5, y / size.y + 0.5]);
                }
            }
        }
    }

    /// Build the per-vertex link weights: vertices sharing a position form
    /// one link, and links alternate between `+amplitude` and `-amplitude`.
    fn generate_links(&mut self, device: &mut dyn RenderDevice) {
        let mut representative = vec![0usize; self.positions.len()];
        for i in 0..self.positions.len() {
            representative[i] = (0..i)
                .find(|&j| self.positions[j] == self.positions[i])
                .unwrap_or(i);
        }

        let mut uniques = representative.clone();
        uniques.sort_unstable();
        uniques.dedup();

        let mut weights = HashMap::new();
        let mut positive = true;
        for rep in uniques {
            let amplitude = if positive {
                self.link_amplitude
            } else {
                -self.link_amplitude
            };
            weights.insert(rep, amplitude);
            positive = !positive;
        }

        let links: Vec<[f32; 3]> = representative
            .iter()
            .map(|rep| [0.0, 0.0, weights[rep]])
            .collect();

        if let Some(old) = self.links_vbo.take() {
            device.delete_buffer(old);
        }
        let buffer = device.create_buffer();
        device.upload_buffer(buffer, bytemuck::cast_slice(&links), false);
        self.links_vbo = Some(buffer);
    }

    /// Re-resolve the program and re-upload every buffer after the GPU
    /// context was lost and recreated.
    pub fn restore_after_context_loss(
        &mut self,
        shaders: &dyn ShaderCache,
        device: &mut dyn RenderDevice,
        geometry: &mut GeometryCache,
    ) -> Result<(), RenderError> {
        self.refresh_program(shaders)?;

        if geometry.is_invalid() {
            geometry.invalidate_all(device);
        }

        self.links_vbo = None;
        self.register_buffers(device, geometry);
        if self.animated_hull {
            self.generate_links(device);
        }

        self.state.invalidate_lights();
        self.frame_dirty = true;
        Ok(())
    }

    fn advance_frames(&mut self, delta_time: f32) {
        self.time += delta_time;

        let steps = self.frame_clock.advance(delta_time);
        if steps > 0 && !self.frame_texels.is_empty() {
            self.current_frame = (self.current_frame + steps as usize) % self.frame_texels.len();
            self.frame_dirty = true;
        }
    }

    /// Evaluate the per-frame pipeline and issue this billboard's draw call.
    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> DrawOutcome {
        self.advance_frames(frame.delta_time);

        self.state.refresh_matrices(&self.local_aabb, frame.layer);

        if !self.state.is_visible(frame.layer) {
            return DrawOutcome::Culled;
        }

        let program = self.program;
        frame.device.use_program(program);
        self.state.upload_matrices(frame.device, program);
        self.state.apply_lights(frame.layer, frame.device, program);

        if self.animated_hull {
            frame.device.set_uniform_f32(program, "u_time", self.time);
        }

        self.bind_textures(frame, program);

        frame
            .device
            .set_uniform_vec3(program, "u_diffuse", [self.color.x, self.color.y, self.color.z]);
        frame
            .device
            .set_uniform_vec3(program, "u_specular", [1.0, 1.0, 1.0]);

        self.bind_geometry(frame.device);

        let count = self.positions.len() as i32;
        let mode = if self.state.wireframe {
            DrawMode::Lines
        } else if self.hulled {
            DrawMode::Triangles
        } else {
            DrawMode::TriangleStrip
        };
        frame.device.draw_arrays(mode, 0, count);

        if self.state.show_bounds {
            self.state
                .draw_bounds_overlay(frame.device, frame.shaders, &self.local_aabb);
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

    fn bind_geometry(&mut self, device: &mut dyn RenderDevice) {
        if self.textured && self.frame_dirty && !self.frame_texels.is_empty() {
            self.texels = self.frame_texels[self.current_frame].clone();
            device.upload_buffer(self.vbos.texels, bytemuck::cast_slice(&self.texels), true);
            self.frame_dirty = false;
        }

        device.bind_attribute_buffer(VertexAttribute::Position, 3, Some(self.vbos.vertices));
        device.bind_attribute_buffer(VertexAttribute::Normal, 3, Some(self.vbos.normals));
        if self.textured {
            device.bind_attribute_buffer(VertexAttribute::TexCoord, 2, Some(self.vbos.texels));
        }
        if self.animated_hull {
            device.bind_attribute_buffer(VertexAttribute::Links, 3, self.links_vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::testing::{DeviceCall, MapShaderCache, RecordingDevice};
    use crate::scene::{RenderCache, SceneLayer};

    struct Rig {
        device: RecordingDevice,
        shaders: MapShaderCache,
        geometry: GeometryCache,
        layer: SceneLayer,
        render_cache: RenderCache,
    }

    impl Rig {
        fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            Self {
                device: RecordingDevice::new(),
                shaders: MapShaderCache::with_standard_programs(),
                geometry: GeometryCache::new(),
                layer: SceneLayer::default(),
                render_cache: RenderCache::new(),
            }
        }

        fn draw_with_dt(&mut self, billboard: &mut Billboard, delta_time: f32) -> DrawOutcome {
            let mut frame = FrameContext {
                device: &mut self.device,
                shaders: &self.shaders,
                layer: &mut self.layer,
                render_cache: &self.render_cache,
                delta_time,
            };
            billboard.draw(&mut frame)
        }
    }

    #[test]
    fn quad_billboard_draws_a_four_vertex_strip() {
        let mut rig = Rig::new();
        let mut billboard =
            Billboard::with_size(64.0, 32.0, 0.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
                .unwrap();
        rig.device.calls.clear();

        assert_eq!(rig.draw_with_dt(&mut billboard, 0.016), DrawOutcome::Drawn);
        assert_eq!(
            rig.device.draw_calls(),
            vec![(DrawMode::TriangleStrip, 0, 4)]
        );
    }

    #[test]
    fn quad_bounds_match_the_requested_size() {
        let mut rig = Rig::new();
        let billboard =
            Billboard::with_size(64.0, 32.0, 0.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
                .unwrap();

        assert_eq!(billboard.local_aabb.min, Vec3::new(-32.0, -16.0, 0.0));
        assert_eq!(billboard.local_aabb.max, Vec3::new(32.0, 16.0, 0.0));
    }

    #[test]
    fn texture_grid_builds_one_texel_set_per_frame() {
        let mut rig = Rig::new();
        let billboard = Billboard::with_texture_grid(
            TextureHandle(1),
            (128.0, 64.0),
            (32.0, 32.0),
            0.0,
            &rig.shaders,
            &mut rig.device,
            &mut rig.geometry,
        )
        .unwrap();

        assert_eq!(billboard.frame_count(), 8);
        // First frame spans the first grid cell.
        assert_eq!(billboard.frame_texels[0][0], [0.0, 0.5]);
        assert_eq!(billboard.frame_texels[0][3], [0.25, 0.0]);
    }

    #[test]
    fn uneven_frame_grid_disables_animation() {
        let mut rig = Rig::new();
        let billboard = Billboard::with_texture_grid(
            TextureHandle(1),
            (100.0, 64.0),
            (33.0, 32.0),
            0.0,
            &rig.shaders,
            &mut rig.device,
            &mut rig.geometry,
        )
        .unwrap();

        assert_eq!(billboard.frame_count(), 0);
    }

    #[test]
    fn frames_advance_on_the_delay_interval_and_wrap() {
        let mut rig = Rig::new();
        let mut billboard = Billboard::with_texture_grid(
            TextureHandle(1),
            (64.0, 32.0),
            (32.0, 32.0),
            0.0,
            &rig.shaders,
            &mut rig.device,
            &mut rig.geometry,
        )
        .unwrap();
        billboard.set_delay(0.1);

        rig.draw_with_dt(&mut billboard, 0.05);
        assert_eq!(billboard.current_frame(), 0);

        rig.draw_with_dt(&mut billboard, 0.05);
        assert_eq!(billboard.current_frame(), 1);

        // Two frames total: advancing again wraps to the start.
        rig.draw_with_dt(&mut billboard, 0.1);
        assert_eq!(billboard.current_frame(), 0);
    }

    #[test]
    fn frame_change_reuploads_the_texel_buffer() {
        let mut rig = Rig::new();
        let mut billboard = Billboard::with_texture_grid(
            TextureHandle(1),
            (64.0, 32.0),
            (32.0, 32.0),
            0.0,
            &rig.shaders,
            &mut rig.device,
            &mut rig.geometry,
        )
        .unwrap();
        billboard.set_delay(0.1);
        rig.draw_with_dt(&mut billboard, 0.01);
        rig.device.calls.clear();

        rig.draw_with_dt(&mut billboard, 0.2);
        let dynamic_uploads = rig
            .device
            .calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::UploadBuffer { dynamic: true, .. }))
            .count();
        assert_eq!(dynamic_uploads, 1);
    }

    #[test]
    fn hull_resamples_into_triangles_with_alternating_links() {
        let mut rig = Rig::new();
        let mut billboard =
            Billboard::with_size(10.0, 10.0, 0.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
                .unwrap();

        billboard
            .hull(4, true, 50.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
            .unwrap();

        // 2x2 grid -> 8 triangles -> 24 corners.
        assert_eq!(billboard.positions.len(), 24);
        assert!(billboard.links_vbo.is_some());
        assert_eq!(billboard.shader_key, ShaderKey::PhongAnimated);

        rig.device.calls.clear();
        rig.draw_with_dt(&mut billboard, 0.016);
        assert_eq!(
            rig.device.draw_calls(),
            vec![(DrawMode::Triangles, 0, 24)]
        );
        // The animated shader gets its time uniform.
        assert!(rig
            .device
            .calls
            .iter()
            .any(|c| matches!(c, DeviceCall::UniformF32(name, _) if name == "u_time")));
    }

    #[test]
    fn dehull_restores_the_plain_quad() {
        let mut rig = Rig::new();
        let mut billboard =
            Billboard::with_size(10.0, 10.0, 0.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
                .unwrap();

        billboard
            .hull(9, true, 50.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
            .unwrap();
        billboard
            .dehull(&rig.shaders, &mut rig.device, &mut rig.geometry)
            .unwrap();

        assert_eq!(billboard.positions.len(), 4);
        assert!(billboard.links_vbo.is_none());
        assert_eq!(billboard.shader_key, ShaderKey::Phong);
    }

    #[test]
    fn context_loss_restore_purges_and_reuploads() {
        let mut rig = Rig::new();
        let mut billboard =
            Billboard::with_size(10.0, 10.0, 0.0, &rig.shaders, &mut rig.device, &mut rig.geometry)
                .unwrap();
        let old = billboard.vbos;

        rig.geometry.mark_context_lost();
        billboard
            .restore_after_context_loss(&rig.shaders, &mut rig.device, &mut rig.geometry)
            .unwrap();

        assert!(!rig.geometry.is_invalid());
        assert_ne!(billboard.vbos.vertices, old.vertices);
    }

    #[test]
    fn texture_to_alpha_switches_the_program() {
        let mut rig = Rig::new();
        let mut billboard = Billboard::with_texture(
            TextureHandle(1),
            (32.0, 32.0),
            0.0,
            &rig.shaders,
            &mut rig.device,
            &mut rig.geometry,
        )
        .unwrap();

        billboard.set_texture_to_alpha(true, &rig.shaders).unwrap();
        assert_eq!(billboard.shader_key, ShaderKey::PhongTexturedToAlpha);

        billboard.set_texture_to_alpha(false, &rig.shaders).unwrap();
        assert_eq!(billboard.shader_key, ShaderKey::PhongTextured);
    }
}
