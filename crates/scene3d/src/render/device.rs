//! Collaborator seams for the GPU, shader storage, and texture loading
//!
//! The pipeline never talks to a graphics API directly. It consumes three
//! narrow traits: [`RenderDevice`] for synchronous buffer/uniform/draw
//! calls, [`ShaderCache`] for program lookup by a fixed key set, and
//! [`TextureProvider`] for image loading. The host engine implements these
//! over its GL context; tests implement them with a recording fake.

/// Handle to a GPU buffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Handle to a GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Primitive assembly mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Independent triangles
    Triangles,
    /// Triangle strip
    TriangleStrip,
    /// Line list (wireframe/debug rendering)
    Lines,
}

/// Vertex attribute slots the pipeline binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    /// Vertex position (3 floats)
    Position,
    /// Texture coordinate (2 floats)
    TexCoord,
    /// Vertex normal (3 floats)
    Normal,
    /// Hull-deformation link weights (3 floats)
    Links,
}

/// The fixed set of shader programs the pipeline selects between.
///
/// Keys are chosen from renderable feature flags; the programs themselves
/// are compiled and registered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKey {
    /// Untextured Phong lighting
    Phong,
    /// Phong with a diffuse texture
    PhongTextured,
    /// Phong with the texture's luminance routed to alpha
    PhongTexturedToAlpha,
    /// Untextured Phong with hull-link animation
    PhongAnimated,
    /// Textured Phong with hull-link animation
    PhongTexturedAnimated,
    /// Flat color, used for bounding-box overlays
    FlatColor,
}

/// Synchronous GPU surface consumed by the pipeline.
///
/// All calls run on the thread that owns the graphics context and are
/// assumed to return quickly; there is no async path and no cancellation.
pub trait RenderDevice {
    /// Allocate a buffer object.
    fn create_buffer(&mut self) -> BufferHandle;

    /// Release a buffer object.
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Upload raw bytes into a buffer. `dynamic` hints per-frame re-upload.
    fn upload_buffer(&mut self, buffer: BufferHandle, data: &[u8], dynamic: bool);

    /// Select the active shader program.
    fn use_program(&mut self, program: ProgramHandle);

    /// Bind a texture to a texture unit, or unbind with `None`.
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>);

    /// Source a vertex attribute from a buffer (`None` detaches it).
    fn bind_attribute_buffer(
        &mut self,
        attribute: VertexAttribute,
        components: u32,
        buffer: Option<BufferHandle>,
    );

    /// Source a vertex attribute from client memory (small overlay geometry).
    fn bind_attribute_data(&mut self, attribute: VertexAttribute, components: u32, data: &[u8]);

    /// Set an integer uniform.
    fn set_uniform_i32(&mut self, program: ProgramHandle, name: &str, value: i32);

    /// Set a float uniform.
    fn set_uniform_f32(&mut self, program: ProgramHandle, name: &str, value: f32);

    /// Set a vec3 uniform.
    fn set_uniform_vec3(&mut self, program: ProgramHandle, name: &str, value: [f32; 3]);

    /// Set a 4x4 matrix uniform (column-major).
    fn set_uniform_mat4(&mut self, program: ProgramHandle, name: &str, value: &[f32; 16]);

    /// Set an integer uniform array.
    fn set_uniform_i32_array(&mut self, program: ProgramHandle, name: &str, values: &[i32]);

    /// Set a float uniform array.
    fn set_uniform_f32_array(&mut self, program: ProgramHandle, name: &str, values: &[f32]);

    /// Set a vec3 uniform array.
    fn set_uniform_vec3_array(&mut self, program: ProgramHandle, name: &str, values: &[[f32; 3]]);

    /// Issue a non-indexed draw over `[first, first + count)`.
    fn draw_arrays(&mut self, mode: DrawMode, first: i32, count: i32);
}

/// Shader program storage keyed by [`ShaderKey`].
pub trait ShaderCache {
    /// Look up a registered program.
    fn program_for_key(&self, key: ShaderKey) -> Option<ProgramHandle>;

    /// Register a program under a key.
    fn add_program(&mut self, key: ShaderKey, program: ProgramHandle);
}

/// Texture loading collaborator. Decoding happens on the host side; only
/// opaque handles cross this seam. `None` means the asset is missing, which
/// renderables treat as a soft failure (untextured rendering).
pub trait TextureProvider {
    /// Load and decode an image file.
    fn load_image(&mut self, path: &str) -> Option<TextureHandle>;

    /// Decode an in-memory image buffer.
    fn decode_buffer(&mut self, bytes: &[u8]) -> Option<TextureHandle>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fakes for pipeline tests.

    use std::collections::HashMap;

    use super::*;

    /// Every observable call a [`RecordingDevice`] accepts.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DeviceCall {
        CreateBuffer(BufferHandle),
        DeleteBuffer(BufferHandle),
        UploadBuffer {
            buffer: BufferHandle,
            bytes: usize,
            dynamic: bool,
        },
        UseProgram(ProgramHandle),
        BindTexture(u32, Option<TextureHandle>),
        BindAttributeBuffer(VertexAttribute, u32, Option<BufferHandle>),
        BindAttributeData(VertexAttribute, u32, usize),
        UniformI32(String, i32),
        UniformF32(String, f32),
        UniformVec3(String, [f32; 3]),
        UniformMat4(String),
        UniformI32Array(String, Vec<i32>),
        UniformF32Array(String, Vec<f32>),
        UniformVec3Array(String, Vec<[f32; 3]>),
        DrawArrays(DrawMode, i32, i32),
    }

    /// A device that hands out sequential handles and records every call.
    #[derive(Debug, Default)]
    pub struct RecordingDevice {
        next_buffer: u32,
        pub calls: Vec<DeviceCall>,
    }

    impl RecordingDevice {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn draw_calls(&self) -> Vec<(DrawMode, i32, i32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DeviceCall::DrawArrays(mode, first, count) => Some((*mode, *first, *count)),
                    _ => None,
                })
                .collect()
        }

        pub fn uniform_vec3_array(&self, name: &str) -> Option<&[[f32; 3]]> {
            self.calls.iter().rev().find_map(|c| match c {
                DeviceCall::UniformVec3Array(n, values) if n == name => Some(values.as_slice()),
                _ => None,
            })
        }

        pub fn uniform_i32_array(&self, name: &str) -> Option<&[i32]> {
            self.calls.iter().rev().find_map(|c| match c {
                DeviceCall::UniformI32Array(n, values) if n == name => Some(values.as_slice()),
                _ => None,
            })
        }
    }

    impl RenderDevice for RecordingDevice {
        fn create_buffer(&mut self) -> BufferHandle {
            self.next_buffer += 1;
            let handle = BufferHandle(self.next_buffer);
            self.calls.push(DeviceCall::CreateBuffer(handle));
            handle
        }

        fn delete_buffer(&mut self, buffer: BufferHandle) {
            self.calls.push(DeviceCall::DeleteBuffer(buffer));
        }

        fn upload_buffer(&mut self, buffer: BufferHandle, data: &[u8], dynamic: bool) {
            self.calls.push(DeviceCall::UploadBuffer {
                buffer,
                bytes: data.len(),
                dynamic,
            });
        }

        fn use_program(&mut self, program: ProgramHandle) {
            self.calls.push(DeviceCall::UseProgram(program));
        }

        fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>) {
            self.calls.push(DeviceCall::BindTexture(unit, texture));
        }

        fn bind_attribute_buffer(
            &mut self,
            attribute: VertexAttribute,
            components: u32,
            buffer: Option<BufferHandle>,
        ) {
            self.calls
                .push(DeviceCall::BindAttributeBuffer(attribute, components, buffer));
        }

        fn bind_attribute_data(
            &mut self,
            attribute: VertexAttribute,
            components: u32,
            data: &[u8],
        ) {
            self.calls
                .push(DeviceCall::BindAttributeData(attribute, components, data.len()));
        }

        fn set_uniform_i32(&mut self, _program: ProgramHandle, name: &str, value: i32) {
            self.calls.push(DeviceCall::UniformI32(name.to_string(), value));
        }

        fn set_uniform_f32(&mut self, _program: ProgramHandle, name: &str, value: f32) {
            self.calls.push(DeviceCall::UniformF32(name.to_string(), value));
        }

        fn set_uniform_vec3(&mut self, _program: ProgramHandle, name: &str, value: [f32; 3]) {
            self.calls.push(DeviceCall::UniformVec3(name.to_string(), value));
        }

        fn set_uniform_mat4(&mut self, _program: ProgramHandle, name: &str, _value: &[f32; 16]) {
            self.calls.push(DeviceCall::UniformMat4(name.to_string()));
        }

        fn set_uniform_i32_array(&mut self, _program: ProgramHandle, name: &str, values: &[i32]) {
            self.calls
                .push(DeviceCall::UniformI32Array(name.to_string(), values.to_vec()));
        }

        fn set_uniform_f32_array(&mut self, _program: ProgramHandle, name: &str, values: &[f32]) {
            self.calls
                .push(DeviceCall::UniformF32Array(name.to_string(), values.to_vec()));
        }

        fn set_uniform_vec3_array(
            &mut self,
            _program: ProgramHandle,
            name: &str,
            values: &[[f32; 3]],
        ) {
            self.calls
                .push(DeviceCall::UniformVec3Array(name.to_string(), values.to_vec()));
        }

        fn draw_arrays(&mut self, mode: DrawMode, first: i32, count: i32) {
            self.calls.push(DeviceCall::DrawArrays(mode, first, count));
        }
    }

    /// A shader cache backed by a plain map.
    #[derive(Debug, Default)]
    pub struct MapShaderCache {
        programs: HashMap<ShaderKey, ProgramHandle>,
    }

    impl MapShaderCache {
        pub fn with_standard_programs() -> Self {
            let mut cache = Self::default();
            cache.add_program(ShaderKey::Phong, ProgramHandle(1));
            cache.add_program(ShaderKey::PhongTextured, ProgramHandle(2));
            cache.add_program(ShaderKey::PhongTexturedToAlpha, ProgramHandle(3));
            cache.add_program(ShaderKey::PhongAnimated, ProgramHandle(4));
            cache.add_program(ShaderKey::PhongTexturedAnimated, ProgramHandle(5));
            cache.add_program(ShaderKey::FlatColor, ProgramHandle(6));
            cache
        }
    }

    impl ShaderCache for MapShaderCache {
        fn program_for_key(&self, key: ShaderKey) -> Option<ProgramHandle> {
            self.programs.get(&key).copied()
        }

        fn add_program(&mut self, key: ShaderKey, program: ProgramHandle) {
            self.programs.insert(key, program);
        }
    }
}
