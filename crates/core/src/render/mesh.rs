//! GPU-side mesh objects.
//!
//! [`GpuMesh`] turns a validated [`MeshData`] into a VAO with its VBO (and
//! EBO when indexed), with attribute pointers derived from the layout. The
//! data is uploaded once with `STATIC_DRAW` and never touched again, which
//! is all the scenes need.

use crate::error::SceneError;
use crate::geometry::MeshData;

/// A VAO plus the buffers it references, ready to draw.
pub struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    element_count: i32,
}

impl GpuMesh {
    /// Uploads `data` into freshly created GL objects.
    ///
    /// Binds the VAO, uploads the vertex floats, records one attribute
    /// pointer per layout entry, and uploads the index array when present.
    /// The element-array binding is captured by the VAO, so a later
    /// [`GpuMesh::draw`] only needs to rebind the VAO.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Gl` if the driver refuses to create any of the
    /// objects.
    #[allow(unsafe_code)]
    pub fn upload(gl: &glow::Context, data: &MeshData<'_>) -> Result<Self, SceneError> {
        use glow::HasContext;

        // SAFETY: all handles are created here and bound before use; slice
        // casts go through bytemuck on plain-old-data arrays.
        unsafe {
            let vao = gl.create_vertex_array().map_err(SceneError::Gl)?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(SceneError::Gl)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data.vertices()),
                glow::STATIC_DRAW,
            );

            let layout = data.layout();
            for (i, attr) in layout.attributes().iter().enumerate() {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    layout.stride_bytes(),
                    layout.offset_bytes(i),
                );
                gl.enable_vertex_attrib_array(attr.location);
            }

            let ebo = match data.indices() {
                Some(indices) => {
                    let ebo = gl.create_buffer().map_err(SceneError::Gl)?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vbo,
                ebo,
                element_count: data.element_count(),
            })
        }
    }

    /// Draws the whole mesh as triangles.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.vao is live and carries the element-array binding
        // when the mesh is indexed.
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            match self.ebo {
                Some(_) => {
                    gl.draw_elements(glow::TRIANGLES, self.element_count, glow::UNSIGNED_INT, 0)
                }
                None => gl.draw_arrays(glow::TRIANGLES, 0, self.element_count),
            }
        }
    }

    /// Number of elements each draw call covers.
    pub fn element_count(&self) -> i32 {
        self.element_count
    }

    /// Whether the mesh draws with an index buffer.
    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    /// Deletes the VAO and its buffers.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: all handles are live and not used after destroy.
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }
        }
    }
}
