//! CPU-side vertex data model.
//!
//! Each scene hard-codes its vertices as a flat `f32` array, optionally with
//! a `u32` index array. [`VertexLayout`] describes how the floats interleave
//! into attributes; stride and byte offsets are derived from it rather than
//! hand-written at every attribute-pointer call. [`MeshData`] bundles the
//! arrays with their layout and validates the combination before anything
//! touches the GPU.

use crate::error::SceneError;

/// Size of one `f32` in bytes, the only component type the scenes use.
const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// One vertex attribute: its shader location and how many floats it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout (location = N)` index in the vertex shader.
    pub location: u32,
    /// Number of float components, 1 through 4.
    pub components: i32,
}

/// Ordered list of interleaved vertex attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Builds a layout from an ordered attribute list.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::InvalidMesh` if the list is empty, a component
    /// count is outside 1..=4, or two attributes share a location.
    pub fn new(attributes: Vec<VertexAttribute>) -> Result<Self, SceneError> {
        if attributes.is_empty() {
            return Err(SceneError::InvalidMesh(
                "vertex layout has no attributes".into(),
            ));
        }
        for attr in &attributes {
            if !(1..=4).contains(&attr.components) {
                return Err(SceneError::InvalidMesh(format!(
                    "attribute at location {} has {} components, expected 1..=4",
                    attr.location, attr.components
                )));
            }
        }
        for (i, attr) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|a| a.location == attr.location) {
                return Err(SceneError::InvalidMesh(format!(
                    "duplicate attribute location {}",
                    attr.location
                )));
            }
        }
        Ok(Self { attributes })
    }

    /// Convenience constructor for a position-only layout at location 0.
    pub fn position3() -> Self {
        Self {
            attributes: vec![VertexAttribute {
                location: 0,
                components: 3,
            }],
        }
    }

    /// The attributes in interleave order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex.
    pub fn stride_floats(&self) -> usize {
        self.attributes
            .iter()
            .map(|a| a.components as usize)
            .sum()
    }

    /// Bytes per vertex, as GL wants it for attribute pointers.
    pub fn stride_bytes(&self) -> i32 {
        (self.stride_floats() * FLOAT_BYTES) as i32
    }

    /// Byte offset of the attribute at `index` within one vertex.
    pub fn offset_bytes(&self, index: usize) -> i32 {
        let floats: usize = self.attributes[..index]
            .iter()
            .map(|a| a.components as usize)
            .sum();
        (floats * FLOAT_BYTES) as i32
    }
}

/// Validated vertex (and optional index) data ready for upload.
#[derive(Debug, Clone)]
pub struct MeshData<'a> {
    vertices: &'a [f32],
    indices: Option<&'a [u32]>,
    layout: VertexLayout,
}

impl<'a> MeshData<'a> {
    /// Non-indexed mesh data.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::InvalidMesh` if the vertex array is empty or its
    /// length is not a multiple of the layout stride.
    pub fn new(vertices: &'a [f32], layout: VertexLayout) -> Result<Self, SceneError> {
        Self::build(vertices, None, layout)
    }

    /// Indexed mesh data.
    ///
    /// # Errors
    ///
    /// As [`MeshData::new`], and additionally if the index array is empty or
    /// any index is out of range for the vertex count.
    pub fn with_indices(
        vertices: &'a [f32],
        indices: &'a [u32],
        layout: VertexLayout,
    ) -> Result<Self, SceneError> {
        Self::build(vertices, Some(indices), layout)
    }

    fn build(
        vertices: &'a [f32],
        indices: Option<&'a [u32]>,
        layout: VertexLayout,
    ) -> Result<Self, SceneError> {
        if vertices.is_empty() {
            return Err(SceneError::InvalidMesh("vertex array is empty".into()));
        }
        let stride = layout.stride_floats();
        if vertices.len() % stride != 0 {
            return Err(SceneError::InvalidMesh(format!(
                "vertex array length {} is not a multiple of the layout stride {}",
                vertices.len(),
                stride
            )));
        }
        let vertex_count = vertices.len() / stride;
        if let Some(indices) = indices {
            if indices.is_empty() {
                return Err(SceneError::InvalidMesh("index array is empty".into()));
            }
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SceneError::InvalidMesh(format!(
                    "index {bad} out of range for {vertex_count} vertices"
                )));
            }
        }
        Ok(Self {
            vertices,
            indices,
            layout,
        })
    }

    /// Raw interleaved vertex floats.
    pub fn vertices(&self) -> &[f32] {
        self.vertices
    }

    /// Index array, if this mesh draws with elements.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices
    }

    /// The attribute layout.
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of vertices in the vertex array.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride_floats()
    }

    /// Number of elements a draw call covers: index count when indexed,
    /// vertex count otherwise.
    pub fn element_count(&self) -> i32 {
        match self.indices {
            Some(indices) => indices.len() as i32,
            None => self.vertex_count() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pos_uv_layout() -> VertexLayout {
        VertexLayout::new(vec![
            VertexAttribute {
                location: 0,
                components: 3,
            },
            VertexAttribute {
                location: 1,
                components: 2,
            },
        ])
        .unwrap()
    }

    #[test]
    fn empty_layout_is_rejected() {
        let result = VertexLayout::new(vec![]);
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn zero_components_are_rejected() {
        let result = VertexLayout::new(vec![VertexAttribute {
            location: 0,
            components: 0,
        }]);
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn five_components_are_rejected() {
        let result = VertexLayout::new(vec![VertexAttribute {
            location: 0,
            components: 5,
        }]);
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn duplicate_locations_are_rejected() {
        let result = VertexLayout::new(vec![
            VertexAttribute {
                location: 0,
                components: 3,
            },
            VertexAttribute {
                location: 0,
                components: 2,
            },
        ]);
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn pos_uv_stride_is_five_floats() {
        let layout = pos_uv_layout();
        assert_eq!(layout.stride_floats(), 5);
        assert_eq!(layout.stride_bytes(), 20);
    }

    #[test]
    fn second_attribute_offset_skips_the_first() {
        let layout = pos_uv_layout();
        assert_eq!(layout.offset_bytes(0), 0);
        assert_eq!(layout.offset_bytes(1), 12);
    }

    #[test]
    fn position3_matches_explicit_layout() {
        let explicit = VertexLayout::new(vec![VertexAttribute {
            location: 0,
            components: 3,
        }])
        .unwrap();
        assert_eq!(VertexLayout::position3(), explicit);
    }

    #[test]
    fn vertex_count_divides_by_stride() {
        let vertices = [0.0f32; 20];
        let data = MeshData::new(&vertices, pos_uv_layout()).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.element_count(), 4);
    }

    #[test]
    fn ragged_vertex_array_is_rejected() {
        let vertices = [0.0f32; 7];
        let result = MeshData::new(&vertices, pos_uv_layout());
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn empty_vertex_array_is_rejected() {
        let result = MeshData::new(&[], VertexLayout::position3());
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let vertices = [0.0f32; 9];
        let indices = [0u32, 1, 3];
        let result = MeshData::with_indices(&vertices, &indices, VertexLayout::position3());
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn indexed_element_count_is_index_count() {
        let vertices = [0.0f32; 12];
        let indices = [0u32, 1, 3, 1, 2, 3];
        let data =
            MeshData::with_indices(&vertices, &indices, VertexLayout::position3()).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.element_count(), 6);
    }

    #[test]
    fn empty_index_array_is_rejected() {
        let vertices = [0.0f32; 9];
        let result = MeshData::with_indices(&vertices, &[], VertexLayout::position3());
        assert!(matches!(result, Err(SceneError::InvalidMesh(_))));
    }

    proptest! {
        #[test]
        fn stride_is_the_component_sum(comps in prop::collection::vec(1..=4i32, 1..6)) {
            let attrs: Vec<VertexAttribute> = comps
                .iter()
                .enumerate()
                .map(|(i, &components)| VertexAttribute {
                    location: i as u32,
                    components,
                })
                .collect();
            let layout = VertexLayout::new(attrs).unwrap();
            let expected: i32 = comps.iter().sum();
            prop_assert_eq!(layout.stride_floats(), expected as usize);
        }

        #[test]
        fn offsets_are_strictly_increasing_and_bounded(
            comps in prop::collection::vec(1..=4i32, 1..6)
        ) {
            let attrs: Vec<VertexAttribute> = comps
                .iter()
                .enumerate()
                .map(|(i, &components)| VertexAttribute {
                    location: i as u32,
                    components,
                })
                .collect();
            let layout = VertexLayout::new(attrs).unwrap();
            let mut prev = -1;
            for i in 0..comps.len() {
                let offset = layout.offset_bytes(i);
                prop_assert!(offset > prev, "offset {offset} not after {prev}");
                prop_assert!(offset < layout.stride_bytes());
                prev = offset;
            }
            let last = comps.len() - 1;
            prop_assert_eq!(
                layout.offset_bytes(last) + comps[last] * 4,
                layout.stride_bytes()
            );
        }
    }
}
