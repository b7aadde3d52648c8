//! What the renderer reads from an emitter each frame.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One particle as uploaded to the vertex buffer.
///
/// Stepped per instance; each instance expands into a camera-facing quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl ParticleVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32,   // size
        2 => Float32x3, // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Which slots get submitted for drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawFilter {
    /// Every slot, including inactive ones.
    #[default]
    All,
    /// Only slots flagged alive.
    AliveOnly,
}

impl DrawFilter {
    pub fn toggled(self) -> Self {
        match self {
            DrawFilter::All => DrawFilter::AliveOnly,
            DrawFilter::AliveOnly => DrawFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 32);
        let layout = ParticleVertex::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 16);
    }

    #[test]
    fn test_filter_toggle() {
        assert_eq!(DrawFilter::default(), DrawFilter::All);
        assert_eq!(DrawFilter::All.toggled(), DrawFilter::AliveOnly);
        assert_eq!(DrawFilter::AliveOnly.toggled(), DrawFilter::All);
    }
}
