use glam::Vec3;
use crate::api::types::NodeId;

/// A scene node carrying the properties transitions can animate.
/// Kept deliberately flat: one struct, public fields, builder setters.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Local position relative to the parent.
    pub position: Vec3,
    /// Local scale.
    pub scale: Vec3,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl Node {
    /// Create a node at the origin with unit scale and full opacity.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            alpha: 1.0,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}
