// transition/property.rs
//
// Node property transitions. One generic state, specialized by a marker
// type per property, so every property kind gets its own pool.

use std::fmt::Debug;
use std::marker::PhantomData;
use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::extensions::easing::Easing;
use crate::extensions::value::{BlendStyle, Tweenable};
use super::pool::{Poolable, StatePools};
use super::state::{ConflictKey, PropertyKind, TransitionState};

/// Accessor for one animatable property of a [`Node`].
pub trait NodeProperty: Debug + Clone + Default + 'static {
    type Value: Tweenable;
    const KIND: PropertyKind;

    fn read(node: &Node) -> Self::Value;
    fn write(node: &mut Node, value: Self::Value);
}

/// `Node::scale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScale;

impl NodeProperty for LocalScale {
    type Value = Vec3;
    const KIND: PropertyKind = PropertyKind::LocalScale;

    fn read(node: &Node) -> Vec3 {
        node.scale
    }

    fn write(node: &mut Node, value: Vec3) {
        node.scale = value;
    }
}

/// `Node::scale.x` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScaleX;

impl NodeProperty for LocalScaleX {
    type Value = f32;
    const KIND: PropertyKind = PropertyKind::LocalScaleX;

    fn read(node: &Node) -> f32 {
        node.scale.x
    }

    fn write(node: &mut Node, value: f32) {
        node.scale.x = value;
    }
}

/// `Node::position`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPosition;

impl NodeProperty for LocalPosition {
    type Value = Vec3;
    const KIND: PropertyKind = PropertyKind::LocalPosition;

    fn read(node: &Node) -> Vec3 {
        node.position
    }

    fn write(node: &mut Node, value: Vec3) {
        node.position = value;
    }
}

/// `Node::alpha`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alpha;

impl NodeProperty for Alpha {
    type Value = f32;
    const KIND: PropertyKind = PropertyKind::Alpha;

    fn read(node: &Node) -> f32 {
        node.alpha
    }

    fn write(node: &mut Node, value: f32) {
        node.alpha = value;
    }
}

/// Interpolates property `P` of one node from its begin value towards a goal.
#[derive(Debug, Clone, Default)]
pub struct ValueState<P: NodeProperty> {
    pub target: Option<NodeId>,
    pub goal: P::Value,
    pub style: BlendStyle,
    pub ease: Easing,
    /// Captured by `begin`.
    pub begin_value: P::Value,
    _property: PhantomData<P>,
}

impl<P: NodeProperty> ValueState<P> {
    pub fn new(target: NodeId, goal: P::Value) -> Self {
        Self {
            target: Some(target),
            goal,
            ..Self::default()
        }
    }

    fn node<'a>(&self, scene: &'a Scene) -> Option<&'a Node> {
        self.target.and_then(|id| scene.get(id))
    }
}

impl<P: NodeProperty> Poolable for ValueState<P> {
    fn reset(&mut self, target: Option<NodeId>) {
        *self = Self {
            target,
            ..Self::default()
        };
    }
}

impl<P: NodeProperty> TransitionState for ValueState<P> {
    fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn is_alive(&self, scene: &Scene) -> bool {
        self.node(scene).is_some()
    }

    fn conflict_key(&self) -> Option<ConflictKey> {
        self.target.map(|target| ConflictKey {
            target,
            property: P::KIND,
        })
    }

    fn can_apply(&self, scene: &Scene) -> bool {
        self.node(scene).map_or(false, |node| P::read(node) != self.goal)
    }

    fn capture_current_as_goal(&mut self, scene: &Scene) {
        if let Some(node) = self.node(scene) {
            self.goal = P::read(node);
        }
    }

    fn begin(&mut self, scene: &Scene) {
        if let Some(node) = self.node(scene) {
            self.begin_value = P::read(node);
        }
    }

    fn update(&mut self, scene: &mut Scene, progress: f32) {
        let Some(node) = self.target.and_then(|id| scene.get_mut(id)) else {
            return;
        };
        let end = self.style.resolve(self.begin_value, self.goal);
        P::write(node, self.begin_value.lerp_to(end, self.ease.apply(progress)));
    }

    fn despawn(self: Box<Self>, pools: &mut StatePools) {
        pools.release(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with(node: Node) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(node);
        scene
    }

    #[test]
    fn replace_reaches_goal() {
        let id = NodeId(1);
        let mut scene = scene_with(Node::new(id));
        let mut state = ValueState::<LocalScale>::new(id, Vec3::splat(3.0));
        state.begin(&scene);
        state.update(&mut scene, 1.0);
        assert!((scene.get(id).unwrap().scale - Vec3::splat(3.0)).length() < 1e-5);
    }

    #[test]
    fn multiply_and_increment_end_values() {
        let id = NodeId(1);
        let start = Vec3::new(1.0, 2.0, 4.0);
        let goal = Vec3::new(2.0, 2.0, 0.5);

        for (style, end) in [
            (BlendStyle::Multiply, Vec3::new(2.0, 4.0, 2.0)),
            (BlendStyle::Increment, Vec3::new(3.0, 4.0, 4.5)),
        ] {
            let mut scene = scene_with(Node::new(id).with_position(start));
            let mut state = ValueState::<LocalPosition>::new(id, goal);
            state.style = style;
            state.begin(&scene);

            state.update(&mut scene, 0.0);
            assert_eq!(scene.get(id).unwrap().position, start);
            state.update(&mut scene, 1.0);
            assert!((scene.get(id).unwrap().position - end).length() < 1e-5, "{:?}", style);
        }
    }

    #[test]
    fn scale_x_leaves_other_axes() {
        let id = NodeId(1);
        let mut scene = scene_with(Node::new(id).with_scale(Vec3::new(1.0, 5.0, 6.0)));
        let mut state = ValueState::<LocalScaleX>::new(id, 3.0);
        state.begin(&scene);
        state.update(&mut scene, 0.5);
        assert_eq!(scene.get(id).unwrap().scale, Vec3::new(2.0, 5.0, 6.0));
    }

    #[test]
    fn can_apply_and_capture() {
        let id = NodeId(1);
        let scene = scene_with(Node::new(id).with_alpha(0.25));
        let mut state = ValueState::<Alpha>::new(id, 1.0);
        assert!(state.can_apply(&scene));

        state.capture_current_as_goal(&scene);
        assert_eq!(state.goal, 0.25);
        assert!(!state.can_apply(&scene));

        let orphan = ValueState::<Alpha>::new(NodeId(9), 1.0);
        assert!(!orphan.can_apply(&scene));
        assert!(!orphan.is_alive(&scene));
    }

    #[test]
    fn update_on_dead_target_is_a_no_op() {
        let mut scene = Scene::new();
        let mut state = ValueState::<LocalScale>::new(NodeId(4), Vec3::ONE);
        state.begin(&scene);
        state.update(&mut scene, 1.0);
        assert!(scene.is_empty());
    }

    #[test]
    fn reset_clears_payload() {
        let mut state = ValueState::<LocalScale>::new(NodeId(1), Vec3::splat(2.0));
        state.style = BlendStyle::Multiply;
        state.reset(Some(NodeId(2)));
        assert_eq!(state.target, Some(NodeId(2)));
        assert_eq!(state.goal, Vec3::ZERO);
        assert_eq!(state.style, BlendStyle::Replace);
    }
}
