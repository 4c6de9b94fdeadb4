//=========================================================================
// Memory Stage
//=========================================================================
//
// In-memory reference implementation of the stage contract.
//
// Tracks every node, its kind, its children, and its transforms, and
// records canvas draw calls verbatim. Tests use the query helpers to
// assert attachment and transform invariants without a real renderer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{Color, ImageId, LayerId, Rect, Size, Stage, StageError};

//=== Node Model ==========================================================

/// What a scene-graph node can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Group,
    Image(ImageId),
    Canvas(Size),
}

/// A recorded canvas drawing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    FillRect { rect: Rect, color: Color },
    Text { text: String, x: i32, y: i32, color: Color },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<LayerId>,
    children: Vec<LayerId>,
    translation: (f32, f32),
    scale: (f32, f32),
    alpha: f32,
    draws: Vec<DrawCall>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            translation: (0.0, 0.0),
            scale: (1.0, 1.0),
            alpha: 1.0,
            draws: Vec::new(),
        }
    }
}

//=== MemoryStage =========================================================

/// A complete in-memory [`Stage`] for tests.
///
/// Starts with a root group layer and a 640x480 viewport. Every
/// operation is validated against the contract, so toolkit tests catch
/// handle misuse the same way a strict host would.
pub struct MemoryStage {
    nodes: HashMap<LayerId, Node>,
    root: LayerId,
    next_id: u64,
    viewport: Size,
}

impl MemoryStage {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stage with a fresh root group.
    pub fn new() -> Self {
        let root = LayerId::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(NodeKind::Group));

        Self {
            nodes,
            root,
            next_id: 1,
            viewport: Size::new(640, 480),
        }
    }

    //--- Query Helpers ----------------------------------------------------

    /// Returns the children of a group, in attachment order.
    pub fn children_of(&self, layer: LayerId) -> &[LayerId] {
        self.nodes.get(&layer).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the parent of a layer, if attached.
    pub fn parent_of(&self, layer: LayerId) -> Option<LayerId> {
        self.nodes.get(&layer).and_then(|n| n.parent)
    }

    /// Returns the translation of a live layer.
    pub fn translation_of(&self, layer: LayerId) -> Option<(f32, f32)> {
        self.nodes.get(&layer).map(|n| n.translation)
    }

    /// Returns the scale of a live layer.
    pub fn scale_of(&self, layer: LayerId) -> Option<(f32, f32)> {
        self.nodes.get(&layer).map(|n| n.scale)
    }

    /// Returns the alpha of a live layer.
    pub fn alpha_of(&self, layer: LayerId) -> Option<f32> {
        self.nodes.get(&layer).map(|n| n.alpha)
    }

    /// Returns the draw calls recorded against a canvas layer.
    pub fn draw_calls(&self, canvas: LayerId) -> &[DrawCall] {
        self.nodes.get(&canvas).map(|n| n.draws.as_slice()).unwrap_or(&[])
    }

    /// Returns true if the layer handle is live on this stage.
    pub fn is_live(&self, layer: LayerId) -> bool {
        self.nodes.contains_key(&layer)
    }

    //--- Internal Helpers -------------------------------------------------

    fn alloc(&mut self, kind: NodeKind) -> LayerId {
        let id = LayerId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind));
        id
    }

    fn require(&self, layer: LayerId) -> Result<&Node, StageError> {
        self.nodes.get(&layer).ok_or(StageError::UnknownLayer(layer))
    }

    fn require_mut(&mut self, layer: LayerId) -> Result<&mut Node, StageError> {
        self.nodes.get_mut(&layer).ok_or(StageError::UnknownLayer(layer))
    }

    /// Walks parent links from `start` looking for `needle`.
    fn is_ancestor(&self, needle: LayerId, start: LayerId) -> bool {
        let mut cursor = Some(start);
        while let Some(layer) = cursor {
            if layer == needle {
                return true;
            }
            cursor = self.nodes.get(&layer).and_then(|n| n.parent);
        }
        false
    }

    fn unlink_from_parent(&mut self, child: LayerId) {
        let Some(parent) = self.nodes.get(&child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }
}

impl Default for MemoryStage {
    fn default() -> Self {
        Self::new()
    }
}

//=== Stage Implementation ================================================

impl Stage for MemoryStage {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    fn root(&self) -> LayerId {
        self.root
    }

    fn create_group(&mut self) -> Result<LayerId, StageError> {
        Ok(self.alloc(NodeKind::Group))
    }

    fn create_image(&mut self, image: ImageId) -> Result<LayerId, StageError> {
        Ok(self.alloc(NodeKind::Image(image)))
    }

    fn create_canvas(&mut self, size: Size) -> Result<LayerId, StageError> {
        Ok(self.alloc(NodeKind::Canvas(size)))
    }

    fn attach(&mut self, parent: LayerId, child: LayerId) -> Result<(), StageError> {
        let parent_node = self.require(parent)?;
        if parent_node.kind != NodeKind::Group {
            return Err(StageError::NotAGroup(parent));
        }
        self.require(child)?;

        // A node may not become its own ancestor.
        if self.is_ancestor(child, parent) {
            return Err(StageError::AttachCycle { parent, child });
        }

        // Single-parent invariant: re-attaching moves the child.
        self.unlink_from_parent(child);

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    fn detach(&mut self, parent: LayerId, child: LayerId) -> Result<(), StageError> {
        self.require(parent)?;
        self.require(child)?;

        if self.nodes.get(&child).and_then(|n| n.parent) == Some(parent) {
            self.unlink_from_parent(child);
        }
        Ok(())
    }

    fn detach_children(&mut self, parent: LayerId) -> Result<(), StageError> {
        let children = std::mem::take(&mut self.require_mut(parent)?.children);
        for child in children {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.parent = None;
            }
        }
        Ok(())
    }

    fn drop_layer(&mut self, layer: LayerId) -> Result<(), StageError> {
        self.require(layer)?;

        self.unlink_from_parent(layer);
        let node = self.nodes.remove(&layer);

        // Children survive as orphans; the host decides their fate.
        if let Some(node) = node {
            for child in node.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
            }
        }
        Ok(())
    }

    fn set_translation(&mut self, layer: LayerId, x: f32, y: f32) -> Result<(), StageError> {
        self.require_mut(layer)?.translation = (x, y);
        Ok(())
    }

    fn set_scale(&mut self, layer: LayerId, sx: f32, sy: f32) -> Result<(), StageError> {
        self.require_mut(layer)?.scale = (sx, sy);
        Ok(())
    }

    fn set_alpha(&mut self, layer: LayerId, alpha: f32) -> Result<(), StageError> {
        self.require_mut(layer)?.alpha = alpha;
        Ok(())
    }

    fn fill_rect(&mut self, canvas: LayerId, rect: Rect, color: Color) -> Result<(), StageError> {
        let node = self.require_mut(canvas)?;
        if !matches!(node.kind, NodeKind::Canvas(_)) {
            return Err(StageError::NotACanvas(canvas));
        }
        node.draws.push(DrawCall::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        canvas: LayerId,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) -> Result<(), StageError> {
        let node = self.require_mut(canvas)?;
        if !matches!(node.kind, NodeKind::Canvas(_)) {
            return Err(StageError::NotACanvas(canvas));
        }
        node.draws.push(DrawCall::Text { text: text.to_owned(), x, y, color });
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Lifecycle Tests --------------------------------------------------

    #[test]
    fn new_stage_has_live_empty_root() {
        let stage = MemoryStage::new();
        assert!(stage.is_live(stage.root()));
        assert!(stage.children_of(stage.root()).is_empty());
        assert_eq!(stage.viewport(), Size::new(640, 480));
    }

    #[test]
    fn created_layers_have_identity_transforms() {
        let mut stage = MemoryStage::new();
        let group = stage.create_group().unwrap();

        assert_eq!(stage.translation_of(group), Some((0.0, 0.0)));
        assert_eq!(stage.scale_of(group), Some((1.0, 1.0)));
        assert_eq!(stage.alpha_of(group), Some(1.0));
    }

    #[test]
    fn drop_layer_detaches_and_orphans_children() {
        let mut stage = MemoryStage::new();
        let root = stage.root();
        let group = stage.create_group().unwrap();
        let child = stage.create_group().unwrap();
        stage.attach(root, group).unwrap();
        stage.attach(group, child).unwrap();

        stage.drop_layer(group).unwrap();

        assert!(!stage.is_live(group));
        assert!(stage.children_of(root).is_empty());
        assert!(stage.is_live(child));
        assert_eq!(stage.parent_of(child), None);
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let mut stage = MemoryStage::new();
        let ghost = LayerId::from_raw(999);

        assert_eq!(stage.set_alpha(ghost, 0.5), Err(StageError::UnknownLayer(ghost)));
        assert_eq!(stage.attach(stage.root(), ghost), Err(StageError::UnknownLayer(ghost)));
        assert_eq!(stage.drop_layer(ghost), Err(StageError::UnknownLayer(ghost)));
    }

    //--- Attachment Tests -------------------------------------------------

    #[test]
    fn attach_records_parent_and_order() {
        let mut stage = MemoryStage::new();
        let root = stage.root();
        let a = stage.create_group().unwrap();
        let b = stage.create_group().unwrap();

        stage.attach(root, a).unwrap();
        stage.attach(root, b).unwrap();

        assert_eq!(stage.children_of(root), &[a, b]);
        assert_eq!(stage.parent_of(a), Some(root));
    }

    #[test]
    fn attach_reparents_an_attached_child() {
        let mut stage = MemoryStage::new();
        let old_home = stage.create_group().unwrap();
        let new_home = stage.create_group().unwrap();
        let child = stage.create_group().unwrap();

        stage.attach(old_home, child).unwrap();
        stage.attach(new_home, child).unwrap();

        assert!(stage.children_of(old_home).is_empty());
        assert_eq!(stage.children_of(new_home), &[child]);
        assert_eq!(stage.parent_of(child), Some(new_home));
    }

    #[test]
    fn attach_to_non_group_is_rejected() {
        let mut stage = MemoryStage::new();
        let canvas = stage.create_canvas(Size::new(10, 10)).unwrap();
        let child = stage.create_group().unwrap();

        assert_eq!(stage.attach(canvas, child), Err(StageError::NotAGroup(canvas)));
    }

    #[test]
    fn self_attach_is_a_cycle() {
        let mut stage = MemoryStage::new();
        let group = stage.create_group().unwrap();

        assert_eq!(
            stage.attach(group, group),
            Err(StageError::AttachCycle { parent: group, child: group })
        );
    }

    #[test]
    fn descendant_attach_is_a_cycle() {
        let mut stage = MemoryStage::new();
        let top = stage.create_group().unwrap();
        let mid = stage.create_group().unwrap();
        stage.attach(top, mid).unwrap();

        assert_eq!(
            stage.attach(mid, top),
            Err(StageError::AttachCycle { parent: mid, child: top })
        );
    }

    #[test]
    fn detach_children_empties_the_group() {
        let mut stage = MemoryStage::new();
        let root = stage.root();
        let a = stage.create_group().unwrap();
        let b = stage.create_group().unwrap();
        stage.attach(root, a).unwrap();
        stage.attach(root, b).unwrap();

        stage.detach_children(root).unwrap();

        assert!(stage.children_of(root).is_empty());
        assert_eq!(stage.parent_of(a), None);
        assert_eq!(stage.parent_of(b), None);
    }

    #[test]
    fn detach_of_non_child_is_a_no_op() {
        let mut stage = MemoryStage::new();
        let root = stage.root();
        let stray = stage.create_group().unwrap();

        assert_eq!(stage.detach(root, stray), Ok(()));
    }

    //--- Canvas Tests -----------------------------------------------------

    #[test]
    fn canvas_records_draw_calls_in_order() {
        let mut stage = MemoryStage::new();
        let canvas = stage.create_canvas(Size::new(100, 40)).unwrap();

        stage.fill_rect(canvas, Rect::new(0, 0, 100, 40), Color::BLACK).unwrap();
        stage.draw_text(canvas, "hello", 20, 20, Color::WHITE).unwrap();

        assert_eq!(
            stage.draw_calls(canvas),
            &[
                DrawCall::FillRect { rect: Rect::new(0, 0, 100, 40), color: Color::BLACK },
                DrawCall::Text { text: "hello".into(), x: 20, y: 20, color: Color::WHITE },
            ]
        );
    }

    #[test]
    fn drawing_on_a_group_is_rejected() {
        let mut stage = MemoryStage::new();
        let group = stage.create_group().unwrap();

        assert_eq!(
            stage.fill_rect(group, Rect::new(0, 0, 1, 1), Color::BLACK),
            Err(StageError::NotACanvas(group))
        );
        assert_eq!(
            stage.draw_text(group, "x", 0, 0, Color::WHITE),
            Err(StageError::NotACanvas(group))
        );
    }
}
