use clustree_core::{
    DisplayError, DisplayMode, DrawingSurface, EdgeLabel, EdgeStroke, NodeKey, NodeMark,
};

/// One drawing call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Edge(NodeKey, NodeKey),
    Node(NodeKey),
    Label(NodeKey, NodeKey, String),
    Present(DisplayMode),
}

/// Surface that records every call it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl DrawingSurface for RecordingSurface {
    fn draw_edge(&mut self, edge: &EdgeStroke) {
        self.calls.push(Call::Edge(edge.source, edge.target));
    }

    fn draw_node(&mut self, node: &NodeMark) {
        self.calls.push(Call::Node(node.key));
    }

    fn draw_edge_label(&mut self, label: &EdgeLabel) {
        self.calls
            .push(Call::Label(label.source, label.target, label.text.clone()));
    }

    fn present(&mut self, mode: &DisplayMode) -> Result<(), DisplayError> {
        self.calls.push(Call::Present(mode.clone()));
        Ok(())
    }
}
