//! Markup module - typed node trees over rendered HTML

mod mapper;
mod node;

pub use mapper::to_node_tree;
pub use node::RenderedNode;
