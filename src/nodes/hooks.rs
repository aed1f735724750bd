//! Collaborator traits for execution and change notification
//!
//! The graph never owns an execution engine. Callers pass one into the
//! operations that need it, and the engine only ever sees an owned
//! [`GraphSnapshot`](super::graph::GraphSnapshot).

use super::graph::{Connection, GraphSnapshot};
use super::node::{Node, NodeId};

/// External engine that walks a graph and drives the agent
pub trait ExecutionController {
    /// Start executing the branch rooted at `start`; returns whether it started
    fn execute_branch(&mut self, start: NodeId, snapshot: &GraphSnapshot) -> bool;

    /// Stop the chain started from `start`; returns whether one was running
    fn request_stop_for_start(&mut self, start: NodeId) -> bool;

    fn request_stop_all(&mut self);

    fn is_chain_active(&self, node: NodeId) -> bool;

    fn is_executing(&self) -> bool;

    /// Whether the renderer should animate flow along `connection`
    fn should_animate_connection(&self, _connection: &Connection) -> bool {
        false
    }
}

/// Observer notified about graph changes the engine's view depends on
pub trait GraphObserver {
    /// Called after a node's parameter values changed
    fn on_parameters_changed(&mut self, _node: &Node) {
        // Default: no special handling
    }

    /// Called after a node was removed from the graph
    fn on_node_removed(&mut self, _node: &Node) {
        // Default: no special handling
    }
}
