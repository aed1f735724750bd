//! Socket types and hit testing for execution-order connections

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Index of a socket on one side of a node
pub type SocketId = usize;

/// Side of a node a socket sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketKind {
    Input,
    Output,
}

impl SocketKind {
    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self, SocketKind::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self, SocketKind::Output)
    }

    /// The kind a connection must end on when it starts from this kind
    pub fn opposite(&self) -> SocketKind {
        match self {
            SocketKind::Input => SocketKind::Output,
            SocketKind::Output => SocketKind::Input,
        }
    }
}

/// A specific socket on a specific node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketRef {
    pub node: NodeId,
    pub socket: SocketId,
    pub kind: SocketKind,
}

impl SocketRef {
    pub fn new(node: NodeId, socket: SocketId, kind: SocketKind) -> Self {
        Self { node, socket, kind }
    }

    pub fn input(node: NodeId, socket: SocketId) -> Self {
        Self::new(node, socket, SocketKind::Input)
    }

    pub fn output(node: NodeId, socket: SocketId) -> Self {
        Self::new(node, socket, SocketKind::Output)
    }
}

/// Center of socket `index` out of `count` on the given side of `rect`
///
/// Inputs sit on the left edge, outputs on the right. A single socket is
/// vertically centered; several are spread evenly.
pub fn socket_center(rect: Rect, kind: SocketKind, index: SocketId, count: usize) -> Pos2 {
    let x = match kind {
        SocketKind::Input => rect.left(),
        SocketKind::Output => rect.right(),
    };
    let y = if count <= 1 {
        rect.center().y
    } else {
        rect.top() + rect.height() * (index as f32 + 1.0) / (count as f32 + 1.0)
    };
    Pos2::new(x, y)
}

/// Whether `point` lies within `radius` of a socket center
pub fn is_within_socket(point: Pos2, center: Pos2, radius: f32) -> bool {
    point.distance(center) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    #[test]
    fn test_single_socket_is_centered() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(100.0, 40.0));
        assert_eq!(socket_center(rect, SocketKind::Input, 0, 1), Pos2::new(10.0, 40.0));
        assert_eq!(socket_center(rect, SocketKind::Output, 0, 1), Pos2::new(110.0, 40.0));
    }

    #[test]
    fn test_multiple_sockets_spread_evenly() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 30.0));
        assert_eq!(socket_center(rect, SocketKind::Output, 0, 2).y, 10.0);
        assert_eq!(socket_center(rect, SocketKind::Output, 1, 2).y, 20.0);
    }

    #[test]
    fn test_hit_radius() {
        let center = Pos2::new(0.0, 0.0);
        assert!(is_within_socket(Pos2::new(3.0, 4.0), center, 5.0));
        assert!(!is_within_socket(Pos2::new(6.0, 0.0), center, 5.0));
        assert_eq!(SocketKind::Input.opposite(), SocketKind::Output);
    }
}
