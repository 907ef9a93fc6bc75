//! Batches: runs of draw commands sharing one render state.

use crate::command::{DrawCommand, Topology};
use crate::state::RenderState;

/// A zero-argument side effect run in draw order.
pub type Action = Box<dyn FnMut()>;

/// One entry in a pool's ordered batch list.
///
/// Either geometry sharing a single render state (submitted as one GPU
/// draw) or an injected callback, never both.
pub enum Batch {
    Draws {
        state: RenderState,
        topology: Topology,
        /// Call-order command list. Rendering never reorders it: overlapping
        /// geometry depends on painter's-algorithm ordering.
        commands: Vec<DrawCommand>,
    },
    Action(Action),
}

impl Batch {
    /// A fresh single-command batch.
    pub fn draws(state: RenderState, topology: Topology, command: DrawCommand) -> Self {
        Batch::Draws {
            state,
            topology,
            commands: vec![command],
        }
    }

    pub fn action(action: impl FnMut() + 'static) -> Self {
        Batch::Action(Box::new(action))
    }

    /// Number of stored commands; zero for action batches.
    pub fn command_count(&self) -> usize {
        match self {
            Batch::Draws { commands, .. } => commands.len(),
            Batch::Action(_) => 0,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Batch::Action(_))
    }
}
