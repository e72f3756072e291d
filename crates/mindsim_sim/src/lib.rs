pub mod container;
pub mod mind;
pub mod pipeline;

pub use container::Container;
pub use mind::{Mental, Mind, MindId, MindScene};
pub use pipeline::SimulationPlugin;
