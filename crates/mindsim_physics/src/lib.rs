pub mod boundary;
pub mod collision;
pub mod diagnostics;
pub mod placement;
pub mod speed;
pub mod step;

pub use boundary::{contain, Containment};
pub use collision::{resolve_all, resolve_pair, CollisionStats, PairContact};
pub use placement::{create_body, random_point_in_sphere, sample_inside};
pub use speed::{enforce_speed, random_direction};
pub use step::{step, StepParams, StepReport};
