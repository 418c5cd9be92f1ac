pub mod config;
pub mod follow;
pub mod input;
pub mod manager;
pub mod sampler;
pub mod style;
pub mod subscription;
pub mod surface;
pub mod types;

pub use config::{CursorConfig, CursorConfigBuilder, CursorConfigBuilderError};
pub use follow::{FollowSource, Follower};
pub use input::PointerEvent;
pub use manager::{CursorManager, CursorState};
pub use sampler::PositionSampler;
pub use style::{CursorStyle, StyleStack};
pub use subscription::Subscription;
pub use surface::CursorSurface;
pub use types::{Point, Size, Vector};

pub mod reexports {
    pub use euclid;
}
