pub mod render;
pub mod status;
pub mod viewport;

pub use render::{Frame, FrameRenderer};
pub use status::StatusInfo;
pub use viewport::{RenderedCursor, Viewport};
