//! Cube display core: geometry, animation and page state
//!
//! Everything platform-independent lives here. Frontends implement
//! [`surface::SurfaceHost`] and render [`page::Page`] state.

pub mod clock;
pub mod cube;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod media;
pub mod page;
pub mod projection;
pub mod route;
pub mod shell;
pub mod surface;
pub mod transform;
pub mod tween;
pub mod upload;

// Re-export commonly used types
pub use cube::CubeId;
pub use error::{CoreError, Result};
pub use geometry::{Mesh, Wireframe};
pub use hover::HoverAnimator;
pub use media::{MediaPanel, MediaReference};
pub use page::{Page, Selection};
pub use projection::Camera;
pub use route::Route;
pub use shell::DocumentHead;
pub use surface::{Frame, RenderSurface, SurfaceConfig, SurfaceHost, SurfaceScene};
pub use transform::{MeshTransform, RotationState, Transform};
pub use upload::{LogUploadSink, RecordingSink, UploadIntent, UploadSink};
