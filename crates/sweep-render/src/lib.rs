pub mod animation;
pub mod camera;
pub mod export;
pub mod scene;
pub mod viewer;

// Re-export main types
pub use animation::{Keyframe, Recording, Timer, Track};
pub use camera::Camera;
pub use export::{export_html, export_snapshot};
pub use scene::{ObjectKey, Scene, SceneGeometry, SceneObject};
pub use viewer::{Viewer, ViewerConfig};
