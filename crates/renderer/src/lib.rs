//! Headless rendering data for careermap: camera math, instance buffers and
//! overlay geometry, ready to hand to a GPU backend or print to a terminal.

pub mod camera;
pub mod frame;
pub mod vertex;

pub use camera::*;
pub use frame::*;
pub use vertex::*;
