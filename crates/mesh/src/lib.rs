//! Geometry core for stlclip: indexed triangle meshes, cutting planes,
//! half-space clipping and STL reading/writing.

pub mod clip;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod primitives;
pub mod stl;

pub use clip::clip_mesh;
pub use error::{MeshIoError, MeshIoResult};
pub use mesh::{Bounds, TriMesh};
pub use plane::{Axis, Plane};
pub use stl::{encode_stl, read_stl, read_stl_bytes, read_stl_from, write_stl, StlFormat};
