//! Fixed-size linear algebra and point containment geometry.
//!
//! This crate gathers the workspace crates under one roof:
//!
//! - [`math`]: numeric containers, vectors, matrices, quaternions, the LU
//!   solver and the transform builders.
//! - [`geometry`]: axis-aligned boxes, spheres and capsules with point
//!   containment tests.
//! - [`log`]: the logging macros used by the other crates.

pub use hinode_geometry as geometry;
pub use hinode_log as log;
pub use hinode_math as math;

pub use hinode_math::{
    Container, Float, Matrix3x3, Matrix4x4, NumericContainer, Quaternion, Scalar, Vector2, Vector3,
    Vector4,
};
