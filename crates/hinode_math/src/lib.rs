//! Fixed-size numeric containers, vectors, matrices and quaternions.

#[macro_use]
mod macros;

pub mod angle;
pub mod color;
pub mod container;
pub mod lu;
pub mod matrix;
pub mod num;
pub mod quaternion;
pub mod random;
pub mod transform;
pub mod vector;

pub use angle::{Angle, Degrees, Radians};
pub use container::{Container, NumericContainer, Operand};
pub use matrix::{Matrix3x3, Matrix4x4};
pub use num::{Float, Integer, Scalar};
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3, Vector4};
