//! Recursive Whitted-style ray tracer: spheres over a checkerboard plane,
//! lit by point lights with Phong shading, hard shadows and mirror reflections.

pub mod camera;
pub mod light;
pub mod material;
pub mod object;
pub mod picture;
pub mod ppm;
pub mod ray;
pub mod render;
pub mod scene;
pub mod vector;
