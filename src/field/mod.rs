//! Procedural field: the seeded noise volume and the time-driven palette it is colored with.

/// Hue-cycling color mapping.
pub mod color;
/// Seeded 3D noise with an advancing depth axis.
pub mod noise;
