//! Core widget types: colors, faces, view properties, configuration, errors.
//!
//! Everything here is plain data. The rendering, text and animation modules
//! build on these types; none of them touch collaborators.

pub mod color;
pub mod config;
pub mod error;
pub mod face;
pub mod key;

pub use color::Color;
pub use key::{CardId, CardKey};
pub use config::{CardStyle, StepScales};
pub use error::{CardError, Result};
pub use face::{
    CardProps, Face, FaceMap, FaceOverrides, SurfaceOverrides, SurfaceProps, TextOverrides,
    TextProps, View,
};
