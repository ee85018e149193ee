//! # memory-card
//!
//! A flippable card widget for memory (concentration) games.
//!
//! A card shows a back face until it is flipped, then its front face: text,
//! an image, or both. Flips can run a short vertical-squash animation and,
//! for cards that carry a speech language, read the front text aloud.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: Cards never own a window, timer or speech engine.
//!    Everything that leaves the card goes through the `CardHost` trait.
//!
//! 2. **Lazy Rendering**: Each face is rasterized once into a `Surface` and
//!    kept until an attribute feeding it changes.
//!
//! 3. **Shared Text Layouts**: Fitted text layouts live in a bounded LRU
//!    shared by all cards on a thread, keyed by card size, border and text.
//!
//! ## Architecture
//!
//! - **Explicit Animation State**: `FlipAnimation` is a small state machine
//!   with a generation counter, so ticks left over from an interrupted
//!   flip are ignored instead of corrupting the new one.
//!
//! - **Software Rendering**: Faces are painted into ARGB pixel buffers
//!   with anti-aliased rounded rectangles; glyphs come from `fontdue`.
//!
//! ## Modules
//!
//! - `core`: Colors, faces, view properties, style, ids, errors
//! - `text`: Text shaping, font-size fitting, layout cache
//! - `render`: Pixel surfaces and face painting
//! - `anim`: Flip state machine and timer queue
//! - `cards`: The `Card` widget and its host interface
//! - `board`: A ready-made host for a set of cards

pub mod core;
pub mod text;
pub mod render;
pub mod anim;
pub mod cards;
pub mod board;

// Re-export commonly used types
pub use crate::core::{
    CardError, Result,
    Color, CardStyle,
    CardId, CardKey,
    Face, FaceMap, View,
    CardProps, FaceOverrides, SurfaceProps, TextProps,
};

pub use crate::text::{
    TextShaper, MonospaceShaper, FontBook, FontdueShaper,
    TextFitter, TextLayout, LayoutCache, SharedLayoutCache,
};

pub use crate::render::{Surface, Transform};

pub use crate::anim::{FlipAnimation, Motion, TickToken, TimerQueue};

pub use crate::cards::{Card, CardBuilder, CardHost, CardImage, CardPhase, HostTarget, Speaker};

pub use crate::board::Board;
