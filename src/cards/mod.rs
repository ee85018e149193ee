//! The card widget and the collaborators it talks to.
//!
//! ## Key Types
//!
//! - `Card`: flip state, face caches and animation of one card
//! - `CardBuilder`: optional font, background, style, shaper and cache
//! - `CardHost`: redraw, timer, speech and display-target services
//! - `CardImage`: front-face image, from a path or from pixels
//!
//! ## Hosting
//!
//! Cards hold no reference to their host. Operations that repaint or
//! schedule work take `&mut dyn CardHost`, and the host hands ticks back
//! through `Card::on_tick`. `crate::board::Board` is a ready-made host.

pub mod card;
pub mod host;
pub mod image;

pub use card::{Card, CardBuilder, CardPhase};
pub use host::{CardHost, HostTarget, Speaker};
pub use image::CardImage;
