//! Card faces, views and their typed visual properties.
//!
//! ## Faces and views
//!
//! A card has two faces, `Back` and `Front`. Each face is described by two
//! views: a surface view (fill and stroke) and a text view (text color, card
//! text and an optional speech language). The four view names are
//! `back`, `back_text`, `front` and `front_text`.
//!
//! ## Defaults and overrides
//!
//! `CardProps::merge` starts from `CardProps::default()` and applies the
//! caller's `FaceOverrides`. Only fields present in an override replace the
//! default.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::color::Color;
use super::error::{CardError, Result};

/// One of the two visual states of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Back,
    Front,
}

impl Face {
    /// Face shown for a given flip state.
    #[must_use]
    pub const fn for_flipped(flipped: bool) -> Self {
        if flipped {
            Face::Front
        } else {
            Face::Back
        }
    }

    /// The other face.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::Back => Face::Front,
            Face::Front => Face::Back,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Face::Back => 0,
            Face::Front => 1,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Back => f.write_str("back"),
            Face::Front => f.write_str("front"),
        }
    }
}

/// Named property group of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Back,
    BackText,
    Front,
    FrontText,
}

impl View {
    pub const ALL: [View; 4] = [View::Back, View::BackText, View::Front, View::FrontText];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            View::Back => "back",
            View::BackText => "back_text",
            View::Front => "front",
            View::FrontText => "front_text",
        }
    }

    /// Face this view belongs to.
    #[must_use]
    pub const fn face(self) -> Face {
        match self {
            View::Back | View::BackText => Face::Back,
            View::Front | View::FrontText => Face::Front,
        }
    }

    /// Look up a view by its name.
    pub fn from_name(name: &str) -> Result<Self> {
        View::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| CardError::UnknownView {
                name: name.to_string(),
            })
    }
}

/// Per-face storage indexed by `Face`.
///
/// ```
/// use memory_card::{Face, FaceMap};
///
/// let mut drawn: FaceMap<u32> = FaceMap::default();
/// drawn[Face::Front] += 1;
/// assert_eq!(drawn[Face::Front], 1);
/// assert_eq!(drawn[Face::Back], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceMap<T> {
    data: [T; 2],
}

impl<T> FaceMap<T> {
    /// Create with a value per face.
    pub fn new(back: T, front: T) -> Self {
        Self { data: [back, front] }
    }

    /// Iterate `(face, value)` pairs, back first.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &T)> {
        [Face::Back, Face::Front].into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Face> for FaceMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, face: Face) -> &T {
        &self.data[face.index()]
    }
}

impl<T> IndexMut<Face> for FaceMap<T> {
    #[inline]
    fn index_mut(&mut self, face: Face) -> &mut T {
        &mut self.data[face.index()]
    }
}

/// Fill and stroke of a face surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceProps {
    pub fill_color: Color,
    pub stroke_color: Color,
}

/// Text attributes of a face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProps {
    pub text_color: Color,
    /// Text shown on the face. Empty means no text.
    pub card_text: String,
    /// Speech language tag, e.g. `"en"`.
    pub speak: Option<String>,
}

impl TextProps {
    fn with_color(text_color: Color) -> Self {
        Self {
            text_color,
            card_text: String::new(),
            speak: None,
        }
    }

    /// True if there is text to show.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.card_text.is_empty()
    }
}

/// Optional replacements for a surface view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOverrides {
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
}

/// Optional replacements for a text view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverrides {
    pub text_color: Option<Color>,
    pub card_text: Option<String>,
    pub speak: Option<String>,
}

/// Caller-supplied overrides for all four views.
///
/// Deserializes from the same shape games store their card descriptions in:
///
/// ```
/// use memory_card::FaceOverrides;
///
/// let json = r##"{ "front_text": { "card_text": "Hello", "speak": "en" },
///                  "back": { "fill_color": "#000000" } }"##;
/// let overrides: FaceOverrides = serde_json::from_str(json).unwrap();
/// assert_eq!(overrides.front_text.card_text.as_deref(), Some("Hello"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceOverrides {
    pub back: SurfaceOverrides,
    pub back_text: TextOverrides,
    pub front: SurfaceOverrides,
    pub front_text: TextOverrides,
}

impl FaceOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the card text of a face.
    #[must_use]
    pub fn with_text(mut self, face: Face, text: impl Into<String>) -> Self {
        self.text_mut(face).card_text = Some(text.into());
        self
    }

    /// Set the speech language of the front text.
    #[must_use]
    pub fn with_speak(mut self, lang: impl Into<String>) -> Self {
        self.front_text.speak = Some(lang.into());
        self
    }

    /// Set fill and stroke of a face.
    #[must_use]
    pub fn with_colors(mut self, face: Face, fill: Color, stroke: Color) -> Self {
        let surface = match face {
            Face::Back => &mut self.back,
            Face::Front => &mut self.front,
        };
        surface.fill_color = Some(fill);
        surface.stroke_color = Some(stroke);
        self
    }

    /// Set one attribute from loosely typed strings.
    ///
    /// Recognized attributes: `fill_color` and `stroke_color` on surface
    /// views; `text_color`, `card_text` and `speak` on text views.
    pub fn set(&mut self, view: &str, attribute: &str, value: &str) -> Result<()> {
        let unknown = || CardError::UnknownAttribute {
            view: view.to_string(),
            attribute: attribute.to_string(),
        };

        match View::from_name(view)? {
            v @ (View::Back | View::Front) => {
                let surface = if v == View::Back {
                    &mut self.back
                } else {
                    &mut self.front
                };
                match attribute {
                    "fill_color" => surface.fill_color = Some(Color::parse(value)?),
                    "stroke_color" => surface.stroke_color = Some(Color::parse(value)?),
                    _ => return Err(unknown()),
                }
            }
            v @ (View::BackText | View::FrontText) => {
                let text = self.text_mut(v.face());
                match attribute {
                    "text_color" => text.text_color = Some(Color::parse(value)?),
                    "card_text" => text.card_text = Some(value.to_string()),
                    "speak" => text.speak = Some(value.to_string()),
                    _ => return Err(unknown()),
                }
            }
        }
        Ok(())
    }

    fn text_mut(&mut self, face: Face) -> &mut TextOverrides {
        match face {
            Face::Back => &mut self.back_text,
            Face::Front => &mut self.front_text,
        }
    }
}

/// Resolved properties of all four views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProps {
    pub back: SurfaceProps,
    pub back_text: TextProps,
    pub front: SurfaceProps,
    pub front_text: TextProps,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            back: SurfaceProps {
                fill_color: Color::rgb(0xb2, 0xb3, 0xb7),
                stroke_color: Color::rgb(0xb2, 0xb3, 0xb7),
            },
            back_text: TextProps::with_color(Color::rgb(0xc7, 0xc8, 0xcc)),
            front: SurfaceProps {
                fill_color: Color::rgb(0x4c, 0x4d, 0x4f),
                stroke_color: Color::WHITE,
            },
            front_text: TextProps::with_color(Color::WHITE),
        }
    }
}

impl CardProps {
    /// Defaults overridden by `overrides`.
    #[must_use]
    pub fn merge(overrides: &FaceOverrides) -> Self {
        let mut props = Self::default();
        merge_surface(&mut props.back, &overrides.back);
        merge_surface(&mut props.front, &overrides.front);
        merge_text(&mut props.back_text, &overrides.back_text);
        merge_text(&mut props.front_text, &overrides.front_text);
        props
    }

    #[must_use]
    pub fn surface(&self, face: Face) -> &SurfaceProps {
        match face {
            Face::Back => &self.back,
            Face::Front => &self.front,
        }
    }

    pub fn surface_mut(&mut self, face: Face) -> &mut SurfaceProps {
        match face {
            Face::Back => &mut self.back,
            Face::Front => &mut self.front,
        }
    }

    #[must_use]
    pub fn text(&self, face: Face) -> &TextProps {
        match face {
            Face::Back => &self.back_text,
            Face::Front => &self.front_text,
        }
    }

    pub fn text_mut(&mut self, face: Face) -> &mut TextProps {
        match face {
            Face::Back => &mut self.back_text,
            Face::Front => &mut self.front_text,
        }
    }
}

fn merge_surface(props: &mut SurfaceProps, overrides: &SurfaceOverrides) {
    if let Some(fill) = overrides.fill_color {
        props.fill_color = fill;
    }
    if let Some(stroke) = overrides.stroke_color {
        props.stroke_color = stroke;
    }
}

fn merge_text(props: &mut TextProps, overrides: &TextOverrides) {
    if let Some(color) = overrides.text_color {
        props.text_color = color;
    }
    if let Some(text) = &overrides.card_text {
        props.card_text.clone_from(text);
    }
    if overrides.speak.is_some() {
        props.speak.clone_from(&overrides.speak);
    }
}
