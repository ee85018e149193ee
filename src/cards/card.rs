//! The flippable card widget.
//!
//! `Card` owns its flip state, its two cached face surfaces and its two
//! fitted text layouts, and drives `FlipAnimation` through a `CardHost`.
//!
//! ## Phases
//!
//! ```text
//!            flip(false)
//!   BackIdle ----------------------------------------> FrontIdle
//!      |  flip(true)                                      |  flop()
//!      v                  5 ticks                         v
//!   FlippingToFront ------------> FrontIdle   FloppingToBack ---> BackIdle
//! ```
//!
//! `flip` is a no-op while the card is flipped; `flop` always restarts its
//! animation from the first step. `flip(false)` during an animated flip
//! commits it on the spot and the remaining ticks are ignored.
//!
//! ## Caching
//!
//! Face surfaces are rendered lazily on paint and kept until an attribute
//! feeding that face changes. Every setter in this module touches the front
//! face only, so the back surface survives for the card's lifetime.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::host::{CardHost, HostTarget};
use super::image::CardImage;
use crate::anim::{FlipAnimation, Motion, TickOutcome, TickToken};
use crate::core::{CardId, CardKey, CardProps, CardStyle, Color, Face, FaceMap, FaceOverrides};
use crate::render::{compose, render_face, CompositeSpec, FaceSpec, Surface, Transform};
use crate::text::{
    LayoutCache, LayoutKey, MonospaceShaper, SharedLayoutCache, TextFitter, TextLayout, TextShaper,
    LAYOUT_CACHE_CAPACITY,
};

/// Where a card is in its flip cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardPhase {
    BackIdle,
    FlippingToFront,
    FrontIdle,
    FloppingToBack,
}

/// Builder for [`Card`].
///
/// ```
/// use memory_card::{Card, CardId, Color, Face, FaceOverrides};
///
/// let card = Card::builder(CardId::new(4), 120)
///     .overrides(FaceOverrides::new().with_text(Face::Back, "Match"))
///     .background(Color::rgb(0x22, 0x22, 0x22))
///     .font("DejaVu Sans")
///     .build();
///
/// assert_eq!(card.id(), CardId::new(4));
/// assert!(!card.is_flipped());
/// assert_eq!(card.font_name(), "DejaVu Sans");
/// ```
pub struct CardBuilder {
    id: CardId,
    size: u32,
    overrides: FaceOverrides,
    image: Option<CardImage>,
    background: Option<Color>,
    font: Option<String>,
    style: Option<Rc<CardStyle>>,
    shaper: Option<Rc<dyn TextShaper>>,
    layout_cache: Option<SharedLayoutCache>,
}

impl CardBuilder {
    /// Per-view overrides of the default colors and texts.
    #[must_use]
    pub fn overrides(mut self, overrides: FaceOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Front-face image.
    #[must_use]
    pub fn image(mut self, image: CardImage) -> Self {
        self.image = Some(image);
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Geometry and timing. Defaults to `CardStyle::default()`.
    #[must_use]
    pub fn style(mut self, style: Rc<CardStyle>) -> Self {
        self.style = Some(style);
        self
    }

    /// Text layout service.
    ///
    /// Defaults to `MonospaceShaper`, which paints each character as a solid
    /// block. Pass a `FontdueShaper` over a loaded `FontBook` to draw real
    /// glyphs. A card with its own shaper and no explicit `layout_cache`
    /// gets a private cache, since the shared one holds monospace layouts.
    #[must_use]
    pub fn shaper(mut self, shaper: Rc<dyn TextShaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Layout cache. Defaults to the thread's shared cache.
    ///
    /// Every card feeding one cache must use the same shaper.
    #[must_use]
    pub fn layout_cache(mut self, cache: SharedLayoutCache) -> Self {
        self.layout_cache = Some(cache);
        self
    }

    pub fn build(self) -> Card {
        let style = self.style.unwrap_or_default();
        let props = CardProps::merge(&self.overrides);
        let show_text = props.back_text.has_text();
        let layout_cache = match (self.layout_cache, &self.shaper) {
            (Some(cache), _) => cache,
            (None, Some(_)) => LayoutCache::new_shared(LAYOUT_CACHE_CAPACITY),
            (None, None) => LayoutCache::shared(),
        };

        Card {
            key: CardKey::next(),
            id: self.id,
            size: self.size,
            background: self.background.unwrap_or(style.default_background),
            font_name: self.font.unwrap_or_else(|| style.default_font.clone()),
            props,
            image: self.image,
            flipped: false,
            flipped_once: false,
            highlighted: false,
            show_image: false,
            show_text,
            animation: FlipAnimation::new(style.step_count().max(1)),
            target: HostTarget::Drawing,
            surfaces: FaceMap::default(),
            layouts: FaceMap::default(),
            shaper: self.shaper.unwrap_or_else(|| Rc::new(MonospaceShaper)),
            layout_cache,
            style,
        }
    }
}

/// A flippable memory-game card.
pub struct Card {
    key: CardKey,
    id: CardId,
    size: u32,
    style: Rc<CardStyle>,
    background: Color,
    font_name: String,
    props: CardProps,
    image: Option<CardImage>,

    flipped: bool,
    flipped_once: bool,
    highlighted: bool,
    show_image: bool,
    show_text: bool,
    animation: FlipAnimation,
    target: HostTarget,

    surfaces: FaceMap<Option<Surface>>,
    layouts: FaceMap<Option<Rc<TextLayout>>>,
    shaper: Rc<dyn TextShaper>,
    layout_cache: SharedLayoutCache,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("size", &self.size)
            .field("phase", &self.phase())
            .field("highlighted", &self.highlighted)
            .finish_non_exhaustive()
    }
}

impl Card {
    /// Start building a card of `size` x `size` pixels.
    pub fn builder(id: CardId, size: u32) -> CardBuilder {
        CardBuilder {
            id,
            size,
            overrides: FaceOverrides::default(),
            image: None,
            background: None,
            font: None,
            style: None,
            shaper: None,
            layout_cache: None,
        }
    }

    /// Card with default style, font, background and shaper.
    ///
    /// The default `MonospaceShaper` draws text as solid blocks; use
    /// [`Card::builder`] with a `FontdueShaper` for readable glyphs.
    pub fn new(id: CardId, overrides: FaceOverrides, image: Option<CardImage>, size: u32) -> Self {
        let builder = Self::builder(id, size).overrides(overrides);
        match image {
            Some(image) => builder.image(image).build(),
            None => builder.build(),
        }
    }

    // === Flip cycle ===

    /// Turn the card face up.
    ///
    /// Does nothing if the card is already flipped. The first flip decodes
    /// the image (if any) and scales it to fit inside the border. With
    /// `animated`, the front text is spoken first when the card has an id,
    /// a speech language and the host can provide a speaker.
    pub fn flip(&mut self, animated: bool, host: &mut dyn CardHost) {
        if self.flipped {
            return;
        }

        if !self.flipped_once {
            if let Some(image) = self.image.take() {
                self.image = self.resolve_image(image, true);
            }
            self.flipped_once = true;
        }

        let show_image = self.show_image || self.image.is_some();
        let show_text = self.props.front_text.has_text();
        self.set_visibility(show_image, show_text);

        if animated {
            self.speak_front(host);
            self.start_animation(Motion::Flip, host);
        } else {
            self.finish_flip(host);
        }
    }

    /// Turn the card face down with an animation.
    pub fn flop(&mut self, host: &mut dyn CardHost) {
        self.start_animation(Motion::Flop, host);
    }

    /// Flop if flipped.
    pub fn reset(&mut self, host: &mut dyn CardHost) {
        if self.flipped {
            self.flop(host);
        }
    }

    /// Advance the running animation. Hosts call this when a tick
    /// scheduled through `CardHost::schedule_tick` comes due.
    pub fn on_tick(&mut self, token: TickToken, host: &mut dyn CardHost) {
        if token.card != self.key {
            return;
        }

        match self.animation.on_tick(token.generation) {
            TickOutcome::Stale => {
                tracing::trace!(card = %self.key, generation = token.generation, "ignored stale tick");
            }
            TickOutcome::Continue { step } => {
                tracing::trace!(card = %self.key, step, "animation step");
                host.queue_draw(self.key);
                host.schedule_tick(self.style.step_interval(), token);
            }
            TickOutcome::Finished(Motion::Flip) => self.finish_flip(host),
            TickOutcome::Finished(Motion::Flop) => self.finish_flop(host),
        }
    }

    /// Switch the host back to the drawing area once speech is no longer
    /// wanted, e.g. after the card has been matched.
    pub fn cement(&mut self, host: &mut dyn CardHost) {
        if self.speak().is_none() {
            return;
        }
        self.switch_target(HostTarget::Drawing, host);
    }

    fn start_animation(&mut self, motion: Motion, host: &mut dyn CardHost) {
        let generation = self.animation.start(motion);
        tracing::debug!(card = %self.key, ?motion, "animation started");
        host.queue_draw(self.key);
        host.schedule_tick(
            self.style.step_interval(),
            TickToken {
                card: self.key,
                generation,
            },
        );
    }

    fn finish_flip(&mut self, host: &mut dyn CardHost) {
        self.animation.stop();
        self.flipped = true;
        tracing::debug!(card = %self.key, "flipped");
        host.queue_draw(self.key);
    }

    fn finish_flop(&mut self, host: &mut dyn CardHost) {
        self.animation.stop();
        let show_text = self.props.back_text.has_text();
        self.set_visibility(false, show_text);
        self.flipped = false;

        if self.id.can_speak() && self.speak().is_some() {
            self.switch_target(HostTarget::Drawing, host);
        }

        tracing::debug!(card = %self.key, "flopped");
        host.queue_draw(self.key);
    }

    fn speak_front(&mut self, host: &mut dyn CardHost) {
        if !self.id.can_speak() {
            return;
        }
        let Some(lang) = self.speak() else {
            return;
        };

        let spoke = match host.acquire_speaker() {
            Some(speaker) => {
                speaker.set_voice(lang);
                speaker.say(&self.props.front_text.card_text);
                true
            }
            None => false,
        };

        if spoke {
            tracing::debug!(card = %self.key, lang, "speaking front text");
            self.switch_target(HostTarget::SpeakingFace, host);
        }
    }

    fn switch_target(&mut self, target: HostTarget, host: &mut dyn CardHost) {
        self.target = target;
        host.switch_target(self.key, target);
    }

    fn set_visibility(&mut self, show_image: bool, show_text: bool) {
        if self.show_image != show_image || self.show_text != show_text {
            self.show_image = show_image;
            self.show_text = show_text;
            self.surfaces[Face::Front] = None;
        }
    }

    fn resolve_image(&self, image: CardImage, fit: bool) -> Option<CardImage> {
        let loaded = if fit {
            image.load_fitted(self.style.image_edge(self.size))
        } else {
            image.load()
        };
        match loaded {
            Ok(pixels) => Some(CardImage::Pixels(pixels)),
            Err(err) => {
                tracing::warn!(card = %self.key, error = %err, "dropping card image");
                None
            }
        }
    }

    // === Attribute setters ===

    /// Replace the front face's stroke and fill colors.
    pub fn set_border(&mut self, stroke: Color, fill: Color, host: &mut dyn CardHost) {
        let front = self.props.surface_mut(Face::Front);
        front.stroke_color = stroke;
        front.fill_color = fill;
        self.invalidate_front(host);
    }

    /// Replace the image, or remove it with `None`.
    ///
    /// Path images handed over after the first flip are decoded right away,
    /// unscaled.
    pub fn set_pixbuf(&mut self, image: Option<CardImage>, host: &mut dyn CardHost) {
        match image {
            None => {
                self.image = None;
                self.show_image = false;
            }
            Some(image) => {
                self.image = if self.flipped_once {
                    self.resolve_image(image, false)
                } else {
                    Some(image)
                };
                self.show_image = self.image.is_some();
            }
        }
        self.invalidate_front(host);
    }

    #[must_use]
    pub fn get_pixbuf(&self) -> Option<&CardImage> {
        self.image.as_ref()
    }

    /// Turn the highlight outline on or off.
    ///
    /// Hover highlights (`from_mouse`) are ignored once the card is flipped.
    pub fn set_highlight(&mut self, status: bool, from_mouse: bool, host: &mut dyn CardHost) {
        if self.flipped && from_mouse {
            return;
        }
        self.highlighted = status;
        host.queue_draw(self.key);
    }

    /// Change the font used for the front text.
    pub fn change_font(&mut self, font_name: impl Into<String>, host: &mut dyn CardHost) {
        self.layouts[Face::Front] = None;
        let key = LayoutKey::new(
            self.size,
            self.style.border_width(),
            self.props.front_text.card_text.as_str(),
        );
        self.layout_cache.borrow_mut().remove(&key);
        self.font_name = font_name.into();
        self.invalidate_front(host);
    }

    /// Change the color painted behind the card.
    pub fn set_background(&mut self, color: Color, host: &mut dyn CardHost) {
        self.background = color;
        host.queue_draw(self.key);
    }

    /// Replace the front text.
    pub fn change_text(&mut self, text: impl Into<String>, host: &mut dyn CardHost) {
        self.layouts[Face::Front] = None;
        self.props.front_text.card_text = text.into();
        if self.props.front_text.has_text() {
            self.show_text = true;
        }
        self.invalidate_front(host);
    }

    /// Front text.
    #[doc(alias = "get_text")]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.props.front_text.card_text
    }

    /// Set or clear the speech language of the front text.
    pub fn change_speak(&mut self, lang: Option<&str>, host: &mut dyn CardHost) {
        self.props.front_text.speak = lang.map(str::to_string);
        host.queue_draw(self.key);
    }

    /// Speech language of the front text; empty tags count as none.
    #[doc(alias = "get_speak")]
    #[must_use]
    pub fn speak(&self) -> Option<&str> {
        self.props
            .front_text
            .speak
            .as_deref()
            .filter(|lang| !lang.is_empty())
    }

    fn invalidate_front(&mut self, host: &mut dyn CardHost) {
        self.surfaces[Face::Front] = None;
        host.queue_draw(self.key);
    }

    // === Rendering ===

    /// Face visible right now, taking a running animation into account.
    #[must_use]
    pub fn visible_face(&self) -> Face {
        Face::for_flipped(self.flipped != self.animation.face_swapped())
    }

    /// Vertical transform of the current animation step.
    #[must_use]
    pub fn transform(&self) -> Transform {
        match self.animation.step() {
            Some(step) => {
                let scale = self.style.step_scales.get(step).copied().unwrap_or(1.0);
                Transform::vertical_squash(self.size, scale)
            }
            None => Transform::IDENTITY,
        }
    }

    /// The cached surface of `face`, rendering it first if needed.
    pub fn face_surface(&mut self, face: Face) -> &Surface {
        let surface = match self.surfaces[face].take() {
            Some(surface) => surface,
            None => self.render(face),
        };
        self.surfaces[face].insert(surface)
    }

    /// True if `face` has a cached surface.
    #[must_use]
    pub fn is_cached(&self, face: Face) -> bool {
        self.surfaces[face].is_some()
    }

    /// Paint the card onto `target` as it should look right now.
    pub fn paint(&mut self, target: &mut Surface) {
        let face = self.visible_face();
        let spec = CompositeSpec {
            background: self.background,
            transform: self.transform(),
            highlight: (self.highlighted && !self.animation.is_animating()).then(|| {
                (
                    self.style.highlight_color,
                    self.style.highlight_width,
                    self.style.radius(),
                )
            }),
        };
        let surface = self.face_surface(face);
        compose(target, surface, &spec);
    }

    /// Fitted layout of `face`'s text.
    pub fn text_layout(&mut self, face: Face) -> Rc<TextLayout> {
        if let Some(layout) = &self.layouts[face] {
            return Rc::clone(layout);
        }

        let fitter = TextFitter::new(self.shaper.as_ref(), self.style.border_width());
        let layout = fitter.fit_cached(
            &mut self.layout_cache.borrow_mut(),
            &self.props.text(face).card_text,
            self.size,
            &self.font_name,
        );
        self.layouts[face] = Some(Rc::clone(&layout));
        layout
    }

    fn render(&mut self, face: Face) -> Surface {
        let text_props = self.props.text(face);
        let wants_text = text_props.has_text() && (face == Face::Back || self.show_text);
        let text_color = text_props.text_color;
        let layout = wants_text.then(|| self.text_layout(face));

        let image = match (face, self.show_image) {
            (Face::Front, true) => self.image.as_ref().and_then(CardImage::pixels),
            _ => None,
        };

        tracing::trace!(card = %self.key, %face, "preparing face surface");
        render_face(&FaceSpec {
            size: self.size,
            style: &self.style,
            surface: self.props.surface(face),
            image: image.map(|pixels| &**pixels),
            text: layout.as_deref().map(|layout| (layout, text_color)),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn key(&self) -> CardKey {
        self.key
    }

    #[doc(alias = "get_id")]
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn flipped_once(&self) -> bool {
        self.flipped_once
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Animation step being shown, if animating.
    #[must_use]
    pub fn animation_step(&self) -> Option<usize> {
        self.animation.step()
    }

    #[must_use]
    pub fn shows_image(&self) -> bool {
        self.show_image
    }

    #[must_use]
    pub fn shows_text(&self) -> bool {
        self.show_text
    }

    #[must_use]
    pub fn phase(&self) -> CardPhase {
        match (self.flipped, self.animation.motion()) {
            (_, Some(Motion::Flip)) => CardPhase::FlippingToFront,
            (_, Some(Motion::Flop)) => CardPhase::FloppingToBack,
            (false, None) => CardPhase::BackIdle,
            (true, None) => CardPhase::FrontIdle,
        }
    }

    #[must_use]
    pub fn host_target(&self) -> HostTarget {
        self.target
    }

    #[must_use]
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    #[must_use]
    pub fn props(&self) -> &CardProps {
        &self.props
    }

    #[must_use]
    pub fn style(&self) -> &CardStyle {
        &self.style
    }
}
