//! Priority-ordered drawing.
//!
//! The scheduler only decides when and in which order drawables run. How the
//! pixels come out is up to the [`Canvas`] implementation the caller provides.

use garden_core::Position;
use std::collections::BTreeMap;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor` (clamped to `[0, 1]`)
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |channel: u8| (channel as f32 * factor) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Convert hue/saturation/brightness, each in `[0, 1]`, to RGB.
    /// Hue wraps around, so `1.25` is the same as `0.25`.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let channel = |value: f32| (value * 255.0 + 0.5) as u8;
        if saturation <= 0.0 {
            let v = channel(brightness);
            return Self::new(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::new(channel(r), channel(g), channel(b))
    }
}

/// Drawing surface supplied by the presentation layer
pub trait Canvas {
    fn fill_circle(&mut self, center: Position, radius: f32, color: Rgb);
    fn fill_polygon(&mut self, points: &[Position], color: Rgb);
    fn stroke_polyline(&mut self, points: &[Position], color: Rgb);
}

/// Anything that can paint itself onto a canvas
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Per-frame draw list bucketed by integer priority. Lower priorities are drawn
/// first, i.e. further back.
#[derive(Default)]
pub struct RenderScheduler<'a> {
    buckets: BTreeMap<i32, Vec<&'a dyn Drawable>>,
}

impl<'a> RenderScheduler<'a> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Queue `drawable` behind everything already queued at `priority`
    pub fn add(&mut self, drawable: &'a dyn Drawable, priority: i32) {
        self.buckets.entry(priority).or_default().push(drawable);
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Draw every queued drawable in ascending priority order and forget them.
    /// Returns how many were drawn.
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> usize {
        let mut drawn = 0;
        for (_, bucket) in std::mem::take(&mut self.buckets) {
            for drawable in bucket {
                drawable.draw(canvas);
                drawn += 1;
            }
        }
        drawn
    }
}
