//! Sprite images decoded to RGBA pixels for halfblock drawing.

use std::collections::HashMap;

use image::{imageops::FilterType, RgbaImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::DataSource;

/// Larger sprites are shrunk so neither side exceeds this many pixels.
pub const MAX_SPRITE_SIDE: u32 = 64;
const ALPHA_CUTOFF: u8 = 128;

/// Decoded sprite, cropped to its opaque pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA
    pub pixels: Vec<[u8; 4]>,
}

impl SpriteImage {
    /// RGB of the pixel at `(x, y)`, or `None` when it is transparent.
    pub fn opaque_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = *self.pixels.get((y * self.width + x) as usize)?;
        (a >= ALPHA_CUTOFF).then_some((r, g, b))
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteImage, String> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| err.to_string())?
        .to_rgba8();
    let (x, y, width, height) =
        opaque_bounds(&image).ok_or_else(|| "sprite has no visible pixels".to_string())?;
    let mut cropped = image::imageops::crop_imm(&image, x, y, width, height).to_image();

    let longest = width.max(height);
    if longest > MAX_SPRITE_SIDE {
        let scaled_w = (width * MAX_SPRITE_SIDE / longest).max(1);
        let scaled_h = (height * MAX_SPRITE_SIDE / longest).max(1);
        cropped = image::imageops::resize(&cropped, scaled_w, scaled_h, FilterType::Nearest);
    }

    Ok(SpriteImage {
        width: cropped.width(),
        height: cropped.height(),
        pixels: cropped.pixels().map(|pixel| pixel.0).collect(),
    })
}

/// Downloads and decodes the sprite at `url`.
pub async fn load_sprite(source: &dyn DataSource, url: &str) -> Result<SpriteImage, String> {
    let bytes = source
        .fetch_image(url)
        .await
        .map_err(|err| err.to_string())?;
    decode_sprite(&bytes)
}

/// Smallest `(x, y, width, height)` holding every opaque pixel.
fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] < ALPHA_CUTOFF {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Only network URLs are downloaded; the inline placeholder is not.
pub fn is_fetchable(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpriteSlot {
    Loading,
    Ready(SpriteImage),
    Missing,
}

/// Sprites by URL, kept across lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteCache {
    slots: HashMap<String, SpriteSlot>,
}

impl SpriteCache {
    pub fn get(&self, url: &str) -> Option<&SpriteSlot> {
        self.slots.get(url)
    }

    /// Marks `url` as loading; false when it is cached, in flight or unfetchable.
    pub fn request(&mut self, url: &str) -> bool {
        if !is_fetchable(url) || self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), SpriteSlot::Loading);
        true
    }

    pub fn insert(&mut self, url: String, sprite: SpriteImage) {
        self.slots.insert(url, SpriteSlot::Ready(sprite));
    }

    pub fn mark_missing(&mut self, url: String) {
        self.slots.insert(url, SpriteSlot::Missing);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
