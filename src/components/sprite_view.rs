use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};

use super::theme::TEXT_DIM;
use crate::sprite::{SpriteCache, SpriteImage, SpriteSlot};

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';

/// Draws a sprite with two pixels per cell, centered in its area.
pub struct HalfBlockSprite<'a> {
    sprite: &'a SpriteImage,
}

impl<'a> HalfBlockSprite<'a> {
    pub fn new(sprite: &'a SpriteImage) -> Self {
        Self { sprite }
    }
}

/// Largest `(cols, rows)` that fits the area and keeps the aspect ratio.
/// Each cell holds one pixel column and two pixel rows.
pub fn sprite_fit(sprite: &SpriteImage, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.width == 0 || sprite.height == 0 {
        return (0, 0);
    }
    let scale = (max_cols as f32 / sprite.width as f32)
        .min(max_rows as f32 * 2.0 / sprite.height as f32);
    let cols = ((sprite.width as f32 * scale).floor() as u16).clamp(1, max_cols);
    let pixel_rows = ((sprite.height as f32 * scale).floor() as u16).max(1);
    let rows = pixel_rows.div_ceil(2).clamp(1, max_rows);
    (cols, rows)
}

impl Widget for HalfBlockSprite<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = sprite_fit(self.sprite, area.width, area.height);
        if cols == 0 || rows == 0 {
            return;
        }
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;
        let pixel_rows = u32::from(rows) * 2;

        let sample = |col: u16, pixel_row: u32| {
            let x = u32::from(col) * self.sprite.width / u32::from(cols);
            let y = pixel_row * self.sprite.height / pixel_rows;
            self.sprite
                .opaque_rgb(x, y)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
        };

        for row in 0..rows {
            for col in 0..cols {
                let upper = sample(col, u32::from(row) * 2);
                let lower = sample(col, u32::from(row) * 2 + 1);
                let Some(cell) = buf.cell_mut((left + col, top + row)) else {
                    continue;
                };
                match (upper, lower) {
                    (None, None) => {}
                    (Some(upper), None) => {
                        cell.set_char(UPPER_HALF).set_fg(upper);
                    }
                    (None, Some(lower)) => {
                        cell.set_char(LOWER_HALF).set_fg(lower);
                    }
                    (Some(upper), Some(lower)) => {
                        cell.set_char(UPPER_HALF).set_fg(upper).set_bg(lower);
                    }
                }
            }
        }
    }
}

/// The sprite at `url`, or a bracketed placeholder while it loads or when
/// there is none.
pub fn render_sprite(frame: &mut Frame, area: Rect, sprites: &SpriteCache, url: Option<&str>) {
    let placeholder = match url.and_then(|url| sprites.get(url)) {
        Some(SpriteSlot::Ready(sprite)) => {
            frame.render_widget(HalfBlockSprite::new(sprite), area);
            return;
        }
        Some(SpriteSlot::Loading) => "[loading sprite]",
        Some(SpriteSlot::Missing) | None => "[no sprite]",
    };
    let top = area.height.saturating_sub(1) / 2;
    let line_area = Rect {
        y: area.y + top,
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(TEXT_DIM)),
        line_area,
    );
}
