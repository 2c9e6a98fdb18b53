//! Card rasterizer built on the `image` crate.
//!
//! Draws the card background, a translucent header strip and one bar per
//! answer, then encodes to PNG. No text is drawn; the orientation travels in
//! the embedded payload.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use super::{CardRequest, Rasterizer};
use crate::questionnaire::MAX_ANSWER;

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 675;

const BACKGROUND: Rgb<u8> = Rgb([0x0b, 0x12, 0x20]);
const ACCENT: Rgb<u8> = Rgb([103, 163, 255]);
const HEADER_ALPHA: f32 = 0.18;
const TRACK: Rgb<u8> = Rgb([0x1c, 0x27, 0x3d]);

/// Rect in reference (1200x675) coordinates
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

const HEADER: Rect = Rect { x: 50, y: 50, w: 1100, h: 120 };
const BARS_TOP: u32 = 210;
const BAR_HEIGHT: u32 = 26;
const BAR_GAP: u32 = 14;

fn blend(under: Rgb<u8>, over: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - alpha) + b as f32 * alpha).round() as u8;
    Rgb([mix(under[0], over[0]), mix(under[1], over[1]), mix(under[2], over[2])])
}

#[derive(Debug, Clone, Copy)]
pub struct CardRasterizer {
    pub width: u32,
    pub height: u32,
}

impl Default for CardRasterizer {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl CardRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale a reference-space rect onto the actual canvas
    fn scale(&self, rect: Rect) -> Rect {
        let sx = |v: u32| (v as u64 * self.width as u64 / DEFAULT_WIDTH as u64) as u32;
        let sy = |v: u32| (v as u64 * self.height as u64 / DEFAULT_HEIGHT as u64) as u32;
        Rect {
            x: sx(rect.x),
            y: sy(rect.y),
            w: sx(rect.w),
            h: sy(rect.h),
        }
    }

    fn fill(canvas: &mut RgbImage, rect: Rect, paint: impl Fn(Rgb<u8>) -> Rgb<u8>) {
        let x_end = (rect.x + rect.w).min(canvas.width());
        let y_end = (rect.y + rect.h).min(canvas.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                let pixel = canvas.get_pixel_mut(x, y);
                *pixel = paint(*pixel);
            }
        }
    }

    pub fn draw(&self, request: &CardRequest) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        Self::fill(&mut canvas, self.scale(HEADER), |under| blend(under, ACCENT, HEADER_ALPHA));

        for (row, answer) in request.answers.iter().enumerate() {
            let top = BARS_TOP + row as u32 * (BAR_HEIGHT + BAR_GAP);
            let track = self.scale(Rect { x: HEADER.x, y: top, w: HEADER.w, h: BAR_HEIGHT });
            Self::fill(&mut canvas, track, |_| TRACK);

            let filled = Rect {
                w: track.w * answer as u32 / MAX_ANSWER as u32,
                ..track
            };
            let alpha = 0.35 + 0.65 * answer as f32 / MAX_ANSWER as f32;
            Self::fill(&mut canvas, filled, |under| blend(under, ACCENT, alpha));
        }

        canvas
    }
}

impl Rasterizer for CardRasterizer {
    fn rasterize(&self, request: &CardRequest) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(self.draw(request))
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .context("Failed to encode card as PNG")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::container::is_container;
    use crate::questionnaire::AnswerSet;

    fn request(values: [i64; 10]) -> CardRequest {
        let answers = AnswerSet::from_values(&values);
        let analysis = classify(&answers);
        CardRequest {
            orientation: analysis.orientation,
            answers,
        }
    }

    #[test]
    fn test_card_layout() {
        let card = CardRasterizer::default().draw(&request([10, 1, 5, 5, 5, 5, 5, 5, 5, 5]));
        assert_eq!(card.dimensions(), (1200, 675));
        assert_eq!(*card.get_pixel(5, 5), BACKGROUND);
        assert_eq!(*card.get_pixel(60, 60), blend(BACKGROUND, ACCENT, HEADER_ALPHA));

        // First bar is full width, second is a tenth
        let first_row = BARS_TOP + 1;
        let second_row = BARS_TOP + BAR_HEIGHT + BAR_GAP + 1;
        assert_eq!(*card.get_pixel(1140, first_row), ACCENT);
        assert_eq!(*card.get_pixel(1140, second_row), TRACK);
        assert_ne!(*card.get_pixel(60, second_row), TRACK);
    }

    #[test]
    fn test_rasterize_produces_png() {
        let bytes = CardRasterizer::new(320, 180)
            .rasterize(&request([5; 10]))
            .unwrap();
        assert!(is_container(&bytes));
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(image::GenericImageView::dimensions(&decoded), (320, 180));
    }
}
