use image::{Rgba, RgbaImage};

use super::{encode_png, rounded_rect_contains, Typeface};
use crate::domain::{ports::outbound::InfoRenderer, CardError, ContactRecord};

const BORDER_INSET: u32 = 15;
const BORDER_THICKNESS: u32 = 4;
const BORDER_RADIUS: u32 = 28;
const ELLIPSIS: &str = "...";

pub const MIN_CANVAS_WIDTH: u32 = 200;
pub const MIN_CANVAS_HEIGHT: u32 = 120;
pub const MAX_CANVAS_SIDE: u32 = 4000;

// Text metrics for the inside of the border on a 700x400 card. Other
// canvases scale these by the tighter of the two axes.
const REFERENCE_CONTENT_WIDTH: f32 = 662.0;
const REFERENCE_CONTENT_HEIGHT: f32 = 362.0;
const LEFT_MARGIN: f32 = 31.0;
const NAME_TOP: f32 = 26.0;
const NAME_PX: f32 = 40.0;
const BODY_TOP: f32 = 101.0;
const BODY_PX: f32 = 24.0;
const LINE_PITCH: f32 = 45.0;
const LABEL_GAP: f32 = 10.0;

const GRADIENT_TOP: [u8; 3] = [250, 251, 255];
const GRADIENT_BOTTOM: [u8; 3] = [214, 226, 245];
const BORDER_COLOR: Rgba<u8> = Rgba([40, 70, 140, 255]);
const NAME_COLOR: Rgba<u8> = Rgba([20, 30, 60, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([30, 90, 170, 255]);
const VALUE_COLOR: Rgba<u8> = Rgba([50, 50, 50, 255]);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "card canvas {width}x{height} is out of range (min {}x{}, max side {})",
    MIN_CANVAS_WIDTH,
    MIN_CANVAS_HEIGHT,
    MAX_CANVAS_SIDE
)]
pub struct CanvasError {
    width: u32,
    height: u32,
}

/// Pixel size of the rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCanvas {
    width: u32,
    height: u32,
}

impl CardCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let in_range = (MIN_CANVAS_WIDTH..=MAX_CANVAS_SIDE).contains(&width)
            && (MIN_CANVAS_HEIGHT..=MAX_CANVAS_SIDE).contains(&height);
        if !in_range {
            return Err(CanvasError { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for CardCanvas {
    fn default() -> Self {
        Self {
            width: 700,
            height: 400,
        }
    }
}

/// Text positions and sizes for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    left: i32,
    right: i32,
    name_top: i32,
    name_px: f32,
    body_top: i32,
    body_px: f32,
    line_pitch: i32,
    label_gap: i32,
}

impl Layout {
    fn for_canvas(canvas: CardCanvas) -> Self {
        let inner = (BORDER_INSET + BORDER_THICKNESS) as f32;
        let content_width = canvas.width as f32 - 2.0 * inner;
        let content_height = canvas.height as f32 - 2.0 * inner;
        let scale = (content_width / REFERENCE_CONTENT_WIDTH)
            .min(content_height / REFERENCE_CONTENT_HEIGHT);

        let left = (inner + LEFT_MARGIN * scale).round() as i32;
        Self {
            left,
            right: canvas.width as i32 - left,
            name_top: (inner + NAME_TOP * scale).round() as i32,
            name_px: NAME_PX * scale,
            body_top: (inner + BODY_TOP * scale).round() as i32,
            body_px: BODY_PX * scale,
            line_pitch: (LINE_PITCH * scale).round() as i32,
            label_gap: (LABEL_GAP * scale).round() as i32,
        }
    }
}

/// One labelled body line on the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub value: String,
}

impl CardLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

}

/// The body lines for `record`, top to bottom. Absent fields have no line.
pub fn card_lines(record: &ContactRecord) -> Vec<CardLine> {
    let mut lines = Vec::with_capacity(5);

    if let Some(job_title) = record.job_title() {
        lines.push(CardLine::new("Job Title:", job_title));
    }
    if let Some(company) = record.company() {
        lines.push(CardLine::new("Company:", company));
    }
    lines.push(CardLine::new("Phone:", record.phone()));
    lines.push(CardLine::new("Email:", record.email().as_str()));
    if let Some(website) = record.website() {
        lines.push(CardLine::new("Website:", website.as_str()));
    }

    lines
}

/// Draws contact records as a bordered business card.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    canvas: CardCanvas,
    layout: Layout,
    typeface: Typeface,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(CardCanvas::default(), Typeface::default())
    }
}

impl CardRenderer {
    pub fn new(canvas: CardCanvas, typeface: Typeface) -> Self {
        Self {
            canvas,
            layout: Layout::for_canvas(canvas),
            typeface,
        }
    }

    fn draw(&self, record: &ContactRecord) -> RgbaImage {
        let mut image = RgbaImage::new(self.canvas.width(), self.canvas.height());
        fill_gradient(&mut image);
        draw_border(&mut image);

        let Layout {
            left,
            right,
            name_top,
            name_px,
            body_top,
            body_px,
            line_pitch,
            label_gap,
        } = self.layout;

        let name = self.fit(record.full_name(), name_px, right - left);
        self.typeface
            .draw(&mut image, name_px, left, name_top, NAME_COLOR, &name);

        for (i, line) in card_lines(record).iter().enumerate() {
            let y = body_top + i as i32 * line_pitch;

            let label = self.fit(line.label, body_px, right - left);
            self.typeface
                .draw(&mut image, body_px, left, y, LABEL_COLOR, &label);

            let label_width = self.typeface.text_width(body_px, &label) as i32;
            let value_x = left + label_width + label_gap;
            let value = self.fit(&line.value, body_px, right - value_x);
            self.typeface
                .draw(&mut image, body_px, value_x, y, VALUE_COLOR, &value);
        }

        image
    }

    /// Truncates `text` with an ellipsis so it is at most `max_width` wide.
    ///
    /// Binary searches the longest fitting prefix, so the cost is
    /// `O(n log n)` in the length of `text`.
    fn fit(&self, text: &str, px: f32, max_width: i32) -> String {
        let max_width = max_width.max(0) as u32;
        if self.typeface.text_width(px, text) <= max_width {
            return text.to_string();
        }

        let truncated = |end: usize| format!("{}{ELLIPSIS}", &text[..end]);
        let fits = |end: usize| self.typeface.text_width(px, &truncated(end)) <= max_width;

        // ends[k] is the byte offset just past the first k chars.
        let ends: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        if !fits(0) {
            return String::new();
        }

        // fits(ends[lo]) holds; a prefix of `hi` chars (or the whole text) does not.
        let (mut lo, mut hi) = (0, ends.len());
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(ends[mid]) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        truncated(ends[lo])
    }
}

impl InfoRenderer for CardRenderer {
    fn render(&self, record: &ContactRecord) -> Result<Vec<u8>, CardError> {
        encode_png(self.draw(record)).map_err(|err| CardError::Render(err.to_string()))
    }
}

fn fill_gradient(image: &mut RgbaImage) {
    let height = image.height().max(2) - 1;
    for (_, y, pixel) in image.enumerate_pixels_mut() {
        let t = y as f32 / height as f32;
        let mut rgba = [255u8; 4];
        for c in 0..3 {
            let (top, bottom) = (GRADIENT_TOP[c] as f32, GRADIENT_BOTTOM[c] as f32);
            rgba[c] = (top + (bottom - top) * t).round() as u8;
        }
        *pixel = Rgba(rgba);
    }
}

fn draw_border(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let min_side = 2 * (BORDER_INSET + BORDER_THICKNESS);
    if width <= min_side || height <= min_side {
        return;
    }

    let outer_w = (width - 2 * BORDER_INSET) as i32;
    let outer_h = (height - 2 * BORDER_INSET) as i32;
    let t = BORDER_THICKNESS as i32;
    let r = BORDER_RADIUS as i32;

    for y in 0..outer_h {
        for x in 0..outer_w {
            let outer = rounded_rect_contains(x, y, outer_w, outer_h, r);
            let inner =
                rounded_rect_contains(x - t, y - t, outer_w - 2 * t, outer_h - 2 * t, r - t);
            if outer && !inner {
                image.put_pixel(x as u32 + BORDER_INSET, y as u32 + BORDER_INSET, BORDER_COLOR);
            }
        }
    }
}
