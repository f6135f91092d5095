//! Card widget — projects one card's visual state onto the stage.
//!
//! Transform units arrive as viewport percentages (vw/vh); the widget maps
//! them onto the stage rectangle cell by cell, clipping anything that hangs
//! outside — drop-mode cards spend their first frames far above the stage.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::visual::CardVisual;
use crate::ui::theme::Theme;

/// Terminal cells are roughly twice as tall as wide; used to turn a tilt
/// into a per-row column shear.
const CELL_ASPECT: f64 = 2.0;

/// Shadow pixel offsets map to rows at this many px per row.
const PX_PER_ROW: f64 = 10.0;

/// One animated card.
pub struct CardWidget<'a> {
    pub visual: &'a CardVisual,
    pub index: usize,
    pub label: &'a str,
}

impl Widget for CardWidget<'_> {
    fn render(self, stage: Rect, buf: &mut Buffer) {
        let v = self.visual;
        if v.opacity < 0.01 || stage.width < 8 || stage.height < 4 {
            return;
        }

        // Base footprint scales with the stage, then with the card's own
        // scale transform.
        let base_w = (f64::from(stage.width) * 0.22).clamp(8.0, 30.0);
        let base_h = (f64::from(stage.height) * 0.24).clamp(3.0, 9.0);
        let w = (base_w * v.scale).round() as i32;
        let h = (base_h * v.scale).round() as i32;
        if w < 4 || h < 3 {
            return;
        }

        // Resting anchor sits slightly below the stage centre; translations
        // are percentages of the stage.
        let cx = f64::from(stage.x) + f64::from(stage.width) * (0.5 + v.translate_x_vw / 100.0);
        let cy = f64::from(stage.y) + f64::from(stage.height) * (0.55 + v.translate_y_vh / 100.0);
        let left = (cx - f64::from(w) / 2.0).round() as i32;
        let top = (cy - f64::from(h) / 2.0).round() as i32;

        // Small tilts render as a shear: columns shifted per row.
        let shear = v.rotation_deg.to_radians().tan() * CELL_ASPECT;

        // Shadow silhouette first, face on top.  The silhouette strength
        // follows the card's own opacity so hidden cards cast nothing.
        let shadow_dy = (v.shadow.offset_y_px / PX_PER_ROW).round() as i32;
        draw_box(
            buf,
            stage,
            BoxSpec {
                left: left + 1,
                top: top + shadow_dy,
                w,
                h,
                shear,
                silhouette: true,
                blurred: false,
                label: None,
            },
            Theme::shadow_style(v.shadow.alpha * v.opacity),
        );
        draw_box(
            buf,
            stage,
            BoxSpec {
                left,
                top,
                w,
                h,
                shear,
                silhouette: false,
                blurred: v.blur_px.is_some(),
                label: Some(self.label),
            },
            Theme::card_style(self.index, v.opacity),
        );
    }
}

/// Geometry and fill options for one sheared box.
pub struct BoxSpec<'a> {
    pub left: i32,
    pub top: i32,
    pub w: i32,
    pub h: i32,
    pub shear: f64,
    /// Solid `░` block instead of a bordered face (used for shadows).
    pub silhouette: bool,
    /// Fill the interior with a defocus dither instead of the label.
    pub blurred: bool,
    pub label: Option<&'a str>,
}

/// Draw a bordered (or silhouette) box, sheared row by row and clipped to
/// `stage`.  Shared by the card widget and the stacked mobile layout.
pub fn draw_box(buf: &mut Buffer, stage: Rect, spec: BoxSpec<'_>, style: Style) {
    let BoxSpec {
        left,
        top,
        w,
        h,
        shear,
        silhouette,
        blurred,
        label,
    } = spec;

    let mid_row = h / 2;
    for row in 0..h {
        let dx = ((f64::from(row) - f64::from(h - 1) / 2.0) * shear).round() as i32;
        let y = top + row;
        for col in 0..w {
            let x = left + dx + col;
            let symbol = if silhouette {
                "░"
            } else {
                box_symbol(row, col, w, h, blurred)
            };
            put(buf, stage, x, y, symbol, style);
        }

        // Label centered on the middle row, over the interior.
        if let Some(text) = label {
            if row == mid_row && !blurred && !silhouette {
                let len = text.chars().count() as i32;
                let start = left + dx + (w - len) / 2;
                for (i, ch) in text.chars().enumerate() {
                    put(buf, stage, start + i as i32, y, &ch.to_string(), style);
                }
            }
        }
    }
}

fn box_symbol(row: i32, col: i32, w: i32, h: i32, blurred: bool) -> &'static str {
    let top = row == 0;
    let bottom = row == h - 1;
    let leftmost = col == 0;
    let rightmost = col == w - 1;
    match (top, bottom, leftmost, rightmost) {
        (true, _, true, _) => "┌",
        (true, _, _, true) => "┐",
        (_, true, true, _) => "└",
        (_, true, _, true) => "┘",
        (true, ..) | (_, true, ..) => "─",
        (_, _, true, _) | (_, _, _, true) => "│",
        _ => {
            if blurred {
                "▒"
            } else {
                " "
            }
        }
    }
}

/// Write one symbol if it falls inside the stage.
fn put(buf: &mut Buffer, stage: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < i32::from(stage.x)
        || y < i32::from(stage.y)
        || x >= i32::from(stage.right())
        || y >= i32::from(stage.bottom())
    {
        return;
    }
    buf.set_string(x as u16, y as u16, symbol, style);
}
