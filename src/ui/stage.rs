//! Stage widget — lays the whole animated scene out from one engine
//! snapshot.  Which layout applies is decided by the engine's mode; the
//! stage never second-guesses the animation values it is handed.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::app::state::AppState;
use crate::core::mode::OperatingMode;
use crate::core::timeline::FrameSnapshot;
use crate::ui::card::{draw_box, BoxSpec, CardWidget};
use crate::ui::theme::Theme;

const TITLE: &str = "C A R D   R A I N";
const ACTIONS: &str = "[ enter the gallery ]";

pub struct StageWidget<'a> {
    pub state: &'a AppState,
    pub snapshot: &'a FrameSnapshot,
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 4 {
            return;
        }
        match self.state.timeline.mode() {
            Some(OperatingMode::MobileTrigger) => self.render_stacked(area, buf),
            _ => self.render_scene(area, buf),
        }
    }
}

impl StageWidget<'_> {
    /// Desktop / static layout: free-floating cards under a fading title.
    fn render_scene(&self, area: Rect, buf: &mut Buffer) {
        for (i, visual) in self.snapshot.cards.iter().enumerate() {
            let label = format!("card {}", i + 1);
            CardWidget {
                visual,
                index: i,
                label: &label,
            }
            .render(area, buf);
        }

        centered(
            buf,
            area,
            area.y + 1,
            TITLE,
            Theme::title_style(self.snapshot.title_opacity),
        );

        // Scroll hint while the region is still below the fold.
        if self.state.scroll_metrics().region_top_px > self.state.viewport.height_px * 0.25 {
            centered(
                buf,
                area,
                area.y + area.height / 2,
                "scroll down — the cards are waiting",
                Theme::hint_style(),
            );
        }

        if self.snapshot.actions_opacity > 0.01 {
            centered(
                buf,
                area,
                area.bottom().saturating_sub(2),
                ACTIONS,
                Theme::actions_style(self.snapshot.actions_opacity),
            );
        }
    }

    /// Mobile layout: a stacked column revealed by the entrance stagger the
    /// engine assigned when the trigger fired.
    fn render_stacked(&self, area: Rect, buf: &mut Buffer) {
        centered(buf, area, area.y + 1, TITLE, Theme::title_style(1.0));

        let (Some(cue), Some(started)) = (
            self.state.timeline.entrance_cue(),
            self.state.entrance_started,
        ) else {
            centered(
                buf,
                area,
                area.y + area.height / 2,
                "keep scrolling…",
                Theme::hint_style(),
            );
            return;
        };

        let elapsed = started.elapsed();
        let card_h: i32 = 3;
        let card_w = (i32::from(area.width) * 3 / 5).max(10);
        let left = i32::from(area.x) + (i32::from(area.width) - card_w) / 2;
        let mut top = i32::from(area.y) + 3;

        for (i, delay) in cue.delays.iter().enumerate() {
            if elapsed >= *delay {
                let label = format!("card {}", i + 1);
                draw_box(
                    buf,
                    area,
                    BoxSpec {
                        left,
                        top,
                        w: card_w,
                        h: card_h,
                        shear: 0.0,
                        silhouette: false,
                        blurred: false,
                        label: Some(&label),
                    },
                    Theme::card_style(i, 1.0),
                );
            }
            top += card_h;
        }

        if elapsed >= cue.actions_delay {
            centered(
                buf,
                area,
                area.bottom().saturating_sub(2),
                ACTIONS,
                Theme::actions_style(1.0),
            );
        }
    }
}

/// Write a centered line, clipped to the area.
fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    let len = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(len) / 2;
    let max = usize::from(area.right().saturating_sub(x));
    let clipped: String = text.chars().take(max).collect();
    buf.set_string(x, y, clipped, style);
}
