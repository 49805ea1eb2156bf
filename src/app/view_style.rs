use ratatui::style::Color;

use crate::constants::PROGRESS_RAMP;

pub(super) fn percent_color(percent: u32) -> Color {
    if percent == 0 {
        return Color::DarkGray;
    }

    let step = 100 / PROGRESS_RAMP.len() as u32;
    let index = ((percent.min(100).saturating_sub(1)) / step) as usize;
    PROGRESS_RAMP[index.min(PROGRESS_RAMP.len() - 1)]
}

pub(super) fn progress_dot(completed: u32, total: u32) -> &'static str {
    if total > 0 && completed == total {
        "●"
    } else if completed > 0 {
        "◐"
    } else {
        "○"
    }
}
