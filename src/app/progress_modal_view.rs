use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::domain::percent;

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_progress_modal(&self, f: &mut Frame, terminal_size: Rect) {
        let Some(chapter) = self.tracker.chapter(self.modal_chapter) else {
            return;
        };

        let modal_rect = self.modal_rect(terminal_size);
        let pct = percent(self.modal_completed, chapter.verse_count);
        let bar_color = view_style::percent_color(pct);

        let left_title = Line::from(Span::styled(
            chapter.english_name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Left);

        let center_title = Line::from(Span::styled(
            chapter.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);

        let right_title = Line::from(Span::styled(
            format!("{} verses", chapter.verse_count),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right);

        let bottom_title = Line::from(Span::styled(
            "←/→ adjust · shift ±10 · tab all · del reset · enter save · esc cancel",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(left_title)
            .title(center_title)
            .title(right_title)
            .title_bottom(bottom_title)
            .border_style(Style::default().fg(bar_color));

        let inner_width = modal_rect.width.saturating_sub(4) as usize;
        let filled = if chapter.verse_count == 0 {
            0
        } else {
            (inner_width * self.modal_completed as usize) / chapter.verse_count as usize
        };
        let bar = Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(bar_color)),
            Span::styled(
                "░".repeat(inner_width.saturating_sub(filled)),
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);

        let count_line = Line::from(Span::styled(
            format!(
                "{} ({}%)",
                ui_helpers::format_verse_fraction(self.modal_completed, chapter.verse_count),
                pct
            ),
            Style::default().fg(Color::White),
        ))
        .alignment(Alignment::Center);

        let translation_line = Line::from(Span::styled(
            format!(
                "{} · {}",
                chapter.english_name_translation, chapter.revelation_type
            ),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center);

        let notes_label = Line::from(Span::styled(
            "Notes",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        let notes_body = Line::from(Span::styled(
            format!("{}▏", self.modal_notes),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::ITALIC),
        ));

        let lines = vec![
            Line::from(""),
            translation_line,
            Line::from(""),
            bar,
            count_line,
            Line::from(""),
            notes_label,
            notes_body,
        ];

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block);

        f.render_widget(Clear, modal_rect);
        f.render_widget(paragraph, modal_rect);
    }
}
