use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState},
};

use crate::domain::ChapterProgress;

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_stats_modal(&self, f: &mut Frame, terminal_size: Rect) {
        let stats = self.tracker.statistics();
        let modal_rect = self.stats_modal_rect(terminal_size, stats.chapters_with_progress.len());

        let center_title = Line::from(Span::styled(
            "statistics",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);

        let right_title = Line::from(Span::styled(
            format!("{}%", stats.overall_percent),
            Style::default().fg(view_style::percent_color(stats.overall_percent)),
        ))
        .alignment(Alignment::Right);

        let bottom_title = Line::from(Span::styled(
            "↑/↓ browse · esc close",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(center_title)
            .title(right_title)
            .title_bottom(bottom_title)
            .border_style(Style::default().fg(Color::White));

        let stat_row = |label: &str, value: String| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<14}", label)).fg(Color::Gray),
                Span::raw(value).fg(Color::White),
            ]))
        };

        let mut items: Vec<ListItem> = vec![
            stat_row("Completed", stats.completed_count.to_string()),
            stat_row("In Progress", stats.in_progress_count.to_string()),
            stat_row("Verses Read", stats.total_verses_read.to_string()),
            stat_row("Overall", format!("{}%", stats.overall_percent)),
            ListItem::new(Line::from("")),
        ];

        if stats.chapters_with_progress.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "No progress yet. Start reading to track your progress!",
                Style::default().fg(Color::Gray),
            ))));
        } else {
            items.push(ListItem::new(Line::from(Span::styled(
                "Recently read",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))));
            for (i, entry) in stats.chapters_with_progress.iter().enumerate() {
                items.push(self.progress_entry_row(entry, i == self.stats_selected_index));
            }
        }

        let header_rows = 6;
        let mut list_state = ListState::default();
        if !stats.chapters_with_progress.is_empty() {
            list_state.select(Some(header_rows + self.stats_selected_index));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default());

        f.render_widget(Clear, modal_rect);
        f.render_stateful_widget(list, modal_rect, &mut list_state);
    }

    fn progress_entry_row(&self, entry: &ChapterProgress, is_selected: bool) -> ListItem<'static> {
        let pct = entry.percent();
        let dot_color = view_style::percent_color(pct);
        let dot = view_style::progress_dot(
            entry.record.completed_verses,
            entry.chapter.verse_count,
        );
        let text_color = if is_selected {
            Color::Black
        } else {
            Color::White
        };
        let detail_color = if is_selected { Color::Black } else { Color::Gray };

        let mut spans = vec![
            Span::raw(format!("{} ", dot)).fg(dot_color),
            Span::raw(format!("{:>3}. ", entry.chapter.number)).fg(text_color),
            Span::raw(format!(
                "{:<20}",
                ui_helpers::truncate_label(&entry.chapter.english_name, 20)
            ))
            .fg(text_color),
            Span::raw(format!(
                "{:>9} ",
                ui_helpers::format_verse_fraction(
                    entry.record.completed_verses,
                    entry.chapter.verse_count
                )
            ))
            .fg(text_color),
            Span::styled(format!("{:>4}%", pct), Style::default().fg(dot_color)),
            Span::styled(
                format!(
                    " · {}",
                    ui_helpers::format_updated_label(entry.record.updated_at)
                ),
                Style::default().fg(detail_color),
            ),
        ];

        if !entry.record.notes.is_empty() {
            spans.push(Span::styled(
                format!(
                    "  {}",
                    ui_helpers::truncate_label(&entry.record.notes, 32)
                ),
                Style::default()
                    .fg(detail_color)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        let row = ListItem::new(Line::from(spans));
        if is_selected {
            row.style(Style::default().fg(Color::Black).bg(Color::White))
        } else {
            row
        }
    }
}
