use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::domain::{Chapter, percent};

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let left_title = if self.search_active {
            Line::from(Span::styled(
                format!("/{}", self.search_query),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
        } else if !self.search_query.is_empty() {
            Line::from(Span::styled(
                format!("/{}", self.search_query),
                Style::default().fg(Color::Gray),
            ))
        } else {
            Line::from(Span::styled("tilawa", Style::default().fg(Color::White)))
        }
        .alignment(Alignment::Left);

        let visible = self.visible_chapters();
        let total = self.tracker.catalog().len();
        let center_label = if visible.len() == total {
            format!("{} chapters", total)
        } else {
            format!("{}/{} chapters", visible.len(), total)
        };
        let center_title = Line::from(Span::styled(
            center_label,
            Style::default().fg(Color::White),
        ))
        .alignment(Alignment::Center);

        let overall_percent = self.tracker.statistics().overall_percent;
        let right_title = Line::from(Span::styled(
            format!("{}%", overall_percent),
            Style::default().fg(view_style::percent_color(overall_percent)),
        ))
        .alignment(Alignment::Right);

        let hints = if self.search_active {
            "esc clear · enter done"
        } else {
            "enter edit · / search · s stats · q quit"
        };
        let bottom_title = Line::from(Span::styled(hints, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(left_title)
            .title(center_title)
            .title(right_title)
            .title_bottom(bottom_title)
            .border_style(Style::default().fg(Color::White));

        if let Some(error) = self.catalog_error.clone() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Failed to load the chapter list.",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error, Style::default().fg(Color::Gray))),
                Line::from(""),
                Line::from(Span::styled(
                    "Check your internet connection and relaunch.",
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    "Saved progress is untouched.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(paragraph, size);
        } else if visible.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No chapters found.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(paragraph, size);
        } else {
            let items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(i, chapter)| self.chapter_row(chapter, i == self.selected_index))
                .collect();

            let mut list_state = ListState::default();
            list_state.select(Some(self.selected_index));

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default());
            f.render_stateful_widget(list, size, &mut list_state);
        }

        if self.in_progress_modal() {
            self.render_progress_modal(f, size);
        } else if self.in_stats_modal() {
            self.render_stats_modal(f, size);
        }
    }

    fn chapter_row(&self, chapter: &Chapter, is_selected: bool) -> ListItem<'static> {
        let record = self.tracker.progress(chapter.number);
        let pct = percent(record.completed_verses, chapter.verse_count);
        let dot_color = view_style::percent_color(pct);
        let dot = view_style::progress_dot(record.completed_verses, chapter.verse_count);

        let text_color = if is_selected {
            Color::Black
        } else {
            Color::White
        };
        let detail_color = if is_selected { Color::Black } else { Color::Gray };

        let row = Line::from(vec![
            Span::raw(format!("{} ", dot)).fg(dot_color),
            Span::raw(format!("{:>3}. ", chapter.number)).fg(text_color),
            Span::raw(format!(
                "{:<24}",
                ui_helpers::truncate_label(&chapter.english_name, 24)
            ))
            .fg(text_color),
            Span::raw(format!(
                "{:>9} ",
                ui_helpers::format_verse_fraction(record.completed_verses, chapter.verse_count)
            ))
            .fg(text_color),
            Span::styled(format!("{:>4}%", pct), Style::default().fg(dot_color)),
            Span::styled(
                format!("  {}", chapter.name),
                Style::default()
                    .fg(detail_color)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);

        if is_selected {
            ListItem::new(row).style(Style::default().fg(Color::Black).bg(Color::White))
        } else {
            ListItem::new(row)
        }
    }
}
