use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.in_progress_modal() {
            self.handle_progress_modal_key(key);
            false
        } else if self.in_stats_modal() {
            self.handle_stats_modal_key(key);
            false
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        if self.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    self.search_active = false;
                    self.clamp_selection();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                }
                KeyCode::Up => self.move_selection_up(),
                KeyCode::Down => self.move_selection_down(),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    self.clamp_selection();
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    self.clamp_selection();
                }
                _ => {}
            }
            self.render_needed = true;
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => {
                self.search_active = true;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.open_stats_modal();
            }
            KeyCode::Enter => {
                self.open_progress_modal();
            }
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.clamp_selection();
                }
            }
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            _ => {}
        }

        self.render_needed = true;
        false
    }

    fn handle_progress_modal_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let step = if shift { 10 } else { 1 };

        match key.code {
            KeyCode::Esc => self.close_progress_modal(),
            KeyCode::Enter => {
                self.save_modal_progress();
                self.close_progress_modal();
            }
            KeyCode::Left => self.adjust_modal_completed(-step),
            KeyCode::Right => self.adjust_modal_completed(step),
            KeyCode::Tab => self.fill_modal_completed(),
            KeyCode::Delete => {
                self.reset_modal_progress();
                self.close_progress_modal();
            }
            KeyCode::Char(c) => {
                self.modal_notes.push(c);
            }
            KeyCode::Backspace => {
                self.modal_notes.pop();
            }
            _ => {}
        }

        self.render_needed = true;
    }

    fn handle_stats_modal_key(&mut self, key: KeyEvent) {
        let entry_count = self.tracker.statistics().chapters_with_progress.len();

        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.close_stats_modal(),
            KeyCode::Up => {
                if entry_count > 0 {
                    self.stats_selected_index =
                        ui_helpers::wrap_prev_index(self.stats_selected_index, entry_count);
                }
            }
            KeyCode::Down => {
                if entry_count > 0 {
                    self.stats_selected_index =
                        ui_helpers::wrap_next_index(self.stats_selected_index, entry_count);
                }
            }
            _ => {}
        }

        self.render_needed = true;
    }

    fn move_selection_up(&mut self) {
        let count = self.visible_count();
        if count > 0 {
            self.selected_index = ui_helpers::wrap_prev_index(self.selected_index, count);
        }
    }

    fn move_selection_down(&mut self) {
        let count = self.visible_count();
        if count > 0 {
            self.selected_index = ui_helpers::wrap_next_index(self.selected_index, count);
        }
    }
}
