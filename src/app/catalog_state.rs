use crate::domain::Chapter;

use super::{App, UiMode};

impl App {
    pub(super) fn visible_chapters(&self) -> Vec<&Chapter> {
        self.tracker.search(&self.search_query)
    }

    pub(super) fn visible_count(&self) -> usize {
        self.visible_chapters().len()
    }

    pub(super) fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub(super) fn selected_chapter_number(&self) -> Option<u32> {
        self.visible_chapters()
            .get(self.selected_index)
            .map(|chapter| chapter.number)
    }

    pub(super) fn open_progress_modal(&mut self) {
        let Some(number) = self.selected_chapter_number() else {
            return;
        };

        let record = self.tracker.progress(number);
        self.modal_chapter = number;
        self.modal_completed = record.completed_verses;
        self.modal_notes = record.notes;
        self.ui_mode = UiMode::ProgressModal;
        self.render_needed = true;
    }

    pub(super) fn adjust_modal_completed(&mut self, delta: i64) {
        let Some(chapter) = self.tracker.chapter(self.modal_chapter) else {
            return;
        };

        let adjusted = (self.modal_completed as i64 + delta).clamp(0, chapter.verse_count as i64);
        self.modal_completed = adjusted as u32;
        self.render_needed = true;
    }

    pub(super) fn fill_modal_completed(&mut self) {
        if let Some(chapter) = self.tracker.chapter(self.modal_chapter) {
            self.modal_completed = chapter.verse_count;
            self.render_needed = true;
        }
    }

    pub(super) fn save_modal_progress(&mut self) {
        // The adjuster saturates at the chapter bound; a rejection can only
        // mean the catalog changed under us, and the edit is dropped.
        let _ = self.tracker.set_progress(
            self.modal_chapter,
            self.modal_completed,
            self.modal_notes.clone(),
        );
    }

    pub(super) fn reset_modal_progress(&mut self) {
        self.tracker.clear_progress(self.modal_chapter);
    }
}
