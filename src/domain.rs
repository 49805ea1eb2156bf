use std::{collections::HashMap, path::PathBuf};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    #[serde(rename = "numberOfAyahs")]
    pub verse_count: u32,
    pub revelation_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(rename = "completed")]
    pub completed_verses: u32,
    pub notes: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn empty() -> Self {
        Self {
            completed_verses: 0,
            notes: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("chapter {0} is not in the catalog")]
    UnknownChapter(u32),
    #[error("chapter {number} has {verse_count} verses, cannot record {completed}")]
    VerseCountOutOfRange {
        number: u32,
        completed: u32,
        verse_count: u32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChapterProgress {
    pub chapter: Chapter,
    pub record: ProgressRecord,
}

impl ChapterProgress {
    pub fn percent(&self) -> u32 {
        percent(self.record.completed_verses, self.chapter.verse_count)
    }

    pub fn is_complete(&self) -> bool {
        self.record.completed_verses == self.chapter.verse_count
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub total_verses_read: u64,
    pub overall_percent: u32,
    pub chapters_with_progress: Vec<ChapterProgress>,
}

pub fn percent(completed: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (100.0 * completed as f64 / total as f64).round() as u32
    }
}

pub fn build_statistics(catalog: &[Chapter], store: &HashMap<u32, ProgressRecord>) -> Statistics {
    let chapter_by_number: HashMap<u32, &Chapter> =
        catalog.iter().map(|chapter| (chapter.number, chapter)).collect();

    let mut completed_count = 0;
    let mut in_progress_count = 0;
    for (number, record) in store {
        let Some(chapter) = chapter_by_number.get(number) else {
            continue;
        };
        if record.completed_verses == chapter.verse_count {
            completed_count += 1;
        } else if record.completed_verses > 0 && record.completed_verses < chapter.verse_count {
            in_progress_count += 1;
        }
    }

    // Stored counts are summed as-is, even for chapters the catalog no longer lists.
    let total_verses_read: u64 = store
        .values()
        .map(|record| record.completed_verses as u64)
        .sum();
    let total_catalog_verses: u64 = catalog
        .iter()
        .map(|chapter| chapter.verse_count as u64)
        .sum();
    let overall_percent = if total_catalog_verses == 0 {
        0
    } else {
        (100.0 * total_verses_read as f64 / total_catalog_verses as f64).round() as u32
    };

    let chapters_with_progress = store
        .iter()
        .filter(|(_, record)| record.completed_verses > 0)
        .filter_map(|(number, record)| {
            chapter_by_number.get(number).map(|chapter| ChapterProgress {
                chapter: (*chapter).clone(),
                record: record.clone(),
            })
        })
        .sorted_by(|a, b| {
            b.record
                .updated_at
                .cmp(&a.record.updated_at)
                .then_with(|| a.chapter.number.cmp(&b.chapter.number))
        })
        .collect();

    Statistics {
        completed_count,
        in_progress_count,
        total_verses_read,
        overall_percent,
        chapters_with_progress,
    }
}

pub fn search_chapters<'a>(catalog: &'a [Chapter], query: &str) -> Vec<&'a Chapter> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.iter().collect();
    }

    catalog
        .iter()
        .filter(|chapter| {
            chapter.english_name.to_lowercase().contains(&needle)
                || chapter.name.to_lowercase().contains(&needle)
                || chapter
                    .english_name_translation
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

pub struct ReadingTracker {
    catalog: Vec<Chapter>,
    store: HashMap<u32, ProgressRecord>,
    progress_path: PathBuf,
}

impl ReadingTracker {
    pub fn new(catalog: Vec<Chapter>, progress_path: PathBuf) -> Self {
        let store = storage::load_progress(&progress_path);
        Self {
            catalog,
            store,
            progress_path,
        }
    }

    pub fn catalog(&self) -> &[Chapter] {
        &self.catalog
    }

    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.catalog.iter().find(|chapter| chapter.number == number)
    }

    pub fn progress(&self, number: u32) -> ProgressRecord {
        self.store
            .get(&number)
            .cloned()
            .unwrap_or_else(ProgressRecord::empty)
    }

    pub fn record(&self, number: u32) -> Option<&ProgressRecord> {
        self.store.get(&number)
    }

    pub fn has_progress(&self, number: u32) -> bool {
        self.store
            .get(&number)
            .is_some_and(|record| record.completed_verses > 0)
    }

    pub fn set_progress(
        &mut self,
        number: u32,
        completed_verses: u32,
        notes: String,
    ) -> Result<ProgressRecord, ProgressError> {
        let chapter = self
            .chapter(number)
            .ok_or(ProgressError::UnknownChapter(number))?;
        if completed_verses > chapter.verse_count {
            return Err(ProgressError::VerseCountOutOfRange {
                number,
                completed: completed_verses,
                verse_count: chapter.verse_count,
            });
        }

        let record = ProgressRecord {
            completed_verses,
            notes,
            updated_at: Utc::now(),
        };
        self.store.insert(number, record.clone());
        self.persist();
        Ok(record)
    }

    pub fn clear_progress(&mut self, number: u32) {
        self.store.remove(&number);
        self.persist();
    }

    pub fn statistics(&self) -> Statistics {
        build_statistics(&self.catalog, &self.store)
    }

    pub fn search(&self, query: &str) -> Vec<&Chapter> {
        search_chapters(&self.catalog, query)
    }

    fn persist(&self) {
        if let Err(e) = storage::save_progress(&self.progress_path, &self.store) {
            eprintln!("Warning: Could not save progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use chrono::TimeZone;

    use super::*;

    fn unique_path(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}.json", prefix, now))
    }

    fn chapter(number: u32, english_name: &str, translation: &str, verse_count: u32) -> Chapter {
        Chapter {
            number,
            name: format!("سورة {}", number),
            english_name: english_name.to_string(),
            english_name_translation: translation.to_string(),
            verse_count,
            revelation_type: "Meccan".to_string(),
        }
    }

    fn test_catalog() -> Vec<Chapter> {
        vec![
            chapter(1, "Al-Fatiha", "The Opening", 7),
            chapter(2, "Al-Baqara", "The Cow", 286),
        ]
    }

    fn record_at(completed_verses: u32, timestamp_secs: i64) -> ProgressRecord {
        ProgressRecord {
            completed_verses,
            notes: String::new(),
            updated_at: Utc.timestamp_opt(timestamp_secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_store_statistics() {
        let stats = build_statistics(&test_catalog(), &HashMap::new());
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.in_progress_count, 0);
        assert_eq!(stats.total_verses_read, 0);
        assert_eq!(stats.overall_percent, 0);
        assert!(stats.chapters_with_progress.is_empty());
    }

    #[test]
    fn test_overall_percent_zero_on_empty_catalog() {
        let mut store = HashMap::new();
        store.insert(1, record_at(7, 100));

        let stats = build_statistics(&[], &store);
        assert_eq!(stats.overall_percent, 0);
        assert_eq!(stats.total_verses_read, 7);
    }

    #[test]
    fn test_completed_chapter_statistics() {
        let path = unique_path("tilawa_completed_stats");
        let mut tracker = ReadingTracker::new(test_catalog(), path.clone());

        tracker.set_progress(1, 7, "done".to_string()).unwrap();

        let stats = tracker.statistics();
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.in_progress_count, 0);
        assert_eq!(stats.total_verses_read, 7);
        assert_eq!(stats.overall_percent, 2);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let path = unique_path("tilawa_overwrite");
        let mut tracker = ReadingTracker::new(test_catalog(), path.clone());

        let first = tracker.set_progress(2, 100, String::new()).unwrap();
        let second = tracker.set_progress(2, 150, String::new()).unwrap();

        assert_eq!(tracker.progress(2).completed_verses, 150);
        assert!(second.updated_at >= first.updated_at);

        let stats = tracker.statistics();
        assert_eq!(stats.chapters_with_progress.len(), 1);
        assert_eq!(stats.in_progress_count, 1);
        assert_eq!(stats.total_verses_read, 150);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_set_progress_rejects_out_of_range() {
        let path = unique_path("tilawa_out_of_range");
        let mut tracker = ReadingTracker::new(test_catalog(), path.clone());

        let err = tracker.set_progress(1, 8, String::new()).unwrap_err();
        assert!(matches!(
            err,
            ProgressError::VerseCountOutOfRange {
                number: 1,
                completed: 8,
                verse_count: 7,
            }
        ));
        assert_eq!(tracker.progress(1), ProgressRecord::empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_set_progress_rejects_unknown_chapter() {
        let path = unique_path("tilawa_unknown_chapter");
        let mut tracker = ReadingTracker::new(test_catalog(), path.clone());

        let err = tracker.set_progress(115, 1, String::new()).unwrap_err();
        assert!(matches!(err, ProgressError::UnknownChapter(115)));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_clear_progress_matches_untouched_statistics() {
        let path = unique_path("tilawa_clear");
        let mut tracker = ReadingTracker::new(test_catalog(), path.clone());
        let untouched = tracker.statistics();

        tracker.set_progress(1, 5, "reflections".to_string()).unwrap();
        tracker.clear_progress(1);

        assert_eq!(tracker.progress(1), ProgressRecord::empty());
        assert_eq!(tracker.statistics(), untouched);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_chapters_with_progress_sorted_and_filtered() {
        let mut store = HashMap::new();
        store.insert(1, record_at(3, 200));
        store.insert(2, record_at(50, 100));
        // An explicit zero record reads the same as no record at all.
        let mut zero = record_at(0, 300);
        zero.notes = "started, then reset the count".to_string();
        store.insert(3, zero);

        let catalog = vec![
            chapter(1, "Al-Fatiha", "The Opening", 7),
            chapter(2, "Al-Baqara", "The Cow", 286),
            chapter(3, "Aal-Imran", "The Family of Imraan", 200),
        ];

        let stats = build_statistics(&catalog, &store);
        let numbers: Vec<u32> = stats
            .chapters_with_progress
            .iter()
            .map(|entry| entry.chapter.number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);

        fn is_sorted_desc(entries: &[ChapterProgress]) -> bool {
            entries
                .windows(2)
                .all(|pair| pair[0].record.updated_at >= pair[1].record.updated_at)
        }
        assert!(is_sorted_desc(&stats.chapters_with_progress));
    }

    #[test]
    fn test_total_verses_read_includes_stale_entries() {
        let mut store = HashMap::new();
        store.insert(1, record_at(7, 100));
        store.insert(99, record_at(40, 200));

        let stats = build_statistics(&test_catalog(), &store);
        assert_eq!(stats.total_verses_read, 47);
        assert_eq!(stats.completed_count, 1);
        // The stale entry never shows up as a listed chapter.
        assert_eq!(stats.chapters_with_progress.len(), 1);
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = vec![
            chapter(1, "Al-Fatiha", "The Opening", 7),
            chapter(2, "Al-Baqara", "The Cow", 286),
            chapter(36, "Ya-Sin", "Ya Sin", 83),
        ];

        let matches = search_chapters(&catalog, "AL");
        let numbers: Vec<u32> = matches.iter().map(|chapter| chapter.number).collect();
        assert_eq!(numbers, vec![1, 2]);

        let by_translation = search_chapters(&catalog, "opening");
        assert_eq!(by_translation.len(), 1);
        assert_eq!(by_translation[0].number, 1);

        assert!(search_chapters(&catalog, "zzz").is_empty());
        assert_eq!(search_chapters(&catalog, "  ").len(), 3);
    }

    #[test]
    fn test_percent_rounds_like_the_views() {
        assert_eq!(percent(7, 293), 2);
        assert_eq!(percent(150, 286), 52);
        assert_eq!(percent(7, 7), 100);
        assert_eq!(percent(0, 7), 0);
        assert_eq!(percent(3, 0), 0);
    }
}
