use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::{constants::FILE_NAMES, domain::ProgressRecord};

pub fn get_data_dir() -> PathBuf {
    let local_progress = Path::new("./progress.json");
    if local_progress.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "tilawa", "tilawa") {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_progress_path() -> PathBuf {
    get_data_dir().join(FILE_NAMES.progress)
}

pub fn load_progress(path: &Path) -> HashMap<u32, ProgressRecord> {
    if !path.exists() {
        return HashMap::new();
    }

    let document: BTreeMap<String, ProgressRecord> = match read_json(path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Warning: Could not load progress file: {}", e);
            return HashMap::new();
        }
    };

    let mut store = HashMap::with_capacity(document.len());
    for (key, record) in document {
        match key.parse::<u32>() {
            Ok(number) => {
                store.insert(number, record);
            }
            Err(_) => {
                eprintln!("Warning: Invalid chapter number '{}', skipping", key);
            }
        }
    }

    store
}

pub fn save_progress(path: &Path, store: &HashMap<u32, ProgressRecord>) -> Result<(), String> {
    let document: BTreeMap<String, &ProgressRecord> = store
        .iter()
        .map(|(number, record)| (number.to_string(), record))
        .collect();

    write_json_atomic(path, &document)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    atomic_write(path, &json)
}

pub fn write_text_file(path: &Path, content: &str) -> Result<(), String> {
    atomic_write(path, content)
}

pub fn create_backup(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| e.to_string())?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| e.to_string())?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        while backups.len() > 10 {
            if let Some(oldest) = backups.first() {
                let _ = fs::remove_file(oldest.path());
                backups.remove(0);
            }
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| e.to_string())?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;
    tmp_file.sync_all().map_err(|e| e.to_string())?;
    fs::rename(&tmp_path, path).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use chrono::{TimeZone, Utc};

    use super::*;

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}.{}", prefix, now, extension))
    }

    fn record(completed_verses: u32, notes: &str) -> ProgressRecord {
        ProgressRecord {
            completed_verses,
            notes: notes.to_string(),
            updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_progress_round_trip() {
        let path = unique_path("tilawa_progress_roundtrip", "json");
        let mut store = HashMap::new();
        store.insert(1, record(7, "done"));
        store.insert(2, record(150, ""));

        save_progress(&path, &store).unwrap();
        let loaded = load_progress(&path);

        assert_eq!(loaded, store);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = unique_path("tilawa_progress_missing", "json");
        assert!(load_progress(&path).is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let path = unique_path("tilawa_progress_corrupt", "json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_progress(&path).is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_skips_non_numeric_keys() {
        let path = unique_path("tilawa_progress_badkey", "json");
        let content = r#"{
            "1": { "completed": 7, "notes": "done", "updatedAt": "2026-08-01T10:00:00Z" },
            "not-a-number": { "completed": 3, "notes": "", "updatedAt": "2026-08-01T10:00:00Z" }
        }"#;
        fs::write(&path, content).unwrap();

        let loaded = load_progress(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&1].completed_verses, 7);
        assert_eq!(loaded[&1].notes, "done");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_document_uses_wire_field_names() {
        let path = unique_path("tilawa_progress_wire", "json");
        let mut store = HashMap::new();
        store.insert(2, record(100, "halfway"));

        save_progress(&path, &store).unwrap();
        let written = fs::read_to_string(&path).unwrap();

        assert!(written.contains("\"2\""));
        assert!(written.contains("\"completed\": 100"));
        assert!(written.contains("\"updatedAt\""));

        fs::remove_file(path).ok();
    }
}
