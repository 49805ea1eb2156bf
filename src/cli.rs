use std::{io, path::PathBuf};

use chrono::{DateTime, Local, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    catalog,
    domain::{ChapterProgress, ReadingTracker, percent},
    storage,
};

#[derive(Parser, Debug)]
#[command(name = "tilawa")]
#[command(about = "Quran reading progress tracking", long_about = None)]
pub enum Cli {
    #[command(about = "List chapters with their reading progress")]
    List {
        #[arg(long, help = "Include chapters with no recorded progress")]
        all: bool,
    },

    #[command(about = "Record completed verses for a chapter")]
    Set {
        #[arg(help = "Chapter number")]
        chapter: u32,

        #[arg(help = "Completed verse count")]
        verses: u32,

        #[arg(long, help = "Reading notes")]
        notes: Option<String>,
    },

    #[command(about = "Mark a chapter as fully read")]
    Done {
        #[arg(help = "Chapter number")]
        chapter: u32,
    },

    #[command(about = "Remove the recorded progress for a chapter")]
    Clear {
        #[arg(help = "Chapter number")]
        chapter: u32,
    },

    #[command(about = "Show overall reading statistics")]
    Stats,

    #[command(about = "Search chapters by name")]
    Search {
        #[arg(help = "Name fragment to match")]
        query: String,
    },

    #[command(about = "Export the catalog with progress")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterExport {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub verse_count: u32,
    pub completed_verses: u32,
    pub percent: u32,
    pub notes: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub chapters: Vec<ChapterExport>,
}

fn load_tracker() -> Result<ReadingTracker, String> {
    let catalog = catalog::fetch_catalog().map_err(|e| e.to_string())?;
    Ok(ReadingTracker::new(catalog, storage::get_progress_path()))
}

fn progress_row(tracker: &ReadingTracker, number: u32) -> Option<String> {
    let chapter = tracker.chapter(number)?;
    let record = tracker.progress(number);
    let pct = percent(record.completed_verses, chapter.verse_count);
    let marker = if record.completed_verses == chapter.verse_count {
        "done"
    } else {
        ""
    };

    Some(format!(
        "{:>3}. {:24} {:>9} {:>4}%  {}",
        chapter.number,
        chapter.english_name,
        format!("{}/{}", record.completed_verses, chapter.verse_count),
        pct,
        marker
    ))
}

pub fn list_chapters(all: bool) -> Result<(), String> {
    let tracker = load_tracker()?;

    let mut printed = 0;
    for chapter in tracker.catalog() {
        if !all && !tracker.has_progress(chapter.number) {
            continue;
        }
        if let Some(row) = progress_row(&tracker, chapter.number) {
            println!("{}", row.trim_end());
            printed += 1;
        }
    }

    if printed == 0 {
        println!("No progress yet. Run 'tilawa set <chapter> <verses>' to start.");
    }
    Ok(())
}

pub fn set_progress(chapter: u32, verses: u32, notes: Option<String>) -> Result<(), String> {
    let mut tracker = load_tracker()?;

    let record = tracker
        .set_progress(chapter, verses, notes.unwrap_or_default())
        .map_err(|e| e.to_string())?;

    let verse_count = tracker
        .chapter(chapter)
        .map(|c| c.verse_count)
        .unwrap_or(verses);
    println!(
        "Recorded {}/{} verses for chapter {}",
        record.completed_verses, verse_count, chapter
    );
    Ok(())
}

pub fn mark_done(chapter: u32) -> Result<(), String> {
    let mut tracker = load_tracker()?;

    let verse_count = tracker
        .chapter(chapter)
        .map(|c| c.verse_count)
        .ok_or_else(|| format!("chapter {} is not in the catalog", chapter))?;
    let existing_notes = tracker.progress(chapter).notes;
    tracker
        .set_progress(chapter, verse_count, existing_notes)
        .map_err(|e| e.to_string())?;

    println!("Chapter {} marked as fully read", chapter);
    Ok(())
}

pub fn clear_progress(chapter: u32) -> Result<(), String> {
    let mut tracker = load_tracker()?;
    tracker.clear_progress(chapter);
    println!("Progress for chapter {} cleared", chapter);
    Ok(())
}

pub fn show_stats() -> Result<(), String> {
    let tracker = load_tracker()?;
    let stats = tracker.statistics();

    let today = Local::now().format("%Y-%m-%d");
    println!("Reading Report ({})", today);
    println!("{}", "-".repeat(40));
    println!("{:20} {}", "Completed", stats.completed_count);
    println!("{:20} {}", "In Progress", stats.in_progress_count);
    println!("{:20} {}", "Verses Read", stats.total_verses_read);
    println!("{:20} {}%", "Overall", stats.overall_percent);
    println!("{}", "-".repeat(40));

    if stats.chapters_with_progress.is_empty() {
        println!("No progress yet. Start reading to track your progress!");
        return Ok(());
    }

    println!("Recently read:");
    for entry in &stats.chapters_with_progress {
        print_progress_entry(entry);
    }
    Ok(())
}

fn print_progress_entry(entry: &ChapterProgress) {
    let marker = if entry.is_complete() { "done" } else { "" };
    let row = format!(
        "{:>3}. {:24} {:>9} {:>4}%  {}",
        entry.chapter.number,
        entry.chapter.english_name,
        format!(
            "{}/{}",
            entry.record.completed_verses, entry.chapter.verse_count
        ),
        entry.percent(),
        marker
    );
    println!("{}", row.trim_end());
    if !entry.record.notes.is_empty() {
        println!("     {}", entry.record.notes);
    }
}

pub fn search(query: &str) -> Result<(), String> {
    let tracker = load_tracker()?;

    let matches = tracker.search(query);
    if matches.is_empty() {
        println!("No chapters match '{}'", query);
        return Ok(());
    }

    let numbers: Vec<u32> = matches.iter().map(|chapter| chapter.number).collect();
    for number in numbers {
        if let Some(row) = progress_row(&tracker, number) {
            println!("{}", row.trim_end());
        }
    }
    Ok(())
}

pub fn export_data(format: ExportFormat, out_path: Option<PathBuf>) -> Result<(), String> {
    let tracker = load_tracker()?;

    let chapters: Vec<ChapterExport> = tracker
        .catalog()
        .iter()
        .map(|chapter| {
            let record = tracker.record(chapter.number);
            let completed_verses = record.map_or(0, |r| r.completed_verses);
            ChapterExport {
                number: chapter.number,
                name: chapter.name.clone(),
                english_name: chapter.english_name.clone(),
                verse_count: chapter.verse_count,
                completed_verses,
                percent: percent(completed_verses, chapter.verse_count),
                notes: record.map_or_else(String::new, |r| r.notes.clone()),
                updated_at: record.map(|r| r.updated_at),
            }
        })
        .collect();

    match format {
        ExportFormat::Json => {
            let export = DataExport {
                schema_version: 1,
                exported_at: Utc::now(),
                chapters,
            };
            let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
            if let Some(path) = out_path {
                storage::write_text_file(&path, &json)?;
                println!("Exported to {}", path.display());
            } else {
                println!("{}", json);
            }
        }
        ExportFormat::Csv => {
            if let Some(path) = out_path {
                let mut writer = csv::Writer::from_path(&path).map_err(|e| e.to_string())?;
                for chapter in &chapters {
                    writer.serialize(chapter).map_err(|e| e.to_string())?;
                }
                writer.flush().map_err(|e| e.to_string())?;
                println!("Exported to {}", path.display());
            } else {
                let mut writer = csv::Writer::from_writer(io::stdout());
                for chapter in &chapters {
                    writer.serialize(chapter).map_err(|e| e.to_string())?;
                }
                writer.flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "tilawa",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(Shell::Zsh, &mut Cli::command(), "tilawa", &mut io::stdout());
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "tilawa",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    match cli {
        Cli::List { all } => {
            if let Err(e) = list_chapters(all) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Set {
            chapter,
            verses,
            notes,
        } => {
            if let Err(e) = set_progress(chapter, verses, notes) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Done { chapter } => {
            if let Err(e) = mark_done(chapter) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Clear { chapter } => {
            if let Err(e) = clear_progress(chapter) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Stats => {
            if let Err(e) = show_stats() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Search { query } => {
            if let Err(e) = search(&query) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Export { format, out } => {
            if let Err(e) = export_data(format, out) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Completions { shell } => {
            if let Err(e) = print_completions(&shell) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
