//! Flat-file high-score store: one line per finished run, newest last,
//! trimmed to the most recent ten entries.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;

use crate::session::format_mmss;

pub const MAX_ENTRIES: usize = 10;

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> ScoreStore {
        ScoreStore { path: path.into() }
    }

    /// A missing or unreadable file reads as an empty score list.
    pub fn read(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.lines().map(str::to_owned).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Appends one entry, then rewrites the file keeping only the last
    /// [`MAX_ENTRIES`] lines, oldest dropped first.
    pub fn record(&self, steps: u32, elapsed: Duration) -> io::Result<()> {
        let mut lines = self.read();
        lines.push(format!(
            "{} - Steps:{}, Time:{}",
            Local::now().format("%Y-%m-%d %H:%M"),
            steps,
            format_mmss(elapsed)
        ));
        if lines.len() > MAX_ENTRIES {
            lines.drain(..lines.len() - MAX_ENTRIES);
        }
        fs::write(&self.path, lines.join("\n") + "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> ScoreStore {
        let mut path = env::temp_dir();
        path.push(format!("maze-escape-{name}-{}", std::process::id()));
        let _ = fs::remove_file(&path);
        ScoreStore::new(path)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store("missing");
        assert!(store.read().is_empty());
    }

    #[test]
    fn record_appends_a_formatted_line() {
        let store = temp_store("append");
        store.record(7, Duration::from_secs(65)).unwrap();
        let lines = store.read();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("- Steps:7, Time:01:05"), "{}", lines[0]);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn store_keeps_only_the_latest_ten() {
        let store = temp_store("truncate");
        for steps in 0..15 {
            store.record(steps, Duration::from_secs(steps as u64)).unwrap();
        }
        let lines = store.read();
        assert_eq!(lines.len(), MAX_ENTRIES);
        assert!(lines[0].contains("Steps:5,"));
        assert!(lines[MAX_ENTRIES - 1].contains("Steps:14,"));
        let _ = fs::remove_file(&store.path);
    }
}
