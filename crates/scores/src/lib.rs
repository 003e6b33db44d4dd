//! Score table - the persistence collaborator
//!
//! Stores `(name, score)` pairs, best first, as plain text lines of the form
//! `name:score`. Only the best [`MAX_SAVED_SCORES`] entries are written.
//! The game core never reads this format; it only reports a final score.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Entries kept when saving
pub const MAX_SAVED_SCORES: usize = 8;

/// Default file name, relative to the working directory
pub const DEFAULT_SCORES_FILE: &str = "scores.txt";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parse one `name:score` line. The score is after the last colon.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, score) = line.trim().rsplit_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let score = score.trim().parse().ok()?;
        Some(Self::new(name, score))
    }
}

impl std::fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

/// Score list, always sorted best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    pub fn new(mut entries: Vec<ScoreEntry>) -> Self {
        // Stable: equal scores keep their file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Table written when no score file exists yet
    pub fn default_table() -> Self {
        Self::new(
            [100, 30, 30, 70, 40, 50, 130, 150, 170]
                .into_iter()
                .enumerate()
                .map(|(i, score)| ScoreEntry::new(format!("player {}", i + 1), score))
                .collect(),
        )
    }

    /// Parse the line format, skipping lines that do not parse
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ScoreEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = n + 1, content = line, "skipping malformed score line"),
            }
        }
        Self::new(entries)
    }

    /// Render the best [`MAX_SAVED_SCORES`] entries in the line format
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .take(MAX_SAVED_SCORES)
            .map(|e| format!("{e}\n"))
            .collect()
    }

    /// Load from `path`, writing the default table first if it is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no score file, writing defaults");
            let table = Self::default_table();
            table.save(path)?;
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scores from {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating score directory {}", dir.display()))?;
        }
        fs::write(path, self.render())
            .with_context(|| format!("writing scores to {}", path.display()))?;
        info!(path = %path.display(), "scores saved");
        Ok(())
    }

    /// Add an entry in sorted position (after existing equal scores)
    pub fn insert(&mut self, name: impl Into<String>, score: u32) {
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(at, ScoreEntry::new(name, score));
    }

    /// True when `score` beats at least one stored entry
    pub fn is_high_score(&self, score: u32) -> bool {
        self.entries.iter().any(|e| score > e.score)
    }

    /// Highest stored score
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_uses_last_colon() {
        assert_eq!(ScoreEntry::parse_line("a:b:12"), Some(ScoreEntry::new("a:b", 12)));
        assert_eq!(ScoreEntry::parse_line(" bob : 7 "), Some(ScoreEntry::new("bob", 7)));
        assert_eq!(ScoreEntry::parse_line("nobody"), None);
        assert_eq!(ScoreEntry::parse_line(":5"), None);
        assert_eq!(ScoreEntry::parse_line("x:-5"), None);
    }

    #[test]
    fn default_table_is_sorted() {
        let table = ScoreTable::default_table();
        assert_eq!(table.len(), 9);
        assert_eq!(table.best(), Some(170));
        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![170, 150, 130, 100, 70, 50, 40, 30, 30]);
    }

    #[test]
    fn render_keeps_top_eight() {
        let text = ScoreTable::default_table().render();
        assert_eq!(text.lines().count(), MAX_SAVED_SCORES);
        assert!(text.starts_with("player 9:170\n"));
        assert!(!text.contains(":30\nplayer"), "only one 30 survives");
    }

    #[test]
    fn insert_keeps_order() {
        let mut table = ScoreTable::default_table();
        table.insert("new", 130);
        let names: Vec<&str> = table.entries().iter().take(4).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["player 9", "player 8", "player 7", "new"]);
    }

    #[test]
    fn high_score_beats_any_entry() {
        let table = ScoreTable::parse("a:100\nb:50\n");
        assert!(table.is_high_score(51));
        assert!(!table.is_high_score(50));
        assert!(!ScoreTable::default().is_high_score(1_000));
    }
}
