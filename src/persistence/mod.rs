//! High score log persistence
//!
//! Scores are appended to a plain text log, one decimal integer per line.
//! Reading is lenient: a malformed line counts as 0, including one that is
//! not valid UTF-8.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Storage for finished-game scores
pub trait ScoreStore {
    /// Append one score to the log
    fn append(&mut self, score: i32) -> std::io::Result<()>;
    /// Read every score in the log, oldest first
    fn load_all(&self) -> std::io::Result<Vec<i32>>;
}

/// File-backed score log
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn append(&mut self, score: i32) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", score)
    }

    fn load_all(&self) -> std::io::Result<Vec<i32>> {
        let file = std::fs::File::open(&self.path)?;
        let mut scores = Vec::new();
        for line in BufReader::new(file).split(b'\n') {
            scores.push(parse_score(line?));
        }
        log::debug!("Read {} scores from {}", scores.len(), self.path.display());
        Ok(scores)
    }
}

/// In-memory score log
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub scores: Vec<i32>,
}

impl ScoreStore for MemoryScoreStore {
    fn append(&mut self, score: i32) -> std::io::Result<()> {
        self.scores.push(score);
        Ok(())
    }

    fn load_all(&self) -> std::io::Result<Vec<i32>> {
        Ok(self.scores.clone())
    }
}

/// Parse a score line the way C `atoi` does: optional leading whitespace,
/// optional sign, then as many digits as follow. No digits gives 0.
/// Out-of-range values saturate. Works on raw bytes, so any encoding is
/// accepted.
pub fn parse_score(line: impl AsRef<[u8]>) -> i32 {
    let s = line.as_ref().trim_ascii_start();
    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
