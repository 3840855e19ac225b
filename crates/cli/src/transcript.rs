//! Transcript sink — append-only per-session log of (input, result) pairs.
//!
//! One timestamped file per session for debugging/analysis/oversight. The
//! sink is write-only from the agent's perspective; nothing in the core
//! ever reads it back. A transcript that recorded no turns is deleted at
//! session end.

use anyhow::Context;
use chrono::Local;
use mnemo_agent::Turn;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TranscriptWriter {
    path: PathBuf,
    file: fs::File,
    turns_written: usize,
}

impl TranscriptWriter {
    /// Create `<dir>/transcript_<timestamp>.txt` with a session header.
    pub fn create(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating transcript directory {}", dir.display()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("transcript_{stamp}.txt"));
        let mut file = fs::File::create(&path)
            .with_context(|| format!("creating transcript file {}", path.display()))?;

        writeln!(file, "Agent Transcript")?;
        writeln!(file, "================")?;
        writeln!(file)?;

        Ok(Self {
            path,
            file,
            turns_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one completed turn.
    pub fn record(&mut self, turn: &Turn) -> anyhow::Result<()> {
        writeln!(self.file, "You: {}", turn.user_input)?;
        writeln!(self.file)?;
        writeln!(self.file, "Agent: {}", turn.result)?;
        writeln!(self.file)?;
        self.turns_written += 1;
        Ok(())
    }

    /// Finish the session: write the footer, or delete the file if no
    /// turns were recorded.
    pub fn close(mut self) -> anyhow::Result<()> {
        if self.turns_written == 0 {
            drop(self.file);
            fs::remove_file(&self.path)
                .with_context(|| format!("removing empty transcript {}", self.path.display()))?;
            return Ok(());
        }

        writeln!(self.file, "================")?;
        writeln!(self.file)?;
        Ok(())
    }
}
