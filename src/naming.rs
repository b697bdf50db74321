//! Filename derivation for saved discussions
//!
//! A listing title like "vmware 2v0-11.25 question 5 discussion" carries
//! everything needed for a stable filename: the exam token and the question
//! number. Titles that match produce the same name on every run, so a re-crawl
//! overwrites instead of duplicating. Titles that don't match fall back to a
//! counter-based name that cannot collide within a run.

use crate::Result;
use regex::Regex;

/// Derives filenames from listing titles for one exam
///
/// The matching strategy is a single declarative pattern: the exam identifier,
/// followed anywhere later in the title by a "question N" token.
pub struct FilenameDeriver {
    exam_id: String,
    pattern: Regex,
}

impl FilenameDeriver {
    /// Builds a deriver for the given exam identifier
    pub fn new(exam_id: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?i)({}).*?(question\s*\d+)",
            regex::escape(exam_id)
        ))?;

        Ok(Self {
            exam_id: exam_id.to_string(),
            pattern,
        })
    }

    /// Computes the sanitized filename for a listing title
    ///
    /// `total_saved` is the number of files written so far this run; it is
    /// only used to keep fallback names distinct.
    pub fn derive(&self, title: &str, total_saved: u64) -> String {
        let name = match self.pattern.captures(title) {
            Some(caps) => {
                let exam = caps[1].replace(' ', "-").to_lowercase();
                let question = caps[2].replace(' ', "-").to_lowercase();
                format!("{}-{}-discussion.txt", exam, question)
            }
            None => format!(
                "{}-unknown-discussion-{}.txt",
                self.exam_id,
                total_saved + 1
            ),
        };

        sanitize_filename(&name)
    }
}

/// Replaces every character outside `A-Za-z0-9_.-` with an underscore
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
