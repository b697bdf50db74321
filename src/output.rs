//! Record persistence
//!
//! Saved discussions land as individual UTF-8 text files inside an exam-scoped
//! directory under the configured output root. Filenames arrive already
//! sanitized; writes overwrite silently so a re-run refreshes existing files
//! instead of duplicating them.

use crate::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes rendered discussion records into `{output_dir}/{exam_id}/`
pub struct RecordWriter {
    exam_dir: PathBuf,
}

impl RecordWriter {
    /// Creates the exam-scoped directory (if absent) and returns a writer for it
    pub fn new(output_dir: &Path, exam_id: &str) -> Result<Self> {
        let exam_dir = output_dir.join(exam_id);
        fs::create_dir_all(&exam_dir)?;

        Ok(Self { exam_dir })
    }

    /// Writes a record, overwriting any existing file of the same name
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.exam_dir.join(filename);

        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;

        Ok(path)
    }

    /// Directory this writer saves into
    pub fn exam_dir(&self) -> &Path {
        &self.exam_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_exam_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let writer = RecordWriter::new(tmp.path(), "az-104").expect("writer");

        assert!(writer.exam_dir().is_dir());
        assert_eq!(writer.exam_dir(), tmp.path().join("az-104"));
    }

    #[test]
    fn test_write_creates_file_with_content() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let writer = RecordWriter::new(tmp.path(), "az-104").expect("writer");

        let path = writer.write("a.txt", "hello").expect("write");
        assert_eq!(fs::read_to_string(path).expect("read"), "hello");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let writer = RecordWriter::new(tmp.path(), "az-104").expect("writer");

        writer.write("a.txt", "first").expect("write");
        let path = writer.write("a.txt", "second").expect("overwrite");
        assert_eq!(fs::read_to_string(path).expect("read"), "second");
    }

    #[test]
    fn test_existing_directory_is_reused() {
        let tmp = tempfile::tempdir().expect("tempdir");
        RecordWriter::new(tmp.path(), "az-104").expect("first");
        // Second writer for the same exam must not fail
        RecordWriter::new(tmp.path(), "az-104").expect("second");
    }
}
