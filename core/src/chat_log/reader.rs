use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::warn;

use super::error::ReaderError;

/// Incremental line source over the live log. The handle stays open for
/// the process lifetime; every drain continues from the last position.
pub struct LogReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    pos: u64,
}

impl LogReader {
    pub async fn open(path: &Path) -> Result<Self, ReaderError> {
        let file = File::open(path)
            .await
            .map_err(|source| ReaderError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            pos: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan forward to the account announcement the client writes when a
    /// session starts: `... Setting user: <nick>`. Everything before it
    /// is launcher preamble.
    pub async fn read_player_name(&mut self) -> Result<String, ReaderError> {
        const MARKER: &str = "Setting user: ";
        while let Some(line) = self.next_complete_line().await? {
            if let Some(idx) = line.find(MARKER) {
                return Ok(line[idx + MARKER.len()..].trim().to_string());
            }
        }
        Err(ReaderError::PlayerNameNotFound {
            path: self.path.clone(),
        })
    }

    /// Every complete line appended since the previous drain. A trailing
    /// partial line stays buffered until the client finishes writing it.
    pub async fn drain_lines(&mut self) -> Result<Vec<String>, ReaderError> {
        let len = tokio::fs::metadata(&self.path)
            .await
            .map_err(|source| ReaderError::Metadata {
                path: self.path.clone(),
                source,
            })?
            .len();
        // The client starts a fresh log on login; a file shorter than our
        // position means it was swapped out under us.
        if len < self.pos {
            warn!(path = %self.path.display(), "log rotated, restarting from the top");
            self.reader
                .seek(SeekFrom::Start(0))
                .await
                .map_err(|source| ReaderError::Seek {
                    path: self.path.clone(),
                    source,
                })?;
            self.pos = 0;
            self.buf.clear();
        }

        let mut lines = Vec::new();
        while let Some(line) = self.next_complete_line().await? {
            lines.push(line);
        }
        Ok(lines)
    }

    async fn next_complete_line(&mut self) -> Result<Option<String>, ReaderError> {
        loop {
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .await
                .map_err(|source| ReaderError::ReadLine {
                    path: self.path.clone(),
                    source,
                })?;
            if read == 0 {
                // partial data stays in the buffer for the next drain
                return Ok(None);
            }
            self.pos += read as u64;
            if self.buf.ends_with(b"\n") {
                let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
                self.buf.clear();
                if line.is_empty() {
                    continue;
                }
                return Ok(Some(line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("latest.log");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_player_name_from_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(
            dir.path(),
            "[12:00:00] [Client thread/INFO]: Setting user: Steve_22\n",
        );

        let mut reader = LogReader::open(&path).await.unwrap();
        assert_eq!(reader.read_player_name().await.unwrap(), "Steve_22");
    }

    #[tokio::test]
    async fn test_player_name_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "[12:00:00] [Client thread/INFO]: booting\n");

        let mut reader = LogReader::open(&path).await.unwrap();
        assert!(matches!(
            reader.read_player_name().await,
            Err(ReaderError::PlayerNameNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_drain_continues_from_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "first\nsecond\n");

        let mut reader = LogReader::open(&path).await.unwrap();
        assert_eq!(reader.drain_lines().await.unwrap(), vec!["first", "second"]);
        assert!(reader.drain_lines().await.unwrap().is_empty());

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        writeln!(file, "third").unwrap();

        assert_eq!(reader.drain_lines().await.unwrap(), vec!["third"]);
    }

    #[tokio::test]
    async fn test_partial_line_buffered_until_complete() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "full line\npartial");

        let mut reader = LogReader::open(&path).await.unwrap();
        assert_eq!(reader.drain_lines().await.unwrap(), vec!["full line"]);

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        writeln!(file, " finished").unwrap();

        assert_eq!(reader.drain_lines().await.unwrap(), vec!["partial finished"]);
    }

    #[tokio::test]
    async fn test_truncation_restarts_from_top() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "old content line\nmore old content\n");

        let mut reader = LogReader::open(&path).await.unwrap();
        reader.drain_lines().await.unwrap();

        std::fs::write(&path, "fresh\n").unwrap();
        assert_eq!(reader.drain_lines().await.unwrap(), vec!["fresh"]);
    }
}
