use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

use texec_core::TaskRecord;

/// Which snapshot slot a reader publishes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Read one `fgets`-style chunk: up to `max_len` bytes, stopping early at a
/// line feed (kept as the chunk's last byte). Mirrors
/// `fgets(line, MAX_LINE_LENGTH, run_output)` in the original implementation
/// (`examples/original_source/executor.c`) rather than buffering an entire
/// logical line before applying the bound — a single read never grows past
/// `max_len` bytes no matter how long the child's line turns out to be.
///
/// Returns an empty vec only on EOF with nothing left to read.
async fn read_bounded_chunk<R>(pipe: &mut R, max_len: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = Vec::with_capacity(max_len);
    let mut byte = [0u8; 1];
    while chunk.len() < max_len {
        let n = pipe.read(&mut byte).await?;
        if n == 0 {
            break;
        }
        chunk.push(byte[0]);
        if byte[0] == b'\n' {
            break;
        }
    }
    Ok(chunk)
}

/// Drain one captured pipe, publishing each bounded chunk into the task's
/// snapshot as it is read (spec.md §4.2).
///
/// A logical line longer than `max_len` is read as several chunks, each one
/// published in turn — so once the line ends, the stored snapshot is that
/// line's *tail*, matching the original's per-`fgets`-call publication.
///
/// Never propagates an I/O error upward: any read failure is treated as
/// end-of-stream, same as a clean EOF.
pub async fn run_reader<R>(pipe: R, record: Arc<TaskRecord>, max_line_len: usize, kind: StreamKind)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    loop {
        let chunk = match read_bounded_chunk(&mut reader, max_line_len).await {
            Ok(chunk) => chunk,
            Err(_) => break,
        };
        if chunk.is_empty() {
            break;
        }
        let payload = match chunk.last() {
            Some(b'\n') => &chunk[..chunk.len() - 1],
            _ => &chunk[..],
        };
        if payload.is_empty() {
            continue;
        }
        let line = String::from_utf8_lossy(payload);
        match kind {
            StreamKind::Stdout => record.last_out.publish(&line, max_line_len),
            StreamKind::Stderr => record.last_err.publish(&line, max_line_len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texec_core::TaskId;

    #[tokio::test]
    async fn publishes_the_last_complete_line() {
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        let input = std::io::Cursor::new(b"a\nb\nc\n".to_vec());
        run_reader(input, Arc::clone(&record), 510, StreamKind::Stdout).await;
        assert_eq!(record.last_out.snapshot(), "c");
    }

    #[tokio::test]
    async fn routes_to_the_matching_slot() {
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        let input = std::io::Cursor::new(b"oops\n".to_vec());
        run_reader(input, Arc::clone(&record), 510, StreamKind::Stderr).await;
        assert_eq!(record.last_err.snapshot(), "oops");
        assert_eq!(record.last_out.snapshot(), "");
    }

    #[tokio::test]
    async fn an_unterminated_final_line_still_counts() {
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        let input = std::io::Cursor::new(b"first\nlast-no-newline".to_vec());
        run_reader(input, Arc::clone(&record), 510, StreamKind::Stdout).await;
        assert_eq!(record.last_out.snapshot(), "last-no-newline");
    }

    #[tokio::test]
    async fn empty_input_leaves_snapshot_empty() {
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        let input = std::io::Cursor::new(Vec::new());
        run_reader(input, Arc::clone(&record), 510, StreamKind::Stdout).await;
        assert_eq!(record.last_out.snapshot(), "");
    }

    #[tokio::test]
    async fn a_line_longer_than_the_bound_is_read_in_chunks_and_the_tail_is_kept() {
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        // One logical line of 12 bytes, bounded to 5-byte chunks: "abcde",
        // "fghij", "k\n" — the stored snapshot should be the last chunk with
        // its newline stripped, not a head-truncated prefix of the whole line.
        let input = std::io::Cursor::new(b"abcdefghijk\n".to_vec());
        run_reader(input, Arc::clone(&record), 5, StreamKind::Stdout).await;
        assert_eq!(record.last_out.snapshot(), "k");
    }

    #[tokio::test]
    async fn a_single_read_never_exceeds_the_bound_even_mid_line() {
        // A pipe that never produces a newline at all: every chunk is
        // exactly `max_len` bytes, so the reader never buffers more than
        // that for one read regardless of total stream length.
        let record = Arc::new(TaskRecord::new(TaskId::new(0), 1));
        let input = std::io::Cursor::new("x".repeat(23).into_bytes());
        run_reader(input, Arc::clone(&record), 5, StreamKind::Stdout).await;
        // 23 bytes / 5-byte chunks -> chunks of 5,5,5,5,3; last chunk "xxx".
        assert_eq!(record.last_out.snapshot(), "xxx");
    }
}
