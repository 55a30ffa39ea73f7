use crate::model::ReadStopReason;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// Outcome of one deadline-bounded read.
#[derive(Debug)]
pub enum Chunk {
    Data(usize),
    Idle,
    Closed,
    Failed(std::io::Error),
}

/// Reads once into `buf`, giving up after `deadline`.
pub async fn read_chunk<T: AsyncRead + Unpin>(stream: &mut T, buf: &mut [u8], deadline: Duration) -> Chunk {
    match timeout(deadline, stream.read(buf)).await {
        Ok(Ok(0)) => Chunk::Closed,
        Ok(Ok(n)) => Chunk::Data(n),
        Ok(Err(err)) => Chunk::Failed(err),
        Err(_) => Chunk::Idle,
    }
}

/// Collects bytes until a delimiter, the size cap, EOF, or the peer goes
/// quiet for `idle_timeout`.
pub struct BoundedReader {
    max_bytes: usize,
    idle_timeout: Duration,
}

impl BoundedReader {
    pub fn new(max_bytes: usize, idle_timeout: Duration) -> Self {
        Self {
            max_bytes,
            idle_timeout,
        }
    }

    pub async fn read<T: AsyncRead + Unpin>(
        &mut self,
        stream: &mut T,
        delimiter: Option<&[u8]>,
    ) -> anyhow::Result<ReadResult> {
        let mut buf = vec![0u8; self.max_bytes];
        let mut total = 0usize;
        let reason = loop {
            match read_chunk(stream, &mut buf[total..], self.idle_timeout).await {
                Chunk::Closed => break ReadStopReason::ConnectionClosed,
                Chunk::Idle => break ReadStopReason::Timeout,
                Chunk::Failed(err) if total == 0 => return Err(err.into()),
                Chunk::Failed(_) => break ReadStopReason::ConnectionClosed,
                Chunk::Data(n) => {
                    total += n;
                    if let Some(pos) = find_delimiter(&buf[..total], delimiter) {
                        total = pos;
                        break ReadStopReason::Delimiter;
                    }
                    if total >= self.max_bytes {
                        break ReadStopReason::SizeLimit;
                    }
                }
            }
        };
        buf.truncate(total);
        Ok(ReadResult {
            truncated: reason == ReadStopReason::SizeLimit,
            bytes: buf,
            reason,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReadResult {
    pub bytes: Vec<u8>,
    pub reason: ReadStopReason,
    pub truncated: bool,
}

fn find_delimiter(buf: &[u8], delimiter: Option<&[u8]>) -> Option<usize> {
    let delim = delimiter.filter(|d| !d.is_empty())?;
    buf.windows(delim.len())
        .position(|window| window == delim)
        .map(|pos| pos + delim.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn stops_on_delimiter() {
        let mut reader = BoundedReader::new(64, Duration::from_secs(1));
        let mut data: &[u8] = b"220 mail.example ESMTP\r\n250 more";
        let res = reader.read(&mut data, Some(b"\n")).await.unwrap();
        assert_eq!(res.bytes, b"220 mail.example ESMTP\r\n");
        assert_eq!(res.reason, ReadStopReason::Delimiter);
    }

    #[tokio::test]
    async fn binary_reads_run_to_eof() {
        let mut reader = BoundedReader::new(64, Duration::from_secs(1));
        let mut data: &[u8] = b"\x83\xbf\r\n\x04\x00";
        let res = reader.read(&mut data, None).await.unwrap();
        assert_eq!(res.bytes.len(), 6);
        assert_eq!(res.reason, ReadStopReason::ConnectionClosed);
    }

    #[tokio::test]
    async fn caps_at_max_bytes() {
        let mut reader = BoundedReader::new(4, Duration::from_secs(1));
        let mut data: &[u8] = b"abcdefgh";
        let res = reader.read(&mut data, None).await.unwrap();
        assert_eq!(res.bytes, b"abcd");
        assert!(res.truncated);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_peer_ends_read_with_partial_data() {
        let (mut client, mut server) = tokio::io::duplex(64);
        server.write_all(b"partial").await.unwrap();
        let mut reader = BoundedReader::new(64, Duration::from_secs(2));
        let res = reader.read(&mut client, None).await.unwrap();
        assert_eq!(res.bytes, b"partial");
        assert_eq!(res.reason, ReadStopReason::Timeout);
        drop(server);
    }
}
