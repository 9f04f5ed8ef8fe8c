//! Module `file_ops`
//!
//! Moves bytes between the data connection and local files (or memory, for
//! listings).

use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::FtpClientError;
use crate::transfer::data_channel::with_deadline;

/// Last component of a remote path, `None` if it has none (`""`, `"dir/"`).
pub fn base_name(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Copies `reader` to `writer` until end of stream, chunk by chunk.
pub async fn copy_stream<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
    limit: Option<Duration>,
) -> Result<u64, FtpClientError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = with_deadline(limit, "read data", reader.read(&mut buffer)).await?;
        if n == 0 {
            break;
        }
        with_deadline(limit, "write data", writer.write_all(&buffer[..n])).await?;
        total += n as u64;
    }

    writer.flush().await?;
    Ok(total)
}

/// Drains a listing from the data connection and decodes it as text.
pub async fn receive_listing(
    stream: &mut TcpStream,
    buffer_size: usize,
    limit: Option<Duration>,
) -> Result<String, FtpClientError> {
    let mut raw = Vec::new();
    copy_stream(stream, &mut raw, buffer_size, limit).await?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Streams the data connection into `target`, creating or truncating it.
///
/// A failed transfer leaves whatever was written on disk.
pub async fn receive_file(
    stream: &mut TcpStream,
    target: &Path,
    buffer_size: usize,
    limit: Option<Duration>,
) -> Result<u64, FtpClientError> {
    let mut file = File::create(target).await?;
    copy_stream(stream, &mut file, buffer_size, limit).await
}

/// Streams `source` to the data connection and signals end of file.
pub async fn send_file(
    source: &Path,
    stream: &mut TcpStream,
    buffer_size: usize,
    limit: Option<Duration>,
) -> Result<u64, FtpClientError> {
    let mut file = File::open(source).await?;
    let sent = copy_stream(&mut file, stream, buffer_size, limit).await?;
    stream.shutdown().await?;
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_takes_last_component() {
        assert_eq!(base_name("report.txt"), Some("report.txt"));
        assert_eq!(base_name("/pub/docs/report.txt"), Some("report.txt"));
        assert_eq!(base_name("pub/"), None);
        assert_eq!(base_name(""), None);
    }

    #[tokio::test]
    async fn copy_stream_handles_small_buffers() {
        let data = b"line one\r\nline two\r\n".to_vec();
        let mut reader = &data[..];
        let mut out = Vec::new();

        let copied = copy_stream(&mut reader, &mut out, 3, None).await.unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }
}
