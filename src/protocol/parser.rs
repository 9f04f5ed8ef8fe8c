//! FTP reply parsing
//!
//! Reads exactly one reply from a line source, following RFC 959 §4.2:
//! a line `NNN-` opens a multi-line block that only `NNN ` closes.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::FtpClientError;
use crate::protocol::Reply;

/// Reads one line and strips the CRLF (or bare LF) terminator.
///
/// Returns `None` when the source is exhausted before any byte arrives.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, FtpClientError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Extracts the status code from the first line of a reply.
fn parse_code(line: &str) -> Result<u16, FtpClientError> {
    let digits = line.as_bytes().get(..3).unwrap_or_default();
    let valid = digits.len() == 3
        && matches!(digits[0], b'1'..=b'5')
        && digits.iter().all(u8::is_ascii_digit);
    if !valid {
        return Err(FtpClientError::Protocol(format!(
            "malformed status line: {:?}",
            line
        )));
    }

    line[..3]
        .parse()
        .map_err(|_| FtpClientError::Protocol(format!("malformed status line: {:?}", line)))
}

/// Reads a complete reply, consuming one line or a whole multi-line block.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply, FtpClientError>
where
    R: AsyncBufRead + Unpin,
{
    let first = read_line(reader)
        .await?
        .ok_or_else(|| FtpClientError::Protocol("connection closed by server".into()))?;

    let code = parse_code(&first)?;
    let multiline = first.as_bytes().get(3) == Some(&b'-');
    let mut lines = vec![first];

    if multiline {
        let terminator = format!("{} ", code);
        loop {
            let line = read_line(reader).await?.ok_or_else(|| {
                FtpClientError::Protocol("incomplete multiline reply".into())
            })?;
            let done = line.starts_with(&terminator);
            lines.push(line);
            if done {
                break;
            }
        }
    }

    Ok(Reply::new(code, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, BufReader};

    #[tokio::test]
    async fn single_line_reply() {
        let mut reader = BufReader::new(&b"220 Service ready\r\n"[..]);
        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code(), 220);
        assert_eq!(reply.lines(), ["220 Service ready"]);
    }

    #[tokio::test]
    async fn single_line_reply_without_text() {
        let mut reader = BufReader::new(&b"200\r\n"[..]);
        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code(), 200);
        assert_eq!(reply.lines().len(), 1);
    }

    #[tokio::test]
    async fn multiline_reply_consumes_exactly_its_block() {
        let input = b"230-a\r\n230-b\r\n230 c\r\n200 next\r\n";
        let mut reader = BufReader::new(&input[..]);

        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code(), 230);
        assert_eq!(reply.lines(), ["230-a", "230-b", "230 c"]);

        let mut rest = String::new();
        reader.read_to_string(&mut rest).await.unwrap();
        assert_eq!(rest, "200 next\r\n");
    }

    #[tokio::test]
    async fn dash_line_with_same_code_does_not_terminate() {
        let input = b"211-Status\r\n211-terminator-looking-but-dash\r\nfree text\r\n211 End\r\n";
        let mut reader = BufReader::new(&input[..]);

        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code(), 211);
        assert_eq!(reply.lines().len(), 4);
        assert_eq!(reply.lines()[3], "211 End");
    }

    #[tokio::test]
    async fn other_code_does_not_terminate() {
        let input = b"220-Welcome\r\n200 not the end\r\n220 ready\r\n";
        let mut reader = BufReader::new(&input[..]);
        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.lines(), ["220-Welcome", "200 not the end", "220 ready"]);
    }

    #[tokio::test]
    async fn bare_lf_terminators_are_accepted() {
        let mut reader = BufReader::new(&b"331 need password\n"[..]);
        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.lines(), ["331 need password"]);
    }

    #[tokio::test]
    async fn closed_source_is_a_protocol_error() {
        let mut reader = BufReader::new(&b""[..]);
        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, FtpClientError::Protocol(msg) if msg.contains("closed")));
    }

    #[tokio::test]
    async fn non_numeric_status_is_rejected() {
        let inputs: [&[u8]; 4] = [b"hello there\r\n", b"22\r\n", b"2x0 odd\r\n", b"999 bad\r\n"];
        for input in inputs {
            let mut reader = BufReader::new(input);
            let err = read_reply(&mut reader).await.unwrap_err();
            assert!(matches!(err, FtpClientError::Protocol(msg) if msg.contains("malformed")));
        }
    }

    #[tokio::test]
    async fn truncated_multiline_reply_is_rejected() {
        let mut reader = BufReader::new(&b"150-first\r\n150-second\r\n"[..]);
        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, FtpClientError::Protocol(msg) if msg.contains("incomplete")));
    }
}
