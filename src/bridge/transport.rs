//! Length-tolerant framed transport for the editor command protocol.
//!
//! The host server sends exactly one JSON object per connection with no
//! length prefix and no unambiguous terminator, so the only robust
//! completion signal is a successful incremental parse of the accumulated
//! buffer, or the peer closing the connection. [`read_until_complete`]
//! implements that read loop as a plain state machine over
//! [`TryDecode`](crate::protocol::TryDecode); [`exchange`] wraps it in the
//! full connect → write → read → close lifecycle of a single call.
//!
//! Re-parsing a growing buffer on every chunk is quadratic in the worst
//! case, which is acceptable here: responses are bounded by
//! `max_response_size` and in practice top out in the low hundreds of KB.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::{debug, warn};

use crate::bridge::client::BridgeError;
use crate::config::BridgeConfig;
use crate::protocol::{try_decode, TryDecode};

/// Perform one request/response exchange over a fresh TCP connection.
///
/// `timeout` bounds the connect attempt and, separately, the whole
/// write-and-assemble phase. The connection is torn down on every exit path
/// (the stream is owned by this function and dropped on return).
///
/// # Errors
///
/// - [`BridgeError::Connect`] — refused or unreachable within the budget
/// - [`BridgeError::Timeout`] — connect or read budget exhausted
/// - [`BridgeError::ConnectionClosed`] — peer closed before a complete
///   response was assembled (partial bytes attached)
/// - [`BridgeError::Io`] — other I/O failures mid-exchange
///
/// No failure is retried here; retry policy belongs to the caller.
pub async fn exchange(
    config: &BridgeConfig,
    request: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, BridgeError> {
    let addr = config.addr();

    let mut stream = match timeout_at(Instant::now() + timeout, TcpStream::connect(addr.as_str())).await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(source)) => return Err(BridgeError::Connect { addr, source }),
        Err(_) => {
            return Err(BridgeError::Timeout {
                addr,
                elapsed: timeout,
                buffered: 0,
            })
        }
    };

    debug!(%addr, bytes = request.len(), "sending request");
    let deadline = Instant::now() + timeout;
    match timeout_at(deadline, stream.write_all(request)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(BridgeError::Io(e)),
        Err(_) => {
            return Err(BridgeError::Timeout {
                addr,
                elapsed: timeout,
                buffered: 0,
            })
        }
    }

    read_until_complete(
        &mut stream,
        deadline,
        config.chunk_size,
        config.max_response_size,
        &addr,
    )
    .await
}

/// Read from `reader` until the buffer holds one complete JSON value, the
/// peer closes the connection, or `deadline` passes.
///
/// Returns the raw bytes of the complete value (trailing whitespace
/// included). `addr` is used only for diagnostics.
pub async fn read_until_complete<R>(
    reader: &mut R,
    deadline: Instant,
    chunk_size: usize,
    max_response_size: usize,
    addr: &str,
) -> Result<Vec<u8>, BridgeError>
where
    R: AsyncRead + Unpin,
{
    let started = Instant::now();
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    let mut malformed_logged = false;

    loop {
        let read = match timeout_at(deadline, reader.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(BridgeError::Io(e)),
            Err(_) => {
                // Budget exhausted. A buffer that already parses wins over a
                // spurious failure.
                if let TryDecode::Complete(_) = try_decode(&buf) {
                    return Ok(buf);
                }
                warn!(%addr, buffered = buf.len(), "timed out waiting for response");
                return Err(BridgeError::Timeout {
                    addr: addr.to_string(),
                    elapsed: started.elapsed(),
                    buffered: buf.len(),
                });
            }
        };

        if read == 0 {
            // Peer closed the connection; whatever is buffered is the final
            // chunk.
            if let TryDecode::Complete(_) = try_decode(&buf) {
                return Ok(buf);
            }
            warn!(%addr, buffered = buf.len(), "connection closed before response completed");
            return Err(BridgeError::ConnectionClosed {
                addr: addr.to_string(),
                partial: buf,
            });
        }

        buf.extend_from_slice(&chunk[..read]);
        debug!(%addr, read, buffered = buf.len(), "received chunk");

        if buf.len() > max_response_size {
            return Err(BridgeError::Protocol(format!(
                "response from {addr} exceeds the {max_response_size} byte cap"
            )));
        }

        match try_decode(&buf) {
            TryDecode::Complete(_) => return Ok(buf),
            TryDecode::Incomplete => {}
            TryDecode::Malformed(reason) => {
                // Not terminal: the peer closing or the deadline passing
                // decides how this surfaces, with the raw bytes attached.
                if !malformed_logged {
                    warn!(%addr, %reason, "buffer is not valid JSON; reading on");
                    malformed_logged = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::time::sleep;

    /// Test timeout to prevent hanging tests.
    const TEST_DEADLINE: Duration = Duration::from_secs(5);

    fn far_deadline() -> Instant {
        Instant::now() + TEST_DEADLINE
    }

    #[tokio::test]
    async fn test_single_chunk_response() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let response = br#"{"status":"success","result":{"actor_count":3}}"#;

        server.write_all(response).await.expect("write failed");

        let buf = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test")
            .await
            .expect("read failed");
        assert_eq!(buf, response);
    }

    #[tokio::test]
    async fn test_chunked_reassembly_with_delays() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let response =
            br#"{"status":"success","result":{"level":"Untitled","actors":["A","B","C"]}}"#
                .to_vec();

        let writer = tokio::spawn(async move {
            // Deliver in 7-byte slices with delays between them.
            for piece in response.chunks(7) {
                server.write_all(piece).await.expect("write failed");
                server.flush().await.expect("flush failed");
                sleep(Duration::from_millis(5)).await;
            }
            server
        });

        let buf = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test")
            .await
            .expect("read failed");
        let envelope = crate::protocol::decode_response(&buf).expect("decode failed");
        assert!(envelope.is_success());

        writer.await.expect("writer task failed");
    }

    #[tokio::test]
    async fn test_timeout_when_no_bytes_arrive() {
        let (mut client, _server) = tokio::io::duplex(4096);

        let started = Instant::now();
        let deadline = started + Duration::from_millis(100);
        let result = read_until_complete(&mut client, deadline, 4096, 1 << 20, "test").await;

        match result {
            Err(BridgeError::Timeout { buffered, .. }) => assert_eq!(buffered, 0),
            other => panic!("expected Timeout, got {other:?}"),
        }
        assert!(started.elapsed() < TEST_DEADLINE, "read loop hung");
    }

    #[tokio::test]
    async fn test_timeout_keeps_partial_byte_count() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let partial = br#"{"status":"succ"#;
        server.write_all(partial).await.expect("write failed");

        let deadline = Instant::now() + Duration::from_millis(100);
        let result = read_until_complete(&mut client, deadline, 4096, 1 << 20, "test").await;

        match result {
            Err(BridgeError::Timeout { buffered, .. }) => assert_eq!(buffered, partial.len()),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_before_complete() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let partial = br#"{"status": "succ"#;
        server.write_all(partial).await.expect("write failed");
        drop(server);

        let result = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test").await;
        match result {
            Err(BridgeError::ConnectionClosed { partial: bytes, .. }) => {
                assert_eq!(bytes, partial.to_vec());
            }
            other => panic!("expected ConnectionClosed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_with_empty_buffer() {
        let (mut client, server) = tokio::io::duplex(4096);
        drop(server);

        let result = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test").await;
        match result {
            Err(BridgeError::ConnectionClosed { partial, .. }) => assert!(partial.is_empty()),
            other => panic!("expected ConnectionClosed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trailing_newline_accepted() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        server
            .write_all(b"{\"status\":\"success\"}\n")
            .await
            .expect("write failed");

        let buf = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test")
            .await
            .expect("read failed");
        assert!(crate::protocol::decode_response(&buf).is_ok());
    }

    #[tokio::test]
    async fn test_oversized_response_rejected() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let big = format!(r#"{{"status":"success","result":{{"blob":"{}"}}}}"#, "x".repeat(256));
        server.write_all(big.as_bytes()).await.expect("write failed");

        let result = read_until_complete(&mut client, far_deadline(), 4096, 64, "test").await;
        assert!(matches!(result, Err(BridgeError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_malformed_buffer_surfaces_as_connection_closed() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let garbage = b"not json at all";
        server.write_all(garbage).await.expect("write failed");
        drop(server);

        let result = read_until_complete(&mut client, far_deadline(), 4096, 1 << 20, "test").await;
        match result {
            Err(BridgeError::ConnectionClosed { partial, .. }) => {
                assert_eq!(partial, garbage.to_vec());
            }
            other => panic!("expected ConnectionClosed, got {other:?}"),
        }
    }
}
