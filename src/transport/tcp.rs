use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for network operations (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (1 MiB); a full game view is a few kilobytes.
const MAX_MESSAGE_SIZE: u32 = 1 << 20;

/// Length-prefixed bincode frames over TCP.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

fn io_error(e: std::io::Error, what: &str) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => {
            anyhow::anyhow!("Connection closed by peer")
        }
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("{} error: {}", what, e),
    }
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Write raw bytes to the stream, bypassing framing.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stream
            .write_all(bytes)
            .await
            .map_err(|e| io_error(e, "Write"))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let dur = self.timeout_duration;
        let max = self.max_message_size;
        let stream = &mut self.stream;
        let send_op = async move {
            let data = bincode::serialize(&msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;

            if data.len() as u64 > max as u64 {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    data.len(),
                    max
                ));
            }

            let len = (data.len() as u32).to_be_bytes();
            stream
                .write_all(&len)
                .await
                .map_err(|e| io_error(e, "Write"))?;
            stream
                .write_all(&data)
                .await
                .map_err(|e| io_error(e, "Write"))?;
            anyhow::Ok(())
        };

        timeout(dur, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", dur))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let dur = self.timeout_duration;
        let max = self.max_message_size;
        let stream = &mut self.stream;
        let recv_op = async move {
            let mut len_buf = [0u8; 4];
            stream
                .read_exact(&mut len_buf)
                .await
                .map_err(|e| io_error(e, "Read"))?;

            let len = u32::from_be_bytes(len_buf);
            if len > max {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    max
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            stream
                .read_exact(&mut buf)
                .await
                .map_err(|e| io_error(e, "Read"))?;

            let msg = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };

        timeout(dur, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", dur))?
    }
}
