//! Minimal Lower Layer Protocol client for shipping encoded messages.

use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

/// Start block character.
pub const START_BLOCK: u8 = 0x0b;
/// End block character.
pub const END_BLOCK: u8 = 0x1c;
/// Carriage return terminating the frame.
pub const CARRIAGE_RETURN: u8 = 0x0d;

/// Wrap `body` into one MLLP frame.
pub fn frame(body: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(body.len() + 3);
    result.push(START_BLOCK);
    result.extend_from_slice(body.as_bytes());
    result.push(END_BLOCK);
    result.push(CARRIAGE_RETURN);
    result
}

/// Extract the body of the first complete frame in `buf`, if any.
pub fn unframe(buf: &[u8]) -> Option<&[u8]> {
    let start = buf.iter().position(|&b| b == START_BLOCK)? + 1;
    let len = buf[start..]
        .windows(2)
        .position(|w| w == [END_BLOCK, CARRIAGE_RETURN])?;
    Some(&buf[start..start + len])
}

/// Connection parameters of the interface engine.
#[derive(Debug, Clone)]
pub struct Client {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Client {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout,
        }
    }

    /// Send `body` as one frame and return the acknowledgement text.
    ///
    /// The acknowledgement is returned as received and not interpreted.
    pub async fn send_message(&self, body: &str) -> Result<String, anyhow::Error> {
        tokio::time::timeout(self.timeout, self.exchange(body))
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "no acknowledgement from {}:{} within {:?}",
                    &self.host,
                    self.port,
                    self.timeout
                )
            })?
    }

    async fn exchange(&self, body: &str) -> Result<String, anyhow::Error> {
        tracing::debug!("connecting to {}:{}", &self.host, self.port);
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| anyhow::anyhow!("could not connect to {}:{}: {}", &self.host, self.port, e))?;
        stream.write_all(&frame(body)).await?;
        stream.flush().await?;

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            if let Some(ack) = unframe(&buf) {
                return Ok(String::from_utf8_lossy(ack).into_owned());
            }
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                anyhow::bail!(
                    "connection to {}:{} closed before acknowledgement was complete",
                    &self.host,
                    self.port
                );
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    }
}

/// Acknowledgements of one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acks {
    pub tumor: String,
    /// `None` if no normal message was sent.
    pub normal: Option<String>,
}

/// Send the tumor message and, if non-empty, the normal message.
pub async fn send_messages(
    client: &Client,
    tumor: &str,
    normal: &str,
) -> Result<Acks, anyhow::Error> {
    let tumor_ack = client.send_message(tumor).await?;
    tracing::info!("tumor message acknowledged: {:?}", &tumor_ack);
    let normal_ack = if normal.is_empty() {
        None
    } else {
        let ack = client.send_message(normal).await?;
        tracing::info!("normal message acknowledged: {:?}", &ack);
        Some(ack)
    };

    Ok(Acks {
        tumor: tumor_ack,
        normal: normal_ack,
    })
}
