use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::error::TransportError;

/// Persistent, message-oriented link to the remote server.
#[async_trait]
pub trait RemoteTransport: Send {
    async fn send(&mut self, text: &str) -> Result<(), TransportError>;
    /// Wait for exactly one inbound message.
    async fn receive_one(&mut self) -> Result<Vec<u8>, TransportError>;
    /// Close handshake, then teardown.
    async fn close(&mut self) -> Result<(), TransportError>;
}

pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    read_timeout: Option<Duration>,
}

impl WebSocketTransport {
    pub async fn connect(url: &str, read_timeout: Option<Duration>) -> Result<Self, TransportError> {
        info!("Connecting to WebSocket server at {}", url);
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream, read_timeout })
    }

    async fn read_next(&mut self) -> Result<Vec<u8>, TransportError> {
        loop {
            match self.stream.next().await {
                // Control frames are answered by tungstenite itself.
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => return Err(TransportError::Disconnected),
                Some(Ok(msg)) => return Ok(msg.into_data()),
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl RemoteTransport for WebSocketTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        info!("Sending message: {}", text);
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    async fn receive_one(&mut self) -> Result<Vec<u8>, TransportError> {
        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, self.read_next())
                .await
                .map_err(|_| TransportError::Timeout(limit.as_millis() as u64))?,
            None => self.read_next().await,
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        debug!("Sending close frame");
        self.stream
            .close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "".into(),
            }))
            .await?;
        Ok(())
    }
}
