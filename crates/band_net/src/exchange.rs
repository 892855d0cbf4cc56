//! The exchange driver: one request/response round trip per invocation.
//!
//! The driver owns a UDP socket bound to an ephemeral local port and
//! connected to the fixed server address supplied at startup. Each call to
//! [`ExchangeDriver::perform_exchange`] performs exactly one cycle:
//!
//! 1. Encode the request and send it as a single datagram.
//! 2. Pause for the quiescence interval (a throttle, not an acknowledgment).
//! 3. Receive until a reply carrying the request's correlation token arrives
//!    or the deadline passes. Stale replies from abandoned round trips are
//!    drained and discarded.
//!
//! There are no retries, no sequence numbers, and no fragmentation; a
//! dropped datagram surfaces as [`ExchangeError::Timeout`] and the caller
//! decides whether to resubmit. `perform_exchange` takes `&mut self`, so at
//! most one request is outstanding per driver.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{Instant, sleep, timeout_at};
use tracing::{debug, info, warn};

use crate::codec;
use crate::envelope::{Request, Response};
use crate::error::ExchangeError;

/// Default pause between send and the first receive attempt.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(200);

/// Default deadline for the receive phase.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default single-datagram ceiling, in bytes, for both directions.
pub const DEFAULT_MAX_DATAGRAM: usize = 50_000;

/// Tunable knobs of the exchange cycle.
///
/// The defaults reproduce the deployed protocol constants; tests and unusual
/// deployments override them.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeConfig {
    /// Pause between sending the request and reading the reply.
    pub quiescence: Duration,
    /// How long the receive phase may last before the round trip fails.
    pub reply_timeout: Duration,
    /// Maximum datagram size accepted in either direction. Payloads beyond
    /// this are rejected on send and truncated by the network on receive.
    pub max_datagram: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            quiescence: DEFAULT_QUIESCENCE,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            max_datagram: DEFAULT_MAX_DATAGRAM,
        }
    }
}

/// Performs single round trips against the collection server.
#[derive(Debug)]
pub struct ExchangeDriver {
    socket: UdpSocket,
    server: SocketAddr,
    config: ExchangeConfig,
}

impl ExchangeDriver {
    /// Bind an ephemeral local port and aim the driver at `server`.
    ///
    /// UDP is connectionless; `connect` only fixes the peer address and lets
    /// the OS filter datagrams from other sources.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Transport`] if the socket cannot be bound.
    pub async fn connect(
        server: SocketAddr,
        config: ExchangeConfig,
    ) -> Result<Self, ExchangeError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(server).await?;
        info!(%server, local = %socket.local_addr()?, "exchange driver bound");
        Ok(Self {
            socket,
            server,
            config,
        })
    }

    /// The server address this driver targets.
    #[must_use]
    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Perform one send → pause → receive cycle.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Oversized`] if the encoded request exceeds the
    ///   datagram ceiling (never sent).
    /// - [`ExchangeError::Transport`] on socket failure.
    /// - [`ExchangeError::Timeout`] if no reply with a matching correlation
    ///   token arrives before the deadline.
    /// - [`ExchangeError::MalformedReply`] if a received datagram does not
    ///   decode; the round trip is abandoned.
    pub async fn perform_exchange(
        &mut self,
        request: &Request,
    ) -> Result<Response, ExchangeError> {
        let bytes = codec::encode(request)?;
        if bytes.len() > self.config.max_datagram {
            return Err(ExchangeError::Oversized {
                len: bytes.len(),
                max: self.config.max_datagram,
            });
        }

        self.socket.send(&bytes).await?;
        debug!(
            command = request.command,
            request_id = request.request_id,
            len = bytes.len(),
            "request sent"
        );

        sleep(self.config.quiescence).await;

        let deadline = Instant::now() + self.config.reply_timeout;
        let mut buf = vec![0u8; self.config.max_datagram];
        loop {
            let received = timeout_at(deadline, self.socket.recv(&mut buf))
                .await
                .map_err(|_| ExchangeError::Timeout(self.config.reply_timeout))?;
            let len = received?;

            let response: Response = codec::decode(&buf[..len])?;
            if response.request_id == request.request_id {
                debug!(request_id = response.request_id, "reply matched");
                return Ok(response);
            }
            // A reply to a round trip we already gave up on. Drop it and
            // keep listening until the deadline.
            warn!(
                expected = request.request_id,
                got = response.request_id,
                "discarding stale reply"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ExchangeConfig {
        ExchangeConfig {
            quiescence: Duration::from_millis(1),
            reply_timeout: Duration::from_millis(500),
            max_datagram: DEFAULT_MAX_DATAGRAM,
        }
    }

    /// Bind a loopback socket standing in for the server.
    async fn fake_server() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    #[tokio::test]
    async fn test_help_round_trip_returns_server_message() {
        let (server, addr) = fake_server().await;
        let mut driver = ExchangeDriver::connect(addr, test_config()).await.unwrap();

        let server_task = tokio::spawn(async move {
            let mut buf = vec![0u8; DEFAULT_MAX_DATAGRAM];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            let request: Request = codec::decode(&buf[..len]).unwrap();
            assert_eq!(request.command, "help");
            let reply = Response::completed(request.request_id, "Available commands: ...");
            server
                .send_to(&codec::encode(&reply).unwrap(), peer)
                .await
                .unwrap();
        });

        let request = Request::new("help", None, None);
        let response = driver.perform_exchange(&request).await.unwrap();
        assert_eq!(response.message, "Available commands: ...");
        assert!(!response.is_denied());
        server_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_reply_resolves_to_timeout() {
        let (_server, addr) = fake_server().await;
        let mut config = test_config();
        config.reply_timeout = Duration::from_millis(50);
        let mut driver = ExchangeDriver::connect(addr, config).await.unwrap();

        let request = Request::new("info", None, None);
        let err = driver.perform_exchange(&request).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_stale_reply_is_discarded() {
        let (server, addr) = fake_server().await;
        let mut driver = ExchangeDriver::connect(addr, test_config()).await.unwrap();

        let server_task = tokio::spawn(async move {
            let mut buf = vec![0u8; DEFAULT_MAX_DATAGRAM];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            let request: Request = codec::decode(&buf[..len]).unwrap();
            // First a reply to some earlier, abandoned round trip.
            let stale = Response::completed("not-this-request", "old news");
            server
                .send_to(&codec::encode(&stale).unwrap(), peer)
                .await
                .unwrap();
            let real = Response::completed(request.request_id, "done");
            server
                .send_to(&codec::encode(&real).unwrap(), peer)
                .await
                .unwrap();
        });

        let request = Request::new("clear", None, None);
        let response = driver.perform_exchange(&request).await.unwrap();
        assert_eq!(response.message, "done");
        server_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_garbage_reply_is_malformed() {
        let (server, addr) = fake_server().await;
        let mut driver = ExchangeDriver::connect(addr, test_config()).await.unwrap();

        let server_task = tokio::spawn(async move {
            let mut buf = vec![0u8; DEFAULT_MAX_DATAGRAM];
            let (_len, peer) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&[0xFF, 0xFF, 0xFF], peer).await.unwrap();
        });

        let request = Request::new("show", None, None);
        let err = driver.perform_exchange(&request).await.unwrap_err();
        assert!(matches!(err, ExchangeError::MalformedReply(_)));
        server_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_oversized_request_is_rejected_before_send() {
        let (_server, addr) = fake_server().await;
        let mut config = test_config();
        config.max_datagram = 16;
        let mut driver = ExchangeDriver::connect(addr, config).await.unwrap();

        let request = Request::new("a".repeat(64), None, None);
        let err = driver.perform_exchange(&request).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Oversized { max: 16, .. }));
    }
}
