//! `std::net` implementation of [`DiscoveryHost`].

use std::io::ErrorKind;
use std::net::{SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant};

use crate::error::{KnxError, Result};
use crate::net::host::{DiscoveryHost, HostEvent};
use crate::net::{IpEndpoint, Ipv4Addr};

/// Blocking UDP host.
///
/// `receive_datagram` blocks until a datagram arrives or the scheduled
/// deadline passes. Without a deadline it blocks indefinitely.
#[derive(Debug)]
pub struct StdUdpHost {
    socket: Option<UdpSocket>,
    origin: Instant,
    deadline: Option<Instant>,
    multicast_ttl: u32,
}

impl Default for StdUdpHost {
    fn default() -> Self {
        Self::new()
    }
}

impl StdUdpHost {
    /// Host with the multicast TTL routers expect.
    pub fn new() -> Self {
        Self {
            socket: None,
            origin: Instant::now(),
            deadline: None,
            multicast_ttl: 16,
        }
    }

    /// Use `ttl` for multicast search requests.
    pub fn with_multicast_ttl(mut self, ttl: u32) -> Self {
        self.multicast_ttl = ttl;
        self
    }

    fn socket(&self) -> Result<&UdpSocket> {
        self.socket.as_ref().ok_or_else(KnxError::not_bound)
    }
}

impl DiscoveryHost for StdUdpHost {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn bind(&mut self, local: Ipv4Addr) -> Result<IpEndpoint> {
        let socket = UdpSocket::bind(SocketAddrV4::new(local.into(), 0))
            .map_err(|_err| KnxError::socket_error())?;
        socket
            .set_multicast_ttl_v4(self.multicast_ttl)
            .map_err(|_err| KnxError::socket_error())?;
        let endpoint = match socket.local_addr().map_err(|_err| KnxError::socket_error())? {
            SocketAddr::V4(addr) => IpEndpoint::from(addr),
            SocketAddr::V6(_) => return Err(KnxError::socket_error()),
        };
        knx_log!(debug, "bound discovery socket on {}", endpoint);
        self.socket = Some(socket);
        Ok(endpoint)
    }

    fn send_datagram(&mut self, destination: IpEndpoint, payload: &[u8]) -> Result<()> {
        self.socket()?
            .send_to(payload, SocketAddrV4::from(destination))
            .map_err(|_err| KnxError::send_failed())?;
        Ok(())
    }

    fn receive_datagram(&mut self, buf: &mut [u8]) -> Result<HostEvent> {
        loop {
            let timeout = match self.deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        self.deadline = None;
                        return Ok(HostEvent::TimerExpired);
                    }
                    Some(remaining.max(Duration::from_millis(1)))
                }
                None => None,
            };
            let socket = self.socket()?;
            socket
                .set_read_timeout(timeout)
                .map_err(|_err| KnxError::receive_failed())?;

            match socket.recv_from(buf) {
                Ok((len, SocketAddr::V4(source))) => {
                    return Ok(HostEvent::Datagram {
                        source: source.into(),
                        len,
                    })
                }
                Ok((_, SocketAddr::V6(_))) => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    continue
                }
                Err(_err) => return Err(KnxError::receive_failed()),
            }
        }
    }

    fn schedule_after(&mut self, delay_ms: u64) {
        self.deadline = Some(Instant::now() + Duration::from_millis(delay_ms));
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn close(&mut self) {
        self.socket = None;
    }
}
