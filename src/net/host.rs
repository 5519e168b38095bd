//! Host collaborator for the discovery runner.
//!
//! The discovery agent never touches sockets or clocks. A
//! [`DiscoveryHost`] supplies them: one UDP socket, one timer and a
//! millisecond clock. [`MockHost`](super::mock_host::MockHost) scripts them
//! for tests; `StdUdpHost` (feature `std`) uses `std::net::UdpSocket`.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::net::host::{DiscoveryHost, HostEvent};
//! use knx_ip_core::net::mock_host::MockHost;
//! use knx_ip_core::{IpEndpoint, Ipv4Addr};
//!
//! let mut host = MockHost::new();
//! let local = host.bind(Ipv4Addr::LOCALHOST).unwrap();
//! host.schedule_after(100);
//!
//! let mut buf = [0u8; 64];
//! assert_eq!(host.receive_datagram(&mut buf).unwrap(), HostEvent::TimerExpired);
//! assert_eq!(host.now_ms(), 100);
//! # let _ = local;
//! ```

use crate::error::Result;
use crate::net::{IpEndpoint, Ipv4Addr};

/// Outcome of waiting on the host socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// `len` bytes arrived from `source`
    Datagram {
        /// Sender of the datagram
        source: IpEndpoint,
        /// Bytes written to the receive buffer
        len: usize,
    },
    /// The scheduled timer fired before anything arrived
    TimerExpired,
}

/// Socket, timer and clock used by the discovery runner.
///
/// Implementations own at most one socket and one timer. Scheduling a new
/// timer replaces the old one.
pub trait DiscoveryHost {
    /// Milliseconds on a monotonic clock.
    fn now_ms(&self) -> u64;

    /// Bind a UDP socket on `local` with an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns error if no socket could be bound.
    fn bind(&mut self, local: Ipv4Addr) -> Result<IpEndpoint>;

    /// Send one datagram.
    ///
    /// # Errors
    ///
    /// Returns error if the socket is not bound or the send fails.
    fn send_datagram(&mut self, destination: IpEndpoint, payload: &[u8]) -> Result<()>;

    /// Wait for the next datagram or for the timer, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns error if the socket is not bound, the receive fails, or
    /// nothing can ever arrive.
    fn receive_datagram(&mut self, buf: &mut [u8]) -> Result<HostEvent>;

    /// Arm the timer `delay_ms` from now.
    fn schedule_after(&mut self, delay_ms: u64);

    /// Disarm the timer.
    fn cancel(&mut self);

    /// Release the socket.
    fn close(&mut self);
}
