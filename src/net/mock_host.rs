//! Scripted host for testing discovery without a network.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::net::host::{DiscoveryHost, HostEvent};
//! use knx_ip_core::net::mock_host::MockHost;
//! use knx_ip_core::{IpEndpoint, Ipv4Addr};
//!
//! let mut mock = MockHost::new();
//! let gateway = IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 10), 3671);
//! mock.add_datagram(gateway, vec![0x06, 0x10, 0x02, 0x02]);
//!
//! mock.bind(Ipv4Addr::UNSPECIFIED).unwrap();
//! let mut buf = [0u8; 16];
//! let event = mock.receive_datagram(&mut buf).unwrap();
//! assert_eq!(event, HostEvent::Datagram { source: gateway, len: 4 });
//! ```

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::error::{KnxError, Result};
use crate::net::host::{DiscoveryHost, HostEvent};
use crate::net::{IpEndpoint, Ipv4Addr};

/// Mock host recording what the runner does.
///
/// The clock only moves when the timer fires. Queued datagrams are
/// delivered first; once the queue is empty, a receive jumps the clock to
/// the timer deadline. A receive with neither fails.
#[derive(Debug)]
pub struct MockHost {
    now_ms: u64,
    local_port: u16,
    bind_fails: bool,
    bound: Option<IpEndpoint>,
    incoming: VecDeque<(IpEndpoint, Vec<u8>)>,
    sent: Vec<(IpEndpoint, Vec<u8>)>,
    deadline_ms: Option<u64>,
    close_count: usize,
    cancel_count: usize,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Port handed out by `bind`.
    pub const DEFAULT_LOCAL_PORT: u16 = 50_000;

    /// Host whose `bind` succeeds.
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            local_port: Self::DEFAULT_LOCAL_PORT,
            bind_fails: false,
            bound: None,
            incoming: VecDeque::new(),
            sent: Vec::new(),
            deadline_ms: None,
            close_count: 0,
            cancel_count: 0,
        }
    }

    /// Host whose `bind` always fails.
    pub fn failing_bind() -> Self {
        Self {
            bind_fails: true,
            ..Self::new()
        }
    }

    /// Start the clock at `now_ms`.
    pub fn with_clock(mut self, now_ms: u64) -> Self {
        self.now_ms = now_ms;
        self
    }

    /// Queue a datagram for the next receive.
    pub fn add_datagram(&mut self, source: IpEndpoint, data: Vec<u8>) {
        self.incoming.push_back((source, data));
    }

    /// Every datagram sent, with its destination.
    pub fn sent_datagrams(&self) -> &[(IpEndpoint, Vec<u8>)] {
        &self.sent
    }

    /// The last datagram sent.
    pub fn last_sent(&self) -> Option<&(IpEndpoint, Vec<u8>)> {
        self.sent.last()
    }

    /// Endpoint of the bound socket.
    pub fn bound_endpoint(&self) -> Option<IpEndpoint> {
        self.bound
    }

    /// Pending timer deadline.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Number of `close` calls.
    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// Number of `cancel` calls.
    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }

    /// Datagrams not yet received.
    pub fn pending_datagrams(&self) -> usize {
        self.incoming.len()
    }
}

impl DiscoveryHost for MockHost {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn bind(&mut self, local: Ipv4Addr) -> Result<IpEndpoint> {
        if self.bind_fails {
            return Err(KnxError::socket_error());
        }
        let endpoint = IpEndpoint::new(local, self.local_port);
        self.bound = Some(endpoint);
        Ok(endpoint)
    }

    fn send_datagram(&mut self, destination: IpEndpoint, payload: &[u8]) -> Result<()> {
        if self.bound.is_none() {
            return Err(KnxError::not_bound());
        }
        self.sent.push((destination, payload.to_vec()));
        Ok(())
    }

    fn receive_datagram(&mut self, buf: &mut [u8]) -> Result<HostEvent> {
        if self.bound.is_none() {
            return Err(KnxError::not_bound());
        }
        if let Some((source, data)) = self.incoming.pop_front() {
            let len = data.len().min(buf.len());
            buf[..len].copy_from_slice(&data[..len]);
            return Ok(HostEvent::Datagram { source, len });
        }
        match self.deadline_ms.take() {
            Some(deadline) => {
                self.now_ms = self.now_ms.max(deadline);
                Ok(HostEvent::TimerExpired)
            }
            None => Err(KnxError::receive_failed()),
        }
    }

    fn schedule_after(&mut self, delay_ms: u64) {
        self.deadline_ms = Some(self.now_ms.saturating_add(delay_ms));
    }

    fn cancel(&mut self) {
        self.deadline_ms = None;
        self.cancel_count += 1;
    }

    fn close(&mut self) {
        self.bound = None;
        self.close_count += 1;
    }
}
