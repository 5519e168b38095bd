//! Drives a [`DiscoveryAgent`] against a [`DiscoveryHost`].
//!
//! ```rust
//! use knx_ip_core::knx_discovery::runner::DiscoveryRunner;
//! use knx_ip_core::net::mock_host::MockHost;
//! use knx_ip_core::{DiscoveryConfig, DiscoveryEvent};
//!
//! let mut runner = DiscoveryRunner::new(MockHost::new(), DiscoveryConfig::default());
//! let events = runner.run().unwrap();
//! assert_eq!(events, [DiscoveryEvent::Started, DiscoveryEvent::Finished]);
//! assert_eq!(runner.host().sent_datagrams().len(), 1);
//! ```

use alloc::vec::Vec;

use super::{DiscoveryAction, DiscoveryAgent, DiscoveryConfig, DiscoveryEvent, DiscoveryInput};
use super::{DiscoveryState, ServerInfo};
use crate::error::{KnxError, Result};
use crate::net::host::{DiscoveryHost, HostEvent};

/// Largest datagram the runner reads; longer ones are truncated and dropped
/// as invalid.
pub const RECEIVE_BUFFER_SIZE: usize = 512;

/// Executes agent actions on a host and collects the emitted events.
#[derive(Debug)]
pub struct DiscoveryRunner<H: DiscoveryHost> {
    host: H,
    agent: DiscoveryAgent,
    events: Vec<DiscoveryEvent>,
    buffer: [u8; RECEIVE_BUFFER_SIZE],
}

impl<H: DiscoveryHost> DiscoveryRunner<H> {
    /// Runner over `host` with an idle agent.
    pub fn new(host: H, config: DiscoveryConfig) -> Self {
        Self {
            host,
            agent: DiscoveryAgent::new(config),
            events: Vec::new(),
            buffer: [0; RECEIVE_BUFFER_SIZE],
        }
    }

    /// Begin a run, dropping undrained events of the previous one. Does
    /// nothing if a run is already in progress.
    pub fn start(&mut self) {
        if self.agent.state() != DiscoveryState::Idle {
            return;
        }
        self.events.clear();
        let now_ms = self.host.now_ms();
        let actions = self.agent.handle(DiscoveryInput::Start { now_ms });
        self.execute(actions);
    }

    /// Wait for one datagram or timer expiry and feed it to the agent.
    ///
    /// Returns `false` once the agent is idle again.
    ///
    /// # Errors
    ///
    /// Returns the host error if receiving fails. The run is stopped first.
    pub fn poll(&mut self) -> Result<bool> {
        if self.agent.state() == DiscoveryState::Idle {
            return Ok(false);
        }

        match self.host.receive_datagram(&mut self.buffer) {
            Ok(HostEvent::Datagram { source, len }) => {
                let payload = &self.buffer[..len.min(RECEIVE_BUFFER_SIZE)];
                let actions = self.agent.handle(DiscoveryInput::Datagram { source, payload });
                self.execute(actions);
            }
            Ok(HostEvent::TimerExpired) => {
                let now_ms = self.host.now_ms();
                let actions = self.agent.handle(DiscoveryInput::Tick { now_ms });
                self.execute(actions);
                // Early expiry: the host timer is spent but the agent still waits
                if let Some(deadline_ms) = self.agent.deadline_ms() {
                    self.host.schedule_after(deadline_ms.saturating_sub(now_ms));
                }
            }
            Err(err) => {
                knx_log!(warn, "discovery receive failed, stopping");
                self.stop();
                return Err(err);
            }
        }
        Ok(self.agent.state() != DiscoveryState::Idle)
    }

    /// Replace the configuration used by the next run.
    ///
    /// # Errors
    ///
    /// Returns [`KnxError::InvalidState`] while a run is in progress.
    pub fn set_config(&mut self, config: DiscoveryConfig) -> Result<()> {
        if self.agent.set_config(config) {
            Ok(())
        } else {
            Err(KnxError::InvalidState)
        }
    }

    /// Abort the current run.
    pub fn stop(&mut self) {
        let actions = self.agent.handle(DiscoveryInput::Stop);
        self.execute(actions);
    }

    /// Start a run, poll until it finishes and return its events.
    ///
    /// # Errors
    ///
    /// Returns the host error if receiving fails.
    pub fn run(&mut self) -> Result<Vec<DiscoveryEvent>> {
        self.start();
        while self.poll()? {}
        Ok(self.take_events())
    }

    /// Drain the events emitted so far.
    pub fn take_events(&mut self) -> Vec<DiscoveryEvent> {
        core::mem::take(&mut self.events)
    }

    /// Servers found by the current or last run.
    pub fn discovered(&self) -> &[ServerInfo] {
        self.agent.discovered()
    }

    /// The state machine.
    pub fn agent(&self) -> &DiscoveryAgent {
        &self.agent
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    fn execute(&mut self, actions: Vec<DiscoveryAction>) {
        for action in actions {
            match action {
                DiscoveryAction::Bind(address) => {
                    let input = match self.host.bind(address) {
                        Ok(local) => DiscoveryInput::SocketBound { local },
                        Err(_err) => {
                            knx_log!(warn, "binding {} failed", address);
                            DiscoveryInput::SocketFailed
                        }
                    };
                    let follow_up = self.agent.handle(input);
                    self.execute(follow_up);
                }
                DiscoveryAction::Send { destination, bytes } => {
                    if self.host.send_datagram(destination, &bytes).is_err() {
                        knx_log!(warn, "sending to {} failed", destination);
                    }
                }
                DiscoveryAction::ArmTimer { deadline_ms } => {
                    let delay_ms = deadline_ms.saturating_sub(self.host.now_ms());
                    self.host.schedule_after(delay_ms);
                }
                DiscoveryAction::CancelTimer => self.host.cancel(),
                DiscoveryAction::CloseSocket => self.host.close(),
                DiscoveryAction::Emit(event) => self.events.push(event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::response;
    use super::*;
    use crate::net::mock_host::MockHost;
    use crate::net::{IpEndpoint, Ipv4Addr};
    use crate::protocol::services::SearchRequest;

    fn server(last: u8) -> IpEndpoint {
        IpEndpoint::new(Ipv4Addr::new(192, 168, 1, last), 3671)
    }

    #[test]
    fn test_run_collects_devices() {
        let mut host = MockHost::new().with_clock(200);
        host.add_datagram(server(10), response(server(10), 1));
        host.add_datagram(server(10), response(server(10), 1));
        host.add_datagram(server(11), response(server(11), 2));
        host.add_datagram(server(12), vec![0x06, 0x10]);

        let local = Ipv4Addr::new(192, 168, 1, 2);
        let config = DiscoveryConfig::default().with_local_address(local);
        let mut runner = DiscoveryRunner::new(host, config);
        let events = runner.run().unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0], DiscoveryEvent::Started);
        let endpoints: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                DiscoveryEvent::DeviceDiscovered(info) => Some(info.control_endpoint),
                _ => None,
            })
            .collect();
        assert_eq!(endpoints, [server(10), server(11)]);
        assert_eq!(events[3], DiscoveryEvent::Finished);
        assert_eq!(runner.discovered().len(), 2);

        let host = runner.into_host();
        let (destination, bytes) = host.last_sent().unwrap();
        assert_eq!(*destination, IpEndpoint::new(Ipv4Addr::KNX_MULTICAST, 3671));
        let request = SearchRequest::from_bytes(bytes, 0).unwrap();
        assert_eq!(
            request.discovery_endpoint().endpoint(),
            IpEndpoint::new(local, MockHost::DEFAULT_LOCAL_PORT)
        );
        assert_eq!(host.now_ms(), 5_200);
        assert_eq!(host.close_count(), 1);
        assert_eq!(host.cancel_count(), 0);
    }

    #[test]
    fn test_bind_failure_finishes() {
        let host = MockHost::failing_bind();
        let mut runner = DiscoveryRunner::new(host, DiscoveryConfig::default());
        let events = runner.run().unwrap();
        assert_eq!(events, [DiscoveryEvent::Started, DiscoveryEvent::Finished]);
        assert!(runner.host().sent_datagrams().is_empty());
        assert_eq!(runner.host().close_count(), 1);
    }

    #[test]
    fn test_stop_cancels_timer() {
        let mut runner = DiscoveryRunner::new(MockHost::new(), DiscoveryConfig::default());
        runner.start();
        assert_eq!(runner.agent().state(), DiscoveryState::Running);
        assert_eq!(runner.host().deadline_ms(), Some(5_000));

        let config = DiscoveryConfig::default().with_timeout_ms(100);
        assert!(matches!(runner.set_config(config), Err(KnxError::InvalidState)));

        runner.stop();
        runner.set_config(config).unwrap();
        assert_eq!(runner.agent().config().timeout_ms, 100);
        assert_eq!(runner.take_events(), [DiscoveryEvent::Started, DiscoveryEvent::Finished]);
        assert_eq!(runner.host().deadline_ms(), None);
        assert_eq!(runner.host().bound_endpoint(), None);
        assert!(!runner.poll().unwrap());
    }

    #[test]
    fn test_restart_drops_previous_events() {
        let mut runner = DiscoveryRunner::new(MockHost::new(), DiscoveryConfig::default());
        runner.start();
        runner.stop();

        runner.start();
        assert_eq!(runner.take_events(), [DiscoveryEvent::Started]);

        runner.start();
        assert!(runner.take_events().is_empty());
        assert_eq!(runner.agent().state(), DiscoveryState::Running);
    }

    #[test]
    fn test_receive_error_stops_run() {
        let mut runner = DiscoveryRunner::new(MockHost::new(), DiscoveryConfig::default());
        runner.start();
        runner.host_mut().cancel();

        let result = runner.poll();
        assert!(matches!(result, Err(KnxError::Transport(_))));
        assert_eq!(runner.agent().state(), DiscoveryState::Idle);
        assert_eq!(runner.take_events().last(), Some(&DiscoveryEvent::Finished));
    }
}
