//! KNXnet/IP server discovery via `SEARCH_REQUEST`.
//!
//! [`DiscoveryAgent`] is a pure state machine: every input returns the
//! actions the host must perform. [`runner::DiscoveryRunner`] executes those
//! actions against a [`DiscoveryHost`](crate::net::host::DiscoveryHost).
//!
//! ## Protocol Flow
//!
//! ```text
//! Client                          Server
//!   |                                |
//!   |------- SEARCH_REQUEST -------->| (multicast 224.0.23.12:3671)
//!   |<------ SEARCH_RESPONSE --------|
//!   |<------ SEARCH_RESPONSE --------| (other servers)
//!   |            ...                 |
//!   |        (timeout)               |
//! ```
//!
//! ## States
//!
//! ```text
//! Idle --Start--> Starting --SocketBound--> Running --deadline--> Stopping --> Idle
//!                    |                         |
//!                    +--SocketFailed, Stop-----+--Stop--> Idle
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::knx_discovery::{DiscoveryAction, DiscoveryInput, DiscoveryState};
//! use knx_ip_core::{DiscoveryAgent, DiscoveryConfig, DiscoveryEvent, IpEndpoint, Ipv4Addr};
//!
//! let mut agent = DiscoveryAgent::new(DiscoveryConfig::default());
//! let actions = agent.handle(DiscoveryInput::Start { now_ms: 0 });
//! assert!(actions.contains(&DiscoveryAction::Emit(DiscoveryEvent::Started)));
//!
//! let local = IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 20), 50000);
//! let actions = agent.handle(DiscoveryInput::SocketBound { local });
//! assert!(matches!(actions[0], DiscoveryAction::Send { .. }));
//! assert_eq!(agent.state(), DiscoveryState::Running);
//!
//! let actions = agent.handle(DiscoveryInput::Tick { now_ms: 5000 });
//! assert_eq!(actions.last(), Some(&DiscoveryAction::Emit(DiscoveryEvent::Finished)));
//! assert_eq!(agent.state(), DiscoveryState::Idle);
//! ```

pub mod runner;

use alloc::vec::Vec;

use crate::addressing::IndividualAddress;
use crate::net::{IpEndpoint, Ipv4Addr};
use crate::protocol::constants::{
    HostProtocol, ServiceFamily, KNXNETIP_DEFAULT_PORT, KNXNETIP_MULTICAST_ADDR,
};
use crate::protocol::dib::DeviceName;
use crate::protocol::hpai::Hpai;
use crate::protocol::services::{SearchRequest, SearchResponse};

/// Runtime settings for one discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveryConfig {
    /// Interface address to bind; unspecified binds every interface
    pub local_address: Ipv4Addr,
    /// Where the search request is sent
    pub search_endpoint: IpEndpoint,
    /// How long to collect responses, in milliseconds
    pub timeout_ms: u64,
    /// Ask servers to answer the datagram source instead of the HPAI
    pub nat: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            local_address: Ipv4Addr::UNSPECIFIED,
            search_endpoint: IpEndpoint::new(KNXNETIP_MULTICAST_ADDR, KNXNETIP_DEFAULT_PORT),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
            nat: false,
        }
    }
}

impl DiscoveryConfig {
    /// Response collection window used by default.
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

    /// Bind to `address`.
    pub fn with_local_address(mut self, address: Ipv4Addr) -> Self {
        self.local_address = address;
        self
    }

    /// Send the search request to `endpoint`.
    pub fn with_search_endpoint(mut self, endpoint: IpEndpoint) -> Self {
        self.search_endpoint = endpoint;
        self
    }

    /// Collect responses for `timeout_ms`.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Advertise the `0.0.0.0:0` endpoint.
    pub fn with_nat(mut self, nat: bool) -> Self {
        self.nat = nat;
        self
    }
}

/// Summary of one responding server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerInfo {
    /// Control endpoint; the datagram source when the server sent a NAT HPAI
    pub control_endpoint: IpEndpoint,
    /// KNX serial number
    pub serial_number: [u8; 6],
    /// Friendly name
    pub name: DeviceName,
    /// KNX individual address
    pub individual_address: Option<IndividualAddress>,
    /// Supported service families and versions
    pub service_families: Vec<(ServiceFamily, u8)>,
}

impl ServerInfo {
    fn from_response(response: &SearchResponse, source: IpEndpoint) -> Self {
        let hpai = response.control_endpoint();
        let device = response.device_hardware();
        Self {
            control_endpoint: if hpai.is_nat() { source } else { hpai.endpoint() },
            serial_number: device.serial_number(),
            name: device.device_name(),
            individual_address: device.individual_address(),
            service_families: response.supported_families().families(),
        }
    }

    /// `true` if the server lists `family`.
    pub fn supports(&self, family: ServiceFamily) -> bool {
        self.service_families.iter().any(|&(f, _)| f == family)
    }
}

/// Agent state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscoveryState {
    /// No run in progress
    #[default]
    Idle,
    /// Waiting for the socket
    Starting,
    /// Search request sent, collecting responses
    Running,
    /// Releasing the socket
    Stopping,
}

/// Notifications for the caller, in order
/// `Started`, `DeviceDiscovered`*, `Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscoveryEvent {
    /// A run began
    Started,
    /// A new server answered
    DeviceDiscovered(ServerInfo),
    /// The run ended
    Finished,
}

/// Input fed to [`DiscoveryAgent::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryInput<'a> {
    /// Begin a run
    Start {
        /// Current clock value
        now_ms: u64,
    },
    /// The host bound the socket
    SocketBound {
        /// Bound local endpoint
        local: IpEndpoint,
    },
    /// The host could not bind the socket
    SocketFailed,
    /// A datagram arrived
    Datagram {
        /// Sender
        source: IpEndpoint,
        /// Received bytes
        payload: &'a [u8],
    },
    /// The clock advanced, typically because the timer fired
    Tick {
        /// Current clock value
        now_ms: u64,
    },
    /// Abort the run
    Stop,
}

/// Side effect requested by the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryAction {
    /// Bind a UDP socket on this address
    Bind(Ipv4Addr),
    /// Send a datagram
    Send {
        /// Destination endpoint
        destination: IpEndpoint,
        /// Encoded frame
        bytes: Vec<u8>,
    },
    /// Arm the timer for an absolute deadline
    ArmTimer {
        /// Deadline on the host clock
        deadline_ms: u64,
    },
    /// Disarm the timer
    CancelTimer,
    /// Release the socket
    CloseSocket,
    /// Report an event to the caller
    Emit(DiscoveryEvent),
}

/// Search-request discovery state machine.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryAgent {
    config: DiscoveryConfig,
    state: DiscoveryState,
    started_ms: u64,
    deadline_ms: Option<u64>,
    seen: Vec<(IpEndpoint, [u8; 6])>,
    discovered: Vec<ServerInfo>,
}

impl DiscoveryAgent {
    /// Idle agent using `config`.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Replace the configuration. Rejected unless idle.
    pub fn set_config(&mut self, config: DiscoveryConfig) -> bool {
        if self.state != DiscoveryState::Idle {
            return false;
        }
        self.config = config;
        true
    }

    /// Servers found by the current or last run.
    pub fn discovered(&self) -> &[ServerInfo] {
        &self.discovered
    }

    /// Deadline of the running search.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Advance the machine.
    pub fn handle(&mut self, input: DiscoveryInput<'_>) -> Vec<DiscoveryAction> {
        match (self.state, input) {
            (DiscoveryState::Idle, DiscoveryInput::Start { now_ms }) => self.start(now_ms),
            (DiscoveryState::Starting, DiscoveryInput::SocketBound { local }) => {
                self.socket_bound(local)
            }
            (DiscoveryState::Starting, DiscoveryInput::SocketFailed) => {
                knx_log!(warn, "discovery socket could not be bound");
                self.finish()
            }
            (DiscoveryState::Running, DiscoveryInput::Datagram { source, payload }) => {
                self.datagram(source, payload)
            }
            (DiscoveryState::Running, DiscoveryInput::Tick { now_ms }) => self.tick(now_ms),
            (DiscoveryState::Idle, DiscoveryInput::Stop) => Vec::new(),
            (_, DiscoveryInput::Stop) => self.finish(),
            (_, DiscoveryInput::Datagram { source, .. }) => {
                knx_log!(debug, "dropping datagram from {} outside a run", source);
                Vec::new()
            }
            _ => {
                knx_log!(trace, "ignoring discovery input");
                Vec::new()
            }
        }
    }

    fn start(&mut self, now_ms: u64) -> Vec<DiscoveryAction> {
        knx_log!(info, "discovery starting");
        self.state = DiscoveryState::Starting;
        self.started_ms = now_ms;
        self.deadline_ms = None;
        self.seen.clear();
        self.discovered.clear();
        Vec::from([
            DiscoveryAction::Emit(DiscoveryEvent::Started),
            DiscoveryAction::Bind(self.config.local_address),
        ])
    }

    fn socket_bound(&mut self, local: IpEndpoint) -> Vec<DiscoveryAction> {
        let hpai = if self.config.nat { Hpai::nat() } else { Hpai::udp(local) };
        let deadline_ms = self.started_ms.saturating_add(self.config.timeout_ms);
        self.state = DiscoveryState::Running;
        self.deadline_ms = Some(deadline_ms);
        knx_log!(
            debug,
            "discovery running on {}, searching {}",
            local,
            self.config.search_endpoint
        );
        Vec::from([
            DiscoveryAction::Send {
                destination: self.config.search_endpoint,
                bytes: SearchRequest::new(&hpai).bytes(),
            },
            DiscoveryAction::ArmTimer { deadline_ms },
        ])
    }

    fn datagram(&mut self, source: IpEndpoint, payload: &[u8]) -> Vec<DiscoveryAction> {
        let Some(response) = SearchResponse::from_bytes(payload, 0) else {
            knx_log!(debug, "dropping non search response from {}", source);
            return Vec::new();
        };
        if !response.is_valid()
            || response.control_endpoint().host_protocol() != Some(HostProtocol::Ipv4Udp)
        {
            knx_log!(debug, "dropping invalid search response from {}", source);
            return Vec::new();
        }

        let server = ServerInfo::from_response(&response, source);
        let key = (server.control_endpoint, server.serial_number);
        if self.seen.contains(&key) {
            return Vec::new();
        }
        knx_log!(info, "discovered server at {}", server.control_endpoint);
        self.seen.push(key);
        self.discovered.push(server.clone());
        Vec::from([DiscoveryAction::Emit(DiscoveryEvent::DeviceDiscovered(server))])
    }

    fn tick(&mut self, now_ms: u64) -> Vec<DiscoveryAction> {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.state = DiscoveryState::Stopping;
                self.deadline_ms = None;
                Vec::from([DiscoveryAction::CloseSocket, self.idle()])
            }
            _ => Vec::new(),
        }
    }

    fn finish(&mut self) -> Vec<DiscoveryAction> {
        self.state = DiscoveryState::Stopping;
        let mut actions = Vec::new();
        if self.deadline_ms.take().is_some() {
            actions.push(DiscoveryAction::CancelTimer);
        }
        actions.push(DiscoveryAction::CloseSocket);
        actions.push(self.idle());
        actions
    }

    fn idle(&mut self) -> DiscoveryAction {
        knx_log!(info, "discovery finished with {} servers", self.discovered.len());
        self.state = DiscoveryState::Idle;
        DiscoveryAction::Emit(DiscoveryEvent::Finished)
    }
}
