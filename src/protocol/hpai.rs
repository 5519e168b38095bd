//! Host protocol address information (HPAI).
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────────┬─────────────┐
//! │ Structure Len│ Host Protocol│  IPv4 Address    │  UDP Port   │
//! │   (0x08)     │ (0x01 UDP)   │   (4 bytes)      │  (2 bytes)  │
//! └──────────────┴──────────────┴──────────────────┴─────────────┘
//! ```

use crate::codec;
use crate::net::{IpEndpoint, Ipv4Addr};
use crate::protocol::constants::HostProtocol;
use crate::protocol::structure::knx_struct;

knx_struct!(
    /// Endpoint of a KNXnet/IP client or server.
    ///
    /// An all-zero endpoint asks the peer to reply to the datagram's source
    /// (NAT mode).
    ///
    /// ```
    /// use knx_ip_core::net::{IpEndpoint, Ipv4Addr};
    /// use knx_ip_core::protocol::hpai::Hpai;
    ///
    /// let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 10), 3671));
    /// assert_eq!(hpai.bytes(), [0x08, 0x01, 192, 168, 1, 10, 0x0E, 0x57]);
    /// assert!(hpai.is_valid());
    /// ```
    Hpai,
    HostProtocol
);

impl Hpai {
    /// Encoded size.
    pub const SIZE: usize = 8;

    /// Build an HPAI for `endpoint` over `protocol`.
    pub fn new(protocol: HostProtocol, endpoint: IpEndpoint) -> Self {
        let mut payload = [0u8; 6];
        payload[..4].copy_from_slice(&codec::host_address_to_bytes(endpoint.address));
        payload[4..].copy_from_slice(&codec::u16_to_bytes(endpoint.port));
        Self::with_payload(protocol, &payload)
    }

    /// UDP endpoint.
    pub fn udp(endpoint: IpEndpoint) -> Self {
        Self::new(HostProtocol::Ipv4Udp, endpoint)
    }

    /// The `0.0.0.0:0` UDP endpoint used behind NAT.
    pub fn nat() -> Self {
        Self::udp(IpEndpoint::UNSPECIFIED)
    }

    /// Host protocol, `None` when unknown.
    pub fn host_protocol(&self) -> Option<HostProtocol> {
        self.code()
    }

    /// Host address, unspecified when missing.
    pub fn address(&self) -> Ipv4Addr {
        codec::host_address_from_bytes(self.payload(), 0).unwrap_or_default()
    }

    /// Port, 0 when missing.
    pub fn port(&self) -> u16 {
        codec::u16_from_bytes(self.payload(), 4).unwrap_or(0)
    }

    /// Address and port together.
    pub fn endpoint(&self) -> IpEndpoint {
        IpEndpoint::new(self.address(), self.port())
    }

    /// `true` for the NAT placeholder endpoint.
    pub fn is_nat(&self) -> bool {
        self.endpoint() == IpEndpoint::UNSPECIFIED
    }

    /// Exactly 8 bytes with a known host protocol.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid() && self.size() == Self::SIZE && self.code().is_some()
    }
}
