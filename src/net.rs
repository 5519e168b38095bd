//! IPv4 endpoint types shared by the KNXnet/IP structures and the
//! discovery host interface.
//!
//! Only IPv4 exists in KNXnet/IP 1.0, so these stay small `Copy` types that
//! convert to and from `core::net` where a host socket needs them.

use core::fmt;

pub mod host;
pub mod mock_host;
#[cfg(feature = "std")]
pub mod udp_host;

/// IPv4 address.
///
/// ```
/// use knx_ip_core::net::Ipv4Addr;
///
/// let addr: Ipv4Addr = "192.168.2.12".parse().unwrap();
/// assert_eq!(addr.octets(), [192, 168, 2, 12]);
/// assert_eq!(Ipv4Addr::from(0xE000_170C), Ipv4Addr::KNX_MULTICAST);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4Addr {
    octets: [u8; 4],
}

impl Ipv4Addr {
    /// 0.0.0.0, used in NAT-aware HPAIs.
    pub const UNSPECIFIED: Self = Self::new(0, 0, 0, 0);
    /// 127.0.0.1
    pub const LOCALHOST: Self = Self::new(127, 0, 0, 1);
    /// 224.0.23.12, the KNXnet/IP system setup and routing group.
    pub const KNX_MULTICAST: Self = Self::new(224, 0, 23, 12);

    /// Create an address from four octets.
    #[inline]
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self {
            octets: [a, b, c, d],
        }
    }

    /// The four octets, most significant first.
    #[inline]
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// `true` for 0.0.0.0.
    #[inline]
    pub const fn is_unspecified(&self) -> bool {
        u32::from_be_bytes(self.octets) == 0
    }

    /// `true` for 224.0.0.0/4.
    #[inline]
    pub const fn is_multicast(&self) -> bool {
        self.octets[0] >= 224 && self.octets[0] <= 239
    }
}

impl From<[u8; 4]> for Ipv4Addr {
    #[inline]
    fn from(octets: [u8; 4]) -> Self {
        Self { octets }
    }
}

impl From<Ipv4Addr> for [u8; 4] {
    #[inline]
    fn from(addr: Ipv4Addr) -> [u8; 4] {
        addr.octets
    }
}

impl From<u32> for Ipv4Addr {
    #[inline]
    fn from(ip: u32) -> Self {
        Self {
            octets: ip.to_be_bytes(),
        }
    }
}

impl From<Ipv4Addr> for u32 {
    #[inline]
    fn from(addr: Ipv4Addr) -> u32 {
        u32::from_be_bytes(addr.octets)
    }
}

impl From<core::net::Ipv4Addr> for Ipv4Addr {
    #[inline]
    fn from(addr: core::net::Ipv4Addr) -> Self {
        Self {
            octets: addr.octets(),
        }
    }
}

impl From<Ipv4Addr> for core::net::Ipv4Addr {
    #[inline]
    fn from(addr: Ipv4Addr) -> Self {
        core::net::Ipv4Addr::from(addr.octets)
    }
}

impl fmt::Display for Ipv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl core::str::FromStr for Ipv4Addr {
    type Err = crate::error::KnxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<core::net::Ipv4Addr>()
            .map(Self::from)
            .map_err(|_err| crate::error::KnxError::invalid_address())
    }
}

/// IPv4 address plus UDP port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IpEndpoint {
    /// Host address
    pub address: Ipv4Addr,
    /// UDP port
    pub port: u16,
}

impl IpEndpoint {
    /// NAT placeholder `0.0.0.0:0`.
    pub const UNSPECIFIED: Self = Self::new(Ipv4Addr::UNSPECIFIED, 0);

    /// Create an endpoint.
    #[inline]
    pub const fn new(address: Ipv4Addr, port: u16) -> Self {
        Self { address, port }
    }
}

impl From<core::net::SocketAddrV4> for IpEndpoint {
    fn from(addr: core::net::SocketAddrV4) -> Self {
        Self::new((*addr.ip()).into(), addr.port())
    }
}

impl From<IpEndpoint> for core::net::SocketAddrV4 {
    fn from(endpoint: IpEndpoint) -> Self {
        core::net::SocketAddrV4::new(endpoint.address.into(), endpoint.port)
    }
}

impl fmt::Display for IpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}
