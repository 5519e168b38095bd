//! IP configuration DIBs.

use bitflags::bitflags;

use crate::codec;
use crate::net::Ipv4Addr;
use crate::protocol::constants::DescriptionType;
use crate::protocol::structure::knx_struct;

bitflags! {
    /// IP address assignment capabilities of a device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IpCapabilities: u8 {
        /// BootP
        const BOOTP = 0x01;
        /// DHCP
        const DHCP = 0x02;
        /// AutoIP
        const AUTO_IP = 0x04;
    }
}

bitflags! {
    /// IP address assignment methods.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IpAssignmentMethods: u8 {
        /// Manually configured
        const MANUAL = 0x01;
        /// BootP
        const BOOTP = 0x02;
        /// DHCP
        const DHCP = 0x04;
        /// AutoIP
        const AUTO_IP = 0x08;
    }
}

knx_struct!(
    /// Configured IP parameters, capabilities and enabled assignment methods.
    ///
    /// ```text
    /// [0x10][0x03][ip:4][mask:4][gateway:4][capabilities][methods]
    /// ```
    IpConfigDib,
    DescriptionType
);

impl IpConfigDib {
    /// Encoded size.
    pub const SIZE: usize = 16;

    /// Build the DIB.
    pub fn new(
        ip_address: Ipv4Addr,
        subnet_mask: Ipv4Addr,
        gateway: Ipv4Addr,
        capabilities: IpCapabilities,
        methods: IpAssignmentMethods,
    ) -> Self {
        let mut payload = [0u8; Self::SIZE - 2];
        write_addresses(&mut payload, &[ip_address, subnet_mask, gateway]);
        payload[12] = capabilities.bits();
        payload[13] = methods.bits();
        Self::with_payload(DescriptionType::IpConfig, &payload)
    }

    /// Configured IP address.
    pub fn ip_address(&self) -> Ipv4Addr {
        address_at(self.payload(), 0)
    }

    /// Configured subnet mask.
    pub fn subnet_mask(&self) -> Ipv4Addr {
        address_at(self.payload(), 4)
    }

    /// Configured default gateway.
    pub fn default_gateway(&self) -> Ipv4Addr {
        address_at(self.payload(), 8)
    }

    /// Capabilities, unknown bits dropped.
    pub fn capabilities(&self) -> IpCapabilities {
        IpCapabilities::from_bits_truncate(self.payload().get(12).copied().unwrap_or(0))
    }

    /// Enabled assignment methods, unknown bits dropped.
    pub fn assignment_methods(&self) -> IpAssignmentMethods {
        IpAssignmentMethods::from_bits_truncate(self.payload().get(13).copied().unwrap_or(0))
    }

    /// 16 bytes with the IP config code.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid()
            && self.size() == Self::SIZE
            && self.code() == Some(DescriptionType::IpConfig)
    }
}

knx_struct!(
    /// IP parameters currently in use.
    ///
    /// ```text
    /// [0x14][0x04][ip:4][mask:4][gateway:4][dhcp server:4][method][reserved]
    /// ```
    CurrentIpConfigDib,
    DescriptionType
);

impl CurrentIpConfigDib {
    /// Encoded size.
    pub const SIZE: usize = 20;

    /// Build the DIB. Anything but exactly one assignment method yields an
    /// empty, invalid DIB.
    pub fn new(
        ip_address: Ipv4Addr,
        subnet_mask: Ipv4Addr,
        gateway: Ipv4Addr,
        dhcp_server: Ipv4Addr,
        method: IpAssignmentMethods,
    ) -> Self {
        if method.bits().count_ones() != 1 {
            return Self::default();
        }
        let mut payload = [0u8; Self::SIZE - 2];
        write_addresses(&mut payload, &[ip_address, subnet_mask, gateway, dhcp_server]);
        payload[16] = method.bits();
        Self::with_payload(DescriptionType::CurrentIpConfig, &payload)
    }

    /// Current IP address.
    pub fn ip_address(&self) -> Ipv4Addr {
        address_at(self.payload(), 0)
    }

    /// Current subnet mask.
    pub fn subnet_mask(&self) -> Ipv4Addr {
        address_at(self.payload(), 4)
    }

    /// Current default gateway.
    pub fn default_gateway(&self) -> Ipv4Addr {
        address_at(self.payload(), 8)
    }

    /// DHCP or BootP server that assigned the address.
    pub fn dhcp_server(&self) -> Ipv4Addr {
        address_at(self.payload(), 12)
    }

    /// Method the address was assigned with.
    pub fn assignment_method(&self) -> IpAssignmentMethods {
        IpAssignmentMethods::from_bits_retain(self.payload().get(16).copied().unwrap_or(0))
    }

    /// 20 bytes, current config code and exactly one known method bit.
    pub fn is_valid(&self) -> bool {
        let method = self.assignment_method();
        self.as_struct().is_valid()
            && self.size() == Self::SIZE
            && self.code() == Some(DescriptionType::CurrentIpConfig)
            && method.bits().count_ones() == 1
            && IpAssignmentMethods::all().contains(method)
    }
}

fn write_addresses(payload: &mut [u8], addresses: &[Ipv4Addr]) {
    for (chunk, address) in payload.chunks_exact_mut(4).zip(addresses) {
        chunk.copy_from_slice(&codec::host_address_to_bytes(*address));
    }
}

fn address_at(payload: &[u8], offset: usize) -> Ipv4Addr {
    codec::host_address_from_bytes(payload, offset).unwrap_or_default()
}
