//! Supported service families DIB.

use alloc::vec::Vec;

use crate::protocol::constants::{DescriptionType, ServiceFamily};
use crate::protocol::structure::{knx_struct, KnxNetIpStruct};

knx_struct!(
    /// `(family, version)` pairs a server supports.
    ///
    /// ```
    /// use knx_ip_core::protocol::constants::ServiceFamily;
    /// use knx_ip_core::protocol::dib::ServiceFamiliesDib;
    ///
    /// let dib = ServiceFamiliesDib::from_families(&[
    ///     (ServiceFamily::Tunneling, 1),
    ///     (ServiceFamily::Core, 1),
    /// ]);
    /// assert_eq!(dib.bytes(), [0x06, 0x02, 0x02, 0x01, 0x04, 0x01]);
    /// assert!(dib.contains(ServiceFamily::Tunneling));
    /// ```
    ServiceFamiliesDib,
    DescriptionType
);

impl ServiceFamiliesDib {
    /// DIB without any family.
    pub fn new() -> Self {
        Self::with_payload(DescriptionType::SupportedServiceFamilies, &[])
    }

    /// DIB listing `families`, ordered by family then version.
    pub fn from_families(families: &[(ServiceFamily, u8)]) -> Self {
        let mut sorted = families.to_vec();
        sorted.sort_unstable_by_key(|&(family, version)| (family as u8, version));
        let mut dib = Self::new();
        for (family, version) in sorted {
            dib.add(family, version);
        }
        dib
    }

    /// Append one pair. Rejected once the one-octet length is exhausted.
    pub fn add(&mut self, family: ServiceFamily, version: u8) -> bool {
        if self.payload().len() + 2 > KnxNetIpStruct::MAX_PAYLOAD_SIZE {
            return false;
        }
        let mut payload = self.payload().to_vec();
        payload.extend_from_slice(&[family as u8, version]);
        *self = Self::with_payload(DescriptionType::SupportedServiceFamilies, &payload);
        true
    }

    /// Known families and their versions in wire order.
    pub fn families(&self) -> Vec<(ServiceFamily, u8)> {
        self.payload()
            .chunks_exact(2)
            .filter_map(|pair| ServiceFamily::from_u8(pair[0]).map(|family| (family, pair[1])))
            .collect()
    }

    /// Highest version listed for `family`.
    pub fn version(&self, family: ServiceFamily) -> Option<u8> {
        self.families()
            .into_iter()
            .filter(|&(f, _)| f == family)
            .map(|(_, version)| version)
            .max()
    }

    /// `true` if `family` is listed in any version.
    pub fn contains(&self, family: ServiceFamily) -> bool {
        self.version(family).is_some()
    }

    /// Even size with the supported families code.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid()
            && self.size() % 2 == 0
            && self.code() == Some(DescriptionType::SupportedServiceFamilies)
    }
}
