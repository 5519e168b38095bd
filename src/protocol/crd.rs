//! Connection response data block (CRD).

use crate::addressing::IndividualAddress;
use crate::protocol::constants::ConnectionType;
use crate::protocol::structure::knx_struct;

knx_struct!(
    /// Connection data returned in a connect response.
    Crd,
    ConnectionType
);

impl Crd {
    /// Size of a tunnel CRD.
    pub const TUNNEL_SIZE: usize = 4;
    /// Size of every other CRD.
    pub const BASIC_SIZE: usize = 2;

    /// CRD without connection-specific data.
    pub fn new(connection_type: ConnectionType) -> Self {
        Self::with_payload(connection_type, &[])
    }

    /// Tunnel CRD assigning `address` to the client.
    pub fn tunnel(address: IndividualAddress) -> Self {
        Self::with_payload(ConnectionType::Tunnel, &address.bytes())
    }

    /// Connection type of the established connection.
    pub fn connection_type(&self) -> Option<ConnectionType> {
        self.code()
    }

    /// Address assigned to a tunnel client.
    pub fn individual_address(&self) -> Option<IndividualAddress> {
        if self.code() != Some(ConnectionType::Tunnel) {
            return None;
        }
        IndividualAddress::from_bytes(self.payload(), 0)
    }

    /// Assign a new tunnel address. Rejected for non-tunnel CRDs.
    pub fn set_individual_address(&mut self, address: IndividualAddress) -> bool {
        if self.code() != Some(ConnectionType::Tunnel) {
            return false;
        }
        *self = Self::tunnel(address);
        true
    }

    /// Size matches the connection type.
    pub fn is_valid(&self) -> bool {
        if !self.as_struct().is_valid() {
            return false;
        }
        match self.code() {
            Some(ConnectionType::Tunnel) => {
                self.size() == Self::TUNNEL_SIZE && self.individual_address().is_some()
            }
            Some(_) => self.size() == Self::BASIC_SIZE,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tunnel() {
        let address = IndividualAddress::new(1, 1, 10).unwrap();
        let mut crd = Crd::tunnel(address);
        assert_eq!(crd.bytes(), [0x04, 0x04, 0x11, 0x0A]);
        assert_eq!(crd.individual_address(), Some(address));
        assert!(crd.is_valid());

        let other = IndividualAddress::new(2, 3, 4).unwrap();
        assert!(crd.set_individual_address(other));
        assert_eq!(crd.individual_address(), Some(other));
    }

    #[test]
    fn test_basic() {
        let mut crd = Crd::new(ConnectionType::RemoteLogging);
        assert_eq!(crd.bytes(), [0x02, 0x06]);
        assert!(crd.is_valid());
        assert!(!crd.set_individual_address(IndividualAddress::from(0x1101)));
        assert_eq!(crd.individual_address(), None);
    }

    #[test]
    fn test_invalid() {
        assert!(!Crd::from_bytes(&[0x02, 0x04], 0).is_valid());
        assert!(!Crd::from_bytes(&[0x04, 0x03, 0x11, 0x01], 0).is_valid());
        assert!(!Crd::from_bytes(&[0x02, 0x01], 0).is_valid());
    }
}
