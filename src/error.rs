//! Error types for operations that have no object to carry validity.
//!
//! Wire structures never fail to parse: they report problems through
//! `is_valid()`. `KnxError` covers the remaining surfaces: text parsing,
//! frame dispatch, byte-store mutation, host I/O and project parsing.
//! Each category wraps a small struct with a private kind and, when the
//! `std` feature is on, a captured backtrace.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for KNX operations.
pub type Result<T> = core::result::Result<T, KnxError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ProtocolErrorKind {
    InvalidFrame,
    UnsupportedVersion,
    UnsupportedServiceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum TransportErrorKind {
    SendFailed,
    ReceiveFailed,
    NotBound,
    SocketError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum AddressingErrorKind {
    InvalidIndividualAddress,
    InvalidGroupAddress,
    OutOfRange,
    MixedNotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DptErrorKind {
    InvalidIdentifier,
    UnsupportedType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum StorageErrorKind {
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ProjectErrorKind {
    UnexpectedElement,
    UnknownAttribute,
    MissingAttribute,
    InvalidAttribute,
    UnexpectedEnd,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// KNX error type.
#[derive(Debug)]
pub enum KnxError {
    /// Frame dispatch errors (header, version, service type).
    Protocol(ProtocolError),
    /// Host collaborator errors (socket, send, receive).
    Transport(TransportError),
    /// Address text or range errors.
    Addressing(AddressingError),
    /// Datapoint type identifier errors.
    Dpt(DptError),
    /// Out-of-range byte store access.
    Storage(StorageError),
    /// Project XML model errors.
    Project(ProjectError),
    /// Operation not allowed in the current state.
    InvalidState,
}

// =============================================================================
// Structured Error Types
// =============================================================================

macro_rules! error_struct {
    ($(#[$meta:meta])* $name:ident, $kind:ty) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            kind: $kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace,
        }

        impl $name {
            pub(crate) fn new(kind: $kind) -> Self {
                Self {
                    kind,
                    #[cfg(feature = "std")]
                    backtrace: Backtrace::capture(),
                }
            }

            /// Backtrace captured when the error was created.
            #[cfg(feature = "std")]
            pub fn backtrace(&self) -> &Backtrace {
                &self.backtrace
            }
        }
    };
}

error_struct!(
    /// Protocol error with optional backtrace
    ProtocolError,
    ProtocolErrorKind
);
error_struct!(
    /// Transport error with optional backtrace
    TransportError,
    TransportErrorKind
);
error_struct!(
    /// Addressing error with optional backtrace
    AddressingError,
    AddressingErrorKind
);
error_struct!(
    /// DPT error with optional backtrace
    DptError,
    DptErrorKind
);
error_struct!(
    /// Byte store error with optional backtrace
    StorageError,
    StorageErrorKind
);
error_struct!(
    /// Project model error with optional backtrace
    ProjectError,
    ProjectErrorKind
);

impl ProtocolError {
    /// Check if this is an invalid frame error
    pub fn is_invalid_frame(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::InvalidFrame)
    }

    /// Check if this is an unsupported version error
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::UnsupportedVersion)
    }

    /// Check if the service type is unknown
    pub fn is_unsupported_service_type(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::UnsupportedServiceType)
    }
}

impl TransportError {
    /// Check if this is a socket error
    pub fn is_socket_error(&self) -> bool {
        matches!(self.kind, TransportErrorKind::SocketError)
    }

    /// Check if the socket was used before being bound
    pub fn is_not_bound(&self) -> bool {
        matches!(self.kind, TransportErrorKind::NotBound)
    }
}

impl AddressingError {
    /// Check if address is out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::OutOfRange)
    }

    /// Check if the text mixed `/` and `.` separators
    pub fn is_mixed_notation(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::MixedNotation)
    }
}

impl DptError {
    /// Check if the identifier string was malformed
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self.kind, DptErrorKind::InvalidIdentifier)
    }

    /// Check if the registry has no such type
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnsupportedType)
    }
}

impl StorageError {
    /// Check if an offset was past the end
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, StorageErrorKind::OutOfRange)
    }
}

impl ProjectError {
    /// Check if pedantic parsing hit an unknown attribute
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self.kind, ProjectErrorKind::UnknownAttribute)
    }

    /// Check if a required attribute was absent
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self.kind, ProjectErrorKind::MissingAttribute)
    }

    /// Check if pedantic parsing hit an unknown child element
    pub fn is_unexpected_element(&self) -> bool {
        matches!(self.kind, ProjectErrorKind::UnexpectedElement)
    }

    /// Check if an attribute value was malformed or too long
    pub fn is_invalid_attribute(&self) -> bool {
        matches!(self.kind, ProjectErrorKind::InvalidAttribute)
    }

    /// Check if the event stream ended inside an element
    pub fn is_unexpected_end(&self) -> bool {
        matches!(self.kind, ProjectErrorKind::UnexpectedEnd)
    }
}

// =============================================================================
// Convenience Constructors for KnxError
// =============================================================================

impl KnxError {
    // Protocol errors
    pub(crate) fn invalid_frame() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::InvalidFrame))
    }

    pub(crate) fn unsupported_version() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::UnsupportedVersion))
    }

    pub(crate) fn unsupported_service_type() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::UnsupportedServiceType))
    }

    // Transport errors
    pub(crate) fn socket_error() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::SocketError))
    }

    pub(crate) fn send_failed() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::SendFailed))
    }

    pub(crate) fn receive_failed() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::ReceiveFailed))
    }

    pub(crate) fn not_bound() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::NotBound))
    }

    // Addressing errors
    pub(crate) fn invalid_group_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidGroupAddress))
    }

    pub(crate) fn invalid_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidGroupAddress))
    }

    pub(crate) fn invalid_individual_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidIndividualAddress))
    }

    pub(crate) fn address_out_of_range() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::OutOfRange))
    }

    pub(crate) fn mixed_address_notation() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::MixedNotation))
    }

    // DPT errors
    pub(crate) fn invalid_dpt_identifier() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::InvalidIdentifier))
    }

    pub(crate) fn unsupported_dpt() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnsupportedType))
    }

    // Byte store errors
    pub(crate) fn offset_out_of_range() -> Self {
        Self::Storage(StorageError::new(StorageErrorKind::OutOfRange))
    }

    // Project errors
    pub(crate) fn unexpected_element() -> Self {
        Self::Project(ProjectError::new(ProjectErrorKind::UnexpectedElement))
    }

    pub(crate) fn unknown_attribute() -> Self {
        Self::Project(ProjectError::new(ProjectErrorKind::UnknownAttribute))
    }

    pub(crate) fn missing_attribute() -> Self {
        Self::Project(ProjectError::new(ProjectErrorKind::MissingAttribute))
    }

    pub(crate) fn invalid_attribute() -> Self {
        Self::Project(ProjectError::new(ProjectErrorKind::InvalidAttribute))
    }

    pub(crate) fn unexpected_end() -> Self {
        Self::Project(ProjectError::new(ProjectErrorKind::UnexpectedEnd))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for KnxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnxError::Protocol(e) => write!(f, "Protocol error: {:?}", e.kind),
            KnxError::Transport(e) => write!(f, "Transport error: {:?}", e.kind),
            KnxError::Addressing(e) => write!(f, "Addressing error: {:?}", e.kind),
            KnxError::Dpt(e) => write!(f, "DPT error: {:?}", e.kind),
            KnxError::Storage(e) => write!(f, "Byte store error: {:?}", e.kind),
            KnxError::Project(e) => write!(f, "Project error: {:?}", e.kind),
            KnxError::InvalidState => write!(f, "Invalid state"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KnxError {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            KnxError::Protocol(e) => defmt::write!(f, "Protocol error: {}", e.kind),
            KnxError::Transport(e) => defmt::write!(f, "Transport error: {}", e.kind),
            KnxError::Addressing(e) => defmt::write!(f, "Addressing error: {}", e.kind),
            KnxError::Dpt(e) => defmt::write!(f, "DPT error: {}", e.kind),
            KnxError::Storage(e) => defmt::write!(f, "Byte store error: {}", e.kind),
            KnxError::Project(e) => defmt::write!(f, "Project error: {}", e.kind),
            KnxError::InvalidState => defmt::write!(f, "Invalid state"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KnxError {}
