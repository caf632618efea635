//! Fixed-width account addresses.

use std::fmt;

/// Error when building an address from a byte slice that does not fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// More bytes than [`Address::LENGTH`] were supplied.
    TooLong(usize),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::TooLong(len) => write!(
                f,
                "address too long: got {len} bytes, at most {} allowed",
                Address::LENGTH
            ),
        }
    }
}

impl std::error::Error for AddressError {}

/// An 8-byte account address.
///
/// Containers and composites record the address of the account root they
/// currently belong to. [`Address::ZERO`] means the value is unrooted.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

const ADDRESS_LENGTH: usize = 8;

impl Address {
    /// Number of bytes in an address.
    pub const LENGTH: usize = ADDRESS_LENGTH;

    /// The unrooted address.
    pub const ZERO: Address = Address([0; ADDRESS_LENGTH]);

    /// Create an address from up to [`Address::LENGTH`] bytes.
    ///
    /// Shorter inputs are left-padded with zeros, so `[1, 2]` becomes
    /// `0x0000000000000102`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() > Self::LENGTH {
            return Err(AddressError::TooLong(bytes.len()));
        }
        let mut raw = [0; Self::LENGTH];
        let offset = Self::LENGTH - bytes.len();
        raw[offset..].copy_from_slice(bytes);
        Ok(Address(raw))
    }

    /// Check whether this is the unrooted address.
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Full-width lowercase hex, without prefix (always 16 digits).
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Hex without leading zeros, keeping at least one digit.
    pub fn short_hex(&self) -> String {
        let full = self.hex();
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.short_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.hex())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(raw: [u8; ADDRESS_LENGTH]) -> Self {
        Address(raw)
    }
}
