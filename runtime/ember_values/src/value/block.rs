//! Block values.

use ember_ir::{Address, StaticType};

use super::{ArrayValue, NumberValue, SharedValueStorage, Value};
use crate::ValueResult;

/// Information about a block: height, view, ID bytes and timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockValue {
    pub height: u64,
    pub view: u64,
    /// `[UInt8]` array of the block ID bytes.
    pub id: ArrayValue,
    /// Raw `UFix64` seconds, scaled by [`FIX64_SCALE`](super::FIX64_SCALE).
    pub timestamp: u64,
}

impl BlockValue {
    /// Build a block whose ID array is allocated unrooted in `storage`.
    pub fn new(
        storage: &SharedValueStorage,
        height: u64,
        view: u64,
        id: &[u8],
        timestamp: u64,
    ) -> ValueResult<Self> {
        let id = ArrayValue::new_with_address(
            storage,
            Some(StaticType::byte_array()),
            Address::ZERO,
            id.iter().map(|byte| Value::Number(NumberValue::UInt8(*byte))),
        )?;
        Ok(BlockValue {
            height,
            view,
            id,
            timestamp,
        })
    }

    #[inline]
    pub fn timestamp_value(&self) -> NumberValue {
        NumberValue::UFix64(self.timestamp)
    }

    /// Lower-case hex of the ID bytes. Elements that are not bytes are
    /// skipped.
    pub fn id_hex(&self) -> ValueResult<String> {
        let bytes: Vec<u8> = self
            .id
            .elements()?
            .iter()
            .filter_map(|element| match element {
                Value::Number(n) => n.to_u8(),
                _ => None,
            })
            .collect();
        Ok(hex::encode(bytes))
    }
}
