//! Numeric values.
//!
//! Every concrete numeric kind is its own variant of [`NumberValue`], so two
//! numbers of different kinds are never equal even when they hold the same
//! bit pattern. The fixed-point kinds store a scaled 64-bit integer with
//! eight fractional digits.

use std::fmt;

use ember_ir::PrimitiveStaticType;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

/// Scale of `Fix64` and `UFix64`: eight fractional decimal digits.
pub const FIX64_SCALE: u64 = 100_000_000;

macro_rules! define_number_values {
    ($( $variant:ident($repr:ty) ),+ $(,)?) => {
        /// A number of one concrete kind.
        ///
        /// Variant names match the kind's [`PrimitiveStaticType`].
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum NumberValue {
            $( $variant($repr), )+
            /// Signed fixed-point, raw value scaled by [`FIX64_SCALE`].
            Fix64(i64),
            /// Unsigned fixed-point, raw value scaled by [`FIX64_SCALE`].
            UFix64(u64),
        }

        impl NumberValue {
            /// The static type of this number's kind.
            pub fn static_type(&self) -> PrimitiveStaticType {
                match self {
                    $( NumberValue::$variant(_) => PrimitiveStaticType::$variant, )+
                    NumberValue::Fix64(_) => PrimitiveStaticType::Fix64,
                    NumberValue::UFix64(_) => PrimitiveStaticType::UFix64,
                }
            }

            /// The value as a byte, if it is an integer in `0..=255`.
            pub fn to_u8(&self) -> Option<u8> {
                match self {
                    $( NumberValue::$variant(n) => n.to_u8(), )+
                    NumberValue::Fix64(_) | NumberValue::UFix64(_) => None,
                }
            }
        }

        impl fmt::Display for NumberValue {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( NumberValue::$variant(n) => write!(f, "{n}"), )+
                    NumberValue::Fix64(raw) => write_fixed_point(f, *raw < 0, raw.unsigned_abs()),
                    NumberValue::UFix64(raw) => write_fixed_point(f, false, *raw),
                }
            }
        }
    };
}

define_number_values! {
    Int(BigInt),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(BigInt),
    UInt(BigUint),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt256(BigUint),
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),
}

fn write_fixed_point(f: &mut fmt::Formatter<'_>, negative: bool, magnitude: u64) -> fmt::Result {
    let sign = if negative { "-" } else { "" };
    write!(
        f,
        "{sign}{}.{:08}",
        magnitude / FIX64_SCALE,
        magnitude % FIX64_SCALE
    )
}

impl NumberValue {
    /// Arbitrary-precision signed integer.
    pub fn int(n: impl Into<BigInt>) -> Self {
        NumberValue::Int(n.into())
    }

    /// Arbitrary-precision unsigned integer.
    pub fn uint(n: impl Into<BigUint>) -> Self {
        NumberValue::UInt(n.into())
    }

    /// 256-bit signed integer. The range is not checked here.
    pub fn int256(n: impl Into<BigInt>) -> Self {
        NumberValue::Int256(n.into())
    }

    /// 256-bit unsigned integer. The range is not checked here.
    pub fn uint256(n: impl Into<BigUint>) -> Self {
        NumberValue::UInt256(n.into())
    }

    /// `Fix64` holding the whole number `integer`, or `None` on overflow.
    pub fn fix64_with_integer(integer: i64) -> Option<Self> {
        let scale = i64::try_from(FIX64_SCALE).ok()?;
        integer.checked_mul(scale).map(NumberValue::Fix64)
    }

    /// `UFix64` holding the whole number `integer`, or `None` on overflow.
    pub fn ufix64_with_integer(integer: u64) -> Option<Self> {
        integer.checked_mul(FIX64_SCALE).map(NumberValue::UFix64)
    }

    #[inline]
    pub fn is_fixed_point(&self) -> bool {
        matches!(self, NumberValue::Fix64(_) | NumberValue::UFix64(_))
    }
}
