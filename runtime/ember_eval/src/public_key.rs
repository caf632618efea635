//! Builtin `PublicKey` and `SignatureAlgorithm` values.
//!
//! Both are composites declared at [`Location::Builtin`], so their type IDs
//! are the bare type names. A signature algorithm is an enum case whose raw
//! value identifies the algorithm; a public key is a structure holding the
//! key bytes, the algorithm and the verdict of the interpreter's validation
//! hook.

use std::fmt;

use ember_ir::{Address, CompositeKind, Location};
use ember_values::{
    ArrayValue, CompositeValue, NumberValue, SeenReferences, Value, ValueError, ValueResult,
    ENUM_RAW_VALUE_FIELD_NAME,
};

use crate::Interpreter;

pub const PUBLIC_KEY_TYPE_NAME: &str = "PublicKey";
pub const PUBLIC_KEY_PUBLIC_KEY_FIELD: &str = "publicKey";
pub const PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD: &str = "signatureAlgorithm";
pub const PUBLIC_KEY_IS_VALID_FIELD: &str = "isValid";

pub const SIGNATURE_ALGORITHM_TYPE_NAME: &str = "SignatureAlgorithm";

/// Signature algorithms a public key can be used with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    EcdsaP256,
    EcdsaSecp256k1,
}

impl SignatureAlgorithm {
    pub const ALL: [SignatureAlgorithm; 2] = [
        SignatureAlgorithm::EcdsaP256,
        SignatureAlgorithm::EcdsaSecp256k1,
    ];

    /// The enum case's `rawValue`.
    pub const fn raw_value(self) -> u8 {
        match self {
            SignatureAlgorithm::EcdsaP256 => 1,
            SignatureAlgorithm::EcdsaSecp256k1 => 2,
        }
    }

    pub fn from_raw_value(raw_value: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.raw_value() == raw_value)
    }

    /// Case name as written in programs.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256 => "ECDSA_P256",
            SignatureAlgorithm::EcdsaSecp256k1 => "ECDSA_secp256k1",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `SignatureAlgorithm` enum case for `algorithm`, unrooted.
pub fn new_signature_algorithm_value(
    interpreter: &Interpreter,
    algorithm: SignatureAlgorithm,
) -> ValueResult<CompositeValue> {
    CompositeValue::new(
        interpreter.storage(),
        Location::Builtin,
        SIGNATURE_ALGORITHM_TYPE_NAME,
        CompositeKind::Enum,
        [(
            ENUM_RAW_VALUE_FIELD_NAME.to_string(),
            Value::Number(NumberValue::UInt8(algorithm.raw_value())),
        )],
        Address::ZERO,
    )
}

/// Build a `PublicKey` structure from key bytes and a signature algorithm.
///
/// The interpreter's validation hook is run on the composite once
/// `publicKey` and `signatureAlgorithm` are set; its verdict becomes the
/// `isValid` field. Fails with `PublicKeyValidationUnavailable`, before
/// allocating anything, when no hook is configured.
///
/// The key renders as
/// `PublicKey(publicKey: [..], signatureAlgorithm: .., isValid: ..)`.
pub fn new_public_key_value(
    interpreter: &Interpreter,
    public_key: ArrayValue,
    signature_algorithm: CompositeValue,
) -> ValueResult<CompositeValue> {
    let validate = interpreter
        .public_key_validation_handler()
        .ok_or(ValueError::PublicKeyValidationUnavailable)?;

    let key = CompositeValue::new(
        interpreter.storage(),
        Location::Builtin,
        PUBLIC_KEY_TYPE_NAME,
        CompositeKind::Structure,
        [
            (
                PUBLIC_KEY_PUBLIC_KEY_FIELD.to_string(),
                Value::Array(public_key),
            ),
            (
                PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD.to_string(),
                Value::Composite(signature_algorithm),
            ),
        ],
        Address::ZERO,
    )?;

    let is_valid = validate(interpreter, &key);
    tracing::debug!(is_valid, "validated public key");
    key.set_member(PUBLIC_KEY_IS_VALID_FIELD, Value::Bool(is_valid))?;

    Ok(key.with_stringer(|key, seen| {
        format!(
            "PublicKey(publicKey: {}, signatureAlgorithm: {}, isValid: {})",
            field_string(key, PUBLIC_KEY_PUBLIC_KEY_FIELD, seen),
            field_string(key, PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD, seen),
            field_string(key, PUBLIC_KEY_IS_VALID_FIELD, seen),
        )
    }))
}

/// Rendering of one of `key`'s own fields.
fn field_string(key: &CompositeValue, name: &str, seen: &mut SeenReferences) -> String {
    match key.get_member(name) {
        Ok(Some(value)) => value.recursive_string(seen),
        Ok(None) => Value::Nil.recursive_string(seen),
        Err(err) => format!("<error: {err}>"),
    }
}

#[cfg(test)]
mod tests;
