//! The interpreter handle value operations run against.

mod builder;

pub use builder::InterpreterBuilder;

use std::fmt;
use std::sync::Arc;

use ember_ir::Location;
use ember_values::{CompositeValue, SharedValueStorage, ValueError, ValueResult};

/// Decides whether a `PublicKey` composite holds a valid key.
///
/// Receives the interpreter and the composite under construction, which
/// already carries its `publicKey` and `signatureAlgorithm` fields.
pub type PublicKeyValidationHandler =
    Arc<dyn Fn(&Interpreter, &CompositeValue) -> bool + Send + Sync>;

/// Interpreter state shared by value operations.
///
/// Create with [`Interpreter::builder`]. Values hold storage weakly, so
/// containers allocated in this interpreter's storage stop resolving once
/// the interpreter and every other clone of the storage handle are dropped.
pub struct Interpreter {
    storage: SharedValueStorage,
    location: Location,
    public_key_validation_handler: Option<PublicKeyValidationHandler>,
}

impl Interpreter {
    /// Start configuring an interpreter. See [`InterpreterBuilder`] for the
    /// defaults.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn storage(&self) -> &SharedValueStorage {
        &self.storage
    }

    /// Location of the program being run.
    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn public_key_validation_handler(&self) -> Option<&PublicKeyValidationHandler> {
        self.public_key_validation_handler.as_ref()
    }

    /// Run the configured validation hook against `public_key`.
    pub fn validate_public_key(&self, public_key: &CompositeValue) -> ValueResult<bool> {
        let handler = self
            .public_key_validation_handler
            .as_ref()
            .ok_or(ValueError::PublicKeyValidationUnavailable)?;
        Ok(handler(self, public_key))
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("location", &self.location)
            .field("slab_count", &self.storage.slab_count())
            .field(
                "public_key_validation_handler",
                &self.public_key_validation_handler.is_some(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests;
