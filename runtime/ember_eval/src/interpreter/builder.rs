//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use ember_ir::Location;
use ember_storage::InMemoryStorage;
use ember_values::{CompositeValue, SharedValueStorage, Value};

use super::{Interpreter, PublicKeyValidationHandler};

/// Builder for creating Interpreter instances.
///
/// Every option has a default:
/// - `storage`: a fresh, unlimited [`InMemoryStorage`]
/// - `location`: [`Location::Builtin`]
/// - `public_key_validation_handler`: none, so public-key construction
///   fails with `PublicKeyValidationUnavailable`
#[derive(Default)]
pub struct InterpreterBuilder {
    storage: Option<SharedValueStorage>,
    location: Option<Location>,
    public_key_validation_handler: Option<PublicKeyValidationHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage backend containers are allocated in.
    #[must_use]
    pub fn storage(mut self, storage: SharedValueStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the location of the program being run.
    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the hook that decides whether a public key is valid.
    #[must_use]
    pub fn public_key_validation_handler(
        mut self,
        handler: impl Fn(&Interpreter, &CompositeValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.public_key_validation_handler = Some(Arc::new(handler));
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let storage = self.storage.unwrap_or_else(|| {
            tracing::debug!("no storage configured, using in-memory storage");
            Arc::new(InMemoryStorage::<Value>::new())
        });
        Interpreter {
            storage,
            location: self.location.unwrap_or(Location::Builtin),
            public_key_validation_handler: self.public_key_validation_handler,
        }
    }
}
