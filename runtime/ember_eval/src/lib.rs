//! Ember Eval - interpreter configuration for the Ember runtime.
//!
//! The interpreter's evaluation loop lives elsewhere. This crate holds the
//! state every value operation runs against: the slab storage that backs
//! containers, the program location, and the caller-supplied hooks, plus the
//! builtin values that need those hooks to be built (`PublicKey`,
//! `SignatureAlgorithm`).

mod interpreter;
mod public_key;

pub use interpreter::{Interpreter, InterpreterBuilder, PublicKeyValidationHandler};
pub use public_key::{
    new_public_key_value, new_signature_algorithm_value, SignatureAlgorithm,
    PUBLIC_KEY_IS_VALID_FIELD, PUBLIC_KEY_PUBLIC_KEY_FIELD, PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD,
    PUBLIC_KEY_TYPE_NAME, SIGNATURE_ALGORITHM_TYPE_NAME,
};

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for the runtime crates, filtered by
/// `RUST_LOG` (e.g. `RUST_LOG=ember_values=debug,ember_storage=trace`).
///
/// Nothing is installed when `RUST_LOG` is unset or another global
/// subscriber is already in place. Returns whether this call installed it;
/// every call after the first returns `false`.
pub fn init_tracing() -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init()
            .is_ok();
    });
    installed
}

#[cfg(test)]
mod tests;
