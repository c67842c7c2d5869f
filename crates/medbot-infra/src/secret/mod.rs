//! Secret lookup.
//!
//! API keys only ever come from the environment; see [`env`].

pub mod env;

pub use env::EnvSecretProvider;
