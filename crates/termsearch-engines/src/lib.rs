//! Terminal Search Engine Registry
//!
//! Six predefined engines plus any number of user-registered ones, and the
//! single active URL template every search goes through.
//!
//! A URL template either contains `%s`, which is replaced by the
//! percent-encoded query, or is a prefix the encoded query is appended to.

mod encode;
mod error;
mod registry;

pub use encode::{build_search_url, encode_query};
pub use error::EngineError;
pub use registry::{
    Engine, EngineListing, EngineRegistry, ACTIVE_ENGINE_KEY, CUSTOM_ENGINES_KEY,
    DEFAULT_ENGINE, PREDEFINED_ENGINES,
};

pub type Result<T> = std::result::Result<T, EngineError>;
