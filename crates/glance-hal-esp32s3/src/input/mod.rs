pub mod keys;

pub use keys::{EpdHatKeys, KeysConfig, KeysError};
