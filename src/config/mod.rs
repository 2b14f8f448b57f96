//! Compositor configuration document access

mod store;

pub use store::{ConfigStore, StoreError, ROOT_ELEMENT};
