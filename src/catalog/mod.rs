//! The injected document-store client and its dataset persistence.

pub mod seed;
pub mod store;
