#![warn(clippy::pedantic)]

pub mod local_storage;
pub mod rest;

pub use local_storage::{KeyValueStore, LocalStorage, MemoryStorage, TokenStore};
pub use rest::{GlooNetSendRequest, Method, REST, SendRequest};
