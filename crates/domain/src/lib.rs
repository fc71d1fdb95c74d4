#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

/// Declares an opaque, server-assigned identifier.
macro_rules! string_id {
    ($name: ident) => {
        #[derive(
            derive_more::Deref,
            derive_more::Display,
            Debug,
            Default,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
        )]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

pub(crate) use string_id;

mod auth;
mod credentials;
mod error;
mod filter;
mod program;
mod progress;
mod service;
mod session;
mod subscription;
mod user;
mod workout;

pub use auth::*;
pub use credentials::*;
pub use error::*;
pub use filter::*;
pub use program::*;
pub use progress::*;
pub use service::*;
pub use session::*;
pub use subscription::*;
pub use user::*;
pub use workout::*;
