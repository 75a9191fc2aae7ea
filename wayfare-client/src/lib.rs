//! HTTP implementation of the backend API traits.
//!
//! One [`RestClient`] serves every trait in `wayfare_core::api`; views hold it
//! behind the trait objects they need.

pub mod error;
pub mod rest;

pub use error::{ClientError, ClientResult};
pub use rest::RestClient;
