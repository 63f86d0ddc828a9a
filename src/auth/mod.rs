//! Service principal credentials and token acquisition

pub mod credentials;
pub mod token;

pub use credentials::Credentials;
pub use token::{AccessToken, TokenAcquirer};
