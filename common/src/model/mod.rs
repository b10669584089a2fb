//! Domain models for the accounts storage service

pub mod account;

pub use account::{Account, AccountCreate, AccountUpdate};
