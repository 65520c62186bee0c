//! Transfer objects and wire-format contracts.
//!
//! Every schema in this module follows the same wire contract:
//! - fields serialize under camelCase names (`#[serde(rename_all = "camelCase")]`),
//!   the compile-time equivalent of an alias generator;
//! - multi-word fields additionally accept their canonical snake_case name on
//!   input via `#[serde(alias = ...)]`;
//! - datetime fields serialize through the fixed ISO-8601 formatters in
//!   [`datetime`];
//! - response schemas are constructible directly from domain entities via
//!   `From` impls.

pub mod account;
pub mod datetime;

pub use account::{AccountResponse, SigninRequest, SignupRequest, UpdateAccountRequest};
