//! Vitrine Storefront - product page core.
//!
//! This library owns the decision logic behind a storefront product page:
//! resolving user option selections to a concrete variant, aggregating the
//! cart, and estimating shipping from a postal code. Rendering, routing, and
//! notification display are out of scope; callers consume plain data.
//!
//! # Architecture
//!
//! - [`catalog`] - immutable product snapshots fetched over HTTP and cached
//! - [`variant`] - pure variant resolution plus an observable selection model
//! - [`cart`] - cart aggregation with merge-by-identity and persistence
//! - [`shipping`] - postal code normalization, address lookup, cost tiers
//! - [`session`] - short-lived persisted selection memory (15-minute window)
//! - [`store`] - abstract key-value persistence used by cart and session
//!
//! All components are synchronous pure computations except the two network
//! collaborators (catalog fetch, address lookup). Cart mutations take
//! `&mut self`, so the exclusive borrow is the serialization point - no two
//! mutations can interleave on the same cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod shipping;
pub mod store;
pub mod variant;

pub use error::{Result, StorefrontError};
