//! Storefront and administration core for a single-vendor food-ordering site.
//!
//! Menu, coupons and order history each live in a persisted record owned by
//! one [`actor_framework::ResourceActor`]. Customers interact through a
//! [`app_system::Session`] (cart, coupon, checkout); the administrator through
//! an [`app_system::AdminConsole`]. [`app_system::StorefrontSystem`] wires it
//! all together.

pub mod actor_framework;
pub mod app_system;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod coupons;
pub mod domain;
pub mod ledger;
pub mod orders;
pub mod storage;

#[cfg(test)]
mod mock_framework;
