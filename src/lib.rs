//! Green Market - Marketplace Backend
//!
//! This crate implements the HTTP API of an online marketplace: user
//! registration with email verification, a product catalog maintained by
//! admins, and payment status callbacks from the payment gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
