//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Media host upload client
//! - Outbound mail transport
//! - Rate limiting infrastructure

pub mod cookie;
pub mod mail;
pub mod media;
pub mod password;
pub mod rate_limit;
