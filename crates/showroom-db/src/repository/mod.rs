//! # Repositories
//!
//! One repository per table. Each holds a clone of the pool.

pub mod sale;
pub mod salesperson;
