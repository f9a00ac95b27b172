//! # Domain Model
//!
//! Plain data structures shared by the actors, the checkout and the session.
//! The records that are journaled (`Cart`, `Order`, `UserRecord`) serialize with
//! camelCase field names so the stored documents keep the marketplace's
//! existing layout.

pub mod cart;
pub mod catalog;
pub mod money;
pub mod order;
pub mod user;

pub use cart::*;
pub use catalog::*;
pub use money::*;
pub use order::*;
pub use user::*;
