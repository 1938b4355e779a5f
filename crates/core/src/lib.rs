//! Domain building blocks shared by the store and HTTP layers.
//!
//! Nothing in here touches the database: phone normalization, invitation
//! token generation, invite message rendering, and the shared error type.

pub mod error;
pub mod invite_message;
pub mod phone;
pub mod token;
pub mod types;
