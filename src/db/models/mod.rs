//! Database models split into domain-specific modules.

pub mod chat;
pub mod document;
pub mod interview;
pub mod user;

pub use chat::*;
pub use document::*;
pub use interview::*;
pub use user::*;
