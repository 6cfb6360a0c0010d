//! Sessions and statement execution for Tessera
//!
//! A [`Session`] carries the authenticated user and the selected namespace.
//! The [`Executor`] authorizes and applies parsed statements against a
//! namespace store, and the [`SessionLoop`] drives a session line by line.

pub mod executor;
pub mod response;
pub mod session;
pub mod session_loop;

pub use executor::Executor;
pub use response::{Response, ResponseSink, Status};
pub use session::Session;
pub use session_loop::{OutputFormat, SessionLoop};
