//! Business Services
//!
//! This module contains the two layers built on the link store:
//!
//! - `LinksService` - flat restriction/substitution algebra (count, each,
//!   create, update, delete)
//! - `RecursiveLinks` - nested values to link chains and back
//!
//! Services hold an `Arc<dyn LinkStore>` and re-read it on every call.

pub mod error;
pub mod links_service;
pub mod recursive_links;

pub use error::LinksError;
pub use links_service::{ChangeHandler, LinkHandler, LinksService};
pub use recursive_links::{RecursiveLinks, TempIds};
