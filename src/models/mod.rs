//! Domain models for the campus CMS.
//!
//! # Core Concepts
//!
//! ## Catalog entities
//!
//! - [`Course`]: A course offering shown in the catalog and the site
//!   navigation, ordered by an explicit `order` field.
//! - [`Location`]: A campus location.
//! - [`Page`]: A CMS page; membership in [`Category`] groups decides where
//!   it appears (the "header" and "footer" categories drive navigation).
//! - [`Job`]: A job posting.
//!
//! ## Intake entities
//!
//! - [`Contact`]: A lead submitted through the contact form, including
//!   tracking metadata.
//! - Newsletter subscribers, stored by unique email.

mod contact;
mod course;
mod job;
mod location;
mod page;

pub use contact::*;
pub use course::*;
pub use job::*;
pub use location::*;
pub use page::*;
