//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `page`: Page state machine (`Page`)

mod model;
mod page;

pub use model::Session;
pub use page::Page;
