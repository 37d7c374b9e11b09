//! Class schedule handlers.

mod list_classes;

use super::store_failure;

pub use list_classes::{ClassView, ListClassesHandler};
