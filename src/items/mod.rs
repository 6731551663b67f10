//! Item model, validation and the in-memory store.

pub mod model;
pub mod store;
pub mod validation;

pub use model::{Item, ItemCreate, ItemId, ItemUpdate, Patch};
pub use store::ItemStore;
pub use validation::{FieldViolation, ValidationErrors};
