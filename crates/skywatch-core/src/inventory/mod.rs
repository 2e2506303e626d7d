pub mod build;
pub mod kinds;
pub mod model;

pub use kinds::EntityKind;
pub use model::{Inventory, Row};
