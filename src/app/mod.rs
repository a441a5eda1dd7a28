mod events;
mod fields;
mod render;
mod state;
mod suggestions;

// Re-export public types
pub use events::TICK;
pub use fields::{FieldKind, FormField, visible_fields};
pub use state::{AddressLookups, App, LookupHandle, Status};
