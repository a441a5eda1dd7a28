//! Order model
//!
//! The order being written: store, contacts, the draft line being edited and
//! the lines already added. All mutation goes through `OrderForm::apply`.

mod form;
mod money;
mod summary;
mod types;

pub use form::{OrderAction, OrderError, OrderForm};
pub use money::Money;
pub use summary::OrderSummary;
pub use types::{
    Contact, ContactField, ContactSide, DeliveryType, DetailKind, DraftField, ItemFields,
    OrderDetail, PackageItem, PhoneKind, PhoneNumber, StockLocation,
};
