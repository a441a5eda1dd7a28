//! Order form reducer
//!
//! `OrderForm::apply` is the only way the UI changes the order. A rejected
//! action returns an `OrderError` and leaves the form untouched.

use chrono::NaiveDate;
use thiserror::Error;

use super::money::Money;
use super::types::{
    Contact, ContactField, ContactSide, DeliveryType, DetailKind, DraftField, OrderDetail,
    PackageItem, PhoneKind, PhoneNumber, StockLocation,
};
use crate::lookup::Suggestion;

/// Why an action was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Please enter a package name")]
    MissingPackageName,

    #[error("Please add at least one item to the package")]
    EmptyPackage,

    #[error("Please fill in vendor, SKU and description for package item {0}")]
    IncompletePackageItem(usize),

    #[error("Please fill in vendor, SKU and description")]
    IncompleteItem,

    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid delivery date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown stock location {0:?}")]
    InvalidLocation(String),

    #[error("Phone numbers have at most 10 digits")]
    PhoneNumberTooLong,

    #[error("No {what} at position {index}")]
    IndexOutOfRange { what: &'static str, index: usize },

    #[error("Package items can only be added in package mode")]
    NotPackageMode,

    #[error("Shipping follows billing while 'same as billing' is on")]
    ShippingLocked,

    #[error("A contact needs at least one phone number")]
    LastPhone,
}

/// Everything the operator can do to the order
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    SelectStore(Option<String>),
    SetSalesperson(String),
    SetContactField {
        side: ContactSide,
        field: ContactField,
        value: String,
    },
    SetSameAsBilling(bool),
    /// Whole number typed in one go, split 3/3/4
    SetPhoneDigits {
        side: ContactSide,
        index: usize,
        value: String,
    },
    SetPhoneKind {
        side: ContactSide,
        index: usize,
        kind: Option<PhoneKind>,
    },
    AddPhone(ContactSide),
    RemovePhone {
        side: ContactSide,
        index: usize,
    },
    ApplyAddressSuggestion {
        side: ContactSide,
        suggestion: Suggestion,
    },
    SetDeliveryType(DeliveryType),
    /// 5-year comprehensive care plan offered with the order
    SetCarePlan(bool),
    TogglePackageMode,
    SetDraftField {
        field: DraftField,
        value: String,
    },
    /// Move the draft's item fields into the package as a new piece
    AddPackageItem,
    RemovePackageItem(usize),
    /// Add the draft to the order and start a fresh one
    CommitDraft,
    RemoveDetail(usize),
}

/// The order being written
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub store: Option<String>,
    pub salesperson: String,
    pub billing: Contact,
    pub shipping: Contact,
    pub same_as_billing: bool,
    pub delivery_type: DeliveryType,
    pub care_plan: bool,
    /// Line being edited
    pub draft: OrderDetail,
    /// Lines added to the order, in entry order
    pub details: Vec<OrderDetail>,
    next_id: u64,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderForm {
    pub fn new() -> Self {
        OrderForm {
            store: None,
            salesperson: String::new(),
            billing: Contact::default(),
            shipping: Contact::default(),
            same_as_billing: false,
            delivery_type: DeliveryType::default(),
            care_plan: false,
            draft: OrderDetail::new(1),
            details: Vec::new(),
            next_id: 2,
        }
    }

    pub fn contact(&self, side: ContactSide) -> &Contact {
        match side {
            ContactSide::Billing => &self.billing,
            ContactSide::Shipping => &self.shipping,
        }
    }

    pub fn apply(&mut self, action: OrderAction) -> Result<(), OrderError> {
        match action {
            OrderAction::SelectStore(store) => {
                self.store = store;
            }
            OrderAction::SetSalesperson(name) => {
                self.salesperson = name;
            }
            OrderAction::SetContactField { side, field, value } => {
                self.edit_contact(side, |c| {
                    c.set_field(field, value);
                    Ok(())
                })?;
            }
            OrderAction::SetSameAsBilling(on) => {
                self.same_as_billing = on;
                self.shipping = if on {
                    self.billing.clone()
                } else {
                    Contact::default()
                };
            }
            OrderAction::SetPhoneDigits { side, index, value } => {
                self.edit_contact(side, |c| {
                    let phone = phone_mut(c, index)?;
                    if !phone.set_digits(&value) {
                        return Err(OrderError::PhoneNumberTooLong);
                    }
                    Ok(())
                })?;
            }
            OrderAction::SetPhoneKind { side, index, kind } => {
                self.edit_contact(side, |c| {
                    phone_mut(c, index)?.kind = kind;
                    Ok(())
                })?;
            }
            OrderAction::AddPhone(side) => {
                self.edit_contact(side, |c| {
                    c.phones.push(Default::default());
                    Ok(())
                })?;
            }
            OrderAction::RemovePhone { side, index } => {
                self.edit_contact(side, |c| {
                    if index >= c.phones.len() {
                        return Err(OrderError::IndexOutOfRange {
                            what: "phone",
                            index,
                        });
                    }
                    if c.phones.len() == 1 {
                        return Err(OrderError::LastPhone);
                    }
                    c.phones.remove(index);
                    Ok(())
                })?;
            }
            OrderAction::ApplyAddressSuggestion { side, suggestion } => {
                self.edit_contact(side, |c| {
                    apply_suggestion(c, suggestion);
                    Ok(())
                })?;
            }
            OrderAction::SetDeliveryType(delivery_type) => {
                self.delivery_type = delivery_type;
            }
            OrderAction::SetCarePlan(on) => {
                self.care_plan = on;
            }
            OrderAction::TogglePackageMode => {
                self.draft.kind = match self.draft.kind {
                    DetailKind::Individual => DetailKind::Package {
                        name: String::new(),
                        items: Vec::new(),
                    },
                    DetailKind::Package { .. } => DetailKind::Individual,
                };
            }
            OrderAction::SetDraftField { field, value } => {
                self.set_draft_field(field, value)?;
            }
            OrderAction::AddPackageItem => {
                let id = self.next_id;
                let DetailKind::Package { items, .. } = &mut self.draft.kind else {
                    return Err(OrderError::NotPackageMode);
                };
                let item = std::mem::take(&mut self.draft.item);
                // Location is sticky between pieces
                self.draft.item.location = item.location;
                items.push(PackageItem { id, item });
                self.next_id += 1;
            }
            OrderAction::RemovePackageItem(index) => {
                let DetailKind::Package { items, .. } = &mut self.draft.kind else {
                    return Err(OrderError::NotPackageMode);
                };
                if index >= items.len() {
                    return Err(OrderError::IndexOutOfRange {
                        what: "package item",
                        index,
                    });
                }
                items.remove(index);
            }
            OrderAction::CommitDraft => {
                check_complete(&self.draft)?;
                let delivery_date = self.draft.delivery_date;
                let mut fresh = OrderDetail::new(self.next_id);
                fresh.delivery_date = delivery_date;
                self.next_id += 1;
                let committed = std::mem::replace(&mut self.draft, fresh);
                log::debug!("Added order detail {}", committed.id);
                self.details.push(committed);
            }
            OrderAction::RemoveDetail(index) => {
                if index >= self.details.len() {
                    return Err(OrderError::IndexOutOfRange {
                        what: "order line",
                        index,
                    });
                }
                self.details.remove(index);
            }
        }
        Ok(())
    }

    /// Run `edit` on one side, keeping shipping in step with billing while
    /// same-as-billing is on
    fn edit_contact<F>(&mut self, side: ContactSide, edit: F) -> Result<(), OrderError>
    where
        F: FnOnce(&mut Contact) -> Result<(), OrderError>,
    {
        match side {
            ContactSide::Billing => {
                let mut updated = self.billing.clone();
                edit(&mut updated)?;
                if self.same_as_billing {
                    self.shipping = updated.clone();
                }
                self.billing = updated;
            }
            ContactSide::Shipping => {
                if self.same_as_billing {
                    return Err(OrderError::ShippingLocked);
                }
                let mut updated = self.shipping.clone();
                edit(&mut updated)?;
                self.shipping = updated;
            }
        }
        Ok(())
    }

    fn set_draft_field(&mut self, field: DraftField, value: String) -> Result<(), OrderError> {
        let draft = &mut self.draft;
        match field {
            DraftField::PackageName => match &mut draft.kind {
                DetailKind::Package { name, .. } => *name = value,
                DetailKind::Individual => return Err(OrderError::NotPackageMode),
            },
            DraftField::Location => {
                draft.item.location = StockLocation::from_label(&value)
                    .ok_or(OrderError::InvalidLocation(value))?;
            }
            DraftField::Quantity => {
                let trimmed = value.trim();
                let quantity = if trimmed.is_empty() {
                    0
                } else {
                    trimmed.parse::<u32>().map_err(|_| OrderError::InvalidNumber {
                        field: "quantity",
                        value: value.clone(),
                    })?
                };
                draft.item.quantity = quantity;
                draft.extended_price = draft.sale_price.times(quantity);
            }
            DraftField::Vendor => draft.item.vendor = value,
            DraftField::Sku => draft.item.sku = value,
            DraftField::Grade => draft.item.grade = value,
            DraftField::Cover => draft.item.cover = value,
            DraftField::Description => draft.item.description = value,
            DraftField::SalePrice => {
                let price = Money::parse(&value).ok_or(OrderError::InvalidNumber {
                    field: "sale price",
                    value,
                })?;
                draft.sale_price = price;
                draft.extended_price = price.times(draft.item.quantity);
            }
            DraftField::ExtendedPrice => {
                draft.extended_price = Money::parse(&value).ok_or(OrderError::InvalidNumber {
                    field: "extended price",
                    value,
                })?;
            }
            DraftField::DeliveryDate => {
                let trimmed = value.trim();
                draft.delivery_date = if trimmed.is_empty() {
                    None
                } else {
                    Some(
                        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                            .map_err(|_| OrderError::InvalidDate(value.clone()))?,
                    )
                };
            }
        }
        Ok(())
    }
}

fn phone_mut(
    contact: &mut Contact,
    index: usize,
) -> Result<&mut PhoneNumber, OrderError> {
    contact
        .phones
        .get_mut(index)
        .ok_or(OrderError::IndexOutOfRange {
            what: "phone",
            index,
        })
}

fn apply_suggestion(contact: &mut Contact, suggestion: Suggestion) {
    let Suggestion {
        formatted,
        street,
        city,
        state,
        postcode,
        ..
    } = suggestion;

    contact.address = street.unwrap_or(formatted);
    if let Some(city) = city {
        contact.city = city;
    }
    if let Some(state) = state {
        contact.state = state;
    }
    if let Some(postcode) = postcode {
        contact.zip_code = postcode;
    }
}

/// Completeness rules for adding a line to the order
fn check_complete(detail: &OrderDetail) -> Result<(), OrderError> {
    match &detail.kind {
        DetailKind::Individual => {
            if !detail.item.is_complete() {
                return Err(OrderError::IncompleteItem);
            }
        }
        DetailKind::Package { name, items } => {
            if name.trim().is_empty() {
                return Err(OrderError::MissingPackageName);
            }
            if items.is_empty() {
                return Err(OrderError::EmptyPackage);
            }
            if let Some(pos) = items.iter().position(|p| !p.item.is_complete()) {
                return Err(OrderError::IncompletePackageItem(pos + 1));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
