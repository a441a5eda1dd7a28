//! Form fields
//!
//! The form is a flat list of fields in tab order. Each field knows how to
//! read its value out of the order and how to turn operator input into an
//! `OrderAction`.

use crate::order::{
    ContactField, ContactSide, DraftField, Money, OrderAction, OrderForm, PhoneKind, PhoneNumber,
};
use crate::stores::StoreDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited in place
    Text,
    /// Fixed set of values, cycled with Left/Right/Space
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Store,
    Salesperson,
    Contact(ContactSide, ContactField),
    /// Type of the contact's nth phone
    PhoneKind(ContactSide, usize),
    Phone(ContactSide, usize),
    SameAsBilling,
    DeliveryType,
    CarePlan,
    ItemMode,
    Draft(DraftField),
}

const CONTACT_FIELDS_BEFORE_PHONE: [ContactField; 2] = [ContactField::Name, ContactField::Email];
const CONTACT_FIELDS_AFTER_PHONE: [ContactField; 4] = [
    ContactField::Address,
    ContactField::City,
    ContactField::State,
    ContactField::ZipCode,
];
const DRAFT_FIELDS: [DraftField; 10] = [
    DraftField::Location,
    DraftField::Quantity,
    DraftField::Vendor,
    DraftField::Sku,
    DraftField::Grade,
    DraftField::Cover,
    DraftField::Description,
    DraftField::SalePrice,
    DraftField::ExtendedPrice,
    DraftField::DeliveryDate,
];

fn push_contact(fields: &mut Vec<FormField>, form: &OrderForm, side: ContactSide) {
    fields.extend(
        CONTACT_FIELDS_BEFORE_PHONE
            .iter()
            .map(|f| FormField::Contact(side, *f)),
    );
    for index in 0..form.contact(side).phones.len() {
        fields.push(FormField::PhoneKind(side, index));
        fields.push(FormField::Phone(side, index));
    }
    fields.extend(
        CONTACT_FIELDS_AFTER_PHONE
            .iter()
            .map(|f| FormField::Contact(side, *f)),
    );
}

/// Fields in tab order for the current state of the order
///
/// Each phone gets a type and a number row. The package name only exists
/// while the draft is a package.
pub fn visible_fields(form: &OrderForm) -> Vec<FormField> {
    let mut fields = vec![FormField::Store, FormField::Salesperson];
    push_contact(&mut fields, form, ContactSide::Billing);
    fields.push(FormField::SameAsBilling);
    push_contact(&mut fields, form, ContactSide::Shipping);
    fields.push(FormField::DeliveryType);
    fields.push(FormField::CarePlan);
    fields.push(FormField::ItemMode);
    if form.draft.is_package() {
        fields.push(FormField::Draft(DraftField::PackageName));
    }
    fields.extend(DRAFT_FIELDS.iter().map(|f| FormField::Draft(*f)));
    fields
}

impl FormField {
    pub fn kind(self) -> FieldKind {
        match self {
            FormField::Store
            | FormField::PhoneKind(..)
            | FormField::SameAsBilling
            | FormField::DeliveryType
            | FormField::CarePlan
            | FormField::ItemMode
            | FormField::Draft(DraftField::Location) => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    pub fn label(self) -> String {
        match self {
            FormField::Store => "Store".to_string(),
            FormField::Salesperson => "Salesperson".to_string(),
            FormField::Contact(side, field) => format!("{} {}", side, field.label()),
            FormField::PhoneKind(side, 0) => format!("{} Phone Type", side),
            FormField::PhoneKind(side, index) => format!("{} Phone {} Type", side, index + 1),
            FormField::Phone(side, 0) => format!("{} Phone", side),
            FormField::Phone(side, index) => format!("{} Phone {}", side, index + 1),
            FormField::SameAsBilling => "Ship to Billing".to_string(),
            FormField::DeliveryType => "Delivery Type".to_string(),
            FormField::CarePlan => "5-Year Care Plan".to_string(),
            FormField::ItemMode => "Entry Mode".to_string(),
            FormField::Draft(field) => field.label().to_string(),
        }
    }

    /// Contact phone this field edits, as (side, index)
    pub fn phone(self) -> Option<(ContactSide, usize)> {
        match self {
            FormField::PhoneKind(side, index) | FormField::Phone(side, index) => {
                Some((side, index))
            }
            _ => None,
        }
    }

    /// Contact side this field belongs to
    pub fn contact_side(self) -> Option<ContactSide> {
        match self {
            FormField::Contact(side, _) => Some(side),
            _ => self.phone().map(|(side, _)| side),
        }
    }

    /// Side whose address lookup this field drives
    pub fn address_side(self) -> Option<ContactSide> {
        match self {
            FormField::Contact(side, ContactField::Address) => Some(side),
            _ => None,
        }
    }

    /// Shipping fields are read-only while they follow billing
    pub fn is_locked(self, form: &OrderForm) -> bool {
        form.same_as_billing && self.contact_side() == Some(ContactSide::Shipping)
    }

    /// Raw value loaded into the editor when the field gains focus
    pub fn edit_text(self, form: &OrderForm) -> String {
        let draft = &form.draft;
        match self {
            FormField::Salesperson => form.salesperson.clone(),
            FormField::Contact(side, field) => form.contact(side).field(field).to_string(),
            FormField::Phone(side, index) => form
                .contact(side)
                .phones
                .get(index)
                .map(PhoneNumber::digits)
                .unwrap_or_default(),
            FormField::Draft(DraftField::PackageName) => {
                draft.package_name().unwrap_or_default().to_string()
            }
            FormField::Draft(DraftField::Quantity) => draft.item.quantity.to_string(),
            FormField::Draft(DraftField::Vendor) => draft.item.vendor.clone(),
            FormField::Draft(DraftField::Sku) => draft.item.sku.clone(),
            FormField::Draft(DraftField::Grade) => draft.item.grade.clone(),
            FormField::Draft(DraftField::Cover) => draft.item.cover.clone(),
            FormField::Draft(DraftField::Description) => draft.item.description.clone(),
            FormField::Draft(DraftField::SalePrice) => plain_or_empty(draft.sale_price),
            FormField::Draft(DraftField::ExtendedPrice) => plain_or_empty(draft.extended_price),
            FormField::Draft(DraftField::DeliveryDate) => draft
                .delivery_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            _ => self.display_value(form),
        }
    }

    /// Value as shown when the field is not being edited
    pub fn display_value(self, form: &OrderForm) -> String {
        let draft = &form.draft;
        match self {
            FormField::Store => form
                .store
                .clone()
                .unwrap_or_else(|| "(select a store)".to_string()),
            FormField::PhoneKind(side, index) => {
                match form.contact(side).phones.get(index).and_then(|p| p.kind) {
                    Some(kind) => kind.to_string(),
                    None => "(select type)".to_string(),
                }
            }
            FormField::Phone(side, index) => form
                .contact(side)
                .phones
                .get(index)
                .map(ToString::to_string)
                .unwrap_or_default(),
            FormField::SameAsBilling => {
                if form.same_as_billing {
                    "[x] same as billing".to_string()
                } else {
                    "[ ] same as billing".to_string()
                }
            }
            FormField::DeliveryType => form.delivery_type.to_string(),
            FormField::CarePlan => {
                if form.care_plan {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                }
            }
            FormField::ItemMode => {
                if draft.is_package() {
                    "Package".to_string()
                } else {
                    "Item".to_string()
                }
            }
            FormField::Draft(DraftField::Location) => draft.item.location.to_string(),
            FormField::Draft(DraftField::SalePrice) => draft.sale_price.to_string(),
            FormField::Draft(DraftField::ExtendedPrice) => draft.extended_price.to_string(),
            _ => self.edit_text(form),
        }
    }

    /// Action for new editor text, for text fields
    pub fn text_action(self, text: &str) -> Option<OrderAction> {
        let value = text.to_string();
        match self {
            FormField::Salesperson => Some(OrderAction::SetSalesperson(value)),
            FormField::Contact(side, field) => {
                Some(OrderAction::SetContactField { side, field, value })
            }
            FormField::Phone(side, index) => {
                Some(OrderAction::SetPhoneDigits { side, index, value })
            }
            FormField::Draft(field) if field != DraftField::Location => {
                Some(OrderAction::SetDraftField { field, value })
            }
            _ => None,
        }
    }

    /// Action that steps a choice field to its next (or previous) value
    pub fn choice_action(
        self,
        form: &OrderForm,
        stores: &StoreDirectory,
        forward: bool,
    ) -> Option<OrderAction> {
        match self {
            FormField::Store => Some(OrderAction::SelectStore(
                stores.cycle(form.store.as_deref(), forward),
            )),
            FormField::PhoneKind(side, index) => {
                let current = form.contact(side).phones.get(index)?.kind;
                Some(OrderAction::SetPhoneKind {
                    side,
                    index,
                    kind: PhoneKind::cycle(current, forward),
                })
            }
            FormField::SameAsBilling => Some(OrderAction::SetSameAsBilling(!form.same_as_billing)),
            FormField::DeliveryType => Some(OrderAction::SetDeliveryType(
                form.delivery_type.toggled(),
            )),
            FormField::CarePlan => Some(OrderAction::SetCarePlan(!form.care_plan)),
            FormField::ItemMode => Some(OrderAction::TogglePackageMode),
            FormField::Draft(DraftField::Location) => Some(OrderAction::SetDraftField {
                field: DraftField::Location,
                value: form.draft.item.location.cycle(forward).label().to_string(),
            }),
            _ => None,
        }
    }
}

fn plain_or_empty(money: Money) -> String {
    if money == Money::ZERO {
        String::new()
    } else {
        money.to_plain()
    }
}
