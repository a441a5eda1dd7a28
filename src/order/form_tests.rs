//! Tests for the order form reducer

use super::*;
use crate::order::types::ItemFields;
use proptest::prelude::*;

fn set(form: &mut OrderForm, field: DraftField, value: &str) {
    form.apply(OrderAction::SetDraftField {
        field,
        value: value.to_string(),
    })
    .unwrap();
}

fn contact_field(side: ContactSide, field: ContactField, value: &str) -> OrderAction {
    OrderAction::SetContactField {
        side,
        field,
        value: value.to_string(),
    }
}

fn fill_complete_item(form: &mut OrderForm) {
    set(form, DraftField::Vendor, "Bassett");
    set(form, DraftField::Sku, "4021-62");
    set(form, DraftField::Description, "Sofa, navy");
}

fn package_with_items(count: usize) -> OrderForm {
    let mut form = OrderForm::new();
    form.apply(OrderAction::TogglePackageMode).unwrap();
    set(&mut form, DraftField::PackageName, "Bedroom set");
    for _ in 0..count {
        fill_complete_item(&mut form);
        form.apply(OrderAction::AddPackageItem).unwrap();
    }
    form
}

mod contact_tests {
    use super::*;

    #[test]
    fn test_new_form_defaults() {
        let form = OrderForm::new();
        assert_eq!(form.store, None);
        assert_eq!(form.delivery_type, DeliveryType::Pickup);
        assert_eq!(form.billing.phones.len(), 1);
        assert_eq!(form.shipping.phones.len(), 1);
        assert!(form.details.is_empty());
        assert!(!form.draft.is_package());
    }

    #[test]
    fn test_select_store_and_salesperson() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SelectStore(Some("Arden, NC".to_string())))
            .unwrap();
        form.apply(OrderAction::SetSalesperson("Dana".to_string()))
            .unwrap();
        assert_eq!(form.store.as_deref(), Some("Arden, NC"));
        assert_eq!(form.salesperson, "Dana");
    }

    #[test]
    fn test_set_contact_field() {
        let mut form = OrderForm::new();
        form.apply(contact_field(ContactSide::Billing, ContactField::City, "Arden"))
            .unwrap();
        assert_eq!(form.billing.city, "Arden");
        assert_eq!(form.shipping.city, "");
    }

    #[test]
    fn test_same_as_billing_copies_everything() {
        let mut form = OrderForm::new();
        form.apply(contact_field(ContactSide::Billing, ContactField::Name, "Pat Lee"))
            .unwrap();
        form.apply(OrderAction::SetPhoneDigits {
            side: ContactSide::Billing,
            index: 0,
            value: "8286815011".to_string(),
        })
        .unwrap();

        form.apply(OrderAction::SetSameAsBilling(true)).unwrap();
        assert_eq!(form.shipping, form.billing);
        assert_eq!(form.shipping.phones[0].digits(), "8286815011");
    }

    #[test]
    fn test_same_as_billing_mirrors_later_edits() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SetSameAsBilling(true)).unwrap();
        form.apply(contact_field(ContactSide::Billing, ContactField::ZipCode, "28704"))
            .unwrap();
        assert_eq!(form.shipping.zip_code, "28704");
    }

    #[test]
    fn test_shipping_locked_while_same_as_billing() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SetSameAsBilling(true)).unwrap();
        let before = form.clone();
        let err = form
            .apply(contact_field(ContactSide::Shipping, ContactField::Name, "X"))
            .unwrap_err();
        assert_eq!(err, OrderError::ShippingLocked);
        assert_eq!(form, before);
    }

    #[test]
    fn test_unchecking_same_as_billing_clears_shipping() {
        let mut form = OrderForm::new();
        form.apply(contact_field(ContactSide::Billing, ContactField::Name, "Pat Lee"))
            .unwrap();
        form.apply(OrderAction::SetSameAsBilling(true)).unwrap();
        form.apply(OrderAction::SetSameAsBilling(false)).unwrap();
        assert_eq!(form.shipping, Contact::default());
        assert_eq!(form.billing.name, "Pat Lee");
    }

    #[test]
    fn test_apply_suggestion_with_parts() {
        let mut form = OrderForm::new();
        let suggestion = Suggestion {
            street: Some("100 Airport Rd".to_string()),
            city: Some("Arden".to_string()),
            state: Some("NC".to_string()),
            postcode: Some("28704".to_string()),
            ..Suggestion::new("100 Airport Rd, Arden, NC 28704, USA", 35.45, -82.52)
        };
        form.apply(OrderAction::ApplyAddressSuggestion {
            side: ContactSide::Shipping,
            suggestion,
        })
        .unwrap();
        assert_eq!(form.shipping.address, "100 Airport Rd");
        assert_eq!(form.shipping.city, "Arden");
        assert_eq!(form.shipping.state, "NC");
        assert_eq!(form.shipping.zip_code, "28704");
    }

    #[test]
    fn test_apply_suggestion_without_parts_uses_formatted() {
        let mut form = OrderForm::new();
        form.apply(contact_field(ContactSide::Billing, ContactField::City, "Keep"))
            .unwrap();
        form.apply(OrderAction::ApplyAddressSuggestion {
            side: ContactSide::Billing,
            suggestion: Suggestion::new("1 Main St, Asheville", 35.0, -82.0),
        })
        .unwrap();
        assert_eq!(form.billing.address, "1 Main St, Asheville");
        assert_eq!(form.billing.city, "Keep");
    }

    #[test]
    fn test_delivery_type() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SetDeliveryType(DeliveryType::Delivery))
            .unwrap();
        assert_eq!(form.delivery_type, DeliveryType::Delivery);
    }

    #[test]
    fn test_care_plan_defaults_off_and_toggles() {
        let mut form = OrderForm::new();
        assert!(!form.care_plan);
        form.apply(OrderAction::SetCarePlan(true)).unwrap();
        assert!(form.care_plan);
        form.apply(OrderAction::SetCarePlan(false)).unwrap();
        assert!(!form.care_plan);
    }

    #[test]
    fn test_care_plan_survives_commit() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SetCarePlan(true)).unwrap();
        fill_complete_item(&mut form);
        form.apply(OrderAction::CommitDraft).unwrap();
        assert!(form.care_plan);
        assert_eq!(form.details.len(), 1);
    }
}

mod phone_tests {
    use super::*;

    #[test]
    fn test_phone_digits_too_long() {
        let mut form = OrderForm::new();
        let err = form
            .apply(OrderAction::SetPhoneDigits {
                side: ContactSide::Billing,
                index: 0,
                value: "123456789012".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, OrderError::PhoneNumberTooLong);
    }

    #[test]
    fn test_phone_kind_and_add_remove() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::SetPhoneKind {
            side: ContactSide::Billing,
            index: 0,
            kind: Some(PhoneKind::Cell),
        })
        .unwrap();
        form.apply(OrderAction::AddPhone(ContactSide::Billing)).unwrap();
        assert_eq!(form.billing.phones.len(), 2);
        assert_eq!(form.billing.phones[1].kind, None);

        form.apply(OrderAction::RemovePhone {
            side: ContactSide::Billing,
            index: 0,
        })
        .unwrap();
        assert_eq!(form.billing.phones.len(), 1);
        assert_eq!(form.billing.phones[0].kind, None);
    }

    #[test]
    fn test_last_phone_cannot_be_removed() {
        let mut form = OrderForm::new();
        let err = form
            .apply(OrderAction::RemovePhone {
                side: ContactSide::Shipping,
                index: 0,
            })
            .unwrap_err();
        assert_eq!(err, OrderError::LastPhone);
    }

    #[test]
    fn test_phone_index_out_of_range() {
        let mut form = OrderForm::new();
        let err = form
            .apply(OrderAction::SetPhoneKind {
                side: ContactSide::Billing,
                index: 3,
                kind: None,
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::IndexOutOfRange { index: 3, .. }));
    }
}

mod draft_tests {
    use super::*;

    #[test]
    fn test_quantity_and_price_compute_extended() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::SalePrice, "899.99");
        assert_eq!(form.draft.extended_price, Money::from_cents(89_999));
        set(&mut form, DraftField::Quantity, "3");
        assert_eq!(form.draft.extended_price, Money::from_cents(269_997));
    }

    #[test]
    fn test_extended_price_override() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::SalePrice, "100");
        set(&mut form, DraftField::ExtendedPrice, "80");
        assert_eq!(form.draft.extended_price, Money::from_cents(8_000));
        assert_eq!(form.draft.sale_price, Money::from_cents(10_000));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut form = OrderForm::new();
        let before = form.clone();
        let err = form
            .apply(OrderAction::SetDraftField {
                field: DraftField::Quantity,
                value: "two".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidNumber { field: "quantity", .. }));
        let err = form
            .apply(OrderAction::SetDraftField {
                field: DraftField::SalePrice,
                value: "1.999".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidNumber { field: "sale price", .. }));
        assert_eq!(form, before);
    }

    #[test]
    fn test_empty_quantity_is_zero() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::SalePrice, "10");
        set(&mut form, DraftField::Quantity, "");
        assert_eq!(form.draft.item.quantity, 0);
        assert_eq!(form.draft.extended_price, Money::ZERO);
    }

    #[test]
    fn test_delivery_date_parsing() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::DeliveryDate, "2026-11-03");
        assert_eq!(
            form.draft.delivery_date,
            NaiveDate::from_ymd_opt(2026, 11, 3)
        );
        let err = form
            .apply(OrderAction::SetDraftField {
                field: DraftField::DeliveryDate,
                value: "11/03/2026".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidDate(_)));
        set(&mut form, DraftField::DeliveryDate, "");
        assert_eq!(form.draft.delivery_date, None);
    }

    #[test]
    fn test_location_by_label() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::Location, "999");
        assert_eq!(form.draft.item.location, StockLocation::Warehouse);
        let err = form
            .apply(OrderAction::SetDraftField {
                field: DraftField::Location,
                value: "S9".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidLocation("S9".to_string()));
    }

    #[test]
    fn test_package_name_requires_package_mode() {
        let mut form = OrderForm::new();
        let err = form
            .apply(OrderAction::SetDraftField {
                field: DraftField::PackageName,
                value: "Set".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, OrderError::NotPackageMode);
    }

    #[test]
    fn test_toggle_package_mode_round_trip() {
        let mut form = OrderForm::new();
        fill_complete_item(&mut form);
        form.apply(OrderAction::TogglePackageMode).unwrap();
        assert!(form.draft.is_package());
        assert_eq!(form.draft.package_name(), Some(""));
        assert_eq!(form.draft.item.vendor, "Bassett");
        form.apply(OrderAction::TogglePackageMode).unwrap();
        assert!(!form.draft.is_package());
    }
}

mod package_tests {
    use super::*;

    #[test]
    fn test_add_package_item_moves_fields() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::TogglePackageMode).unwrap();
        set(&mut form, DraftField::Location, "S2");
        fill_complete_item(&mut form);
        set(&mut form, DraftField::Quantity, "2");
        form.apply(OrderAction::AddPackageItem).unwrap();

        let items = form.draft.package_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item.vendor, "Bassett");
        assert_eq!(items[0].item.quantity, 2);
        assert_eq!(form.draft.item.vendor, "");
        assert_eq!(form.draft.item.quantity, 1);
        assert_eq!(form.draft.item.location, StockLocation::S2);
    }

    #[test]
    fn test_add_package_item_outside_package_mode() {
        let mut form = OrderForm::new();
        assert_eq!(
            form.apply(OrderAction::AddPackageItem),
            Err(OrderError::NotPackageMode)
        );
    }

    #[test]
    fn test_remove_package_item() {
        let mut form = package_with_items(2);
        form.apply(OrderAction::RemovePackageItem(0)).unwrap();
        assert_eq!(form.draft.package_items().len(), 1);
        assert!(matches!(
            form.apply(OrderAction::RemovePackageItem(5)),
            Err(OrderError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_package_item_ids_are_unique() {
        let form = package_with_items(3);
        let mut ids: Vec<u64> = form.draft.package_items().iter().map(|p| p.id).collect();
        ids.push(form.draft.id);
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }
}

mod commit_tests {
    use super::*;

    #[test]
    fn test_commit_incomplete_item_rejected() {
        let mut form = OrderForm::new();
        set(&mut form, DraftField::Vendor, "Bassett");
        assert_eq!(form.apply(OrderAction::CommitDraft), Err(OrderError::IncompleteItem));
        assert!(form.details.is_empty());
        assert_eq!(form.draft.item.vendor, "Bassett");
    }

    #[test]
    fn test_commit_item_resets_draft_and_keeps_delivery_date() {
        let mut form = OrderForm::new();
        fill_complete_item(&mut form);
        set(&mut form, DraftField::SalePrice, "1299");
        set(&mut form, DraftField::DeliveryDate, "2026-11-03");
        let draft_id = form.draft.id;

        form.apply(OrderAction::CommitDraft).unwrap();

        assert_eq!(form.details.len(), 1);
        assert_eq!(form.details[0].id, draft_id);
        assert_eq!(form.details[0].extended_price, Money::from_cents(129_900));
        assert_ne!(form.draft.id, draft_id);
        assert_eq!(form.draft.item, ItemFields::default());
        assert_eq!(form.draft.sale_price, Money::ZERO);
        assert_eq!(
            form.draft.delivery_date,
            NaiveDate::from_ymd_opt(2026, 11, 3)
        );
        assert!(!form.draft.is_package());
    }

    #[test]
    fn test_commit_package_rules() {
        let mut form = OrderForm::new();
        form.apply(OrderAction::TogglePackageMode).unwrap();
        assert_eq!(
            form.apply(OrderAction::CommitDraft),
            Err(OrderError::MissingPackageName)
        );

        set(&mut form, DraftField::PackageName, "Dining");
        assert_eq!(form.apply(OrderAction::CommitDraft), Err(OrderError::EmptyPackage));

        fill_complete_item(&mut form);
        form.apply(OrderAction::AddPackageItem).unwrap();
        set(&mut form, DraftField::Vendor, "Canadel");
        form.apply(OrderAction::AddPackageItem).unwrap();
        assert_eq!(
            form.apply(OrderAction::CommitDraft),
            Err(OrderError::IncompletePackageItem(2))
        );

        form.apply(OrderAction::RemovePackageItem(1)).unwrap();
        form.apply(OrderAction::CommitDraft).unwrap();
        assert_eq!(form.details.len(), 1);
        assert_eq!(form.details[0].package_name(), Some("Dining"));
        assert!(!form.draft.is_package());
    }

    #[test]
    fn test_remove_detail() {
        let mut form = OrderForm::new();
        for sku in ["A1", "B2", "C3"] {
            fill_complete_item(&mut form);
            set(&mut form, DraftField::Sku, sku);
            form.apply(OrderAction::CommitDraft).unwrap();
        }
        form.apply(OrderAction::RemoveDetail(1)).unwrap();
        let skus: Vec<&str> = form.details.iter().map(|d| d.item.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1", "C3"]);
        assert!(matches!(
            form.apply(OrderAction::RemoveDetail(2)),
            Err(OrderError::IndexOutOfRange { .. })
        ));
    }
}

// Rejected actions never change the form
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_rejected_draft_edit_leaves_form_untouched(
        field in prop::sample::select(vec![
            DraftField::Quantity,
            DraftField::SalePrice,
            DraftField::ExtendedPrice,
            DraftField::DeliveryDate,
            DraftField::Location,
            DraftField::PackageName,
        ]),
        value in "[a-zA-Z/#-]{1,12}",
    ) {
        let mut form = OrderForm::new();
        let before = form.clone();
        if form.apply(OrderAction::SetDraftField { field, value }).is_err() {
            prop_assert_eq!(form, before);
        }
    }

    // Extended price always equals quantity times sale price after either is set
    #[test]
    fn prop_extended_price_tracks_quantity(qty in 0u32..50, cents in 0i64..1_000_000) {
        let mut form = OrderForm::new();
        let price = Money::from_cents(cents);
        form.apply(OrderAction::SetDraftField {
            field: DraftField::SalePrice,
            value: price.to_plain(),
        }).unwrap();
        form.apply(OrderAction::SetDraftField {
            field: DraftField::Quantity,
            value: qty.to_string(),
        }).unwrap();
        prop_assert_eq!(form.draft.extended_price, price.times(qty));
    }
}
