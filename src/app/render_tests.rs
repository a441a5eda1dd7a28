use crate::app::{FormField, Status};
use crate::order::{ContactField, ContactSide, OrderAction};
use crate::test_utils::test_helpers::{
    app_with_lookup, ctrl, focus_on, render_to_string, test_app, type_text, wait_for_suggestions,
};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

#[test]
fn test_renders_labels_and_help() {
    let mut app = test_app();
    let output = render_to_string(&mut app, WIDTH, HEIGHT);

    assert!(output.contains("Store:"));
    assert!(output.contains("Billing Address:"));
    assert!(output.contains("Ctrl+S add line"));
    assert!(output.contains("No store selected"));
}

#[test]
fn test_status_line_shows_lookup_notice() {
    let mut app = test_app();
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Address lookup unavailable"));
}

#[test]
fn test_status_line_prefers_error() {
    let mut app = test_app();
    app.status = Some(Status::Error("Please fill in vendor, SKU and description".to_string()));
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Please fill in vendor, SKU and description"));
    assert!(!output.contains("Address lookup unavailable"));
}

#[test]
fn test_selected_store_details_shown() {
    let mut app = test_app();
    app.dispatch(OrderAction::SelectStore(Some("Waynesville, NC".to_string())));
    let output = render_to_string(&mut app, WIDTH, HEIGHT);

    assert!(output.contains("121 Eagles Nest Rd"));
    assert!(output.contains("Phone: 828-454-9293"));
}

#[test]
fn test_committed_line_and_total_shown() {
    let mut app = test_app();
    for (field, value) in [
        (crate::order::DraftField::Vendor, "Bassett"),
        (crate::order::DraftField::Sku, "4021"),
        (crate::order::DraftField::Description, "Sofa"),
        (crate::order::DraftField::SalePrice, "1299"),
    ] {
        app.dispatch(OrderAction::SetDraftField {
            field,
            value: value.to_string(),
        });
    }
    app.handle_key_event(ctrl('s'));

    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Bassett 4021 Sofa"));
    assert!(output.contains("Total $1,299.00"));
}

#[test]
fn test_focus_scrolls_into_view_on_short_terminal() {
    let mut app = test_app();
    focus_on(&mut app, FormField::Contact(ContactSide::Shipping, ContactField::ZipCode));
    let output = render_to_string(&mut app, WIDTH, 12);
    assert!(output.contains("Shipping ZIP Code:"));
    assert!(!output.contains("Salesperson:"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = test_app();
    render_to_string(&mut app, 10, 4);
    render_to_string(&mut app, 1, 1);
}

#[test]
fn test_suggestion_popup_rendered_under_address() {
    let (_runtime, mut app) = app_with_lookup();
    focus_on(&mut app, FormField::Contact(ContactSide::Billing, ContactField::Address));
    type_text(&mut app, "525");
    assert!(wait_for_suggestions(&mut app, 2000));

    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Addresses"));
    assert!(output.contains("525 Hendersonville Rd, Asheville, NC 28803"));
    assert!(output.contains("525 Airport Rd, Arden, NC 28704"));
}

#[test]
fn test_dismissed_popup_not_rendered() {
    let (_runtime, mut app) = app_with_lookup();
    focus_on(&mut app, FormField::Contact(ContactSide::Billing, ContactField::Address));
    type_text(&mut app, "525");
    assert!(wait_for_suggestions(&mut app, 2000));
    app.popup_dismissed = true;

    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(!output.contains("Hendersonville"));
}

#[test]
fn test_options_pane_shows_delivery_and_care_plan() {
    let mut app = test_app();
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Pickup · Care plan: No"));

    app.dispatch(OrderAction::SetCarePlan(true));
    app.dispatch(OrderAction::SetDeliveryType(crate::order::DeliveryType::Delivery));
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Delivery · Care plan: Yes"));
}

#[test]
fn test_care_plan_row_in_form() {
    let mut app = test_app();
    focus_on(&mut app, FormField::CarePlan);
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("5-Year Care Plan:"));
    assert!(output.contains("◀ No ▶"));
}

#[test]
fn test_added_phone_gets_its_own_rows() {
    let mut app = test_app();
    app.handle_key_event(ctrl('n'));
    let output = render_to_string(&mut app, WIDTH, HEIGHT);
    assert!(output.contains("Billing Phone 2 Type:"));
    assert!(output.contains("Billing Phone 2:"));
    assert!(!output.contains("Shipping Phone 2"));
}
