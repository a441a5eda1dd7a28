use super::form::OrderForm;
use super::money::Money;

/// Running totals shown beside the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Lines added to the order
    pub line_count: usize,
    /// Pieces across all lines (package pieces counted individually)
    pub piece_count: u32,
    pub total: Money,
}

impl OrderSummary {
    pub fn of(form: &OrderForm) -> Self {
        let piece_count: u32 = form
            .details
            .iter()
            .map(|d| {
                if d.is_package() {
                    d.package_items().iter().map(|p| p.item.quantity).sum::<u32>()
                } else {
                    d.item.quantity
                }
            })
            .sum();

        OrderSummary {
            line_count: form.details.len(),
            piece_count,
            total: form.details.iter().map(|d| d.extended_price).sum(),
        }
    }
}
