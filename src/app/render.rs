use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::fields::{FieldKind, visible_fields};
use super::state::{App, Status};
use super::suggestions;
use crate::fetcher::FetchPhase;
use crate::order::{DetailKind, OrderDetail, OrderSummary};

const LABEL_WIDTH: u16 = 22;
const SUMMARY_WIDTH: u16 = 46;

const HELP_TEXT: &str = concat!(
    "Tab/Shift-Tab move  ←/→ change  Ctrl+N/D add/remove phone  ",
    "Ctrl+P/R add/remove piece  Ctrl+S add line  Ctrl+X remove line  Ctrl+Q quit",
);

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [form_area, summary_area] =
            Layout::horizontal([Constraint::Min(30), Constraint::Length(SUMMARY_WIDTH)])
                .areas(main_area);

        let value_area = self.render_form_pane(frame, form_area);
        self.render_summary_pane(frame, summary_area);
        self.render_status_line(frame, status_area);

        frame.render_widget(
            Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );

        if let Some(anchor) = value_area {
            if self.popup_visible() {
                let bounds = frame.area();
                suggestions::render_popup(self, frame, anchor, bounds);
            }
        }
    }

    /// Render the field list, returning the focused value area
    fn render_form_pane(&mut self, frame: &mut Frame, area: Rect) -> Option<Rect> {
        let searching = self
            .focused_fetcher()
            .is_some_and(|f| f.phase() != FetchPhase::Idle);
        let title = if searching {
            " Order · looking up addresses… "
        } else {
            " Order "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return None;
        }

        let fields = visible_fields(&self.form);
        let focus_index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let height = inner.height as usize;
        // Keep the focused row on screen
        let offset = (focus_index + 1).saturating_sub(height);

        let mut focused_value = None;
        for (row, field) in fields.iter().enumerate().skip(offset).take(height) {
            let y = inner.y + (row - offset) as u16;
            let label_area = Rect::new(inner.x, y, LABEL_WIDTH.min(inner.width), 1);
            let value_area = Rect::new(
                inner.x + label_area.width,
                y,
                inner.width.saturating_sub(label_area.width),
                1,
            );

            let focused = *field == self.focus;
            let locked = field.is_locked(&self.form);
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(format!("{}:", field.label())).style(label_style),
                label_area,
            );

            let value_style = if locked {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            if focused && field.kind() == FieldKind::Text && !locked {
                frame.render_widget(&self.editor, value_area);
                focused_value = Some(value_area);
            } else if focused && field.kind() == FieldKind::Choice {
                let line = Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::Cyan)),
                    Span::styled(field.display_value(&self.form), value_style),
                    Span::styled(" ▶", Style::default().fg(Color::Cyan)),
                ]);
                frame.render_widget(Paragraph::new(line), value_area);
            } else {
                frame.render_widget(
                    Paragraph::new(field.display_value(&self.form)).style(value_style),
                    value_area,
                );
            }
        }

        focused_value
    }

    fn render_summary_pane(&self, frame: &mut Frame, area: Rect) {
        let [store_area, options_area, details_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .areas(area);

        let store_lines = match self
            .form
            .store
            .as_deref()
            .and_then(|name| self.stores.get(name))
        {
            Some(store) => vec![
                Line::from(Span::styled(
                    store.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(store.address.clone()),
                Line::from(format!("Phone: {}", store.phone)),
                Line::from(format!("Fax: {}", store.fax)),
            ],
            None => vec![Line::from(Span::styled(
                "No store selected",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        frame.render_widget(
            Paragraph::new(store_lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Store ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            store_area,
        );

        let care_plan = if self.form.care_plan { "Yes" } else { "No" };
        frame.render_widget(
            Paragraph::new(format!(
                "{} · Care plan: {}",
                self.form.delivery_type, care_plan
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Options ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            options_area,
        );

        let summary = OrderSummary::of(&self.form);
        let rows: Vec<Row> = self
            .form
            .details
            .iter()
            .enumerate()
            .map(|(i, detail)| {
                Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(quantity_text(detail)),
                    Cell::from(describe_detail(detail)),
                    Cell::from(detail.extended_price.to_string()),
                ])
            })
            .collect();

        let mut footer = vec![format!(
            "{} line(s), {} piece(s)",
            summary.line_count, summary.piece_count
        )];
        if let DetailKind::Package { name, items } = &self.form.draft.kind {
            let name = if name.is_empty() { "(unnamed)" } else { name.as_str() };
            footer.push(format!("Package draft: {} ({} item(s))", name, items.len()));
        }

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["#", "Qty", "Item", "Ext. Price"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Lines · Total {} ", summary.total))
                .title_bottom(footer.join(" · "))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(table, details_area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match (&self.status, &self.lookup_notice) {
            (Some(Status::Error(message)), _) => {
                (message.as_str(), Style::default().fg(Color::Red))
            }
            (Some(Status::Info(message)), _) => {
                (message.as_str(), Style::default().fg(Color::Green))
            }
            (None, Some(notice)) => (notice.as_str(), Style::default().fg(Color::Yellow)),
            (None, None) => ("Address lookup ready", Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }
}

fn quantity_text(detail: &OrderDetail) -> String {
    if detail.is_package() {
        let pieces: u32 = detail.package_items().iter().map(|p| p.item.quantity).sum();
        pieces.to_string()
    } else {
        detail.item.quantity.to_string()
    }
}

fn describe_detail(detail: &OrderDetail) -> String {
    match &detail.kind {
        DetailKind::Package { name, items } => format!("{} ({} pcs)", name, items.len()),
        DetailKind::Individual => format!(
            "{} {} {}",
            detail.item.vendor, detail.item.sku, detail.item.description
        ),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
