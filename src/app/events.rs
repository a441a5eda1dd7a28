use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::fields::{FieldKind, FormField};
use super::state::{App, Status};
use crate::fetcher::InputOrigin;
use crate::order::{ContactSide, OrderAction, OrderError};

/// How long to wait for input before polling lookups again
pub const TICK: Duration = Duration::from_millis(50);

impl App {
    /// Wait up to one tick for input and handle it
    pub fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.handle_global_keys(key) {
            return;
        }
        if self.popup_visible() && self.handle_popup_key(key) {
            return;
        }
        if self.handle_navigation_keys(key) {
            return;
        }

        match self.focus.kind() {
            FieldKind::Choice => self.handle_choice_key(key),
            FieldKind::Text => self.handle_text_key(key),
        }
    }

    /// Keys that work regardless of focus
    /// Returns true if key was handled, false otherwise
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('p') => {
                if self.dispatch(OrderAction::AddPackageItem) {
                    let count = self.form.draft.package_items().len();
                    self.status = Some(Status::Info(format!("Added package item {}", count)));
                    self.load_editor();
                }
            }
            KeyCode::Char('s') => {
                if self.dispatch(OrderAction::CommitDraft) {
                    let count = self.form.details.len();
                    self.status = Some(Status::Info(format!("Added order line {}", count)));
                    self.ensure_focus_visible();
                    self.load_editor();
                }
            }
            KeyCode::Char('r') => self.remove_last_package_item(),
            KeyCode::Char('n') => self.add_phone(),
            KeyCode::Char('d') => self.remove_focused_phone(),
            KeyCode::Char('x') => match self.form.details.len() {
                0 => {
                    self.status = Some(Status::Error("No order lines to remove".to_string()));
                }
                n => {
                    if self.dispatch(OrderAction::RemoveDetail(n - 1)) {
                        self.status = Some(Status::Info(format!("Removed order line {}", n)));
                    }
                }
            },
            _ => return false,
        }
        true
    }

    fn remove_last_package_item(&mut self) {
        let count = self.form.draft.package_items().len();
        if self.form.draft.is_package() && count == 0 {
            self.status = Some(Status::Error("No package items to remove".to_string()));
            return;
        }
        if self.dispatch(OrderAction::RemovePackageItem(count.saturating_sub(1))) {
            self.status = Some(Status::Info(format!("Removed package item {}", count)));
        }
    }

    /// Add a phone to the focused contact, billing when focus is elsewhere
    fn add_phone(&mut self) {
        let side = self.focus.contact_side().unwrap_or(ContactSide::Billing);
        if self.dispatch(OrderAction::AddPhone(side)) {
            let index = self.form.contact(side).phones.len().saturating_sub(1);
            self.status = Some(Status::Info(format!("Added {} phone {}", side, index + 1)));
            self.set_focus(FormField::PhoneKind(side, index));
        }
    }

    fn remove_focused_phone(&mut self) {
        let Some((side, index)) = self.focus.phone() else {
            self.status = Some(Status::Error("Move to a phone number to remove it".to_string()));
            return;
        };
        if !self.dispatch(OrderAction::RemovePhone { side, index }) {
            return;
        }
        self.status = Some(Status::Info(format!("Removed {} phone {}", side, index + 1)));

        // Stay on the same row kind, on the phone that took this one's place
        let last = self.form.contact(side).phones.len().saturating_sub(1);
        let field = match self.focus {
            FormField::PhoneKind(..) => FormField::PhoneKind(side, index.min(last)),
            _ => FormField::Phone(side, index.min(last)),
        };
        if field == self.focus {
            self.load_editor();
        } else {
            self.set_focus(field);
        }
    }

    /// Keys for the address suggestion popup
    fn handle_popup_key(&mut self, key: KeyEvent) -> bool {
        let count = self.suggestions().len();
        match key.code {
            KeyCode::Down => {
                self.suggestion_index = Some(match self.suggestion_index {
                    None => 0,
                    Some(i) => (i + 1).min(count - 1),
                });
                true
            }
            KeyCode::Up => {
                self.suggestion_index = match self.suggestion_index {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                true
            }
            KeyCode::Enter if self.suggestion_index.is_some() => {
                self.apply_selected_suggestion();
                true
            }
            KeyCode::Esc => {
                self.popup_dismissed = true;
                self.suggestion_index = None;
                true
            }
            _ => false,
        }
    }

    fn handle_navigation_keys(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ => return false,
        }
        true
    }

    fn handle_choice_key(&mut self, key: KeyEvent) {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => true,
            KeyCode::Left => false,
            _ => return,
        };
        if self.focus.is_locked(&self.form) {
            self.status = Some(Status::Error(OrderError::ShippingLocked.to_string()));
            return;
        }

        let Some(action) = self.focus.choice_action(&self.form, &self.stores, forward) else {
            return;
        };
        let toggles_shipping = matches!(action, OrderAction::SetSameAsBilling(true));
        if self.dispatch(action) {
            if toggles_shipping {
                if let Some(lookups) = &mut self.lookups {
                    lookups.get_mut(ContactSide::Shipping).dispose();
                }
            }
            self.ensure_focus_visible();
            self.load_editor();
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            return;
        }
        if self.focus.is_locked(&self.form) {
            self.status = Some(Status::Error(OrderError::ShippingLocked.to_string()));
            return;
        }
        if !self.editor.input(key) {
            return;
        }

        let text = self.editor_text().to_string();
        let Some(action) = self.focus.text_action(&text) else {
            return;
        };
        if self.dispatch(action) {
            if let Some(side) = self.focus.address_side() {
                self.submit_address(side, &text, InputOrigin::Typed);
            }
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
