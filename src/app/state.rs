use std::sync::Arc;

use ratatui::style::Style;
use tokio::runtime::Handle;
use tui_textarea::{CursorMove, TextArea};

use super::fields::{FormField, visible_fields};
use crate::fetcher::{DebouncedFetcher, FetchSettings, InputOrigin};
use crate::lookup::{AddressLookup, LookupError, Suggestion};
use crate::order::{ContactSide, OrderAction, OrderForm};
use crate::stores::StoreDirectory;

/// What the status line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Everything needed to start address lookups
pub struct LookupHandle {
    pub service: Arc<dyn AddressLookup>,
    pub runtime: Handle,
    pub settings: FetchSettings,
}

/// One fetcher per address field
pub struct AddressLookups {
    billing: DebouncedFetcher,
    shipping: DebouncedFetcher,
}

impl AddressLookups {
    fn new(handle: LookupHandle) -> Self {
        Self {
            billing: DebouncedFetcher::new(
                "billing_address",
                Arc::clone(&handle.service),
                handle.runtime.clone(),
                handle.settings,
            ),
            shipping: DebouncedFetcher::new(
                "shipping_address",
                handle.service,
                handle.runtime,
                handle.settings,
            ),
        }
    }

    pub fn get(&self, side: ContactSide) -> &DebouncedFetcher {
        match side {
            ContactSide::Billing => &self.billing,
            ContactSide::Shipping => &self.shipping,
        }
    }

    pub fn get_mut(&mut self, side: ContactSide) -> &mut DebouncedFetcher {
        match side {
            ContactSide::Billing => &mut self.billing,
            ContactSide::Shipping => &mut self.shipping,
        }
    }
}

/// Application state
pub struct App {
    pub form: OrderForm,
    pub stores: StoreDirectory,
    pub focus: FormField,
    /// Single-line editor for the focused text field
    pub editor: TextArea<'static>,
    pub lookups: Option<AddressLookups>,
    /// Highlighted row of the suggestion popup
    pub suggestion_index: Option<usize>,
    /// Set by Esc, cleared by the next edit
    pub popup_dismissed: bool,
    pub status: Option<Status>,
    /// Shown when there is no status and lookups are unavailable
    pub lookup_notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(stores: StoreDirectory, lookup: Result<LookupHandle, LookupError>) -> Self {
        let (lookups, lookup_notice) = match lookup {
            Ok(handle) => (Some(AddressLookups::new(handle)), None),
            Err(e) => {
                log::info!("Address lookup unavailable: {}", e);
                (None, Some(format!("Address lookup unavailable: {}", e)))
            }
        };

        let mut app = Self {
            form: OrderForm::new(),
            stores,
            focus: FormField::Store,
            editor: TextArea::default(),
            lookups,
            suggestion_index: None,
            popup_dismissed: false,
            status: None,
            lookup_notice,
            should_quit: false,
        };
        app.load_editor();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current editor text
    pub fn editor_text(&self) -> &str {
        self.editor.lines().first().map(String::as_str).unwrap_or("")
    }

    /// Reset the editor to the focused field's value
    pub fn load_editor(&mut self) {
        let text = self.focus.edit_text(&self.form);
        let mut editor = TextArea::new(vec![text]);
        // Remove default underline from cursor line
        editor.set_cursor_line_style(Style::default());
        editor.move_cursor(CursorMove::End);
        self.editor = editor;
    }

    /// Apply an action, reporting a rejection in the status line
    pub fn dispatch(&mut self, action: OrderAction) -> bool {
        match self.form.apply(action) {
            Ok(()) => {
                if matches!(self.status, Some(Status::Error(_))) {
                    self.status = None;
                }
                true
            }
            Err(e) => {
                log::debug!("Rejected action: {}", e);
                self.status = Some(Status::Error(e.to_string()));
                false
            }
        }
    }

    /// Move focus forward or backward through the visible fields
    pub fn move_focus(&mut self, forward: bool) {
        let fields = visible_fields(&self.form);
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let n = fields.len();
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        self.set_focus(fields[next]);
    }

    pub fn set_focus(&mut self, field: FormField) {
        if field == self.focus {
            return;
        }
        if let Some(side) = self.focus.address_side() {
            if let Some(lookups) = &mut self.lookups {
                lookups.get_mut(side).dispose();
            }
        }
        self.focus = field;
        self.suggestion_index = None;
        self.popup_dismissed = false;
        self.load_editor();
    }

    /// Keep focus on a visible field after the field list changes
    pub fn ensure_focus_visible(&mut self) {
        let fields = visible_fields(&self.form);
        if !fields.contains(&self.focus) {
            self.set_focus(FormField::ItemMode);
        }
    }

    /// Fetcher of the focused address field, if any
    pub fn focused_fetcher(&self) -> Option<&DebouncedFetcher> {
        let side = self.focus.address_side()?;
        self.lookups.as_ref().map(|l| l.get(side))
    }

    /// Suggestions for the focused address field
    pub fn suggestions(&self) -> &[Suggestion] {
        self.focused_fetcher()
            .map(DebouncedFetcher::suggestions)
            .unwrap_or(&[])
    }

    pub fn popup_visible(&self) -> bool {
        !self.popup_dismissed && !self.suggestions().is_empty()
    }

    /// Feed new address text to the field's fetcher
    pub fn submit_address(&mut self, side: ContactSide, text: &str, origin: InputOrigin) {
        if let Some(lookups) = &mut self.lookups {
            lookups.get_mut(side).submit(text, origin);
        }
        self.suggestion_index = None;
        self.popup_dismissed = false;
    }

    /// Fill the contact from the highlighted suggestion
    pub fn apply_selected_suggestion(&mut self) -> bool {
        let Some(side) = self.focus.address_side() else {
            return false;
        };
        let Some(index) = self.suggestion_index else {
            return false;
        };
        let Some(suggestion) = self.suggestions().get(index).cloned() else {
            return false;
        };

        if !self.dispatch(OrderAction::ApplyAddressSuggestion { side, suggestion }) {
            return false;
        }
        let address = self.form.contact(side).address.clone();
        self.submit_address(side, &address, InputOrigin::Selection);
        self.load_editor();
        true
    }

    /// Drain lookup results; true if anything visible changed
    pub fn poll_lookups(&mut self) -> bool {
        let Some(lookups) = &mut self.lookups else {
            return false;
        };

        let billing = lookups.billing.poll();
        let shipping = lookups.shipping.poll();
        let focused_changed = match self.focus.address_side() {
            Some(ContactSide::Billing) => billing,
            Some(ContactSide::Shipping) => shipping,
            None => false,
        };
        if focused_changed {
            self.suggestion_index = None;
        }
        billing || shipping
    }

    /// Stop all lookup work, on shutdown
    pub fn dispose_lookups(&mut self) {
        if let Some(lookups) = &mut self.lookups {
            lookups.billing.dispose();
            lookups.shipping.dispose();
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
