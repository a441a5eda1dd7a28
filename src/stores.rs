//! Store directory
//!
//! Showroom contact details shown next to the order and used by the store
//! picker. The built-in list can be replaced from the config file.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A showroom the order is written at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Store {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub fax: String,
}

impl Store {
    fn new(name: &str, address: &str, phone: &str, fax: &str) -> Self {
        Store {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            fax: fax.to_string(),
        }
    }
}

fn builtin_stores() -> Vec<Store> {
    vec![
        Store::new(
            "Arden, NC",
            "100 Airport Rd. Arden, NC 28704",
            "828-681-5011",
            "828-681-5022",
        ),
        Store::new(
            "Waynesville, NC",
            "121 Eagles Nest Rd, Waynesville, NC 28786",
            "828-454-9293",
            "828-681-5022",
        ),
    ]
}

/// Ordered list of stores the picker cycles through
#[derive(Debug, Clone)]
pub struct StoreDirectory {
    stores: Vec<Store>,
}

impl Default for StoreDirectory {
    fn default() -> Self {
        StoreDirectory {
            stores: builtin_stores(),
        }
    }
}

impl StoreDirectory {
    pub fn from_config(config: &Config) -> Self {
        if config.stores.is_empty() {
            Self::default()
        } else {
            StoreDirectory {
                stores: config.stores.clone(),
            }
        }
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn get(&self, name: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.name == name)
    }

    /// Step through `None, store 0, store 1, ..., None` in either direction
    pub fn cycle(&self, current: Option<&str>, forward: bool) -> Option<String> {
        let len = self.stores.len();
        if len == 0 {
            return None;
        }

        // Position 0 is "no store", 1..=len are the stores
        let pos = current
            .and_then(|name| self.stores.iter().position(|s| s.name == name))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % (len + 1)
        } else {
            (pos + len) % (len + 1)
        };

        next.checked_sub(1).map(|i| self.stores[i].name.clone())
    }
}
