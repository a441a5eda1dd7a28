use std::fmt;

use chrono::NaiveDate;

use super::money::Money;

/// Where the piece is pulled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockLocation {
    #[default]
    S1,
    S2,
    /// Central warehouse, written as 999 on tickets
    Warehouse,
}

impl StockLocation {
    pub const ALL: [StockLocation; 3] = [
        StockLocation::S1,
        StockLocation::S2,
        StockLocation::Warehouse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StockLocation::S1 => "S1",
            StockLocation::S2 => "S2",
            StockLocation::Warehouse => "999",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn cycle(self, forward: bool) -> Self {
        let i = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        let n = Self::ALL.len();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::ALL[next]
    }
}

impl fmt::Display for StockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneKind {
    Cell,
    Home,
}

impl PhoneKind {
    /// unset -> Cell -> Home -> unset
    pub fn cycle(kind: Option<PhoneKind>, forward: bool) -> Option<PhoneKind> {
        match (kind, forward) {
            (None, true) => Some(PhoneKind::Cell),
            (Some(PhoneKind::Cell), true) => Some(PhoneKind::Home),
            (Some(PhoneKind::Home), true) => None,
            (None, false) => Some(PhoneKind::Home),
            (Some(PhoneKind::Home), false) => Some(PhoneKind::Cell),
            (Some(PhoneKind::Cell), false) => None,
        }
    }
}

impl fmt::Display for PhoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneKind::Cell => f.write_str("Cell"),
            PhoneKind::Home => f.write_str("Home"),
        }
    }
}

/// US phone number split the way it is written on the ticket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumber {
    pub kind: Option<PhoneKind>,
    pub area_code: String,
    pub prefix: String,
    pub line_number: String,
}

impl PhoneNumber {
    /// Set the whole number from raw input, filling parts left to right
    ///
    /// Returns false (and changes nothing) beyond ten digits.
    pub fn set_digits(&mut self, raw: &str) -> bool {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() > 10 {
            return false;
        }
        let split = |from: usize, to: usize| {
            let to = to.min(digits.len());
            digits.get(from..to).unwrap_or("").to_string()
        };
        self.area_code = split(0, 3);
        self.prefix = split(3, 6);
        self.line_number = split(6, 10);
        true
    }

    pub fn digits(&self) -> String {
        format!("{}{}{}", self.area_code, self.prefix, self.line_number)
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.digits().is_empty()
    }
}

impl fmt::Display for PhoneNumber {
    /// `(828) 681-5011`, degrading gracefully while partially typed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.area_code.is_empty() {
            return Ok(());
        }
        write!(f, "({})", self.area_code)?;
        if !self.prefix.is_empty() {
            write!(f, " {}", self.prefix)?;
        }
        if !self.line_number.is_empty() {
            write!(f, "-{}", self.line_number)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSide {
    Billing,
    Shipping,
}

impl fmt::Display for ContactSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactSide::Billing => f.write_str("Billing"),
            ContactSide::Shipping => f.write_str("Shipping"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Address,
    City,
    State,
    ZipCode,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Address => "Address",
            ContactField::City => "City",
            ContactField::State => "State",
            ContactField::ZipCode => "ZIP Code",
        }
    }
}

/// Billing or shipping party
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    /// Never empty
    pub phones: Vec<PhoneNumber>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Default for Contact {
    fn default() -> Self {
        Contact {
            name: String::new(),
            email: String::new(),
            phones: vec![PhoneNumber::default()],
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
        }
    }
}

impl Contact {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Address => &self.address,
            ContactField::City => &self.city,
            ContactField::State => &self.state,
            ContactField::ZipCode => &self.zip_code,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Address => self.address = value,
            ContactField::City => self.city = value,
            ContactField::State => self.state = value,
            ContactField::ZipCode => self.zip_code = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryType {
    #[default]
    Pickup,
    Delivery,
}

impl DeliveryType {
    pub fn toggled(self) -> Self {
        match self {
            DeliveryType::Pickup => DeliveryType::Delivery,
            DeliveryType::Delivery => DeliveryType::Pickup,
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryType::Pickup => f.write_str("Pickup"),
            DeliveryType::Delivery => f.write_str("Delivery"),
        }
    }
}

/// Fields shared by single items and the pieces of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub location: StockLocation,
    pub quantity: u32,
    pub vendor: String,
    pub sku: String,
    pub grade: String,
    pub cover: String,
    pub description: String,
}

impl Default for ItemFields {
    fn default() -> Self {
        ItemFields {
            location: StockLocation::default(),
            quantity: 1,
            vendor: String::new(),
            sku: String::new(),
            grade: String::new(),
            cover: String::new(),
            description: String::new(),
        }
    }
}

impl ItemFields {
    /// Vendor, SKU and description are required
    pub fn is_complete(&self) -> bool {
        [&self.vendor, &self.sku, &self.description]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageItem {
    pub id: u64,
    pub item: ItemFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailKind {
    #[default]
    Individual,
    Package {
        name: String,
        items: Vec<PackageItem>,
    },
}

/// One line of the order (or the draft line being edited)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub id: u64,
    pub kind: DetailKind,
    pub item: ItemFields,
    pub sale_price: Money,
    pub extended_price: Money,
    pub delivery_date: Option<NaiveDate>,
}

impl OrderDetail {
    pub fn new(id: u64) -> Self {
        OrderDetail {
            id,
            kind: DetailKind::Individual,
            item: ItemFields::default(),
            sale_price: Money::ZERO,
            extended_price: Money::ZERO,
            delivery_date: None,
        }
    }

    pub fn is_package(&self) -> bool {
        matches!(self.kind, DetailKind::Package { .. })
    }

    pub fn package_name(&self) -> Option<&str> {
        match &self.kind {
            DetailKind::Package { name, .. } => Some(name),
            DetailKind::Individual => None,
        }
    }

    pub fn package_items(&self) -> &[PackageItem] {
        match &self.kind {
            DetailKind::Package { items, .. } => items,
            DetailKind::Individual => &[],
        }
    }
}

/// Editable fields of the draft line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    PackageName,
    Location,
    Quantity,
    Vendor,
    Sku,
    Grade,
    Cover,
    Description,
    SalePrice,
    ExtendedPrice,
    DeliveryDate,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::PackageName => "Package Name",
            DraftField::Location => "Location",
            DraftField::Quantity => "Quantity",
            DraftField::Vendor => "Vendor",
            DraftField::Sku => "SKU",
            DraftField::Grade => "Grade",
            DraftField::Cover => "Cover",
            DraftField::Description => "Description",
            DraftField::SalePrice => "Sale Price",
            DraftField::ExtendedPrice => "Extended Price",
            DraftField::DeliveryDate => "Delivery Date",
        }
    }
}
