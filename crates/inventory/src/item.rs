//! Catalog item and its classification.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ItemId, Money};

/// Top-level item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cartridge,
    Equipment,
    Supplies,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cartridge, Category::Equipment, Category::Supplies];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cartridge => "cartridge",
            Category::Equipment => "equipment",
            Category::Supplies => "supplies",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cartridge => "Картридж",
            Category::Equipment => "Оборудование",
            Category::Supplies => "Расходники",
        }
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

/// Finer-grained classification chosen on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcategory {
    Printing,
    Consumables,
    Tools,
}

impl Subcategory {
    pub const ALL: [Subcategory; 3] =
        [Subcategory::Printing, Subcategory::Consumables, Subcategory::Tools];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Printing => "printing",
            Subcategory::Consumables => "consumables",
            Subcategory::Tools => "tools",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subcategory::Printing => "Печать",
            Subcategory::Consumables => "Расходные материалы",
            Subcategory::Tools => "Инструменты",
        }
    }

    /// Category assigned when an item is first received.
    ///
    /// Only consulted by `Catalog::add_item`; edits may set any category.
    pub fn default_category(&self) -> Category {
        match self {
            Subcategory::Printing => Category::Equipment,
            Subcategory::Consumables => Category::Supplies,
            Subcategory::Tools => Category::Equipment,
        }
    }
}

impl core::str::FromStr for Subcategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown subcategory: {s}")))
    }
}

/// Display bucket for the quantity on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    Low,
    OutOfStock,
}

impl StockLevel {
    /// Anything above this is comfortably in stock.
    pub const LOW_THRESHOLD: u32 = 5;

    pub fn for_quantity(quantity: u32) -> Self {
        match quantity {
            0 => StockLevel::OutOfStock,
            q if q <= Self::LOW_THRESHOLD => StockLevel::Low,
            _ => StockLevel::InStock,
        }
    }
}

/// Catalog record.
///
/// Fields are read-only outside this crate; all mutation goes through
/// [`crate::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: String,
    category: Category,
    subcategory: Subcategory,
    quantity: u32,
    unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Item {
    pub(crate) fn from_parts(
        id: ItemId,
        name: impl Into<String>,
        category: Category,
        subcategory: Subcategory,
        quantity: u32,
        unit_price: Money,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            subcategory,
            quantity,
            unit_price,
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subcategory(&self) -> Subcategory {
        self.subcategory
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::for_quantity(self.quantity)
    }

    /// Value of the stock on hand.
    pub fn stock_value(&self) -> Money {
        Money::from_minor(self.unit_price.minor().saturating_mul(u64::from(self.quantity)))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Receipt form: a new item arriving at the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    /// `None` models an unselected picker; receipt requires a choice.
    pub subcategory: Option<Subcategory>,
    pub quantity: u32,
    pub unit_price: Money,
    pub description: Option<String>,
}

/// Edit form: full replacement of an existing record (id kept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub quantity: u32,
    pub unit_price: Money,
    pub description: Option<String>,
}

impl ItemPatch {
    /// Patch pre-filled with the item's current values.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category,
            subcategory: item.subcategory,
            quantity: item.quantity,
            unit_price: item.unit_price,
            description: item.description.clone(),
        }
    }
}

pub(crate) fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
