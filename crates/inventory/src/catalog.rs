//! Catalog store: the warehouse's item list.

use stockroom_core::entity::{ids_unique, position_of};
use stockroom_core::{DomainError, DomainResult, Entity, ItemId, Money};

use crate::item::{
    normalize_description, validate_name, Category, Item, ItemDraft, ItemPatch,
};

/// Insertion-ordered list of items keyed by [`ItemId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a restored list.
    ///
    /// Duplicate identifiers would make lookups ambiguous, so they are rejected.
    pub fn from_items(items: Vec<Item>) -> DomainResult<Self> {
        if !ids_unique(&items) {
            return Err(DomainError::validation("duplicate item id in catalog"));
        }
        Ok(Self { items })
    }

    pub(crate) fn from_trusted(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        position_of(&self.items, id).map(|i| &self.items[i])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that can be picked on the issue form.
    pub fn available_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|i| i.quantity() > 0)
    }

    pub fn items_in_category(&self, category: Category) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |i| i.category() == category)
    }

    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    pub fn total_value(&self) -> Money {
        self.items.iter().map(Item::stock_value).sum()
    }

    /// Receive a new item. Returns the stored record.
    pub fn add_item(&mut self, draft: ItemDraft) -> DomainResult<&Item> {
        let name = validate_name(&draft.name)?;
        if draft.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if draft.unit_price.is_zero() {
            return Err(DomainError::validation("unit price must be positive"));
        }
        let subcategory = draft
            .subcategory
            .ok_or_else(|| DomainError::validation("subcategory must be chosen"))?;

        let item = Item::from_parts(
            ItemId::generate(),
            name,
            subcategory.default_category(),
            subcategory,
            draft.quantity,
            draft.unit_price,
            normalize_description(draft.description),
        );
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace every field of an existing item.
    pub fn edit_item(&mut self, id: &ItemId, patch: ItemPatch) -> DomainResult<&Item> {
        let idx = position_of(&self.items, id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
        let name = validate_name(&patch.name)?;
        if patch.unit_price.is_zero() {
            return Err(DomainError::validation("unit price must be positive"));
        }

        self.items[idx] = Item::from_parts(
            id.clone(),
            name,
            patch.category,
            patch.subcategory,
            patch.quantity,
            patch.unit_price,
            normalize_description(patch.description),
        );
        Ok(&self.items[idx])
    }

    pub fn delete_item(&mut self, id: &ItemId) -> DomainResult<Item> {
        let idx = position_of(&self.items, id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
        Ok(self.items.remove(idx))
    }

    /// Take `amount` units out of stock. Never lets quantity go negative.
    pub fn decrement_quantity(&mut self, id: &ItemId, amount: u32) -> DomainResult<u32> {
        if amount == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;

        let available = item.quantity();
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| DomainError::insufficient_stock(id.as_str(), amount, available))?;
        item.set_quantity(remaining);
        Ok(remaining)
    }
}
