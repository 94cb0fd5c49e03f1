//! Built-in data used when nothing has been saved yet.

use stockroom_core::{ItemId, Money};

use crate::departments::DepartmentRegistry;
use crate::item::{Category, Item, Subcategory};
use crate::Catalog;

pub const DEFAULT_DEPARTMENTS: [&str; 4] =
    ["IT отдел", "Бухгалтерия", "Отдел кадров", "Администрация"];

pub fn default_departments() -> DepartmentRegistry {
    DepartmentRegistry::from_trusted(DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect())
}

/// Starting stock of the office warehouse.
pub fn default_catalog() -> Catalog {
    let rows = [
        ("1", "HP LaserJet 1020", Category::Equipment, Subcategory::Printing, 3, 15_000, "Лазерный принтер"),
        ("2", "Картридж HP CE285A", Category::Cartridge, Subcategory::Printing, 12, 2_500, "Черный картридж"),
        ("3", "Бумага А4", Category::Supplies, Subcategory::Consumables, 500, 350, "Офисная бумага"),
        ("4", "Canon PIXMA G3420", Category::Equipment, Subcategory::Printing, 2, 18_000, "Струйный принтер"),
        ("5", "Картридж Canon PG-46", Category::Cartridge, Subcategory::Printing, 8, 1_800, "Черный картридж Canon"),
    ];

    let items = rows
        .into_iter()
        .map(|(id, name, category, subcategory, quantity, price, description)| {
            Item::from_parts(
                ItemId::new(id),
                name,
                category,
                subcategory,
                quantity,
                Money::from_major(price),
                Some(description.to_string()),
            )
        })
        .collect();

    Catalog::from_trusted(items)
}
