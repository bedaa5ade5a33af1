use serde::{Deserialize, Serialize};

use supplyflow_core::{DomainError, Entity, ProductId, ValueObject};

/// Storage temperature class a product must be kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureMode {
    Frozen,
    Chilled,
    Ambient,
}

impl TemperatureMode {
    pub fn description(self) -> &'static str {
        match self {
            TemperatureMode::Frozen => "frozen",
            TemperatureMode::Chilled => "chilled",
            TemperatureMode::Ambient => "room temperature",
        }
    }
}

impl ValueObject for TemperatureMode {}

impl core::fmt::Display for TemperatureMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// A purchasable item.
///
/// Immutable once built. Equality and hashing use the id only, so two records
/// describing the same product with different names still compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    temperature_mode: TemperatureMode,
    shelf_life_days: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        temperature_mode: TemperatureMode,
        shelf_life_days: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }

        Ok(Self {
            id,
            name,
            category: category.into(),
            temperature_mode,
            shelf_life_days,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn temperature_mode(&self) -> TemperatureMode {
        self.temperature_mode
    }

    pub fn shelf_life_days(&self) -> u32 {
        self.shelf_life_days
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl core::hash::Hash for Product {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
