use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored product. Absent fields are omitted from the JSON form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Typed create/update payload.
///
/// Each field is tri-state: `None` means "not supplied", `Some(None)` means
/// "supplied as null" and `Some(Some(v))` carries a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductInput {
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub quantity: Option<Option<i64>>,
    pub category: Option<Option<String>>,
}

impl ProductInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
    }

    /// Build the stored record for a freshly minted id. Nulls are stored as absent.
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name.flatten(),
            description: self.description.flatten(),
            price: self.price.flatten(),
            quantity: self.quantity.flatten(),
            category: self.category.flatten(),
        }
    }

    /// Merge-update: overwrite every supplied field, clearing it when supplied as null.
    /// The id is never touched.
    pub fn merge_into(self, product: &mut Product) {
        if let Some(v) = self.name { product.name = v; }
        if let Some(v) = self.description { product.description = v; }
        if let Some(v) = self.price { product.price = v; }
        if let Some(v) = self.quantity { product.quantity = v; }
        if let Some(v) = self.category { product.category = v; }
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            quantity: m.quantity,
            category: m.category,
        }
    }
}
