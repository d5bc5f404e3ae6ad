use serde::Deserialize;

use stockroom_products::{ProductDraft, ProductPatch};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products`: a product sans id. Absent fields bind to their
/// defaults; validation decides what is acceptable.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub code_value: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub expiration: String,
    #[serde(default)]
    pub price: f64,
}

impl CreateProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: self.is_published,
            expiration: self.expiration,
            price: self.price,
        }
    }
}

/// Body of `PATCH /products/{id}`: present fields overwrite, absent (or
/// `null`) fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub code_value: Option<String>,
    pub is_published: Option<bool>,
    pub expiration: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: self.is_published,
            expiration: self.expiration,
            price: self.price,
        }
    }
}
