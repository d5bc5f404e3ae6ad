use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

/// Product identifier (catalog-wide, assigned sequentially by the store).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = u64::from_str(s).map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Ok(Self(id))
    }
}

/// Catalog entry. Serializes to the wire shape used by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

/// Input for creating a product (everything but the store-assigned id).
///
/// All fields default so a partial body binds cleanly; `validate` decides
/// what is actually acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
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

impl ProductDraft {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_price(self.price)
    }

    /// Materialize the draft into a stored product under the given id.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: self.is_published,
            expiration: self.expiration,
            price: self.price,
        }
    }
}

/// Partial update. A field set to `Some` overwrites the stored value, `None`
/// leaves it untouched, so an explicit zero is distinguishable from an
/// omitted field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub code_value: Option<String>,
    pub is_published: Option<bool>,
    pub expiration: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    /// Validate only the fields that are present.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Overwrite the present fields in place. The id is not patchable.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(code_value) = &self.code_value {
            product.code_value = code_value.clone();
        }
        if let Some(is_published) = self.is_published {
            product.is_published = is_published;
        }
        if let Some(expiration) = &self.expiration {
            product.expiration = expiration.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    Ok(())
}

fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() {
        return Err(DomainError::validation("price must be a finite number"));
    }
    if price < 0.0 {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draft() -> ProductDraft {
        ProductDraft {
            name: "Cheddar".to_string(),
            quantity: 12,
            code_value: "C0001".to_string(),
            is_published: true,
            expiration: "01/01/2027".to_string(),
            price: 4.25,
        }
    }

    #[test]
    fn product_id_parses_from_decimal_string() {
        let id: ProductId = "42".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn product_id_rejects_non_integer_input() {
        for bad in ["abc", "1.5", "-1", ""] {
            let err = bad.parse::<ProductId>().unwrap_err();
            match err {
                DomainError::InvalidId(_) => {}
                other => panic!("expected InvalidId, got {other:?}"),
            }
        }
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(test_draft().validate().is_ok());
    }

    #[test]
    fn draft_rejects_blank_name() {
        let draft = ProductDraft {
            name: "   ".to_string(),
            ..test_draft()
        };
        let err = draft.validate().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn draft_rejects_negative_quantity() {
        let draft = ProductDraft {
            quantity: -1,
            ..test_draft()
        };
        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn draft_rejects_negative_or_non_finite_price() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let draft = ProductDraft {
                price,
                ..test_draft()
            };
            assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
        }
    }

    #[test]
    fn draft_accepts_zero_quantity_and_price() {
        let draft = ProductDraft {
            quantity: 0,
            price: 0.0,
            ..test_draft()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn into_product_carries_all_fields_and_the_assigned_id() {
        let draft = test_draft();
        let product = draft.clone().into_product(ProductId::new(7));

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.name, draft.name);
        assert_eq!(product.quantity, draft.quantity);
        assert_eq!(product.code_value, draft.code_value);
        assert_eq!(product.is_published, draft.is_published);
        assert_eq!(product.expiration, draft.expiration);
        assert_eq!(product.price, draft.price);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut product = test_draft().into_product(ProductId::new(1));
        let patch = ProductPatch {
            quantity: Some(50),
            ..ProductPatch::default()
        };

        patch.apply_to(&mut product);

        assert_eq!(product.quantity, 50);
        assert_eq!(product.name, "Cheddar");
        assert_eq!(product.code_value, "C0001");
    }

    #[test]
    fn patch_with_explicit_zero_sets_zero() {
        let mut product = test_draft().into_product(ProductId::new(1));
        let patch = ProductPatch {
            quantity: Some(0),
            ..ProductPatch::default()
        };

        patch.apply_to(&mut product);
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn empty_patch_leaves_product_unchanged() {
        let mut product = test_draft().into_product(ProductId::new(1));
        let before = product.clone();

        ProductPatch::default().apply_to(&mut product);
        assert_eq!(product, before);
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name": null, "quantity": 3}"#).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.quantity, Some(3));
    }

    #[test]
    fn patch_validation_checks_only_present_fields() {
        // A patch that touches nothing invalid passes even though it changes nothing.
        assert!(ProductPatch::default().validate().is_ok());

        let patch = ProductPatch {
            quantity: Some(-5),
            ..ProductPatch::default()
        };
        assert!(matches!(patch.validate(), Err(DomainError::Validation(_))));

        let patch = ProductPatch {
            name: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(matches!(patch.validate(), Err(DomainError::Validation(_))));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_draft() -> impl Strategy<Value = ProductDraft> {
            (
                "[A-Za-z][A-Za-z0-9 ]{0,40}",
                0i64..1_000_000,
                "[A-Z0-9]{0,12}",
                any::<bool>(),
                "[0-3][0-9]/[0-1][0-9]/20[0-9][0-9]",
                0.0f64..100_000.0,
            )
                .prop_map(|(name, quantity, code_value, is_published, expiration, price)| {
                    ProductDraft {
                        name,
                        quantity,
                        code_value,
                        is_published,
                        expiration,
                        price,
                    }
                })
        }

        proptest! {
            /// Property: drafts with in-range fields always validate.
            #[test]
            fn well_formed_drafts_validate(draft in arb_draft()) {
                prop_assert!(draft.validate().is_ok());
            }

            /// Property: a negative quantity is always rejected.
            #[test]
            fn negative_quantity_never_validates(
                draft in arb_draft(),
                quantity in i64::MIN..0,
            ) {
                let draft = ProductDraft { quantity, ..draft };
                prop_assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
            }

            /// Property: applying a patch never changes the id.
            #[test]
            fn patch_never_changes_id(
                draft in arb_draft(),
                id in 1u64..10_000,
                new_name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                new_quantity in proptest::option::of(0i64..1_000_000),
            ) {
                let mut product = draft.into_product(ProductId::new(id));
                let patch = ProductPatch {
                    name: Some(new_name),
                    quantity: new_quantity,
                    ..ProductPatch::default()
                };
                patch.apply_to(&mut product);
                prop_assert_eq!(product.id, ProductId::new(id));
            }

            /// Property: patch application is idempotent.
            #[test]
            fn patch_application_is_idempotent(
                draft in arb_draft(),
                new_quantity in proptest::option::of(0i64..1_000_000),
                new_price in proptest::option::of(0.0f64..100_000.0),
            ) {
                let mut once = draft.clone().into_product(ProductId::new(1));
                let mut twice = draft.into_product(ProductId::new(1));
                let patch = ProductPatch {
                    quantity: new_quantity,
                    price: new_price,
                    ..ProductPatch::default()
                };

                patch.apply_to(&mut once);
                patch.apply_to(&mut twice);
                patch.apply_to(&mut twice);

                prop_assert_eq!(once, twice);
            }
        }
    }
}
