//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shopping cart.
///
/// An ordered list of line items with at most one line per product and
/// every amount at least 1. Transitions return a new cart rather than
/// mutating in place, so a caller can validate and persist the result
/// before anyone observes it.
///
/// Serializes as a bare JSON array of line items. Deserialization runs the
/// same validation as [`Cart::from_items`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing line items, checking the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        for (idx, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(CommerceError::InvalidAmount(item.amount));
            }
            if items[..idx].iter().any(|other| other.id() == item.id()) {
                return Err(CommerceError::DuplicateItem(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Check whether a product has a line in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Amount per product, keyed by id.
    pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
        self.items.iter().map(|i| (i.id(), i.amount)).collect()
    }

    /// Sum of line totals.
    ///
    /// Returns error on overflow or if lines disagree on currency.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let currency = self
            .items
            .first()
            .map(|i| i.product.price.currency)
            .unwrap_or_default();

        self.items
            .iter()
            .try_fold(Money::zero(currency), |acc, item| {
                let total = item.total()?;
                acc.try_add(&total).ok_or_else(|| mismatch_or_overflow(currency, &total))
            })
    }

    /// Return a cart with `item` as the line for its product.
    ///
    /// Any previous line for the same product is dropped and the new one is
    /// appended at the end.
    pub fn with_item(&self, item: LineItem) -> Cart {
        let mut items: Vec<LineItem> = self
            .items
            .iter()
            .filter(|i| i.id() != item.id())
            .cloned()
            .collect();
        items.push(item);
        Cart { items }
    }

    /// Return a cart where the line for `product_id` carries `amount`.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Result<Cart, CommerceError> {
        let item = self
            .get(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?
            .with_amount(amount)?;
        Ok(self.with_item(item))
    }

    /// Return a cart without the line for `product_id`.
    pub fn without(&self, product_id: ProductId) -> Result<Cart, CommerceError> {
        if !self.contains(product_id) {
            return Err(CommerceError::ItemNotInCart(product_id));
        }
        let items = self
            .items
            .iter()
            .filter(|i| i.id() != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }
}

fn mismatch_or_overflow(expected: Currency, got: &Money) -> CommerceError {
    if got.currency == expected {
        CommerceError::Overflow
    } else {
        CommerceError::CurrencyMismatch {
            expected: expected.code().to_string(),
            got: got.currency.code().to_string(),
        }
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CommerceError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A line item in the cart: a full product record plus the amount.
///
/// Serialized flat, i.e. the product object with an extra `amount` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product fields, copied from the product service.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: Product, amount: u32) -> Result<Self, CommerceError> {
        if amount == 0 {
            return Err(CommerceError::InvalidAmount(amount));
        }
        Ok(Self { product, amount })
    }

    /// Product id of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// The same line with a different amount.
    pub fn with_amount(&self, amount: u32) -> Result<Self, CommerceError> {
        LineItem::new(self.product.clone(), amount)
    }

    /// Unit price times amount.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(i64::from(self.amount))
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::new(cents, Currency::BRL),
            format!("https://img.example.com/{}.jpg", id),
        )
    }

    fn line(id: u64, amount: u32) -> LineItem {
        LineItem::new(product(id, 1000), amount).unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_with_item_replaces_and_moves_to_end() {
        let cart = Cart::new().with_item(line(1, 1)).with_item(line(2, 3));
        let cart = cart.with_item(line(1, 2));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id(), ProductId::new(2));
        assert_eq!(cart.items()[1].id(), ProductId::new(1));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 2);
    }

    #[test]
    fn test_with_amount() {
        let cart = Cart::new().with_item(line(1, 1));
        let updated = cart.with_amount(ProductId::new(1), 4).unwrap();

        assert_eq!(updated.item_count(), 4);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_with_amount_rejects_zero_and_missing() {
        let cart = Cart::new().with_item(line(1, 1));

        assert_eq!(
            cart.with_amount(ProductId::new(1), 0),
            Err(CommerceError::InvalidAmount(0))
        );
        assert_eq!(
            cart.with_amount(ProductId::new(9), 1),
            Err(CommerceError::ItemNotInCart(ProductId::new(9)))
        );
    }

    #[test]
    fn test_without() {
        let cart = Cart::new().with_item(line(1, 1)).with_item(line(2, 1));
        let cart = cart.without(ProductId::new(1)).unwrap();

        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(ProductId::new(1)));
        assert!(cart.without(ProductId::new(1)).is_err());
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let result = Cart::from_items(vec![line(1, 1), line(1, 2)]);
        assert_eq!(result, Err(CommerceError::DuplicateItem(ProductId::new(1))));
    }

    #[test]
    fn test_line_item_rejects_zero_amount() {
        assert!(LineItem::new(product(1, 100), 0).is_err());
    }

    #[test]
    fn test_subtotal() {
        let cart = Cart::new()
            .with_item(LineItem::new(product(1, 1000), 2).unwrap())
            .with_item(LineItem::new(product(2, 2000), 1).unwrap());

        assert_eq!(cart.subtotal().unwrap().amount_cents, 4000);
        assert_eq!(Cart::new().subtotal().unwrap().amount_cents, 0);
    }

    #[test]
    fn test_amounts() {
        let cart = Cart::new().with_item(line(2, 3)).with_item(line(1, 1));
        let amounts = cart.amounts();

        assert_eq!(amounts.get(&ProductId::new(1)), Some(&1));
        assert_eq!(amounts.get(&ProductId::new(2)), Some(&3));
    }

    #[test]
    fn test_serialized_shape() {
        let cart = Cart::new().with_item(LineItem::new(product(1, 17990), 2).unwrap());
        let value = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "title": "Product 1",
                "price": 179.9,
                "image": "https://img.example.com/1.jpg",
                "amount": 2
            }])
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let dup = r#"[
            {"id":1,"title":"A","price":1,"image":"a","amount":1},
            {"id":1,"title":"A","price":1,"image":"a","amount":1}
        ]"#;
        assert!(serde_json::from_str::<Cart>(dup).is_err());

        let zero = r#"[{"id":1,"title":"A","price":1,"image":"a","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());
    }

    #[test]
    fn test_snapshot_round_trip_keeps_extra_fields() {
        let json = r#"[{"id":5,"title":"Boot","price":99.5,"image":"b.jpg","color":"black","amount":3}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.get(ProductId::new(5)).unwrap().product.extra["color"], "black");

        let again: Cart = serde_json::from_str(&serde_json::to_string(&cart).unwrap()).unwrap();
        assert_eq!(again, cart);
    }
}
