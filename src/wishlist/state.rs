//! Wishlist State Management
//!
//! One session's set of liked products. The backing collection is private;
//! mutation goes through the operation surface, and enumeration order is
//! insertion order.

use super::models::WishlistItem;

#[derive(Debug, Default)]
pub struct WishlistState {
    items: Vec<WishlistItem>,
}

impl WishlistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Adds a product. Idempotent: re-adding an existing id is a no-op and
    /// keeps the original snapshot.
    pub fn add(&mut self, product: WishlistItem) {
        if !self.items.iter().any(|i| i.id == product.id) {
            self.items.push(product);
        }
    }

    /// Removes an entry by id. Idempotent when absent.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> WishlistItem {
        WishlistItem {
            id: id.into(),
            name: format!("Product {id}"),
            price: 19.99,
            original_price: None,
            rating: 4.5,
            category: "gadgets".into(),
            brand: "Acme".into(),
            image: String::new(),
            in_stock: true,
        }
    }

    #[test]
    fn readd_is_noop() {
        let mut wishlist = WishlistState::new();
        wishlist.add(item("w1"));
        wishlist.add(item("w1"));
        assert_eq!(wishlist.count(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut wishlist = WishlistState::new();
        wishlist.add(item("w1"));
        let before = wishlist.items().to_vec();

        wishlist.remove("ghost");
        assert_eq!(wishlist.items(), before.as_slice());

        wishlist.remove("w1");
        wishlist.remove("w1");
        assert_eq!(wishlist.count(), 0);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut wishlist = WishlistState::new();
        wishlist.add(item("w1"));
        wishlist.add(item("w2"));
        wishlist.clear();
        assert_eq!(wishlist.count(), 0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut wishlist = WishlistState::new();
        for id in ["c", "a", "b"] {
            wishlist.add(item(id));
        }
        let order: Vec<_> = wishlist.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }
}
