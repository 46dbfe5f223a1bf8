//! Cart and wishlist commands, persisted through a file store.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use tanish_arts_core::ProductId;
use tanish_arts_integration_tests::{KNOWN_PRODUCTS, catalog, config, memory_storefront};
use tanish_arts_storefront::models::Review;
use tanish_arts_storefront::{CommerceError, FileStore, NavigationIntent, Storefront};
use tempfile::TempDir;

fn open_file_storefront(dir: &TempDir) -> Storefront<FileStore> {
    let store = FileStore::open(dir.path()).unwrap();
    Storefront::open(config(dir.path()), store, catalog())
}

#[test]
fn test_buy_now_replaces_existing_cart() {
    let mut storefront = memory_storefront();
    storefront.sign_up("asha", None).unwrap();
    for _ in 0..3 {
        storefront.add_to_cart(ProductId::new(7)).unwrap();
    }

    assert_eq!(
        storefront.buy_now(ProductId::new(42)).unwrap(),
        NavigationIntent::Checkout
    );
    let lines: Vec<_> = storefront.cart().lines().collect();
    assert_eq!(lines, vec![(ProductId::new(42), 1)]);
}

#[test]
fn test_remove_then_add_restarts_at_one() {
    let mut storefront = memory_storefront();
    storefront.sign_up("asha", None).unwrap();
    for _ in 0..4 {
        storefront.add_to_cart(ProductId::new(99)).unwrap();
    }

    assert!(storefront.remove_from_cart(ProductId::new(99)));
    assert_eq!(storefront.add_to_cart(ProductId::new(99)).unwrap(), 1);
}

#[test]
fn test_gated_commands_leave_state_untouched() {
    let mut storefront = memory_storefront();

    for product in KNOWN_PRODUCTS.map(ProductId::new) {
        let err = storefront.add_to_cart(product).unwrap_err();
        assert_eq!(err.navigation(), Some(NavigationIntent::Account));
        assert!(storefront.add_to_wishlist(product).is_err());
        assert!(storefront.buy_now(product).is_err());
    }

    assert!(storefront.cart().is_empty());
    assert!(storefront.wishlist().is_empty());
    assert!(storefront.store().is_empty());
}

#[test]
fn test_item_count_tracks_every_change() {
    let mut storefront = memory_storefront();
    storefront.sign_up("asha", None).unwrap();

    storefront.add_to_cart(ProductId::new(7)).unwrap();
    storefront.add_to_cart(ProductId::new(7)).unwrap();
    storefront.add_to_cart(ProductId::new(42)).unwrap();
    assert_eq!(storefront.cart_item_count(), 3);

    storefront.remove_from_cart(ProductId::new(7));
    assert_eq!(storefront.cart_item_count(), 1);

    assert_eq!(storefront.place_order().unwrap(), NavigationIntent::Home);
    assert_eq!(storefront.cart_item_count(), 0);
    assert_eq!(storefront.place_order().unwrap_err(), CommerceError::EmptyCart);
}

#[test]
fn test_wishlist_add_twice_changes_nothing_the_second_time() {
    let mut storefront = memory_storefront();
    storefront.sign_up("asha", None).unwrap();

    assert!(storefront.add_to_wishlist(ProductId::new(42)).unwrap());
    let stored = storefront.store().get("wishlist").map(str::to_owned);

    assert!(!storefront.add_to_wishlist(ProductId::new(42)).unwrap());
    assert_eq!(storefront.wishlist_count(), 1);
    assert_eq!(storefront.store().get("wishlist").map(str::to_owned), stored);
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();

    let mut storefront = open_file_storefront(&dir);
    storefront.sign_up("asha", Some("pw")).unwrap();
    storefront.add_to_cart(ProductId::new(7)).unwrap();
    storefront.add_to_cart(ProductId::new(7)).unwrap();
    storefront.add_to_wishlist(ProductId::new(99)).unwrap();
    drop(storefront);

    let reopened = open_file_storefront(&dir);
    assert_eq!(reopened.current_user().unwrap().username.as_str(), "asha");
    assert_eq!(reopened.cart().quantity(ProductId::new(7)), 2);
    assert!(reopened.is_in_wishlist(ProductId::new(99)));
    assert_eq!(
        reopened.cart_subtotal().unwrap().amount,
        Decimal::new(179_800, 2)
    );
    assert!(dir.path().join("cart.json").exists());
}

#[test]
fn test_corrupt_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    {
        let mut storefront = open_file_storefront(&dir);
        storefront.sign_up("asha", None).unwrap();
        storefront.add_to_cart(ProductId::new(7)).unwrap();
    }
    std::fs::write(dir.path().join("cart.json"), "{\"7\": -1").unwrap();

    let storefront = open_file_storefront(&dir);
    assert!(storefront.cart().is_empty());
    assert!(storefront.is_signed_in());
}

#[test]
fn test_reviews_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    let mut storefront = open_file_storefront(&dir);
    assert!(
        storefront
            .add_review(ProductId::new(7), Review::new("asha", 5, "Beautiful"))
            .unwrap()
    );
    assert_eq!(
        storefront.catalog().get(ProductId::new(7)).unwrap().reviews.len(),
        1
    );
    drop(storefront);

    let reopened = open_file_storefront(&dir);
    assert!(reopened.catalog().get(ProductId::new(7)).unwrap().reviews.is_empty());
}
