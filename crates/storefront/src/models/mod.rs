//! Domain models for the storefront.
//!
//! Models hold state and enforce their own invariants. They never post
//! notifications or touch the durable store; the [`Storefront`] commands do
//! that around each mutation.
//!
//! [`Storefront`]: crate::state::Storefront

pub mod address;
pub mod cart;
pub mod catalog;
pub mod location;
pub mod notification;
pub mod session;
pub mod user;
pub mod wishlist;

pub use address::{Address, AddressBook};
pub use cart::Cart;
pub use catalog::{Catalog, Product, Review};
pub use location::{Coordinates, LiveLocation};
pub use notification::Notification;
pub use session::CurrentUser;
pub use user::Account;
pub use wishlist::Wishlist;
