//! The storefront state container.
//!
//! [`Storefront`] owns every piece of client-side commerce state and the
//! durable store behind it. Each command runs as one explicit transaction:
//! check the gate, mutate, post a notification, then persist every entity
//! the mutation touched.

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use tanish_arts_core::{AddressId, NotificationId, PostalAddress, Price, ProductId};

use crate::config::StorefrontConfig;
use crate::db::{self, DurableStore, StoreError, keys};
use crate::error::{CommerceError, Result};
use crate::models::{
    Account, Address, AddressBook, Cart, Catalog, CurrentUser, LiveLocation, Notification,
    Review, Wishlist,
};
use crate::navigation::NavigationIntent;
use crate::services::auth::{AccountRegistry, AuthError};
use crate::services::location::{
    LocationFix, LocationSensor, LocationTicket, LocationTracker, SensorError,
};
use crate::services::notifications::NotificationChannel;

/// Posted when a write to the durable store fails.
pub const SAVE_FAILED_MESSAGE: &str = "Could not save your changes.";

/// Client-side commerce state plus the store it is persisted to.
pub struct Storefront<S: DurableStore> {
    config: StorefrontConfig,
    store: S,
    notifications: NotificationChannel,
    accounts: AccountRegistry,
    session: Option<CurrentUser>,
    addresses: AddressBook,
    cart: Cart,
    wishlist: Wishlist,
    catalog: Catalog,
    location: LocationTracker,
}

impl<S: DurableStore> Storefront<S> {
    /// Load every persisted entity from `store`.
    ///
    /// Each key is read independently; a missing or unparseable entry starts
    /// that entity empty. An address selection that had to be repaired on
    /// load is written back.
    #[instrument(skip_all)]
    pub fn open(config: StorefrontConfig, store: S, catalog: Catalog) -> Self {
        let cart: Cart = db::load_json(&store, keys::CART).unwrap_or_default();
        let session: Option<CurrentUser> = db::load_json(&store, keys::CURRENT_USER);
        let wishlist = Wishlist::from_ids(
            db::load_json::<Vec<ProductId>, _>(&store, keys::WISHLIST).unwrap_or_default(),
        );
        let accounts = AccountRegistry::from_accounts(
            db::load_json(&store, keys::REGISTERED_USERS).unwrap_or_default(),
            config.password_hashing,
        );

        let stored_addresses: Vec<Address> =
            db::load_json(&store, keys::ADDRESSES).unwrap_or_default();
        let stored_selection: Option<AddressId> = db::load_json(&store, keys::SELECTED_ADDRESS_ID);
        let addresses = AddressBook::from_parts(stored_addresses.clone(), stored_selection.clone());
        let repaired = addresses.addresses() != stored_addresses.as_slice()
            || addresses.selected_id() != stored_selection.as_ref();

        let mut storefront = Self {
            config,
            store,
            notifications: NotificationChannel::new(),
            accounts,
            session,
            addresses,
            cart,
            wishlist,
            catalog,
            location: LocationTracker::new(),
        };

        if repaired {
            info!("Repaired stored address book");
            storefront.persist_addresses();
        }

        info!(
            accounts = storefront.accounts.len(),
            addresses = storefront.addresses.len(),
            cart_items = storefront.cart.item_count(),
            wishlist = storefront.wishlist.len(),
            signed_in = storefront.session.is_some(),
            "Storefront state loaded"
        );
        storefront
    }

    // =========================================================================
    // Session & accounts
    // =========================================================================

    /// Register an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Auth` if the username is malformed or taken.
    #[instrument(skip(self, password))]
    pub fn sign_up(&mut self, username: &str, password: Option<&str>) -> Result<NavigationIntent> {
        let account = match self.accounts.register(username, password) {
            Ok(account) => account,
            Err(e) => {
                warn!(error = %e, "Sign-up rejected");
                self.notifications.error(sign_up_failure_message(&e));
                return Err(e.into());
            }
        };

        self.session = Some(CurrentUser::new(account.username.clone()));
        self.notifications.success(format!(
            "Account created for {}! You are now logged in.",
            account.username
        ));
        info!(username = %account.username, "Account created");

        self.persist_accounts();
        self.persist_session();
        Ok(NavigationIntent::Home)
    }

    /// Sign in to an existing account.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Auth` with `AuthError::InvalidCredentials` for
    /// every rejected attempt.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, username: &str, password: Option<&str>) -> Result<NavigationIntent> {
        let username = match self.accounts.authenticate(username, password) {
            Ok(username) => username,
            Err(e) => {
                warn!(error = %e, "Login rejected");
                self.notifications.error("Invalid username or password.");
                return Err(e.into());
            }
        };

        self.notifications
            .success(format!("Logged in as {username}. Welcome!"));
        info!(%username, "Logged in");
        self.session = Some(CurrentUser::new(username));

        self.persist_session();
        Ok(NavigationIntent::Home)
    }

    /// End the session and clear the live location.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> NavigationIntent {
        if let Some(user) = self.session.take() {
            info!(username = %user.username, "Logged out");
        }
        self.location.reset();
        self.notifications.info("Logged out successfully.");

        self.persist_session();
        NavigationIntent::Home
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product` to the cart. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::AuthenticationRequired` when signed out.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, product: ProductId) -> Result<u32> {
        self.require_session("Please sign in to add items to your cart.")?;

        let quantity = self.cart.add(product);
        let name = self.product_name(product);
        self.notifications.success(format!("{name} added to cart!"));
        debug!(%product, quantity, "Added to cart");

        self.persist_cart();
        Ok(quantity)
    }

    /// Take `product` out of the cart entirely.
    ///
    /// Returns `false` without posting anything if it was not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product: ProductId) -> bool {
        if !self.cart.remove(product) {
            return false;
        }
        let name = self.product_name(product);
        self.notifications.info(format!("{name} removed from cart."));

        self.persist_cart();
        true
    }

    /// Replace the cart with one unit of `product` and head to checkout.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::AuthenticationRequired` when signed out.
    #[instrument(skip(self))]
    pub fn buy_now(&mut self, product: ProductId) -> Result<NavigationIntent> {
        self.require_session("Please sign in to proceed with your purchase.")?;

        self.cart.replace_with(product);
        let name = self.product_name(product);
        self.notifications
            .info(format!("Proceeding to checkout with {name}."));

        self.persist_cart();
        Ok(NavigationIntent::Checkout)
    }

    /// Complete checkout: empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::AuthenticationRequired` when signed out and
    /// `CommerceError::EmptyCart` when there is nothing to order.
    #[instrument(skip(self))]
    pub fn place_order(&mut self) -> Result<NavigationIntent> {
        self.require_session("Please sign in to proceed with your purchase.")?;
        if self.cart.is_empty() {
            self.notifications.warning("Your cart is empty.");
            return Err(CommerceError::EmptyCart);
        }

        let items = self.cart.item_count();
        self.cart.clear();
        self.notifications.success("Order placed successfully!");
        info!(items, "Order placed");

        self.persist_cart();
        Ok(NavigationIntent::Home)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add `product` to the wishlist.
    ///
    /// Returns `false` if it was already there; the wishlist is unchanged and
    /// an informational notification is posted instead.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::AuthenticationRequired` when signed out.
    #[instrument(skip(self))]
    pub fn add_to_wishlist(&mut self, product: ProductId) -> Result<bool> {
        self.require_session("Please sign in to add items to your wishlist.")?;

        let name = self.product_name(product);
        if !self.wishlist.insert(product) {
            self.notifications
                .info(format!("{name} is already in your wishlist."));
            return Ok(false);
        }
        self.notifications.success(format!("{name} added to wishlist!"));

        self.persist_wishlist();
        Ok(true)
    }

    /// Remove `product` from the wishlist.
    ///
    /// Returns `false` without posting anything if it was not there.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, product: ProductId) -> bool {
        if !self.wishlist.remove(product) {
            return false;
        }
        let name = self.product_name(product);
        self.notifications
            .info(format!("{name} removed from wishlist."));

        self.persist_wishlist();
        true
    }

    // =========================================================================
    // Address book
    // =========================================================================

    /// Save a new address and return the stored record.
    #[instrument(skip(self, fields))]
    pub fn add_address(&mut self, fields: PostalAddress, make_default: bool) -> Address {
        let address = self.addresses.add(fields, make_default);
        self.notifications.success("Address added successfully!");
        debug!(id = %address.id, is_default = address.is_default, "Address added");

        self.persist_addresses();
        address
    }

    /// Delete the address with `id`.
    ///
    /// Returns `None` without posting anything if no such address exists.
    #[instrument(skip(self))]
    pub fn delete_address(&mut self, id: &AddressId) -> Option<Address> {
        let removed = self.addresses.delete(id)?;
        self.notifications.info("Address deleted.");

        self.persist_addresses();
        Some(removed)
    }

    /// Make `id` the default address, select it and clear the live location.
    ///
    /// Returns `false` without posting anything if no such address exists.
    #[instrument(skip(self))]
    pub fn set_default_address(&mut self, id: &AddressId) -> bool {
        if !self.addresses.set_default(id) {
            return false;
        }
        self.location.reset();
        self.notifications.success("Default address updated.");

        self.persist_addresses();
        true
    }

    /// Point the selection at `id` for this checkout, leaving the default alone.
    ///
    /// Returns `false` if no such address exists.
    #[instrument(skip(self))]
    pub fn select_address(&mut self, id: &AddressId) -> bool {
        if !self.addresses.select(id) {
            return false;
        }
        self.persist_addresses();
        true
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Append a review to a product.
    ///
    /// Returns `Ok(false)` without posting anything if the product does not
    /// exist, whatever the rating.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::InvalidRating` if the rating is out of range.
    #[instrument(skip(self, review), fields(rating = review.rating))]
    pub fn add_review(&mut self, product: ProductId, review: Review) -> Result<bool> {
        if self.catalog.get(product).is_none() {
            debug!(%product, "Review for unknown product ignored");
            return Ok(false);
        }

        if !review.has_valid_rating() {
            self.notifications.error(format!(
                "Rating must be between {} and {}.",
                Review::RATING_RANGE.start(),
                Review::RATING_RANGE.end()
            ));
            return Err(CommerceError::InvalidRating {
                rating: review.rating,
            });
        }

        self.catalog.add_review(product, review);
        self.notifications.success("Review submitted successfully!");
        Ok(true)
    }

    // =========================================================================
    // Live location
    // =========================================================================

    /// Query `sensor` once, bounded by the configured timeout.
    ///
    /// Returns `true` if a position was recorded.
    #[instrument(skip_all)]
    pub async fn fetch_live_location<L: LocationSensor>(&mut self, sensor: &L) -> bool {
        if !sensor.is_available() {
            self.location.mark_unsupported();
            self.notifications.warning(SensorError::Unsupported.to_string());
            return false;
        }

        let ticket = self.begin_location_request();
        let result = tokio::time::timeout(self.config.location_timeout, sensor.current_position())
            .await
            .unwrap_or(Err(SensorError::Timeout));
        let located = result.is_ok();
        self.complete_location_request(ticket, result) && located
    }

    /// Start a location query and return the ticket its result must carry.
    ///
    /// Any ticket handed out earlier stops being honored.
    pub fn begin_location_request(&mut self) -> LocationTicket {
        let ticket = self.location.begin();
        self.notifications.info("Fetching your current location...");
        ticket
    }

    /// Apply the result of the query identified by `ticket`.
    ///
    /// Returns `false`, changing nothing and posting nothing, if a newer query
    /// started or the location was cleared since `ticket` was issued.
    pub fn complete_location_request(
        &mut self,
        ticket: LocationTicket,
        result: std::result::Result<LocationFix, SensorError>,
    ) -> bool {
        if !self.location.complete(ticket, &result) {
            return false;
        }
        match result {
            Ok(fix) => {
                info!(city = fix.city_label(), "Location updated");
                self.notifications
                    .success(format!("Location updated: {}", fix.city_label()));
            }
            Err(e) => {
                warn!(error = %e, "Location query failed");
                self.notifications.error(e.to_string());
            }
        }
        true
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Pending notifications in posting order.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// The notification channel itself.
    #[must_use]
    pub const fn notification_channel(&self) -> &NotificationChannel {
        &self.notifications
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all cart quantities.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Cart total against the catalog, `None` for mixed currencies.
    #[must_use]
    pub fn cart_subtotal(&self) -> Option<Price> {
        self.cart.subtotal(&self.catalog)
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product: ProductId) -> bool {
        self.wishlist.contains(product)
    }

    /// The address in effect right now, resolved on every call.
    #[must_use]
    pub fn current_address(&self) -> Option<&Address> {
        self.addresses.current_selection()
    }

    #[must_use]
    pub const fn address_book(&self) -> &AddressBook {
        &self.addresses
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        self.accounts.accounts()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn live_location(&self) -> &LiveLocation {
        self.location.snapshot()
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the durable store, dropping all in-memory state.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Gate for commands that need a signed-in user.
    fn require_session(&mut self, message: &str) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }
        debug!("Command refused without a session");
        self.notifications.warning(message);
        Err(CommerceError::AuthenticationRequired)
    }

    fn product_name(&self, product: ProductId) -> String {
        self.catalog
            .get(product)
            .map_or_else(|| format!("Item #{product}"), |p| p.name.clone())
    }

    fn persist_cart(&mut self) {
        let result = db::save_json(&mut self.store, keys::CART, &self.cart);
        self.record_write(keys::CART, result);
    }

    fn persist_wishlist(&mut self) {
        let result = db::save_json(&mut self.store, keys::WISHLIST, &self.wishlist);
        self.record_write(keys::WISHLIST, result);
    }

    fn persist_session(&mut self) {
        let result =
            db::save_optional_json(&mut self.store, keys::CURRENT_USER, self.session.as_ref());
        self.record_write(keys::CURRENT_USER, result);
    }

    fn persist_accounts(&mut self) {
        let result = db::save_json(
            &mut self.store,
            keys::REGISTERED_USERS,
            self.accounts.accounts(),
        );
        self.record_write(keys::REGISTERED_USERS, result);
    }

    fn persist_addresses(&mut self) {
        let result = db::save_json(&mut self.store, keys::ADDRESSES, self.addresses.addresses());
        self.record_write(keys::ADDRESSES, result);

        let result = db::save_optional_json(
            &mut self.store,
            keys::SELECTED_ADDRESS_ID,
            self.addresses.selected_id(),
        );
        self.record_write(keys::SELECTED_ADDRESS_ID, result);
    }

    /// Log a failed write and tell the user. In-memory state is kept.
    fn record_write(&mut self, key: &str, result: std::result::Result<(), StoreError>) {
        if let Err(e) = result {
            error!(key, error = %e, "Failed to persist state");
            self.notifications.error(SAVE_FAILED_MESSAGE);
        }
    }
}

fn sign_up_failure_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::UsernameTaken => "Username already taken. Please choose another.",
        AuthError::InvalidUsername(_) => "Please enter a valid username.",
        AuthError::InvalidCredentials | AuthError::PasswordHash => {
            "Could not create your account. Please try again."
        }
    }
}

/// Serialize-only view used by status output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontSummary<'a> {
    pub user: Option<&'a CurrentUser>,
    pub cart_item_count: u64,
    pub cart_subtotal: Option<String>,
    pub wishlist_count: usize,
    pub current_address: Option<&'a Address>,
    pub live_location: &'a LiveLocation,
}

impl<S: DurableStore> Storefront<S> {
    /// Snapshot of the headline figures.
    #[must_use]
    pub fn summary(&self) -> StorefrontSummary<'_> {
        StorefrontSummary {
            user: self.current_user(),
            cart_item_count: self.cart_item_count(),
            cart_subtotal: self.cart_subtotal().map(|p| p.to_string()),
            wishlist_count: self.wishlist_count(),
            current_address: self.current_address(),
            live_location: self.live_location(),
        }
    }
}
