//! Address book commands.

use clap::Args;
use tracing::{info, warn};

use tanish_arts_core::{AddressId, PostalAddress};
use tanish_arts_storefront::{DurableStore, Storefront};

/// Fields for `address add`.
#[derive(Debug, Args)]
pub struct NewAddress {
    /// Recipient name
    #[arg(short, long)]
    pub name: String,
    #[arg(long)]
    pub street: String,
    /// Apartment, suite, landmark
    #[arg(long)]
    pub street2: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub postal_code: String,
    #[arg(long, default_value = "India")]
    pub country: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Make this the default address
    #[arg(long)]
    pub default: bool,
}

impl NewAddress {
    fn into_parts(self) -> (PostalAddress, bool) {
        let fields = PostalAddress {
            full_name: self.name,
            street: self.street,
            street2: self.street2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            phone: self.phone,
        };
        (fields, self.default)
    }
}

pub fn add<S: DurableStore>(storefront: &mut Storefront<S>, address: NewAddress) {
    let (fields, make_default) = address.into_parts();
    let address = storefront.add_address(fields, make_default);
    info!(id = %address.id, is_default = address.is_default, "Saved {}", address.fields.label());
}

pub fn delete<S: DurableStore>(storefront: &mut Storefront<S>, id: &str) {
    if storefront.delete_address(&AddressId::from(id)).is_none() {
        report_unknown(id);
    }
}

pub fn set_default<S: DurableStore>(storefront: &mut Storefront<S>, id: &str) {
    if !storefront.set_default_address(&AddressId::from(id)) {
        report_unknown(id);
    }
}

pub fn select<S: DurableStore>(storefront: &mut Storefront<S>, id: &str) {
    if storefront.select_address(&AddressId::from(id)) {
        info!(id, "Address selected");
    } else {
        report_unknown(id);
    }
}

fn report_unknown(id: &str) {
    warn!(id, "No saved address with this id");
}

/// List saved addresses, marking the default and the current selection.
pub fn list<S: DurableStore>(storefront: &Storefront<S>) {
    let book = storefront.address_book();
    if book.is_empty() {
        info!("No saved addresses");
        return;
    }

    let current = storefront.current_address().map(|a| &a.id);
    for address in book.addresses() {
        let mut marks = String::new();
        if address.is_default {
            marks.push_str(" [default]");
        }
        if current == Some(&address.id) {
            marks.push_str(" [selected]");
        }
        info!("{}{marks}: {}", address.id, address.fields.label());
    }
}
