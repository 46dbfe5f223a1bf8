//! Sign-up, login and logout.

use tanish_arts_storefront::{DurableStore, Storefront};

use super::report_navigation;

pub fn sign_up<S: DurableStore>(
    storefront: &mut Storefront<S>,
    username: &str,
    password: Option<&str>,
) {
    if let Ok(intent) = storefront.sign_up(username, password) {
        report_navigation(intent);
    }
}

pub fn login<S: DurableStore>(
    storefront: &mut Storefront<S>,
    username: &str,
    password: Option<&str>,
) {
    if let Ok(intent) = storefront.login(username, password) {
        report_navigation(intent);
    }
}

pub fn logout<S: DurableStore>(storefront: &mut Storefront<S>) {
    report_navigation(storefront.logout());
}
