//! The `refresh` cookie.
//!
//! Attributes (path, secure, http-only, same-site) come from
//! [`CookieConfig`]. The cookie lives exactly as long as the refresh token it
//! carries: `Max-Age` and `Expires` are both set from the refresh lifetime.

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, SameSite};
use skadi_config::{CookieConfig, SameSitePolicy};
use time::OffsetDateTime;

pub const REFRESH_COOKIE: &str = "refresh";

fn same_site(policy: SameSitePolicy) -> Option<SameSite> {
    match policy {
        SameSitePolicy::Strict => Some(SameSite::Strict),
        SameSitePolicy::Lax => Some(SameSite::Lax),
        SameSitePolicy::None => Some(SameSite::None),
        SameSitePolicy::Unset => None,
    }
}

fn base_cookie(config: &CookieConfig, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::build((REFRESH_COOKIE, value))
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .build();
    cookie.set_same_site(same_site(config.same_site));
    cookie
}

/// Cookie carrying a freshly issued refresh token.
pub fn refresh_cookie(config: &CookieConfig, token: String, ttl: Duration) -> Cookie<'static> {
    let ttl = time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX);

    let mut cookie = base_cookie(config, token);
    cookie.set_max_age(ttl);
    cookie.set_expires(OffsetDateTime::now_utc().saturating_add(ttl));
    cookie
}

/// Cookie to pass to `CookieJar::remove`; path and domain must match the
/// original for the browser to drop it.
pub fn refresh_removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    base_cookie(config, String::new())
}
