//! Subsonic token authentication
//!
//! The protocol authenticates each request with `t = hex(md5(password + s))`
//! where `s` is a per-request salt sent alongside it.
//!
//! This scheme is weak: MD5 is a fast, non-iterated hash, the salt travels in
//! clear text, and anyone who knows the password can derive any token. It is
//! implemented only because servers require it. Do not treat it as
//! protecting anything beyond what the transport (TLS) already does.
//!
//! Salts are second-resolution timestamps (`YYYYMMDDhhmmss`). A salt must
//! never be reused, so [`SaltGenerator`] hands out the next unused second when
//! several requests fall within the same clock second.

use bridge_traits::time::Clock;
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Timestamp layout used for salts
pub const SALT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Authentication token for `password` and `salt`
pub fn token(password: &str, salt: &str) -> String {
    format!("{:x}", md5::compute(format!("{}{}", password, salt)))
}

/// Issues strictly increasing timestamp salts
pub struct SaltGenerator {
    clock: Arc<dyn Clock>,
    last_issued: Mutex<Option<DateTime<Utc>>>,
}

impl SaltGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued: Mutex::new(None),
        }
    }

    /// Next salt, never equal to one issued before by this generator
    pub fn next_salt(&self) -> String {
        let now = self.clock.now().trunc_subsecs(0);
        let mut last = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let issued = match *last {
            Some(previous) if now <= previous => previous + chrono::Duration::seconds(1),
            _ => now,
        };
        *last = Some(issued);

        issued.format(SALT_FORMAT).to_string()
    }
}
