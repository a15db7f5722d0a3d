macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// API route definitions shared across Colmena services.
///
/// Fixed paths are consts; parameterized paths are builder fns so callers
/// never format route strings by hand. User-supplied codes are
/// percent-encoded; backend-generated codes are hex/url-safe already but
/// encoding them is harmless and keeps the rule uniform.
pub mod auth {
    pub const LOGIN: &str = api_path!("/auth/login");
    pub const REGISTER: &str = api_path!("/auth/register");
    pub const ME: &str = api_path!("/auth/me");
    pub const USERS: &str = api_path!("/auth/users");

    pub fn user(user_id: i64) -> String {
        format!("{USERS}/{user_id}")
    }
}

pub mod events {
    pub const COLLECTION: &str = api_path!("/events");

    pub fn item(event_id: i64) -> String {
        format!("{COLLECTION}/{event_id}")
    }

    pub fn public(public_code: &str) -> String {
        format!("{COLLECTION}/public/{}", urlencoding::encode(public_code))
    }

    pub fn qr(event_id: i64) -> String {
        format!("{COLLECTION}/{event_id}/qr")
    }

    pub fn access_codes(event_id: i64) -> String {
        format!("{COLLECTION}/{event_id}/access-codes")
    }

    pub fn access_code_qr(event_id: i64, access_id: i64) -> String {
        format!("{COLLECTION}/{event_id}/access-codes/{access_id}/qr")
    }
}

pub mod reservations {
    pub const COLLECTION: &str = api_path!("/reservations");

    pub fn create_public(public_code: &str) -> String {
        format!("{COLLECTION}/public/{}", urlencoding::encode(public_code))
    }

    pub fn checkin(reservation_code: &str) -> String {
        format!(
            "{COLLECTION}/checkin/{}",
            urlencoding::encode(reservation_code)
        )
    }

    pub fn by_event(event_id: i64) -> String {
        format!("{COLLECTION}/event/{event_id}")
    }

    pub fn qr(reservation_id: i64) -> String {
        format!("{COLLECTION}/{reservation_id}/qr")
    }
}

pub mod access_codes {
    pub const CHECK_BASE: &str = api_path!("/access-codes/check");

    pub fn check(access_code: &str) -> String {
        format!("{CHECK_BASE}/{}", urlencoding::encode(access_code))
    }
}
