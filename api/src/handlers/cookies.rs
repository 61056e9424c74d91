//! Refresh-token cookie handling

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use parley_shared::CookieConfig;

/// Cookie carrying a newly issued refresh token
pub fn refresh_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    base(config, token.to_string())
        .max_age(Duration::seconds(config.max_age))
        .finish()
}

/// Cookie that makes the browser drop the refresh token
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base(config, String::new()).finish();
    cookie.make_removal();
    cookie
}

/// Refresh token sent by the client, if any
pub fn read_refresh_cookie(req: &HttpRequest, config: &CookieConfig) -> Option<String> {
    req.cookie(&config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn base(config: &CookieConfig, value: String) -> actix_web::cookie::CookieBuilder<'static> {
    Cookie::build(config.name.clone(), value)
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .path(config.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = CookieConfig::default();
        let cookie = refresh_cookie(&config, "token-value");

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let config = CookieConfig {
            secure: false,
            ..CookieConfig::default()
        };
        let cookie = removal_cookie(&config);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_read_refresh_cookie() {
        let config = CookieConfig::default();

        let req = TestRequest::default()
            .cookie(Cookie::new("jwt", "abc"))
            .to_http_request();
        assert_eq!(read_refresh_cookie(&req, &config), Some("abc".to_string()));

        let req = TestRequest::default()
            .cookie(Cookie::new("jwt", ""))
            .to_http_request();
        assert_eq!(read_refresh_cookie(&req, &config), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(read_refresh_cookie(&req, &config), None);
    }
}
