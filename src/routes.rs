//! Locale-prefixed route builders for portal navigation.
//!
//! Pure path construction. The request pipeline uses `login_path` as its
//! redirect target on fatal auth failures; the embedding UI uses the rest.

use crate::locale::Locale;
use crate::session::Role;

/// The login page for a locale.
pub fn login_path(locale: Locale) -> String {
    format!("/{}/login", locale)
}

/// The forgot-password page for a locale.
pub fn forgot_password_path(locale: Locale) -> String {
    format!("/{}/forgot-password", locale)
}

/// The reset-password page for a locale.
pub fn reset_password_path(locale: Locale) -> String {
    format!("/{}/reset-password", locale)
}

/// The dashboard root for a role.
///
/// Each role lands on its own dashboard after sign-in.
pub fn dashboard_path(locale: Locale, role: Role) -> String {
    let root = match role {
        Role::Admin => "admin",
        Role::Dealer => "dealer",
        Role::Customer => "customer",
        Role::Observer => "observer",
    };
    format!("/{}/{}", locale, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_path_is_locale_qualified() {
        assert_eq!(login_path(Locale::En), "/en/login");
        assert_eq!(login_path(Locale::Tr), "/tr/login");
    }

    #[test]
    fn test_dashboard_roots_per_role() {
        assert_eq!(dashboard_path(Locale::En, Role::Admin), "/en/admin");
        assert_eq!(dashboard_path(Locale::Tr, Role::Dealer), "/tr/dealer");
        assert_eq!(dashboard_path(Locale::En, Role::Customer), "/en/customer");
        assert_eq!(dashboard_path(Locale::En, Role::Observer), "/en/observer");
    }

    #[test]
    fn test_password_recovery_paths() {
        assert_eq!(forgot_password_path(Locale::En), "/en/forgot-password");
        assert_eq!(reset_password_path(Locale::Tr), "/tr/reset-password");
    }
}
