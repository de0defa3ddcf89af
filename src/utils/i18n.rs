use tracing::warn;

/// Switch the locale used for user-facing text
pub fn set_locale(locale: &str) {
    let available = rust_i18n::available_locales!();
    if available.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Locale {} is not available, falling back to en", locale);
        rust_i18n::set_locale("en");
    }
}
