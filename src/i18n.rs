// ==========================================
// Logistica ASN - internationalization
// ==========================================
// rust-i18n, Spanish (default) and English
// ==========================================
// Note: rust_i18n::i18n! is initialized in lib.rs
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Sets the locale ("es" or "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translates a message key.
///
/// # Example
/// ```no_run
/// use logistica_asn::i18n::t;
/// let msg = t("menu.title");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translates a message key and fills `%{name}` placeholders.
///
/// # Example
/// ```no_run
/// use logistica_asn::i18n::t_with_args;
/// let msg = t_with_args("pallet.weight", &[("n", "1")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // the rust-i18n locale is global and tests run in parallel
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");
        set_locale("es");
        assert_eq!(current_locale(), "es");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("es");
        assert_eq!(t("menu.exit"), "Salir");

        set_locale("en");
        assert_eq!(t("menu.exit"), "Exit");

        set_locale("es");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("es");
        let msg = t_with_args("error.missing_column", &[("column", "LPN")]);
        assert_eq!(msg, "Columna 'LPN' no encontrada en el archivo WMS.");

        set_locale("en");
        let msg = t_with_args("error.missing_column", &[("column", "LPN")]);
        assert!(msg.contains("'LPN'"));

        set_locale("es");
    }
}
