//! Redaction of API keys from text that ends up in logs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Google API keys: `AIza` followed by 35 URL-safe characters.
static GOOGLE_API_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{35}").expect("api key pattern"));

/// `key=` query parameters in request URLs.
static KEY_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&]key=)[^&\s]+").expect("key param pattern"));

/// Replace anything that looks like an API key with a placeholder.
pub fn redact_secrets(message: &str) -> String {
    let scrubbed = KEY_PARAM.replace_all(message, "${1}[REDACTED]");
    GOOGLE_API_KEY
        .replace_all(&scrubbed, "[API_KEY_REDACTED]")
        .into_owned()
}
