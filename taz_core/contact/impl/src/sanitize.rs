use std::sync::LazyLock;

use regex::Regex;
use taz_models::contact::ContactForm;

static JAVASCRIPT_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").unwrap());

/// Strip markup from every field of the form and normalize the email
/// address to lower case.
pub fn sanitize(form: &ContactForm) -> ContactForm {
    ContactForm {
        name: sanitize_string(&form.name),
        email: sanitize_string(&form.email).to_lowercase(),
        phone: sanitize_string(&form.phone),
        message: sanitize_string(&form.message),
    }
}

/// Trim `value` and remove angle brackets, `javascript:` schemes and inline
/// event handlers.
///
/// The removal is repeated until nothing changes anymore, so removing one
/// pattern can never leave another one behind.
pub fn sanitize_string(value: &str) -> String {
    let mut current = sanitize_once(value);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(value: &str) -> String {
    let value = value.trim().replace(['<', '>'], "");
    let value = JAVASCRIPT_SCHEME_REGEX.replace_all(&value, "");
    EVENT_HANDLER_REGEX.replace_all(&value, "").into_owned()
}
