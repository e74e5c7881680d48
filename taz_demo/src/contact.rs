use std::sync::LazyLock;

use taz_models::contact::ContactForm;

pub static VALID_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Maria Silva".into(),
    email: "maria.silva@example.com".into(),
    phone: "(11) 98765-4321".into(),
    message: "I would like a quote for a new company website.".into(),
});

pub static VALID_FORM_NO_PHONE: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    phone: String::new(),
    ..VALID_FORM.clone()
});

/// A valid form with surrounding whitespace, markup and a mixed case email.
pub static UNTRIMMED_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "  <b>Maria Silva</b> ".into(),
    email: "Maria.Silva@Example.COM".into(),
    phone: " (11) 98765-4321 ".into(),
    message: "  I would like a quote for a new company website.  ".into(),
});

pub static UNTRIMMED_FORM_SANITIZED: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "bMaria Silva/b".into(),
    email: "maria.silva@example.com".into(),
    phone: "(11) 98765-4321".into(),
    message: "I would like a quote for a new company website.".into(),
});

/// Invalid email and a message that is too short.
pub static INVALID_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Maria Silva".into(),
    email: "not-an-email".into(),
    phone: String::new(),
    message: "Hi there".into(),
});

/// Valid, but triggers every suspicion heuristic except the length check.
pub static SUSPICIOUS_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Free Money".into(),
    email: "winner@example.com".into(),
    phone: String::new(),
    message: "CLICK HERE: https://a.example http://b.example https://c.example !!!!!!!!!!!!"
        .into(),
});
