use std::ops::Deref;

use serde::Deserialize;

/// A duration written in a human friendly form like `"3s"`, `"1h 30m"` or
/// `"250ms"`. Supported units are `ms`, `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration {s:?}")))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    s.split_whitespace()
        .try_fold(std::time::Duration::ZERO, |total, part| {
            let split = part.find(|c: char| !c.is_ascii_digit())?;
            let (value, unit) = part.split_at(split);
            let value = value.parse::<u64>().ok()?;
            let millis = match unit {
                "ms" => value,
                "s" => value.checked_mul(1000)?,
                "m" => value.checked_mul(60 * 1000)?,
                "h" => value.checked_mul(60 * 60 * 1000)?,
                "d" => value.checked_mul(24 * 60 * 60 * 1000)?,
                _ => return None,
            };
            total.checked_add(std::time::Duration::from_millis(millis))
        })
}
