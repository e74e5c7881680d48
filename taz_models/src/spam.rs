use std::fmt;

use thiserror::Error;

/// The reason a submission has been rejected by the spam guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpamRejection {
    #[error("Please wait a few seconds before submitting again.")]
    Cooldown,
    #[error("Limit of {limit} submissions per hour reached. Please try again later.")]
    HourlyLimit { limit: usize },
    #[error("Limit of {limit} submissions per day reached. Please try again tomorrow.")]
    DailyLimit { limit: usize },
}

/// A single heuristic flag raised on the content of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuspicionWarning {
    TooManyLinks { count: usize },
    SpamKeyword { keyword: String },
    TooShort,
    RepeatedCharacters,
}

impl fmt::Display for SuspicionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyLinks { count } => write!(f, "Message contains too many links ({count})"),
            Self::SpamKeyword { keyword } => {
                write!(f, "Message contains suspicious keyword: {keyword}")
            }
            Self::TooShort => f.write_str("Message is very short"),
            Self::RepeatedCharacters => {
                f.write_str("Message contains excessive character repetition")
            }
        }
    }
}

/// Advisory list of [`SuspicionWarning`]s in the order they were detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspicionReport(Vec<SuspicionWarning>);

impl SuspicionReport {
    pub fn push(&mut self, warning: SuspicionWarning) {
        self.0.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn warnings(&self) -> &[SuspicionWarning] {
        &self.0
    }

    pub fn contains(&self, warning: &SuspicionWarning) -> bool {
        self.0.contains(warning)
    }
}

impl fmt::Display for SuspicionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, warning) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            warning.fmt(f)?;
        }
        Ok(())
    }
}

impl FromIterator<SuspicionWarning> for SuspicionReport {
    fn from_iter<I: IntoIterator<Item = SuspicionWarning>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
