use std::str::FromStr;

use chrono::{DateTime, Locale, Utc};

/// Locale used for the long dates we put in emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    #[default]
    EnUs,
    PtBr,
}

impl DateLocale {
    fn long_date_pattern(&self) -> &'static str {
        match self {
            DateLocale::EnUs => "%B %-d, %Y",
            DateLocale::PtBr => "%-d de %B de %Y",
        }
    }

    fn chrono_locale(&self) -> Locale {
        match self {
            DateLocale::EnUs => Locale::en_US,
            DateLocale::PtBr => Locale::pt_BR,
        }
    }
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('_', "-").to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(DateLocale::EnUs),
            "pt" | "pt-br" => Ok(DateLocale::PtBr),
            other => Err(format!("unsupported locale `{other}`")),
        }
    }
}

/// Formats `ts` as a long date, e.g. `April 23, 2024`. Always rendered in UTC.
pub fn format_long_date(ts: DateTime<Utc>, locale: DateLocale) -> String {
    ts.format_localized(locale.long_date_pattern(), locale.chrono_locale())
        .to_string()
}
