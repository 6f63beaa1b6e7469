//! Locale selection for synthetic values

use crate::domain::{AnonymizeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locale tag used when none is configured
pub const DEFAULT_LOCALE: &str = "en_GB";

/// Languages/regions the synthetic value source can generate names for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    /// English (en, en_GB, en_US, ...)
    #[default]
    En,
    /// French (France)
    FrFr,
    /// Portuguese (Brazil)
    PtBr,
    /// Japanese
    JaJp,
    /// Simplified Chinese
    ZhCn,
    /// Traditional Chinese
    ZhTw,
}

impl Locale {
    /// Parse a locale tag such as `en_GB`, `fr-FR` or `ja_JP`
    ///
    /// Matching is case insensitive and accepts `_` or `-` as separator.
    /// Every English region maps to [`Locale::En`].
    pub fn parse(tag: &str) -> Result<Self> {
        let normalized = tag.trim().replace('-', "_").to_lowercase();
        let locale = match normalized.as_str() {
            "en" => Locale::En,
            s if s.starts_with("en_") => Locale::En,
            "fr" | "fr_fr" => Locale::FrFr,
            "pt_br" => Locale::PtBr,
            "ja" | "ja_jp" => Locale::JaJp,
            "zh_cn" => Locale::ZhCn,
            "zh_tw" => Locale::ZhTw,
            _ => return Err(AnonymizeError::UnsupportedLocale(tag.to_string())),
        };
        Ok(locale)
    }

    /// Canonical tag for this locale
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en_GB",
            Locale::FrFr => "fr_FR",
            Locale::PtBr => "pt_BR",
            Locale::JaJp => "ja_JP",
            Locale::ZhCn => "zh_CN",
            Locale::ZhTw => "zh_TW",
        }
    }

    /// Whether full names are written family name first without a space
    pub fn family_name_first(&self) -> bool {
        matches!(self, Locale::JaJp | Locale::ZhCn | Locale::ZhTw)
    }
}

impl FromStr for Locale {
    type Err = AnonymizeError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = AnonymizeError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
