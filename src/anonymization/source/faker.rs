//! Faker-backed synthetic value source

use super::names::first_names;
use super::{Sex, SyntheticSource};
use crate::anonymization::locale::Locale;
use crate::domain::{AnonymizeError, Result};
use chrono::{Duration, NaiveDate, Utc};
use fake::faker::name::raw::{LastName, Name};
use fake::locales::{EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of leading letters in a generated identifier
const IDENTIFIER_LETTERS: usize = 4;
/// Number of trailing digits in a generated identifier
const IDENTIFIER_DIGITS: usize = 14;

/// Dispatch a `fake` name faker over the configured locale
macro_rules! localized {
    ($faker:ident, $locale:expr, $rng:expr) => {
        match $locale {
            Locale::En => $faker(EN).fake_with_rng::<String, _>($rng),
            Locale::FrFr => $faker(FR_FR).fake_with_rng::<String, _>($rng),
            Locale::PtBr => $faker(PT_BR).fake_with_rng::<String, _>($rng),
            Locale::JaJp => $faker(JA_JP).fake_with_rng::<String, _>($rng),
            Locale::ZhCn => $faker(ZH_CN).fake_with_rng::<String, _>($rng),
            Locale::ZhTw => $faker(ZH_TW).fake_with_rng::<String, _>($rng),
        }
    };
}

/// Synthetic value source built on the `fake` crate.
///
/// Dates are drawn from 1970-01-01 up to the current UTC date. Identifiers
/// follow the en_GB BBAN layout (`ABCD12345678901234`) for every locale.
pub struct FakerSource {
    locale: Locale,
    rng: StdRng,
    earliest: NaiveDate,
    latest: NaiveDate,
}

impl FakerSource {
    /// Create a source seeded from OS entropy
    pub fn new(locale: Locale) -> Self {
        Self::from_rng(locale, StdRng::from_entropy())
    }

    /// Create a reproducible source
    pub fn seeded(locale: Locale, seed: u64) -> Self {
        Self::from_rng(locale, StdRng::seed_from_u64(seed))
    }

    fn from_rng(locale: Locale, rng: StdRng) -> Self {
        Self {
            locale,
            rng,
            earliest: NaiveDate::default(),
            latest: Utc::now().date_naive(),
        }
    }

    /// Restrict generated dates to `earliest..=latest`
    pub fn with_date_span(mut self, earliest: NaiveDate, latest: NaiveDate) -> Result<Self> {
        if earliest > latest {
            return Err(AnonymizeError::InvalidRange {
                min: earliest.to_string(),
                max: latest.to_string(),
            });
        }
        self.earliest = earliest;
        self.latest = latest;
        Ok(self)
    }

    /// Locale this source generates for
    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn gendered_name(&mut self, sex: Sex) -> String {
        let first = first_names(self.locale, sex)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        let last = localized!(LastName, self.locale, &mut self.rng);

        if self.locale.family_name_first() {
            format!("{last}{first}")
        } else {
            format!("{first} {last}")
        }
    }
}

impl SyntheticSource for FakerSource {
    fn person_name(&mut self, sex: Option<Sex>) -> String {
        match sex {
            Some(sex) => self.gendered_name(sex),
            None => localized!(Name, self.locale, &mut self.rng),
        }
    }

    fn identifier(&mut self) -> String {
        let mut id = String::with_capacity(IDENTIFIER_LETTERS + IDENTIFIER_DIGITS);
        for _ in 0..IDENTIFIER_LETTERS {
            id.push(char::from(self.rng.gen_range(b'A'..=b'Z')));
        }
        for _ in 0..IDENTIFIER_DIGITS {
            id.push(char::from(self.rng.gen_range(b'0'..=b'9')));
        }
        id
    }

    fn integer(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(AnonymizeError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(self.rng.gen_range(min..=max))
    }

    fn decimal(&mut self, min: f64, max: f64) -> Result<f64> {
        if let Some(bound) = [min, max].into_iter().find(|b| !b.is_finite()) {
            return Err(AnonymizeError::NonFiniteBound(bound.to_string()));
        }
        if min > max {
            return Err(AnonymizeError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        if min == max {
            return Ok(min);
        }
        Ok(self.rng.gen_range(min..=max))
    }

    fn date(&mut self) -> NaiveDate {
        let span = (self.latest - self.earliest).num_days().max(0);
        let offset = self.rng.gen_range(0..=span);
        self.earliest + Duration::days(offset)
    }
}
