//! User settings kept in the record store

use pagenav_core::error::StoreError;
use pagenav_core::RecordStore;
use serde::Serialize;

/// Storage key of the game collection
pub const GAMES_KEY: &str = "game-library";

const CURRENCY_KEY: &str = "currency";
const FIRST_NAME_KEY: &str = "first-name";
const THEME_KEY: &str = "theme";
const COUNTRY_KEY: &str = "user-country";

const DEFAULT_CURRENCY: &str = "£";
const DEFAULT_FIRST_NAME: &str = "You";
const DEFAULT_THEME: &str = "dark";
const DEFAULT_COUNTRY: &str = "UK";

/// Colour themes the pages can be shown in
pub const THEMES: &[&str] = &["light", "dark"];

/// Regional presets a user can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: &'static str,
    pub label: &'static str,
    pub locale: &'static str,
    pub currency: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country {
        code: "UK",
        label: "United Kingdom",
        locale: "en-GB",
        currency: "£",
    },
    Country {
        code: "US",
        label: "United States",
        locale: "en-US",
        currency: "$",
    },
    Country {
        code: "FR",
        label: "France",
        locale: "fr-FR",
        currency: "€",
    },
    Country {
        code: "DE",
        label: "Germany",
        locale: "de-DE",
        currency: "€",
    },
    Country {
        code: "BR",
        label: "Brazil",
        locale: "pt-BR",
        currency: "R$",
    },
];

/// Look up a country preset by code
pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|country| country.code == code)
}

/// Read and write user preferences
#[derive(Debug, Clone)]
pub struct AppSettings {
    store: RecordStore,
}

impl AppSettings {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn get_or(&self, key: &str, default: &str) -> Result<String, StoreError> {
        Ok(self
            .store
            .get_setting(key)?
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    pub fn currency(&self) -> Result<String, StoreError> {
        self.get_or(CURRENCY_KEY, DEFAULT_CURRENCY)
    }

    pub fn set_currency(&self, currency: &str) -> Result<(), StoreError> {
        self.store.set_setting(CURRENCY_KEY, currency)
    }

    pub fn first_name(&self) -> Result<String, StoreError> {
        self.get_or(FIRST_NAME_KEY, DEFAULT_FIRST_NAME)
    }

    pub fn set_first_name(&self, name: &str) -> Result<(), StoreError> {
        self.store.set_setting(FIRST_NAME_KEY, name)
    }

    pub fn theme(&self) -> Result<String, StoreError> {
        self.get_or(THEME_KEY, DEFAULT_THEME)
    }

    /// Select a theme. Returns false, storing nothing, for unknown themes.
    pub fn set_theme(&self, theme: &str) -> Result<bool, StoreError> {
        if !THEMES.contains(&theme) {
            tracing::warn!("Ignoring unknown theme '{}'", theme);
            return Ok(false);
        }
        self.store.set_setting(THEME_KEY, theme)?;
        Ok(true)
    }

    /// Selected country code. Unknown stored codes fall back to the default.
    pub fn country_code(&self) -> Result<String, StoreError> {
        let code = self.get_or(COUNTRY_KEY, DEFAULT_COUNTRY)?;
        Ok(match country(&code) {
            Some(_) => code,
            None => DEFAULT_COUNTRY.to_string(),
        })
    }

    /// Select a country. Returns false, storing nothing, for unknown codes.
    pub fn set_country_code(&self, code: &str) -> Result<bool, StoreError> {
        if country(code).is_none() {
            tracing::warn!("Ignoring invalid country code '{}'", code);
            return Ok(false);
        }
        self.store.set_setting(COUNTRY_KEY, code)?;
        Ok(true)
    }

    /// Preset for the selected country
    pub fn country(&self) -> Result<&'static Country, StoreError> {
        let code = self.country_code()?;
        Ok(country(&code).unwrap_or(&COUNTRIES[0]))
    }
}
