use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One country record as returned by the `/v3.1` endpoints.
///
/// Every field is optional. Unknown fields are ignored and collection fields
/// that are missing or `null` decode as empty, so a partial response (for
/// example one filtered with `?fields=`) still decodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: Option<CountryName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tld: Vec<String>,
    pub cca2: Option<String>,
    pub ccn3: Option<String>,
    pub cca3: Option<String>,
    pub cioc: Option<String>,
    pub independent: Option<bool>,
    pub status: Option<String>,
    pub un_member: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currencies: BTreeMap<String, Currency>,
    pub idd: Option<Idd>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_spellings: Vec<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translations: BTreeMap<String, Translation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latlng: Vec<f64>,
    pub landlocked: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borders: Vec<String>,
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub demonyms: BTreeMap<String, Demonym>,
    pub flag: Option<String>,
    pub maps: Option<Maps>,
    pub population: Option<u64>,
    /// Gini index keyed by survey year.
    #[serde(default, deserialize_with = "null_as_default")]
    pub gini: BTreeMap<String, f64>,
    pub fifa: Option<String>,
    pub car: Option<Car>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continents: Vec<String>,
    pub flags: Option<Flags>,
    pub coat_of_arms: Option<CoatOfArms>,
    pub start_of_week: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryName {
    pub common: Option<String>,
    pub official: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: BTreeMap<String, NativeName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeName {
    pub official: Option<String>,
    pub common: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Idd {
    pub root: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    pub official: Option<String>,
    pub common: Option<String>,
}

/// Demonyms for one language: `f` is the feminine form, `m` the masculine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Demonym {
    pub f: Option<String>,
    pub m: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    pub google_maps: Option<String>,
    pub open_street_maps: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Car {
    #[serde(default, deserialize_with = "null_as_default")]
    pub signs: Vec<String>,
    pub side: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CoatOfArms {
    pub png: Option<String>,
    pub svg: Option<String>,
}

impl Country {
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.name.as_ref()?.common.as_deref()
    }

    #[must_use]
    pub fn official_name(&self) -> Option<&str> {
        self.name.as_ref()?.official.as_deref()
    }

    /// Latitude and longitude, when the record carries both.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.latlng.as_slice() {
            [lat, lng, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }

    pub fn currency_codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.values().map(String::as_str)
    }

    /// Most recent Gini measurement as `(year, value)`.
    #[must_use]
    pub fn latest_gini(&self) -> Option<(&str, f64)> {
        self.gini
            .iter()
            .next_back()
            .map(|(year, value)| (year.as_str(), *value))
    }

    /// Whether the alpha-2 code equals `code`, ignoring ASCII case.
    #[must_use]
    pub fn has_alpha2(&self, code: &str) -> bool {
        self.cca2
            .as_deref()
            .is_some_and(|cca2| cca2.eq_ignore_ascii_case(code))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
