//! Typed records returned by the country-data API.
mod country;


pub use country::{
    Car, CoatOfArms, Country, CountryName, Currency, Demonym, Flags, Idd, Maps, NativeName,
    Translation,
};
