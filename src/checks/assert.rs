use crate::error::CheckError;
use crate::http::ApiResponse;
use crate::model::Country;

pub(super) fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), CheckError> {
    if condition {
        Ok(())
    } else {
        Err(CheckError::Assertion(message()))
    }
}

pub(super) fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), CheckError> {
    expect_status_in(response, &[expected])
}

pub(super) fn expect_status_in(response: &ApiResponse, allowed: &[u16]) -> Result<(), CheckError> {
    let status = response.status_code();
    ensure(allowed.contains(&status), || {
        format!(
            "{} returned {}, expected {:?}",
            response.url(),
            status,
            allowed
        )
    })
}

/// Expects 200 and decodes a non-empty array of countries.
pub(super) fn expect_countries(response: &ApiResponse) -> Result<Vec<Country>, CheckError> {
    expect_status(response, 200)?;
    let countries = response.countries()?;
    ensure(!countries.is_empty(), || {
        format!("{} returned an empty array", response.url())
    })?;
    Ok(countries)
}

pub(super) fn first(countries: &[Country]) -> Result<&Country, CheckError> {
    countries
        .first()
        .ok_or_else(|| CheckError::Assertion("expected at least one country".to_owned()))
}
