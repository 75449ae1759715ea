use std::time::Duration;

use crate::error::CheckError;
use crate::http::QueryParams;
use crate::sequence::run_sequence;

use super::assert::{ensure, expect_countries, expect_status, expect_status_in, first};
use super::{Check, CheckContext};

const VALID_CODES: [&str; 5] = ["us", "gb", "fr", "de", "jp"];
const SEQUENCE_REGIONS: [&str; 5] = [
    "/region/Europe",
    "/region/Asia",
    "/region/Africa",
    "/region/Americas",
    "/region/Oceania",
];
const RESPONSE_TIME_LIMIT: Duration = Duration::from_secs(10);

pub const CATALOGUE: &[Check] = &[
    Check::new(
        "alpha-code",
        "Lookup by alpha code returns the matching country",
        alpha_code,
    ),
    Check::new(
        "unknown-alpha-code",
        "Lookup by an unknown alpha code returns 404",
        unknown_alpha_code,
    ),
    Check::new(
        "valid-codes",
        "Lookups for several valid codes all succeed",
        valid_codes,
    ),
    Check::new(
        "name-search",
        "Partial name search finds multiple countries",
        name_search,
    ),
    Check::new(
        "region-europe",
        "Europe has more than 30 countries, all in Europe, including DE or FR",
        region_europe,
    ),
    Check::new(
        "region-asia-timezones",
        "Asian countries share their region and carry timezone data",
        region_asia_timezones,
    ),
    Check::new(
        "currency",
        "Lookup by currency returns countries",
        currency,
    ),
    Check::new(
        "language",
        "Lookup by language returns countries",
        language,
    ),
    Check::new(
        "capital",
        "Lookup by capital answers 200 or 404",
        capital,
    ),
    Check::new(
        "subregion",
        "Lookup by subregion answers 200 or 404",
        subregion,
    ),
    Check::new(
        "borders",
        "Germany has borders made of three-letter codes",
        borders,
    ),
    Check::new(
        "case-insensitive-code",
        "Alpha code lookups ignore case",
        case_insensitive_code,
    ),
    Check::new(
        "code-name-consistency",
        "Lookup by code and by name agree",
        code_name_consistency,
    ),
    Check::new(
        "object-structure",
        "Country records carry name, cca2 and region",
        object_structure,
    ),
    Check::new(
        "fields-filter",
        "A fields filter shrinks the response body",
        fields_filter,
    ),
    Check::new(
        "response-time",
        "A region lookup answers within 10 seconds",
        response_time,
    ),
    Check::new(
        "sequential-regions",
        "Paced sequential region lookups all succeed",
        sequential_regions,
    ),
];

fn alpha_code(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/alpha/us")?;
    let countries = expect_countries(&response)?;
    let country = first(&countries)?;
    ensure(country.has_alpha2("US"), || {
        format!("expected cca2 US, got {:?}", country.cca2)
    })?;
    Ok(format!(
        "retrieved {}",
        country.common_name().unwrap_or("unnamed country")
    ))
}

fn unknown_alpha_code(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/alpha/zz")?;
    expect_status(&response, 404)?;
    Ok("received 404 for zz".to_owned())
}

fn valid_codes(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    for code in VALID_CODES {
        let response = ctx.client.get(&format!("/alpha/{}", code))?;
        let countries = expect_countries(&response)?;
        ensure(countries.iter().any(|c| c.has_alpha2(code)), || {
            format!("no result for {} carries a matching cca2", code)
        })?;
    }
    Ok(format!("{} codes resolved", VALID_CODES.len()))
}

fn name_search(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/name/united")?;
    let countries = expect_countries(&response)?;
    ensure(countries.len() >= 2, || {
        format!(
            "expected multiple countries matching 'united', got {}",
            countries.len()
        )
    })?;
    Ok(format!("found {} countries matching 'united'", countries.len()))
}

fn region_europe(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/region/Europe")?;
    let countries = expect_countries(&response)?;
    ensure(countries.len() > 30, || {
        format!("expected more than 30 countries, got {}", countries.len())
    })?;
    if let Some(outlier) = countries
        .iter()
        .find(|c| c.region.as_deref() != Some("Europe"))
    {
        return Err(CheckError::Assertion(format!(
            "{} has region {:?}",
            outlier.common_name().unwrap_or("a country"),
            outlier.region
        )));
    }
    let has_anchor = countries.iter().any(|c| {
        matches!(c.common_name(), Some("Germany" | "France"))
            || c.has_alpha2("DE")
            || c.has_alpha2("FR")
    });
    ensure(has_anchor, || "Europe should contain Germany or France".to_owned())?;
    Ok(format!("Europe contains {} countries", countries.len()))
}

fn region_asia_timezones(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/region/Asia")?;
    let countries = expect_countries(&response)?;
    let mut with_timezones = 0_usize;
    for country in &countries {
        ensure(country.region.as_deref() == Some("Asia"), || {
            format!(
                "{} has region {:?}",
                country.common_name().unwrap_or("a country"),
                country.region
            )
        })?;
        if !country.timezones.is_empty() {
            with_timezones = with_timezones.saturating_add(1);
        }
    }
    ensure(with_timezones > 0, || {
        "no Asian country carries timezone data".to_owned()
    })?;
    Ok(format!(
        "Asia contains {} countries, {} with timezone data",
        countries.len(),
        with_timezones
    ))
}

fn currency(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let countries = expect_countries(&ctx.client.get("/currency/usd")?)?;
    Ok(format!("found {} countries using usd", countries.len()))
}

fn language(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let countries = expect_countries(&ctx.client.get("/lang/spanish")?)?;
    Ok(format!("found {} countries speaking spanish", countries.len()))
}

fn capital(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/capital/washington")?;
    expect_status_in(&response, &[200, 404])?;
    Ok(format!("capital lookup answered {}", response.status_code()))
}

fn subregion(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/subregion/Northern Europe")?;
    expect_status_in(&response, &[200, 404])?;
    Ok(format!("subregion lookup answered {}", response.status_code()))
}

fn borders(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let countries = expect_countries(&ctx.client.get("/alpha/de")?)?;
    let germany = first(&countries)?;
    ensure(!germany.borders.is_empty(), || {
        "Germany should have at least one border".to_owned()
    })?;
    if let Some(bad) = germany.borders.iter().find(|code| code.chars().count() != 3) {
        return Err(CheckError::Assertion(format!(
            "border code should be 3 characters: {}",
            bad
        )));
    }
    Ok(format!("Germany has {} borders", germany.borders.len()))
}

fn case_insensitive_code(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let mut codes = Vec::with_capacity(3);
    for path in ["/alpha/us", "/alpha/US", "/alpha/Us"] {
        let countries = expect_countries(&ctx.client.get(path)?)?;
        codes.push(first(&countries)?.cca2.clone());
    }
    let reference = codes.first().cloned().flatten();
    ensure(
        reference.is_some() && codes.iter().all(|code| *code == reference),
        || format!("case variants disagree: {:?}", codes),
    )?;
    Ok("case insensitivity verified".to_owned())
}

fn code_name_consistency(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let by_code = expect_countries(&ctx.client.get("/alpha/us")?)?;
    let by_name = expect_countries(&ctx.client.get("/name/united states")?)?;
    let code = first(&by_code)?.cca2.as_deref().unwrap_or_default();
    ensure(by_name.iter().any(|c| c.has_alpha2(code)), || {
        format!("no name match carries cca2 {:?}", code)
    })?;
    Ok(format!("code and name searches agree on {}", code))
}

fn object_structure(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/alpha/us")?;
    expect_status(&response, 200)?;
    let raw: serde_json::Value = response.json()?;
    for field in ["name", "cca2", "region"] {
        let present = raw
            .get(0)
            .and_then(|record| record.get(field))
            .is_some_and(|value| !value.is_null());
        ensure(present, || {
            format!("first record is missing '{}'", field)
        })?;
    }
    let countries = response.countries()?;
    let country = first(&countries)?;
    ensure(country.name.is_some() && country.cca2.is_some(), || {
        "decoded record is missing name or cca2".to_owned()
    })?;
    Ok("required fields present".to_owned())
}

fn fields_filter(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let full = ctx.client.get("/alpha/us")?;
    let mut query = QueryParams::new();
    query.insert("fields".to_owned(), "name,cca2".to_owned());
    let filtered = ctx.client.get_with_query("/alpha/us", &query)?;
    expect_status(&full, 200)?;
    expect_status(&filtered, 200)?;
    let (full_len, filtered_len) = (full.body().len(), filtered.body().len());
    ensure(filtered_len < full_len, || {
        format!(
            "filtered body ({} bytes) is not smaller than full body ({} bytes)",
            filtered_len, full_len
        )
    })?;
    Ok(format!("{} bytes filtered vs {} bytes full", filtered_len, full_len))
}

fn response_time(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let response = ctx.client.get("/region/Asia")?;
    expect_status(&response, 200)?;
    let elapsed = response.elapsed();
    ensure(elapsed < RESPONSE_TIME_LIMIT, || {
        format!("response took {} ms", elapsed.as_millis())
    })?;
    Ok(format!("response time {} ms", elapsed.as_millis()))
}

fn sequential_regions(ctx: &CheckContext<'_>) -> Result<String, CheckError> {
    let report = run_sequence(ctx.client, &SEQUENCE_REGIONS, ctx.sequence_delay, ctx.token);
    if report.cancelled {
        return Err(CheckError::Cancelled {
            completed: report.completed(),
            total: report.total,
        });
    }
    if let Some((index, step)) = report
        .steps
        .iter()
        .enumerate()
        .find(|(_, step)| step.status() != Some(200))
    {
        return Err(CheckError::Assertion(format!(
            "request {} to {} did not succeed: {:?}",
            index.saturating_add(1),
            step.path,
            step.outcome
        )));
    }
    Ok(format!("{} sequential requests succeeded", report.completed()))
}
