use crate::error::ValidationError;

pub(crate) fn parse_query_param(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once('=') {
        Some((key, value)) => {
            let key = key.trim();
            if key.is_empty() {
                return Err(ValidationError::EmptyQueryKey {
                    value: s.to_owned(),
                });
            }
            Ok((key.to_owned(), value.to_owned()))
        }
        None => Err(ValidationError::InvalidQueryParam {
            value: s.to_owned(),
        }),
    }
}

pub(crate) fn parse_json_body(s: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(s).map_err(|err| ValidationError::InvalidJsonBody { source: err })
}

pub(crate) fn parse_path(s: &str) -> Result<String, ValidationError> {
    if s.starts_with('/') {
        Ok(s.to_owned())
    } else {
        Err(ValidationError::PathMissingSlash {
            value: s.to_owned(),
        })
    }
}
