//! `:param` path templating.

use std::fmt::Write;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::errors::UrlTemplateError;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r":([a-zA-Z]+)").expect("Invalid regex"))
}

/// Substitutes `:name` placeholders in `template` with percent-encoded values.
///
/// Without a parameter list the template is returned unchanged. Otherwise
/// every placeholder needs a non-empty value, and every listed parameter
/// needs a value even if the template does not reference it.
///
/// # Errors
/// Returns [`UrlTemplateError::MissingUrl`] for an empty template,
/// [`UrlTemplateError::MissingParams`] naming every unfilled placeholder, or
/// [`UrlTemplateError::InvalidValue`] for a listed parameter without a value.
pub fn replace_url_params(
    template: &str,
    params: Option<&[(&str, Option<&str>)]>,
) -> Result<String, UrlTemplateError> {
    if template.is_empty() {
        return Err(UrlTemplateError::MissingUrl);
    }

    let Some(params) = params else {
        return Ok(template.to_string());
    };

    let lookup = |name: &str| {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| *value)
            .filter(|value| !value.is_empty())
    };

    let missing: Vec<String> = placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|name| lookup(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(UrlTemplateError::MissingParams(missing));
    }

    if let Some((key, _)) = params.iter().find(|(_, value)| value.is_none()) {
        return Err(UrlTemplateError::InvalidValue((*key).to_string()));
    }

    let filled = placeholder_regex().replace_all(template, |caps: &Captures<'_>| {
        lookup(&caps[1]).map(encode_component).unwrap_or_default()
    });

    Ok(filled.into_owned())
}

/// Percent-encodes everything except the URI-component unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}
