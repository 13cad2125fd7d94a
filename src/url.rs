//! URL assembly from a template, path and query parameters and a fragment.
//!
//! The steps run in a fixed order, each on the string produced by the previous one:
//!
//! 1. trailing slashes are trimmed,
//! 2. every `{key}` token is replaced with the encoded path parameter value,
//! 3. query parameters are appended in insertion order,
//! 4. a non-blank fragment is appended,
//! 5. the result is checked against the RFC 3986 character set and parsed as an absolute URL.

use url::Url;

use crate::request::ParamMap;
use crate::{Error, Result};

/// Percent-encodes a parameter value so it is safe in a path segment, a query value and a
/// fragment alike.
///
/// This is `application/x-www-form-urlencoded` serialization with spaces written as `%20`
/// instead of `+`. A literal `+` in the input is encoded as `%2B` first, so the substitution
/// never touches it.
pub fn encode_param(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Assembles the final URL string without validating it.
///
/// Tokens without a matching path parameter are left verbatim. Query keys are not encoded.
pub fn assemble_url(
    template: &str,
    path_params: &ParamMap,
    query_params: &ParamMap,
    fragment: Option<&str>,
) -> String {
    let mut url = template.trim_end_matches('/').to_owned();

    // Keys are substituted one after another, so a key whose token contains another key's
    // token depends on insertion order.
    for (key, value) in path_params {
        let token = format!("{{{key}}}");
        if url.contains(&token) {
            url = url.replace(&token, &encode_param(value));
        }
    }

    for (idx, (key, value)) in query_params.iter().enumerate() {
        url.push(if idx == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&encode_param(value));
    }

    if let Some(fragment) = fragment.filter(|f| !f.trim().is_empty()) {
        url.push('#');
        url.push_str(&encode_param(fragment));
    }

    url
}

/// Why an assembled URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UrlError {
    /// A character that may not appear unescaped in a URI, such as a space or the brace of an
    /// unreplaced `{key}` token.
    #[error("illegal character {character:?} at index {index}")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Byte offset into the assembled URL.
        index: usize,
    },
    /// A `%` not followed by two hex digits.
    #[error("malformed escape at index {index}")]
    MalformedEscape {
        /// Byte offset of the `%`.
        index: usize,
    },
    /// The URL parser refused the string.
    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

/// Assembles the final URL and parses it as an absolute URL.
///
/// Fails with [`Error::MalformedUrl`] when the result holds characters outside the RFC 3986
/// set, is relative, or is otherwise unparsable. The parser normalizes what it accepts, so
/// dot segments in the path are resolved.
pub fn build_url(
    template: &str,
    path_params: &ParamMap,
    query_params: &ParamMap,
    fragment: Option<&str>,
) -> Result<Url> {
    let url = assemble_url(template, path_params, query_params, fragment);
    match check_characters(&url).and_then(|()| Ok(Url::parse(&url)?)) {
        Ok(parsed) => Ok(parsed),
        Err(source) => {
            tracing::debug!(%url, "rejected malformed url: {source}");
            Err(Error::MalformedUrl { url, source })
        }
    }
}

fn check_characters(url: &str) -> std::result::Result<(), UrlError> {
    let bytes = url.as_bytes();
    for (index, character) in url.char_indices() {
        match character {
            '%' => {
                let escape = bytes.get(index + 1..index + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(UrlError::MalformedEscape { index });
                }
            }
            c if is_uri_char(c) => {}
            character => return Err(UrlError::IllegalCharacter { character, index }),
        }
    }
    Ok(())
}

// Unreserved and reserved ASCII, plus non-ASCII text the parser escapes on its own.
fn is_uri_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=".contains(c)
    } else {
        !c.is_control() && !c.is_whitespace()
    }
}
