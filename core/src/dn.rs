//! Distinguished name parsing and normalization.
//!
//! Values are kept in their escaped form: parsing only splits the DN at
//! unescaped separators and trims insignificant whitespace, it never
//! escapes or unescapes attribute values.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing a DN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnError {
    #[error("Empty DN component at position {position} in '{dn}'")]
    EmptyComponent { dn: String, position: usize },

    #[error("DN component '{component}' is missing an attribute type")]
    MissingType { component: String },

    #[error("DN component '{component}' is missing '='")]
    MissingEquals { component: String },

    #[error("DN '{dn}' ends with a dangling escape")]
    DanglingEscape { dn: String },
}

/// One `type=value` assertion of a relative distinguished name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ava {
    pub attr: String,
    /// The value, still escaped.
    pub value: String,
}

/// A relative distinguished name (one or more AVAs joined by `+`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    pub avas: Vec<Ava>,
}

/// A parsed distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dn {
    pub rdns: Vec<Rdn>,
}

impl Dn {
    /// Parse a DN string. An empty (or blank) string is the root DN.
    pub fn parse(dn: &str) -> Result<Self, DnError> {
        if dn.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut rdns = Vec::new();
        for (position, component) in split_unescaped(dn, ',')?.into_iter().enumerate() {
            if component.trim().is_empty() {
                return Err(DnError::EmptyComponent {
                    dn: dn.to_string(),
                    position,
                });
            }
            let mut avas = Vec::new();
            for ava in split_unescaped(component, '+')? {
                avas.push(parse_ava(ava)?);
            }
            rdns.push(Rdn { avas });
        }

        Ok(Self { rdns })
    }

    /// Number of RDNs.
    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            for (j, ava) in rdn.avas.iter().enumerate() {
                if j > 0 {
                    write!(f, "+")?;
                }
                write!(f, "{}={}", ava.attr, ava.value)?;
            }
        }
        Ok(())
    }
}

/// Parse and re-serialize a DN, removing whitespace around separators.
pub fn normalize_dn(dn: &str) -> Result<String, DnError> {
    Ok(Dn::parse(dn)?.to_string())
}

/// Split at every occurrence of `sep` that is not preceded by an escape.
fn split_unescaped(input: &str, sep: char) -> Result<Vec<&str>, DnError> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == sep {
            parts.push(&input[start..i]);
            start = i + ch.len_utf8();
        }
    }
    if escaped {
        return Err(DnError::DanglingEscape {
            dn: input.to_string(),
        });
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn parse_ava(component: &str) -> Result<Ava, DnError> {
    let (attr, value) = component
        .split_once('=')
        .ok_or_else(|| DnError::MissingEquals {
            component: component.trim().to_string(),
        })?;

    let attr = attr.trim();
    if attr.is_empty() {
        return Err(DnError::MissingType {
            component: component.trim().to_string(),
        });
    }

    Ok(Ava {
        attr: attr.to_string(),
        value: trim_value(value).to_string(),
    })
}

/// Trim whitespace from a value without dropping an escaped trailing space.
fn trim_value(value: &str) -> &str {
    let value = value.trim_start();
    let mut end = value.len();
    while end > 0 {
        let bytes = value.as_bytes();
        if bytes[end - 1] != b' ' {
            break;
        }
        // Count backslashes in front of this space
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }
    &value[..end]
}
