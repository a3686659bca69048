//! RFC 4512 schema definition parsing.
//!
//! Handles the `objectClasses` and `attributeTypes` description formats:
//!
//! ```text
//! ( 2.5.6.6 NAME 'person' SUP top STRUCTURAL MUST ( sn $ cn ) MAY description )
//! ( 2.5.4.3 NAME ( 'cn' 'commonName' ) DESC 'common name' SUP name )
//! ```
//!
//! Only the parts used for model generation are kept. Other keywords are
//! parsed and skipped.

use crate::{SchemaLookupError, SchemaResult};

/// Keywords that stand alone, without a value.
const FLAGS: &[&str] = &[
    "OBSOLETE",
    "ABSTRACT",
    "STRUCTURAL",
    "AUXILIARY",
    "SINGLE-VALUE",
    "COLLECTIVE",
    "NO-USER-MODIFICATION",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Dollar,
    Quoted(String),
    Word(&'a str),
}

fn tokenize(definition: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut chars = definition.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            '$' => tokens.push(Token::Dollar),
            '\'' => {
                let mut end = None;
                for (i, c) in chars.by_ref() {
                    if c == '\'' {
                        end = Some(i);
                        break;
                    }
                }
                let end = end.ok_or_else(|| format!("unterminated quote at offset {}", start))?;
                tokens.push(Token::Quoted(unescape_qdstring(&definition[start + 1..end])));
            }
            _ => {
                let mut end = definition.len();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '$' | '\'') {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push(Token::Word(&definition[start..end]));
            }
        }
    }

    Ok(tokens)
}

/// `\27` and `\5C` are the only escapes allowed in a qdstring.
fn unescape_qdstring(raw: &str) -> String {
    raw.replace("\\27", "'")
        .replace("\\5C", "\\")
        .replace("\\5c", "\\")
}

/// A parsed definition: the OID and each keyword with its values.
#[derive(Debug, Default)]
struct RawDefinition {
    oid: String,
    terms: Vec<(String, Vec<String>)>,
}

impl RawDefinition {
    fn parse(definition: &str) -> Result<Self, String> {
        let tokens = tokenize(definition)?;
        let mut iter = tokens.into_iter().peekable();

        if iter.next() != Some(Token::Open) {
            return Err("expected '('".to_string());
        }
        let oid = match iter.next() {
            Some(Token::Word(oid)) => oid.to_string(),
            _ => return Err("expected an OID".to_string()),
        };

        let mut raw = RawDefinition {
            oid,
            terms: Vec::new(),
        };

        loop {
            let keyword = match iter.next() {
                Some(Token::Close) => break,
                Some(Token::Word(keyword)) => keyword.to_ascii_uppercase(),
                Some(other) => return Err(format!("unexpected {:?}", other)),
                None => return Err("missing ')'".to_string()),
            };

            let mut values = Vec::new();
            if !FLAGS.contains(&keyword.as_str()) {
                match iter.next() {
                    Some(Token::Word(word)) => values.push(word.to_string()),
                    Some(Token::Quoted(text)) => values.push(text),
                    Some(Token::Open) => loop {
                        match iter.next() {
                            Some(Token::Close) => break,
                            Some(Token::Dollar) => {}
                            Some(Token::Word(word)) => values.push(word.to_string()),
                            Some(Token::Quoted(text)) => values.push(text),
                            Some(Token::Open) | None => {
                                return Err(format!("unclosed list after {}", keyword))
                            }
                        }
                    },
                    _ => return Err(format!("missing value after {}", keyword)),
                }
            }
            raw.terms.push((keyword, values));
        }

        if iter.next().is_some() {
            return Err("trailing text after ')'".to_string());
        }

        Ok(raw)
    }

    fn values(&self, keyword: &str) -> Vec<String> {
        self.terms
            .iter()
            .filter(|(k, _)| k == keyword)
            .flat_map(|(_, v)| v.iter().cloned())
            .collect()
    }

    fn first(&self, keyword: &str) -> Option<String> {
        self.values(keyword).into_iter().next()
    }

    fn has_flag(&self, keyword: &str) -> bool {
        self.terms.iter().any(|(k, _)| k == keyword)
    }
}

/// Object class kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectClassKind {
    Abstract,
    #[default]
    Structural,
    Auxiliary,
}

/// A parsed `objectClasses` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectClassDef {
    pub oid: String,
    /// All names, primary first.
    pub names: Vec<String>,
    pub description: Option<String>,
    /// Superior classes (`SUP`).
    pub superiors: Vec<String>,
    pub kind: ObjectClassKind,
    /// Required attributes (`MUST`).
    pub must: Vec<String>,
    /// Allowed attributes (`MAY`).
    pub may: Vec<String>,
}

impl ObjectClassDef {
    /// Parse an RFC 4512 object class description.
    pub fn parse(definition: &str) -> SchemaResult<Self> {
        let raw = RawDefinition::parse(definition)
            .map_err(|message| SchemaLookupError::invalid_definition(definition, message))?;

        let kind = if raw.has_flag("ABSTRACT") {
            ObjectClassKind::Abstract
        } else if raw.has_flag("AUXILIARY") {
            ObjectClassKind::Auxiliary
        } else {
            ObjectClassKind::Structural
        };

        Ok(Self {
            names: raw.values("NAME"),
            description: raw.first("DESC"),
            superiors: raw.values("SUP"),
            kind,
            must: raw.values("MUST"),
            may: raw.values("MAY"),
            oid: raw.oid,
        })
    }

    /// The primary name, or the OID for unnamed classes.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.oid)
    }
}

/// A parsed `attributeTypes` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeDef {
    pub oid: String,
    /// All names, primary first.
    pub names: Vec<String>,
    pub description: Option<String>,
    pub superior: Option<String>,
    pub syntax: Option<String>,
    pub single_value: bool,
}

impl AttributeTypeDef {
    /// Parse an RFC 4512 attribute type description.
    pub fn parse(definition: &str) -> SchemaResult<Self> {
        let raw = RawDefinition::parse(definition)
            .map_err(|message| SchemaLookupError::invalid_definition(definition, message))?;

        Ok(Self {
            names: raw.values("NAME"),
            description: raw.first("DESC"),
            superior: raw.first("SUP"),
            syntax: raw.first("SYNTAX"),
            single_value: raw.has_flag("SINGLE-VALUE"),
            oid: raw.oid,
        })
    }

    /// The primary name, or the OID for unnamed attributes.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.oid)
    }
}
