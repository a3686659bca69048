//! Path templates.
//!
//! A template is DN text with `{name}` placeholders, e.g.
//! `uid={uid},ou=People,{base_dn}`. `{{` and `}}` produce literal braces.
//! Placeholders are checked only when the template is expanded, since the
//! values they refer to are known per instance.

use thiserror::Error;

/// Errors raised while expanding a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unresolved template name '{name}'")]
    Unresolved { name: String },

    #[error("Template name '{name}' refers to {count} values, expected one")]
    MultiValued { name: String, count: usize },

    #[error("Invalid path template '{template}' at offset {offset}: {message}")]
    Syntax {
        template: String,
        offset: usize,
        message: String,
    },
}

impl TemplateError {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::Unresolved { name: name.into() }
    }

    pub fn multi_valued(name: impl Into<String>, count: usize) -> Self {
        Self::MultiValued {
            name: name.into(),
            count,
        }
    }

    fn syntax(template: &str, offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            template: template.to_string(),
            offset,
            message: message.into(),
        }
    }
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(String),
    Name(&'a str),
}

/// A DN template with named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
}

impl PathTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The template text as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Split the template into literal text and placeholder names.
    pub fn segments(&self) -> Result<Vec<Segment<'_>>, TemplateError> {
        let source = self.source.as_str();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        literal.push('{');
                        continue;
                    }
                    let start = offset + 1;
                    let end = loop {
                        match chars.next() {
                            Some((i, '}')) => break i,
                            Some((i, '{')) => {
                                return Err(TemplateError::syntax(
                                    source,
                                    i,
                                    "nested '{' inside placeholder",
                                ))
                            }
                            Some(_) => {}
                            None => {
                                return Err(TemplateError::syntax(
                                    source,
                                    offset,
                                    "unclosed '{'",
                                ))
                            }
                        }
                    };
                    let name = source[start..end].trim();
                    if name.is_empty() {
                        return Err(TemplateError::syntax(source, offset, "empty placeholder"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Name(name));
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(TemplateError::syntax(source, offset, "single '}'"));
                    }
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(segments)
    }

    /// Placeholder names in order of appearance.
    pub fn names(&self) -> Result<Vec<&str>, TemplateError> {
        Ok(self
            .segments()?
            .into_iter()
            .filter_map(|s| match s {
                Segment::Name(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    /// Expand the template, asking `resolve` for the text of every placeholder.
    pub fn expand<F>(&self, mut resolve: F) -> Result<String, TemplateError>
    where
        F: FnMut(&str) -> Result<String, TemplateError>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Name(name) => out.push_str(&resolve(name)?),
            }
        }
        Ok(out)
    }
}

impl From<&str> for PathTemplate {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for PathTemplate {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
