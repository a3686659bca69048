//! Expectations for construction results.

use dirmap_core::Value;
use dirmap_entry::{ConstructionError, Entry};

use crate::error::{CheckError, CheckResult};

/// What a construction result should look like.
///
/// Unset parts are not checked. An error expectation makes every other
/// expectation irrelevant.
#[derive(Debug, Default)]
pub struct Expect {
    pub path: Option<String>,
    pub attributes: Vec<(String, Vec<String>)>,
    pub absent: Vec<String>,
    pub parameters: Vec<(String, Vec<String>)>,
    pub object_classes: Vec<String>,
    pub error: Option<String>,
    pub error_pattern: Option<String>,
}

impl Expect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect this exact DN.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Expect an attribute with exactly these rendered values.
    pub fn attribute<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Expect no attribute under this name.
    pub fn absent(mut self, key: impl Into<String>) -> Self {
        self.absent.push(key.into());
        self
    }

    /// Expect a parameter with exactly these rendered values.
    pub fn parameter<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Expect the entry to carry this object class.
    pub fn object_class(mut self, object_class: impl Into<String>) -> Self {
        self.object_classes.push(object_class.into());
        self
    }

    /// Expect an error whose message contains `text`.
    pub fn error(mut self, text: impl Into<String>) -> Self {
        self.error = Some(text.into());
        self
    }

    /// Expect an error whose message matches a regex.
    pub fn error_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.error_pattern = Some(pattern.into());
        self
    }

    /// Verify the expectation against a construction result.
    pub fn verify(&self, check: &str, result: &Result<Entry, ConstructionError>) -> CheckResult<()> {
        // Check error expectations first
        if let Some(ref expected) = self.error {
            return match result {
                Err(e) if e.to_string().contains(expected.as_str()) => Ok(()),
                Err(e) => Err(CheckError::assertion_failed(
                    check,
                    format!("expected error containing '{}', got: {}", expected, e),
                )),
                Ok(entry) => Err(CheckError::assertion_failed(
                    check,
                    format!("expected error containing '{}', got entry {}", expected, entry.path()),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern)
                .map_err(|e| CheckError::invalid_pattern(pattern, e.to_string()))?;
            return match result {
                Err(e) if re.is_match(&e.to_string()) => Ok(()),
                Err(e) => Err(CheckError::assertion_failed(
                    check,
                    format!("expected error matching '{}', got: {}", pattern, e),
                )),
                Ok(entry) => Err(CheckError::assertion_failed(
                    check,
                    format!("expected error matching '{}', got entry {}", pattern, entry.path()),
                )),
            };
        }

        let entry = result
            .as_ref()
            .map_err(|e| CheckError::assertion_failed(check, format!("construction failed: {}", e)))?;

        self.verify_entry(check, entry)
    }

    fn verify_entry(&self, check: &str, entry: &Entry) -> CheckResult<()> {
        if let Some(ref expected) = self.path {
            if entry.path() != expected {
                return Err(CheckError::assertion_failed(
                    check,
                    format!("expected path '{}', got '{}'", expected, entry.path()),
                ));
            }
        }

        for (key, expected) in &self.attributes {
            let actual = entry.get(key).map(render);
            if actual.as_ref() != Some(expected) {
                return Err(CheckError::assertion_failed(
                    check,
                    format!("expected {} = {:?}, got {:?}", key, expected, actual),
                ));
            }
        }

        for key in &self.absent {
            if let Some(values) = entry.get(key) {
                return Err(CheckError::assertion_failed(
                    check,
                    format!("expected no {}, got {:?}", key, render(values)),
                ));
            }
        }

        for (key, expected) in &self.parameters {
            let actual = entry.parameter(key).map(render);
            if actual.as_ref() != Some(expected) {
                return Err(CheckError::assertion_failed(
                    check,
                    format!("expected parameter {} = {:?}, got {:?}", key, expected, actual),
                ));
            }
        }

        for object_class in &self.object_classes {
            if !entry.object_classes().contains(object_class) {
                return Err(CheckError::assertion_failed(
                    check,
                    format!(
                        "expected object class {}, got {:?}",
                        object_class,
                        entry.object_classes()
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn render(values: &[Value]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use dirmap_core::fields;

    #[test]
    fn test_verify_entry() {
        let result = Entry::construct(&fixtures::user_model(), fields! { "username" => "guest", "surname" => "Guest" });

        Expect::new()
            .path("uid=guest,ou=People,dc=example,dc=com")
            .attribute("uid", ["guest"])
            .absent("mail")
            .object_class("inetOrgPerson")
            .verify("user", &result)
            .unwrap();

        let failure = Expect::new().attribute("uid", ["admin"]).verify("user", &result);
        assert!(matches!(failure, Err(CheckError::AssertionFailed { .. })));
    }

    #[test]
    fn test_verify_error() {
        let result = Entry::construct(&fixtures::user_model(), fields! { "shell" => "/bin/sh" });

        Expect::new().error("Unexpected field 'shell'").verify("shell", &result).unwrap();
        Expect::new().error_pattern(r"field '\w+'").verify("shell", &result).unwrap();
        assert!(Expect::new().path("x").verify("shell", &result).is_err());
        assert!(matches!(
            Expect::new().error_pattern("(").verify("shell", &result),
            Err(CheckError::InvalidPattern { .. })
        ));
    }
}
