//! Collectors for flags that may be given more than once.
//!
//! Both collectors remember the flag they belong to so errors can name it,
//! and both keep values in command-line order. Downstream tools are
//! order-sensitive (HDL compilation order, include search order), so nothing
//! here sorts or deduplicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Ordered list of plain string values for one repeatable flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatedValues {
    flag: String,
    values: Vec<String>,
}

impl RepeatedValues {
    pub fn new(flag: impl Into<String>) -> Self {
        Self { flag: flag.into(), values: Vec::new() }
    }

    /// Collect every occurrence of `flag`, in order.
    pub fn from_values<I, S>(flag: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected = Self::new(flag);
        for value in values {
            collected.push(value);
        }
        collected
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for RepeatedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(","))
    }
}

/// A single `KEY=VALUE` flag value, split at the first `=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Split `raw` at its first `=`. The value may itself contain `=`.
    pub fn parse(flag: &str, raw: &str) -> GenResult<Self> {
        match raw.split_once('=') {
            Some((key, value)) => Ok(Self::new(key, value)),
            None => {
                Err(GenError::MalformedPair { flag: flag.to_string(), value: raw.to_string() })
            }
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered list of `KEY=VALUE` pairs for one repeatable flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueList {
    flag: String,
    pairs: Vec<KeyValue>,
}

impl KeyValueList {
    pub fn new(flag: impl Into<String>) -> Self {
        Self { flag: flag.into(), pairs: Vec::new() }
    }

    /// Parse every occurrence of `flag`, stopping at the first malformed one.
    pub fn from_values<I, S>(flag: impl Into<String>, values: I) -> GenResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected = Self::new(flag);
        for value in values {
            collected.push(value.as_ref())?;
        }
        Ok(collected)
    }

    /// Like [`KeyValueList::from_values`], but only the text before the
    /// first space of each value is considered, so `A=1 # note` yields
    /// `A=1`.
    pub fn from_first_words<I, S>(flag: impl Into<String>, values: I) -> GenResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected = Self::new(flag);
        for value in values {
            let word = value.as_ref().split(' ').next().unwrap_or_default();
            collected.push(word)?;
        }
        Ok(collected)
    }

    pub fn push(&mut self, raw: &str) -> GenResult<()> {
        let pair = KeyValue::parse(&self.flag, raw)?;
        self.pairs.push(pair);
        Ok(())
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn pairs(&self) -> &[KeyValue] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<KeyValue> {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl fmt::Display for KeyValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.pairs.iter().map(|p| p.to_string()).collect();
        f.write_str(&joined.join(";"))
    }
}
