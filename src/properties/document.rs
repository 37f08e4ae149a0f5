use crate::core::{MinifyError, MinifyResult};
use std::fmt;
use std::fs;
use std::path::Path;

/// One logical line: its physical text and, for entries, the decoded key and
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Item {
    raw: String,
    entry: Option<(String, String)>,
}

/// A `.properties` file that can be edited without disturbing the rest of it.
///
/// Comments, blank lines, ordering and the exact spelling of untouched
/// entries survive a load/save cycle; only removed entries disappear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesDocument {
    items: Vec<Item>,
}

impl PropertiesDocument {
    /// Parse properties text.
    ///
    /// Follows `java.util.Properties` syntax: `#`/`!` comments, `=`, `:` or
    /// whitespace separators, backslash continuations and escapes.
    pub fn parse(content: &str) -> MinifyResult<Self> {
        let mut items = Vec::new();
        let mut physical = content.split_inclusive('\n');

        while let Some(first) = physical.next() {
            let trimmed = first.trim_start();
            if is_blank(trimmed) || trimmed.starts_with('#') || trimmed.starts_with('!') {
                items.push(Item {
                    raw: first.to_string(),
                    entry: None,
                });
                continue;
            }

            let mut raw = first.to_string();
            let mut logical = String::new();
            let mut line = strip_eol(trimmed);
            loop {
                if ends_with_continuation(line) {
                    logical.push_str(&line[..line.len() - 1]);
                    match physical.next() {
                        Some(next) => {
                            raw.push_str(next);
                            line = strip_eol(next.trim_start());
                        }
                        None => break,
                    }
                } else {
                    logical.push_str(line);
                    break;
                }
            }

            let (key, value) = split_entry(&logical)?;
            items.push(Item {
                raw,
                entry: Some((key, value)),
            });
        }

        Ok(Self { items })
    }

    /// Load a properties file.
    ///
    /// The file is read as ISO-8859-1, like `java.util.Properties`, so every
    /// byte maps to one char and survives a later `save` unchanged.
    pub fn load(path: &Path) -> MinifyResult<Self> {
        let bytes = fs::read(path).map_err(|e| {
            MinifyError::Properties(format!(
                "Failed to load properties: {}\n{}",
                path.display(),
                e
            ))
        })?;
        let content: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&content).map_err(|e| {
            MinifyError::Properties(format!(
                "Failed to load properties: {}\n{}",
                path.display(),
                e
            ))
        })
    }

    /// Write the document back to disk as ISO-8859-1
    pub fn save(&self, path: &Path) -> MinifyResult<()> {
        let bytes = self
            .to_string()
            .chars()
            .map(u8::try_from)
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| {
                MinifyError::Properties(format!(
                    "Failed to save properties: {}\n{}",
                    path.display(),
                    e
                ))
            })?;
        fs::write(path, bytes).map_err(|e| {
            MinifyError::Properties(format!(
                "Failed to save properties: {}\n{}",
                path.display(),
                e
            ))
        })
    }

    /// Keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter_map(|item| item.entry.as_ref().map(|(k, _)| k.as_str()))
    }

    /// Value of a key; the last definition wins, as in Java
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .rev()
            .filter_map(|item| item.entry.as_ref())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry whose key matches `predicate`; returns removed keys
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        self.items.retain(|item| match &item.entry {
            Some((key, _)) if predicate(key) => {
                removed.push(key.clone());
                false
            }
            _ => true,
        });
        removed
    }
}

impl fmt::Display for PropertiesDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            f.write_str(&item.raw)?;
        }
        Ok(())
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// A line continues when it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn is_separator_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Split a logical line into decoded key and value
fn split_entry(logical: &str) -> MinifyResult<(String, String)> {
    let chars: Vec<char> = logical.chars().collect();
    let mut i = 0;
    let mut key_end = chars.len();
    let mut value_start = chars.len();

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 2;
            continue;
        }
        if c == '=' || c == ':' {
            key_end = i;
            value_start = i + 1;
            break;
        }
        if is_separator_space(c) {
            key_end = i;
            let mut j = i;
            while j < chars.len() && is_separator_space(chars[j]) {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '=' || chars[j] == ':') {
                j += 1;
            }
            value_start = j;
            break;
        }
        i += 1;
    }

    let key_end = key_end.min(chars.len());
    let mut value_start = value_start.min(chars.len());
    while value_start < chars.len() && is_separator_space(chars[value_start]) {
        value_start += 1;
    }

    let key: String = chars[..key_end].iter().collect();
    let value: String = chars[value_start..].iter().collect();
    Ok((unescape(&key)?, unescape(&value)?))
}

fn unescape(text: &str) -> MinifyResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        MinifyError::Properties(format!("Malformed \\uxxxx encoding: \\u{}", hex))
                    })?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
