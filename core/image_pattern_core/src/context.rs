use crate::error::{PatternError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named variables a pattern reads while building its layers.
///
/// Values are stored as JSON so a context can be loaded from a document
/// as easily as it is built in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self
            .vars
            .get(name)
            .ok_or_else(|| PatternError::MissingVariable(name.to_owned()))?;
        decode(name, value)
    }

    pub fn get_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T> {
        match self.vars.get(name) {
            Some(value) => decode(name, value),
            None => Ok(default),
        }
    }

    /// Substitutes `{name}` placeholders. `{{` and `}}` produce literal braces.
    pub fn interpolate(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        for token in tokenize(template)? {
            match token {
                Token::Literal(c) => out.push(c),
                Token::Variable(name) => {
                    let value = self
                        .vars
                        .get(name)
                        .ok_or_else(|| PatternError::MissingVariable(name.to_owned()))?;
                    match value {
                        Value::String(s) => out.push_str(s),
                        other => out.push_str(&other.to_string()),
                    }
                }
            }
        }
        Ok(out)
    }
}

fn decode<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|source| PatternError::VariableType {
        name: name.to_owned(),
        source,
    })
}

/// Variable names referenced by `template`, first appearance first.
pub fn placeholders(template: &str) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for token in tokenize(template)? {
        if let Token::Variable(name) = token {
            if !out.iter().any(|n| n == name) {
                out.push(name.to_owned());
            }
        }
    }
    Ok(out)
}

enum Token<'a> {
    Literal(char),
    Variable(&'a str),
}

fn tokenize(template: &str) -> Result<Vec<Token<'_>>> {
    let invalid = |reason: &str| PatternError::Template {
        template: template.to_owned(),
        reason: reason.to_owned(),
    };

    let mut tokens = Vec::new();
    let mut chars = template.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                tokens.push(Token::Literal('{'));
            }
            '{' => {
                let start = i + 1;
                let end = loop {
                    match chars.next() {
                        Some((j, '}')) => break j,
                        Some((_, '{')) => return Err(invalid("nested `{`")),
                        Some(_) => continue,
                        None => return Err(invalid("unterminated `{`")),
                    }
                };
                let name = template[start..end].trim();
                if name.is_empty() {
                    return Err(invalid("empty placeholder"));
                }
                tokens.push(Token::Variable(name));
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                tokens.push(Token::Literal('}'));
            }
            '}' => return Err(invalid("unmatched `}`")),
            other => tokens.push(Token::Literal(other)),
        }
    }
    Ok(tokens)
}
