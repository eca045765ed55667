use super::PatchError;
use serde_json::Value;

/// RFC 6901 JSON Pointer, decoded into reference tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    raw: String,
    tokens: Vec<String>,
}

impl Pointer {
    pub fn parse(raw: &str) -> Result<Self, PatchError> {
        if raw.is_empty() {
            return Ok(Self {
                raw: String::new(),
                tokens: Vec::new(),
            });
        }
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PatchError::InvalidPointer(raw.to_string()));
        };

        let tokens: Vec<String> = rest
            .split('/')
            .map(|token| unescape(token).ok_or_else(|| PatchError::InvalidPointer(raw.to_string())))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` if `self` is `other` or addresses something inside it
    pub fn starts_with(&self, other: &Pointer) -> bool {
        self.tokens.starts_with(&other.tokens)
    }

    pub fn get<'a>(&self, document: &'a Value) -> Result<&'a Value, PatchError> {
        self.tokens.iter().try_fold(document, |node, token| {
            child(node, token).ok_or_else(|| self.not_found())
        })
    }

    /// Insert `value` at this location (RFC 6902 `add` semantics).
    pub fn add(&self, document: &mut Value, value: Value) -> Result<(), PatchError> {
        let Some((last, parent_tokens)) = self.tokens.split_last() else {
            *document = value;
            return Ok(());
        };

        match self.walk_mut(document, parent_tokens)? {
            Value::Object(map) => {
                map.insert(last.clone(), value);
                Ok(())
            }
            Value::Array(items) => {
                let index = if last == "-" {
                    items.len()
                } else {
                    parse_index(last).filter(|i| *i <= items.len()).ok_or_else(|| self.out_of_bounds())?
                };
                items.insert(index, value);
                Ok(())
            }
            _ => Err(self.not_found()),
        }
    }

    /// Remove and return the value at this location.
    pub fn remove(&self, document: &mut Value) -> Result<Value, PatchError> {
        let Some((last, parent_tokens)) = self.tokens.split_last() else {
            return Err(PatchError::RootRemoval);
        };

        match self.walk_mut(document, parent_tokens)? {
            Value::Object(map) => map.remove(last).ok_or_else(|| self.not_found()),
            Value::Array(items) => {
                let index = parse_index(last)
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| self.out_of_bounds())?;
                Ok(items.remove(index))
            }
            _ => Err(self.not_found()),
        }
    }

    /// Overwrite an existing value.
    pub fn replace(&self, document: &mut Value, value: Value) -> Result<(), PatchError> {
        let target = self.walk_mut(document, &self.tokens)?;
        *target = value;
        Ok(())
    }

    fn walk_mut<'a>(&self, document: &'a mut Value, tokens: &[String]) -> Result<&'a mut Value, PatchError> {
        let mut node = document;
        for token in tokens {
            node = match node {
                Value::Object(map) => map.get_mut(token),
                Value::Array(items) => parse_index(token).and_then(|i| items.get_mut(i)),
                _ => None,
            }
            .ok_or_else(|| self.not_found())?;
        }
        Ok(node)
    }

    fn not_found(&self) -> PatchError {
        PatchError::PathNotFound(self.raw.clone())
    }

    fn out_of_bounds(&self) -> PatchError {
        PatchError::IndexOutOfBounds(self.raw.clone())
    }
}

fn child<'a>(node: &'a Value, token: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(token),
        Value::Array(items) => parse_index(token).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Array index token: decimal digits without a leading zero.
fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Decode `~1` to `/` and `~0` to `~`. Any other `~` sequence is invalid.
fn unescape(token: &str) -> Option<String> {
    let mut decoded = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next()? {
                '0' => decoded.push('~'),
                '1' => decoded.push('/'),
                _ => return None,
            }
        } else {
            decoded.push(c);
        }
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_unescapes_tokens() {
        let pointer = Pointer::parse("/a~1b/m~0n").unwrap();
        let document = json!({ "a/b": { "m~n": 8 } });
        assert_eq!(pointer.get(&document).unwrap(), &json!(8));
    }

    #[test]
    fn test_parse_rejects_relative_and_bad_escapes() {
        assert!(Pointer::parse("name").is_err());
        assert!(Pointer::parse("/a~2").is_err());
        assert!(Pointer::parse("/a~").is_err());
        let document = json!({ "name": "x" });
        assert_eq!(Pointer::parse("").unwrap().get(&document).unwrap(), &document);
    }

    #[test]
    fn test_array_indices() {
        let mut document = json!({ "tags": ["a", "c"] });
        Pointer::parse("/tags/1").unwrap().add(&mut document, json!("b")).unwrap();
        Pointer::parse("/tags/-").unwrap().add(&mut document, json!("d")).unwrap();
        assert_eq!(document, json!({ "tags": ["a", "b", "c", "d"] }));

        assert!(Pointer::parse("/tags/01").unwrap().get(&document).is_err());
        let err = Pointer::parse("/tags/9").unwrap().add(&mut document, json!("x")).unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfBounds(_)));
    }

    #[test]
    fn test_remove_and_replace_require_existing_target() {
        let mut document = json!({ "name": "x" });
        assert!(Pointer::parse("/missing").unwrap().remove(&mut document).is_err());
        assert!(Pointer::parse("/missing").unwrap().replace(&mut document, json!(1)).is_err());
        assert!(matches!(
            Pointer::parse("").unwrap().remove(&mut document),
            Err(PatchError::RootRemoval)
        ));

        let removed = Pointer::parse("/name").unwrap().remove(&mut document).unwrap();
        assert_eq!(removed, json!("x"));
        assert_eq!(document, json!({}));
    }

    #[test]
    fn test_add_into_missing_parent_fails() {
        let mut document = json!({});
        let err = Pointer::parse("/a/b").unwrap().add(&mut document, json!(1)).unwrap_err();
        assert!(matches!(err, PatchError::PathNotFound(path) if path == "/a/b"));
    }
}
