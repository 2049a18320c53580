use serde_json::Value;

use crate::types::FieldPath;
use crate::{parse_index, PathError, PathErrorKind};

/// Get a value from a record by path.
///
/// Missing keys, out-of-range indices and traversal through scalars yield
/// `Ok(None)`. The only error is a segment that is not a valid index while
/// the current node is an array.
pub fn get<'a>(val: &'a Value, path: &FieldPath) -> Result<Option<&'a Value>, PathError> {
    let mut current = val;
    for segment in path.segments() {
        let next = match current {
            Value::Array(arr) => {
                let idx = parse_index(segment).ok_or_else(|| {
                    PathError::invalid(path, PathErrorKind::NotAnIndex(segment.clone()))
                })?;
                arr.get(idx)
            }
            Value::Object(map) => map.get(segment),
            _ => None,
        };
        match next {
            Some(v) => current = v,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Get a mutable reference to a value by path.
///
/// Same resolution rules as [`get`].
pub fn get_mut<'a>(
    val: &'a mut Value,
    path: &FieldPath,
) -> Result<Option<&'a mut Value>, PathError> {
    let mut current = val;
    for segment in path.segments() {
        match current {
            Value::Array(arr) => {
                let idx = parse_index(segment).ok_or_else(|| {
                    PathError::invalid(path, PathErrorKind::NotAnIndex(segment.clone()))
                })?;
                match arr.get_mut(idx) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            Value::Object(map) => match map.get_mut(segment) {
                Some(v) => current = v,
                None => return Ok(None),
            },
            _ => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Convenience lookup returning the string at `path`, if any.
pub fn get_str<'a>(val: &'a Value, path: &FieldPath) -> Result<Option<&'a str>, PathError> {
    Ok(get(val, path)?.and_then(Value::as_str))
}
