use serde_json::Value;

use crate::types::FieldPath;
use crate::{parse_index, PathError, PathErrorKind};

/// Return a copy of `root` with the node at `path` replaced by `value`.
///
/// `root` itself is never modified. Every intermediate container must
/// already exist; nothing is created on the way down. The final segment
/// may name a new key of an object, or the index one past the end of an
/// array (append).
///
/// ```
/// use passdesk_path::{set, FieldPath};
/// use serde_json::json;
///
/// let doc = json!({"barcode": {"message": "old"}});
/// let path = FieldPath::parse("barcode.message").unwrap();
/// assert_eq!(set(&doc, &path, json!("new")).unwrap(), json!({"barcode": {"message": "new"}}));
///
/// let missing = FieldPath::parse("eventTicket.headerFields.0.value").unwrap();
/// assert!(set(&doc, &missing, json!("x")).is_err());
/// ```
pub fn set(root: &Value, path: &FieldPath, value: Value) -> Result<Value, PathError> {
    let mut out = root.clone();
    set_in_place(&mut out, path, value)?;
    Ok(out)
}

/// In-place variant of [`set`] for callers that own the document.
///
/// On error the document is left untouched.
pub fn set_in_place(root: &mut Value, path: &FieldPath, value: Value) -> Result<(), PathError> {
    let segments = path.segments();
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let prefix = || segments[..=depth].join(".");
        match current {
            Value::Array(arr) => {
                let idx = parse_index(segment).ok_or_else(|| {
                    PathError::invalid(path, PathErrorKind::NotAnIndex(segment.clone()))
                })?;
                match arr.get_mut(idx) {
                    Some(v) => current = v,
                    None => {
                        return Err(PathError::invalid(
                            path,
                            PathErrorKind::MissingIntermediate(prefix()),
                        ))
                    }
                }
            }
            Value::Object(map) => match map.get_mut(segment) {
                Some(v) => current = v,
                None => {
                    return Err(PathError::invalid(
                        path,
                        PathErrorKind::MissingIntermediate(prefix()),
                    ))
                }
            },
            _ => {
                let parent = segments[..depth].join(".");
                return Err(PathError::invalid(path, PathErrorKind::NotAContainer(parent)));
            }
        }
    }

    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = parse_index(last).ok_or_else(|| {
                PathError::invalid(path, PathErrorKind::NotAnIndex(last.clone()))
            })?;
            let len = arr.len();
            if idx < len {
                arr[idx] = value;
            } else if idx == len {
                arr.push(value);
            } else {
                return Err(PathError::invalid(
                    path,
                    PathErrorKind::IndexOutOfBounds { index: idx, len },
                ));
            }
            Ok(())
        }
        _ => Err(PathError::invalid(
            path,
            PathErrorKind::NotAContainer(parents.join(".")),
        )),
    }
}
