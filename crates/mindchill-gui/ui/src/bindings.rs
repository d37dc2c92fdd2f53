//! Browser collaborators reached through
//! `wasm-bindgen`.

pub mod capture;
pub mod chime;
pub mod peer;
pub mod youtube;

use wasm_bindgen::JsValue;

/// Best-effort readable text for a thrown
/// JS value.
pub fn describe_js_error(
  value: &JsValue
) -> String {
  if let Some(text) = value.as_string() {
    return text;
  }

  for field in ["message", "type", "name"] {
    if let Some(text) =
      js_sys::Reflect::get(
        value,
        &JsValue::from_str(field)
      )
      .ok()
      .and_then(|inner| inner.as_string())
      .filter(|text| !text.is_empty())
    {
      return text;
    }
  }

  format!("{value:?}")
}

pub fn global_has(path: &[&str]) -> bool {
  let mut current: JsValue =
    js_sys::global().into();
  for segment in path {
    let key = JsValue::from_str(segment);
    match js_sys::Reflect::get(&current, &key)
    {
      | Ok(next)
        if !next.is_undefined()
          && !next.is_null() =>
      {
        current = next
      }
      | _ => return false
    }
  }
  true
}
