//! Customizer hooks
//!
//! Every container conversion hands its children to a single-step hook. The
//! default hook is the converter itself, which makes conversion fully
//! recursive. Substituting another hook changes how deep conversion goes:
//!
//! - [`shallow`] returns children unchanged, so only the top level is
//!   converted and nested values stay in their input form
//! - [`fixed_plain`] / [`fixed_json`] replace every child with a literal,
//!   which lets tests pin what a nested value turns into

use ice_plain_core::{Result, Value};

/// Single-step transform used by the plain converter in both directions.
pub type PlainHook<'a> = dyn Fn(&Value) -> Result<Value> + 'a;

/// Single-step transform used by the JSON encoder. `None` means undefined.
pub type JsonHook<'a> = dyn Fn(&Value) -> Result<Option<String>> + 'a;

/// Leave children as they are.
pub fn shallow(value: &Value) -> Result<Value> {
    Ok(value.clone())
}

/// Replace every child with `replacement`.
pub fn fixed_plain(replacement: Value) -> impl Fn(&Value) -> Result<Value> {
    move |_| Ok(replacement.clone())
}

/// Replace every child with the JSON text `text`.
pub fn fixed_json(text: impl Into<String>) -> impl Fn(&Value) -> Result<Option<String>> {
    let text = text.into();
    move |_| Ok(Some(text.clone()))
}
