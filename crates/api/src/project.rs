use crate::decode::{parse_object, required_str};
use crate::error::Result;

/// Extract the display title (`name`) from a `GET project/<key>` body.
pub fn title_from_slice(bytes: &[u8]) -> Result<String> {
    let raw = parse_object(bytes)?;
    Ok(required_str(&raw, "name")?.to_string())
}
