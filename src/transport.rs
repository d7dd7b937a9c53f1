use serde_json::Value as Json;

use crate::error::Error;
use crate::value::WireMap;

/// Performs a single remote method call.
///
/// Implementations return the `result` payload of a successful call, or
/// [`Error::Api`] carrying the server's error code and description. They
/// must not retry on their own; recovery policy belongs to the caller.
pub trait Transport {
    fn invoke(&self, method: &str, params: &WireMap) -> Result<Json, Error>;
}
