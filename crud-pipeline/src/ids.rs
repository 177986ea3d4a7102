//! Correlation identifiers for dispatched requests
//!
//! Every call through the [`HandlerRegistry`](crate::handlers::HandlerRegistry)
//! gets a [`DispatchId`], a TypeID with the `dsp` prefix and a UUIDv7 suffix,
//! so log lines from one request sort together and in time order.

use std::fmt;
use std::str::FromStr;

use mti::prelude::*;

/// Identifier stamped onto the span of one dispatch
///
/// ```rust
/// use crud_pipeline::ids::DispatchId;
///
/// let id = DispatchId::new();
/// assert!(id.as_str().starts_with("dsp_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchId(MagicTypeId);

impl DispatchId {
    /// TypeID prefix
    pub const PREFIX: &'static str = "dsp";

    /// Create a new time-sortable identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// The identifier as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DispatchId {
    type Err = DispatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = MagicTypeId::from_str(s).map_err(DispatchIdError::Parse)?;
        let prefix = id.prefix().as_str();
        if prefix != Self::PREFIX {
            return Err(DispatchIdError::WrongPrefix(prefix.to_string()));
        }
        Ok(Self(id))
    }
}

/// Parse failure for [`DispatchId`]
#[derive(Debug, thiserror::Error)]
pub enum DispatchIdError {
    /// Not a TypeID at all
    #[error("invalid dispatch id: {0}")]
    Parse(MagicTypeIdError),

    /// A TypeID with some other prefix
    #[error("expected prefix 'dsp', got '{0}'")]
    WrongPrefix(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_prefix() {
        let id = DispatchId::new();
        assert!(id.as_str().starts_with("dsp_"));
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_parse_round_trip() {
        let id = DispatchId::new();
        let parsed: DispatchId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_other_prefix() {
        let err = "req_01h455vb4pex5vsknk084sn02q".parse::<DispatchId>().unwrap_err();
        assert!(matches!(err, DispatchIdError::WrongPrefix(ref p) if p == "req"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("dsp_nope".parse::<DispatchId>().is_err());
    }
}
