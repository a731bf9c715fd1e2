//! Hash codes compatible with the JVM SDK model classes
//!
//! Each model folds its fields into an `i32` starting from 1, multiplying the
//! accumulator by 31 before adding the next field. Unset fields add 0.
//! Arithmetic wraps exactly like Java `int`.

/// Multiplier applied to the accumulator before each field
pub const PRIME: i32 = 31;

/// Hash of a string, identical to `java.lang.String#hashCode`
/// e.g., "ab" -> 97 * 31 + 98 = 3105
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(PRIME).wrapping_add(i32::from(unit))
    })
}

/// Hash of a boolean, identical to `java.lang.Boolean#hashCode`
pub fn bool_hash(b: bool) -> i32 {
    if b { 1231 } else { 1237 }
}

/// Accumulates hash codes of successive fields
#[derive(Debug, Clone, Copy)]
pub struct HashCodeBuilder {
    value: i32,
}

impl HashCodeBuilder {
    pub fn new() -> Self {
        Self { value: 1 }
    }

    /// Fold in a field that already has a hash code (0 when unset)
    pub fn field(mut self, hash: i32) -> Self {
        self.value = PRIME.wrapping_mul(self.value).wrapping_add(hash);
        self
    }

    pub fn string(self, value: Option<&str>) -> Self {
        self.field(value.map_or(0, string_hash))
    }

    pub fn bool(self, value: Option<bool>) -> Self {
        self.field(value.map_or(0, bool_hash))
    }

    pub fn finish(self) -> i32 {
        self.value
    }
}

impl Default for HashCodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
