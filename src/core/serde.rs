/// Serde helper functions for custom serialization/deserialization

/// Skip serializing if value is false (for use with skip_serializing_if)
pub fn is_false(value: &bool) -> bool {
    !*value
}

/// Skip serializing if value is zero (for use with skip_serializing_if)
pub fn is_zero_usize(value: &usize) -> bool {
    *value == 0
}
