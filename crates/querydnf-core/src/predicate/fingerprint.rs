use crate::{
    predicate::{CustomParameter, QueryPredicate, SubjectParameter},
    value::Value,
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// PredicateFingerprint
///
/// SHA-256 digest of a predicate's structure. Structurally equal predicates
/// share a fingerprint, so it can key caches of normalized queries.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PredicateFingerprint([u8; 32]);

impl PredicateFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PredicateFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for PredicateFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PredicateFingerprint({self})")
    }
}

/// Compute the structural fingerprint of `predicate`.
#[must_use]
pub fn fingerprint(predicate: &QueryPredicate) -> PredicateFingerprint {
    let mut hasher = Sha256::new();
    hash_predicate(&mut hasher, predicate);

    PredicateFingerprint(hasher.finalize().into())
}

fn hash_predicate(hasher: &mut Sha256, predicate: &QueryPredicate) {
    write_tag(hasher, 0x21);
    write_tag(hasher, predicate.operator.tag());

    write_len_u32(hasher, predicate.parameters.len());
    for parameter in &predicate.parameters {
        hash_parameter(hasher, parameter);
    }

    write_len_u32(hasher, predicate.custom_parameters.len());
    for parameter in &predicate.custom_parameters {
        hash_custom(hasher, parameter);
    }

    write_len_u32(hasher, predicate.children.len());
    for child in &predicate.children {
        hash_predicate(hasher, child);
    }
}

fn hash_parameter(hasher: &mut Sha256, parameter: &SubjectParameter) {
    write_tag(hasher, 0x26);
    write_str(hasher, &parameter.column);
    write_tag(hasher, parameter.op.tag());
    write_value(hasher, &parameter.value);
}

fn hash_custom(hasher: &mut Sha256, parameter: &CustomParameter) {
    write_tag(hasher, 0x2c);
    write_str(hasher, &parameter.name);
    write_value(hasher, &parameter.value);
}

fn write_value(hasher: &mut Sha256, value: &Value) {
    write_tag(hasher, value.tag());

    match value {
        Value::Blob(bytes) => {
            write_len_u32(hasher, bytes.len());
            hasher.update(bytes);
        }
        Value::Bool(v) => write_tag(hasher, u8::from(*v)),
        Value::Int(v) => hasher.update(v.to_be_bytes()),
        Value::Uint(v) => hasher.update(v.to_be_bytes()),
        Value::Text(v) => write_str(hasher, v),
        Value::List(items) => {
            write_len_u32(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
        Value::Null => {}
    }
}

///
/// Encode one string with length prefix into the hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::param;

    #[test]
    fn equal_predicates_share_a_fingerprint() {
        let a = QueryPredicate::all_of([param('A'), param('B')]);
        let b = QueryPredicate::all_of([param('A'), param('B')]);

        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn operator_and_order_change_the_fingerprint() {
        let and = QueryPredicate::all_of([param('A'), param('B')]);
        let or = QueryPredicate::any_of([param('A'), param('B')]);
        let swapped = QueryPredicate::all_of([param('B'), param('A')]);

        assert_ne!(fingerprint(&and), fingerprint(&or));
        assert_ne!(fingerprint(&and), fingerprint(&swapped));
    }

    #[test]
    fn parameter_and_child_boundaries_do_not_collide() {
        let flat = QueryPredicate::all_of([param('A')]);
        let nested = QueryPredicate::and().with_child(QueryPredicate::all_of([param('A')]));

        assert_ne!(fingerprint(&flat), fingerprint(&nested));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let rendered = fingerprint(&QueryPredicate::and()).to_string();

        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
