mod distribution;
mod dnf;
mod eval;
mod expression;
mod fingerprint;
mod model;


pub use dnf::{DnfTransformer, is_dnf, transform_to_dnf};
pub use eval::{FieldPresence, Row, eval};
pub use fingerprint::{PredicateFingerprint, fingerprint};
pub use model::{
    CompareOp, CustomParameter, LogicalOperator, QueryPredicate, SubjectParameter,
};
