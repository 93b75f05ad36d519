//! Disjunctive normal form transform.
//!
//! The transform rewrites a predicate tree so that no AND node has an OR node
//! beneath it. Leaf constraints are never reordered inside a node, and trees
//! that are already in shape come back structurally unchanged.

use crate::{
    config::TransformConfig,
    error::InternalError,
    obs::{
        sink::{self, MetricsEvent},
        trace::{TransformTraceEvent, TransformTraceSink},
    },
    predicate::{
        QueryPredicate,
        distribution::Distribution,
        expression::{Expression, Terms},
        fingerprint::fingerprint,
    },
};

///
/// DnfTransformer
///
/// Configured entry point for the DNF transform. Tracing is optional,
/// injected by the caller, and never affects the result.
///

#[derive(Clone, Copy, Default)]
pub struct DnfTransformer<'a> {
    config: TransformConfig,
    trace: Option<&'a dyn TransformTraceSink>,
}

impl<'a> DnfTransformer<'a> {
    #[must_use]
    pub const fn new(config: TransformConfig) -> Self {
        Self {
            config,
            trace: None,
        }
    }

    #[must_use]
    pub const fn with_trace(mut self, sink: &'a dyn TransformTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform `predicate` into an equivalent predicate in DNF.
    pub fn transform(&self, predicate: &QueryPredicate) -> Result<QueryPredicate, InternalError> {
        sink::record(MetricsEvent::TransformStart);

        if let Some(trace) = self.trace {
            trace.on_event(TransformTraceEvent::Start {
                fingerprint: fingerprint(predicate),
                nodes: predicate.node_count(),
            });
        }

        let result = self
            .flatten(Expression::from_predicate(predicate))
            .map(Expression::into_predicate);

        match &result {
            Ok(output) => {
                sink::record(MetricsEvent::TransformFinish {
                    unchanged: output == predicate,
                });

                if let Some(trace) = self.trace {
                    trace.on_event(TransformTraceEvent::Finish {
                        fingerprint: fingerprint(output),
                        disjuncts: top_level_disjuncts(output),
                    });
                }
            }
            Err(err) => {
                sink::record(MetricsEvent::TransformFailed { class: err.class });
            }
        }

        result
    }

    // Flatten one expression bottom-up.
    fn flatten(&self, expression: Expression) -> Result<Expression, InternalError> {
        if !expression.terms().has_children() {
            return Ok(expression);
        }

        match expression {
            Expression::Or(terms) => self.flatten_or(terms),
            Expression::And(terms) => self.flatten_and(terms),
        }
    }

    ///
    /// Flatten an OR node.
    ///
    /// OR(OR(a, b), c) → OR(a, b, c)
    ///
    /// Flattened OR children are spliced into this node; every other child
    /// keeps its position.
    ///
    fn flatten_or(&self, terms: Terms) -> Result<Expression, InternalError> {
        let mut out = Terms {
            parameters: terms.parameters,
            custom_parameters: terms.custom_parameters,
            children: Vec::with_capacity(terms.children.len()),
        };

        for child in terms.children {
            match self.flatten(child)? {
                Expression::Or(nested) => out.append(nested),
                and => out.children.push(and),
            }
        }

        Ok(Expression::Or(out))
    }

    ///
    /// Flatten an AND node.
    ///
    /// Without an OR among the flattened children the node is already in
    /// shape and is returned as is. Otherwise the node's own parameters form
    /// the first factor and every child is a further factor of a distribution.
    ///
    fn flatten_and(&self, terms: Terms) -> Result<Expression, InternalError> {
        let children = terms
            .children
            .into_iter()
            .map(|child| self.flatten(child))
            .collect::<Result<Vec<_>, _>>()?;

        if !children.iter().any(Expression::is_or) {
            return Ok(Expression::And(Terms {
                parameters: terms.parameters,
                custom_parameters: terms.custom_parameters,
                children,
            }));
        }

        let own = Expression::And(Terms {
            parameters: terms.parameters,
            custom_parameters: terms.custom_parameters,
            children: Vec::new(),
        });

        let distribution = Distribution::new(
            std::iter::once(own).chain(children),
            self.config.max_disjuncts,
        );
        let factors = distribution.factor_count();
        let disjuncts = distribution.apply()?;

        sink::record(MetricsEvent::Distributed {
            disjuncts: disjuncts.len(),
        });
        if let Some(trace) = self.trace {
            trace.on_event(TransformTraceEvent::Distribute {
                factors,
                disjuncts: disjuncts.len(),
            });
        }

        Ok(disjuncts.into_expression())
    }
}

///
/// Transform `predicate` into DNF with the default configuration.
///
pub fn transform_to_dnf(predicate: &QueryPredicate) -> Result<QueryPredicate, InternalError> {
    DnfTransformer::default().transform(predicate)
}

///
/// Return whether `predicate` is in DNF: no AND node has an OR descendant.
///
#[must_use]
pub fn is_dnf(predicate: &QueryPredicate) -> bool {
    if predicate.operator.is_and() {
        return predicate.children.iter().all(is_conjunctive);
    }

    predicate.children.iter().all(is_dnf)
}

// True when the subtree holds no OR node at all.
fn is_conjunctive(predicate: &QueryPredicate) -> bool {
    predicate.operator.is_and() && predicate.children.iter().all(is_conjunctive)
}

// Number of AND branches at the top of a DNF predicate.
fn top_level_disjuncts(predicate: &QueryPredicate) -> usize {
    if predicate.operator.is_and() {
        return 1;
    }

    predicate.parameters.len() + predicate.custom_parameters.len() + predicate.children.len()
}
