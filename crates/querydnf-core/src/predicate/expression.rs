use crate::predicate::{CustomParameter, LogicalOperator, QueryPredicate, SubjectParameter};

///
/// Expression
///
/// Transient working tree for the DNF transform. Mirrors `QueryPredicate`
/// but makes the operator part of the node type, so AND and OR nodes can be
/// taken apart without re-checking the operator field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Expression {
    And(Terms),
    Or(Terms),
}

///
/// Terms
///
/// Operands of one expression node, in original order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Terms {
    pub(crate) parameters: Vec<SubjectParameter>,
    pub(crate) custom_parameters: Vec<CustomParameter>,
    pub(crate) children: Vec<Expression>,
}

impl Terms {
    pub(crate) fn single_parameter(parameter: SubjectParameter) -> Self {
        Self {
            parameters: vec![parameter],
            ..Self::default()
        }
    }

    pub(crate) fn single_custom(parameter: CustomParameter) -> Self {
        Self {
            custom_parameters: vec![parameter],
            ..Self::default()
        }
    }

    /// Conjoin two AND operand lists: `self` first, then `other`.
    pub(crate) fn conjoin(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.append(other.clone());
        out
    }

    /// Move every operand of `other` to the end of `self`.
    pub(crate) fn append(&mut self, other: Self) {
        self.parameters.extend(other.parameters);
        self.custom_parameters.extend(other.custom_parameters);
        self.children.extend(other.children);
    }

    pub(crate) const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Expression {
    pub(crate) fn from_predicate(predicate: &QueryPredicate) -> Self {
        let terms = Terms {
            parameters: predicate.parameters.clone(),
            custom_parameters: predicate.custom_parameters.clone(),
            children: predicate.children.iter().map(Self::from_predicate).collect(),
        };

        match predicate.operator {
            LogicalOperator::And => Self::And(terms),
            LogicalOperator::Or => Self::Or(terms),
        }
    }

    pub(crate) fn into_predicate(self) -> QueryPredicate {
        let (operator, terms) = match self {
            Self::And(terms) => (LogicalOperator::And, terms),
            Self::Or(terms) => (LogicalOperator::Or, terms),
        };

        QueryPredicate {
            operator,
            parameters: terms.parameters,
            custom_parameters: terms.custom_parameters,
            children: terms.children.into_iter().map(Self::into_predicate).collect(),
        }
    }

    pub(crate) const fn is_or(&self) -> bool {
        matches!(self, Self::Or(_))
    }

    pub(crate) const fn terms(&self) -> &Terms {
        match self {
            Self::And(terms) | Self::Or(terms) => terms,
        }
    }

    ///
    /// Split this expression into its AND branches.
    ///
    /// An AND node is a single branch. Each parameter of an OR node becomes a
    /// one-operand branch, followed by the branches of each child in order.
    ///
    pub(crate) fn into_disjuncts(self) -> Vec<Terms> {
        match self {
            Self::And(terms) => vec![terms],
            Self::Or(terms) => {
                let mut out = Vec::with_capacity(
                    terms.parameters.len() + terms.custom_parameters.len() + terms.children.len(),
                );
                out.extend(terms.parameters.into_iter().map(Terms::single_parameter));
                out.extend(terms.custom_parameters.into_iter().map(Terms::single_custom));
                for child in terms.children {
                    out.extend(child.into_disjuncts());
                }

                out
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::param;

    #[test]
    fn predicate_conversion_is_lossless() {
        let predicate = QueryPredicate::and()
            .with_parameter(param('A'))
            .with_custom(CustomParameter::new("tag", "x"))
            .with_child(QueryPredicate::any_of([param('B'), param('C')]));

        let expression = Expression::from_predicate(&predicate);
        assert!(!expression.is_or());
        assert_eq!(expression.terms().children.len(), 1);
        assert_eq!(expression.into_predicate(), predicate);
    }

    #[test]
    fn or_disjuncts_list_parameters_before_children() {
        let predicate = QueryPredicate::any_of([param('C'), param('E')])
            .with_child(QueryPredicate::all_of([param('F'), param('G')]));
        let disjuncts = Expression::from_predicate(&predicate).into_disjuncts();

        assert_eq!(disjuncts.len(), 3);
        assert_eq!(disjuncts[0].parameters, vec![param('C')]);
        assert_eq!(disjuncts[1].parameters, vec![param('E')]);
        assert_eq!(disjuncts[2].parameters, vec![param('F'), param('G')]);
    }

    #[test]
    fn conjoin_keeps_left_operands_first() {
        let left = Terms::single_parameter(param('A'));
        let right = Terms::single_parameter(param('B'));

        assert_eq!(left.conjoin(&right).parameters, vec![param('A'), param('B')]);
        assert!(!left.conjoin(&right).has_children());
    }
}
