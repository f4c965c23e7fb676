//! Eligibility combination for criteria search

use std::collections::BTreeSet;

use crate::types::DestinationCode;

/// The destination-code restriction resolved from numeric constraints.
///
/// `Unconstrained` (no numeric constraint was supplied) and `Restricted`
/// with an empty set (constraints were supplied but nothing matched) are
/// different answers: the first omits the destination clause from the
/// search filter entirely, the second must match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// No numeric constraint restricts the destination set
    Unconstrained,
    /// Only these destination codes satisfy every supplied constraint
    Restricted(BTreeSet<DestinationCode>),
}

impl Eligibility {
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Eligibility::Unconstrained)
    }

    /// The restricted code set, if any constraint was supplied
    pub fn codes(&self) -> Option<&BTreeSet<DestinationCode>> {
        match self {
            Eligibility::Unconstrained => None,
            Eligibility::Restricted(codes) => Some(codes),
        }
    }
}

/// Intersect per-constraint destination sets into one eligibility set.
///
/// A constraint that was not supplied imposes no restriction; a supplied
/// constraint that matched nothing contributes its empty set to the
/// intersection.
pub fn combine(
    duration: Option<BTreeSet<DestinationCode>>,
    price: Option<BTreeSet<DestinationCode>>,
) -> Eligibility {
    match (duration, price) {
        (Some(d), Some(p)) => Eligibility::Restricted(d.intersection(&p).cloned().collect()),
        (Some(d), None) => Eligibility::Restricted(d),
        (None, Some(p)) => Eligibility::Restricted(p),
        (None, None) => Eligibility::Unconstrained,
    }
}
