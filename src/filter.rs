//! Generic period/scope filtering over record collections.
//!
//! Works on any record type via accessor closures, so sales, purchases,
//! expenses, products and customers all go through the same single-pass
//! predicate. Output preserves input order; inputs are never mutated.

use chrono::NaiveDate;

use crate::period::Period;
use crate::records::ScopeId;

/// Filters `records` down to those admitted by `period` and, when `scope` is
/// supplied, recorded at that scope.
///
/// Bounded periods are fail-closed: a record whose `date_of` is `None` (its
/// raw date never normalized) is excluded rather than allowed to pollute
/// totals. The unbounded period applies no range test and admits dateless
/// records. A record with no scope key never matches an explicit `scope`.
pub fn filter_records<'a, T, D, S>(
    records: &'a [T],
    date_of: D,
    period: &Period,
    scope_of: S,
    scope: Option<ScopeId>,
) -> Vec<&'a T>
where
    D: Fn(&T) -> Option<NaiveDate>,
    S: Fn(&T) -> Option<ScopeId>,
{
    records
        .iter()
        .filter(|record| period.admits(date_of(record)))
        .filter(|record| match scope {
            None => true,
            Some(wanted) => scope_of(record) == Some(wanted),
        })
        .collect()
}

/// Date-only variant for collections that carry no scope key.
pub fn filter_by_period<'a, T, D>(records: &'a [T], date_of: D, period: &Period) -> Vec<&'a T>
where
    D: Fn(&T) -> Option<NaiveDate>,
{
    filter_records(records, date_of, period, |_| None, None)
}
