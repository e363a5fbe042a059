// File: ./src/model/scope.rs
//! Which part of a recurring series an edit or deletion applies to.
//!
//! The choice depends only on two facts about the edit (did this occurrence's
//! own dates move, did the repetition rule change), so it is a fixed table
//! rather than state accumulated while the form is open.
use crate::model::change::ChangeSet;
use crate::model::rule::{Occurrence, RecurrenceRuleState};
use crate::model::validation::ensure_valid;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum MutationScope {
    #[serde(rename = "thisInstance")]
    ThisInstance,
    #[serde(rename = "thisAndFollowingInstances")]
    ThisAndFollowing,
    #[serde(rename = "allInstances")]
    AllInstances,
}

impl fmt::Display for MutationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationScope::ThisInstance => write!(f, "This event"),
            MutationScope::ThisAndFollowing => write!(f, "This and following events"),
            MutationScope::AllInstances => write!(f, "All events"),
        }
    }
}

use MutationScope::{AllInstances, ThisAndFollowing, ThisInstance};

/// Outcome of classifying an edit: what to pre-select, what to offer, and
/// whether to ask at all.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDecision {
    pub default_scope: MutationScope,
    pub allowed_scopes: &'static [MutationScope],
    pub must_prompt: bool,
}

impl ScopeDecision {
    pub fn allows(&self, scope: MutationScope) -> bool {
        self.allowed_scopes.contains(&scope)
    }
}

const ALL_SCOPES: &[MutationScope] = &[ThisInstance, ThisAndFollowing, AllInstances];

// Indexed by [dates_changed][rule_changed].
const DECISION_TABLE: [[ScopeDecision; 2]; 2] = [
    [
        ScopeDecision {
            default_scope: ThisInstance,
            allowed_scopes: ALL_SCOPES,
            must_prompt: true,
        },
        ScopeDecision {
            default_scope: ThisAndFollowing,
            allowed_scopes: &[ThisAndFollowing, AllInstances],
            must_prompt: true,
        },
    ],
    [
        ScopeDecision {
            default_scope: ThisInstance,
            allowed_scopes: &[ThisInstance, ThisAndFollowing],
            must_prompt: true,
        },
        ScopeDecision {
            default_scope: ThisAndFollowing,
            allowed_scopes: &[ThisAndFollowing],
            must_prompt: false,
        },
    ],
];

const DELETION_DECISION: ScopeDecision = ScopeDecision {
    default_scope: ThisInstance,
    allowed_scopes: ALL_SCOPES,
    must_prompt: true,
};

/// Edit scope for an occurrence of a recurring series.
///
/// A moved occurrence cannot impose its dates on the whole series, so
/// `AllInstances` is withheld when `dates_changed`. A single occurrence cannot
/// carry a new rule, so `ThisInstance` is withheld when `rule_changed`. With
/// both, only `ThisAndFollowing` remains and the user is not asked.
pub fn classify(dates_changed: bool, rule_changed: bool) -> ScopeDecision {
    DECISION_TABLE[dates_changed as usize][rule_changed as usize]
}

/// Deleting touches no rule field, so every scope is always on offer.
pub fn deletion_decision() -> ScopeDecision {
    DELETION_DECISION
}

/// Date the persisted rule is anchored to after an edit under `scope`.
///
/// Splitting the series at "this and following" with something actually
/// changed restarts it from the occurrence's new start date; everything else
/// keeps the template's anchor.
pub fn resolve_anchor_date(
    scope: MutationScope,
    changes: ChangeSet,
    occurrence_new_start: NaiveDate,
    template_recurrence_start: NaiveDate,
) -> NaiveDate {
    if scope == ThisAndFollowing && changes.any() {
        occurrence_new_start
    } else {
        template_recurrence_start
    }
}

// --- CALLER CONTRACT ---

/// Everything the edit form knows when the user hits "save".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub previous_rule: Option<RecurrenceRuleState>,
    pub previous_occurrence: Occurrence,
    pub proposed_rule: RecurrenceRuleState,
    pub proposed_occurrence: Occurrence,
}

impl EditRequest {
    pub fn plan(&self) -> UpdatePlan {
        UpdatePlan::new(
            self.previous_rule.as_ref(),
            &self.previous_occurrence,
            &self.proposed_rule,
            &self.proposed_occurrence,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    pub changes: ChangeSet,
    pub decision: ScopeDecision,
    #[serde(skip)]
    template_start: NaiveDate,
    #[serde(skip)]
    proposed_rule: RecurrenceRuleState,
    #[serde(skip)]
    proposed_start: NaiveDate,
}

impl UpdatePlan {
    pub fn new(
        previous_rule: Option<&RecurrenceRuleState>,
        previous: &Occurrence,
        proposed_rule: &RecurrenceRuleState,
        proposed: &Occurrence,
    ) -> Self {
        let changes = ChangeSet::detect(previous_rule, previous, proposed_rule, proposed);
        let decision = classify(changes.dates_changed, changes.rule_changed);
        log::debug!(
            "Edit classified: default={:?}, allowed={:?}, prompt={}",
            decision.default_scope,
            decision.allowed_scopes,
            decision.must_prompt
        );
        Self {
            changes,
            decision,
            template_start: previous_rule
                .map(|r| r.recurrence_start_date)
                .unwrap_or(proposed_rule.recurrence_start_date),
            proposed_rule: proposed_rule.clone(),
            proposed_start: proposed.start_day(),
        }
    }

    pub fn anchor_date(&self, scope: MutationScope) -> NaiveDate {
        resolve_anchor_date(scope, self.changes, self.proposed_start, self.template_start)
    }

    /// The rule to send with an update under `scope`: anchored per
    /// [`resolve_anchor_date`], with `week_days` dropped where the frequency
    /// gives them no meaning. A rule that fails [`crate::model::validation::validate`] is
    /// never returned.
    pub fn rule_for_scope(&self, scope: MutationScope) -> Result<RecurrenceRuleState> {
        if !self.decision.allows(scope) {
            return Err(anyhow!(
                "Scope '{}' is not available for this edit (allowed: {:?})",
                scope,
                self.decision.allowed_scopes
            ));
        }
        let mut rule = self.proposed_rule.clone();
        rule.recurrence_start_date = self.anchor_date(scope);
        if !rule.uses_week_days() {
            rule.week_days.clear();
        }
        ensure_valid(&rule)?;
        Ok(rule)
    }

    /// The rule to send when no choice is offered, i.e. under the default scope.
    pub fn auto_applied_rule(&self) -> Option<RecurrenceRuleState> {
        if self.decision.must_prompt {
            return None;
        }
        self.rule_for_scope(self.decision.default_scope).ok()
    }
}
