//! Membership plans and expiry arithmetic
//!
//! These are the date rules the expiry sweep and the renewal endpoint share.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::roles::AccountStatus;

/// Purchasable membership length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::Type))]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ssr", sqlx(rename_all = "lowercase"))]
pub enum MembershipPlan {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl MembershipPlan {
    pub fn months(&self) -> u32 {
        match self {
            MembershipPlan::Monthly => 1,
            MembershipPlan::Quarterly => 3,
            MembershipPlan::Semiannual => 6,
            MembershipPlan::Annual => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipPlan::Monthly => "monthly",
            MembershipPlan::Quarterly => "quarterly",
            MembershipPlan::Semiannual => "semiannual",
            MembershipPlan::Annual => "annual",
        }
    }

    /// End date of a membership of this plan starting at `start`
    pub fn end_from(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        // Only fails past year 262143.
        start
            .checked_add_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipPlan {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(MembershipPlan::Monthly),
            "quarterly" => Ok(MembershipPlan::Quarterly),
            "semiannual" => Ok(MembershipPlan::Semiannual),
            "annual" => Ok(MembershipPlan::Annual),
            _ => Err(SharedError::parse("membership plan", s)),
        }
    }
}

/// New end date when renewing: time left on a running membership is kept,
/// a lapsed one restarts from `now`.
pub fn renewal_end(
    current_end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    plan: MembershipPlan,
) -> DateTime<Utc> {
    let base = current_end.filter(|end| *end > now).unwrap_or(now);
    plan.end_from(base)
}

pub fn is_expired(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    end < now
}

/// Status to store after a membership end date changes.
///
/// Staff deactivation wins over any date change.
pub fn status_after_update(
    status: AccountStatus,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AccountStatus {
    match (status, end) {
        (AccountStatus::Inactive, _) => AccountStatus::Inactive,
        (_, Some(end)) if is_expired(end, now) => AccountStatus::Expired,
        (AccountStatus::Expired, Some(_)) => AccountStatus::Active,
        (status, _) => status,
    }
}
