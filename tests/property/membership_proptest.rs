//! Membership date properties

use chrono::{DateTime, Duration, TimeZone, Utc};
use family_gym::shared::membership::{is_expired, renewal_end, status_after_update};
use family_gym::shared::{AccountStatus, MembershipPlan};
use proptest::prelude::*;

fn plan() -> impl Strategy<Value = MembershipPlan> {
    prop_oneof![
        Just(MembershipPlan::Monthly),
        Just(MembershipPlan::Quarterly),
        Just(MembershipPlan::Semiannual),
        Just(MembershipPlan::Annual),
    ]
}

fn status() -> impl Strategy<Value = AccountStatus> {
    prop_oneof![
        Just(AccountStatus::Active),
        Just(AccountStatus::Expired),
        Just(AccountStatus::Inactive),
    ]
}

/// Some instant between 2000 and 2040
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_208_988_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

proptest! {
    #[test]
    fn renewal_never_ends_before_now(now in instant(), offset in -800i64..800, plan in plan()) {
        let current = Some(now + Duration::days(offset));
        let end = renewal_end(current, now, plan);
        prop_assert!(end > now);
        prop_assert!(!is_expired(end, now));
    }

    #[test]
    fn renewal_keeps_remaining_time(now in instant(), left in 1i64..800, plan in plan()) {
        let current = now + Duration::days(left);
        prop_assert_eq!(renewal_end(Some(current), now, plan), plan.end_from(current));
    }

    #[test]
    fn longer_plans_end_later(start in instant()) {
        let ends: Vec<_> = [
            MembershipPlan::Monthly,
            MembershipPlan::Quarterly,
            MembershipPlan::Semiannual,
            MembershipPlan::Annual,
        ]
        .iter()
        .map(|plan| plan.end_from(start))
        .collect();
        prop_assert!(ends.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ends[0] > start);
    }

    #[test]
    fn inactive_survives_any_date_change(now in instant(), offset in -800i64..800) {
        let end = Some(now + Duration::days(offset));
        prop_assert_eq!(status_after_update(AccountStatus::Inactive, end, now), AccountStatus::Inactive);
    }

    #[test]
    fn past_end_always_expires_unless_inactive(now in instant(), ago in 1i64..800, status in status()) {
        let end = Some(now - Duration::days(ago));
        let next = status_after_update(status, end, now);
        if status == AccountStatus::Inactive {
            prop_assert_eq!(next, AccountStatus::Inactive);
        } else {
            prop_assert_eq!(next, AccountStatus::Expired);
        }
    }
}
