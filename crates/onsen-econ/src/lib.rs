#![deny(warnings)]

//! Economic helpers for the daily settlement.
//!
//! This crate provides the pure pieces of the financial step:
//! - Promotion discount stacking and the effective gate price
//! - Staffing adequacy → operational efficiency coupling
//! - Per-variant facility income formulas
//! - Fixed and aggregate expense terms

use onsen_core::{Facility, FacilityKind, Pool, Promotion, PromotionTarget, StaffRole, StaffRoster};
use serde::{Deserialize, Serialize};

/// Fixed daily operating cost, independent of resort size.
pub const BASE_OPERATING_COST: i64 = 8_000;
/// Fixed daily land rent.
pub const LAND_RENT: i64 = 15_000;

/// Combined discount multiplier on the gate price. Active promotions
/// targeting entry or everything stack multiplicatively.
pub fn entry_fee_multiplier(promotions: &[Promotion]) -> f32 {
    promotions
        .iter()
        .filter(|p| p.active && matches!(p.target, PromotionTarget::Entry | PromotionTarget::All))
        .map(Promotion::discount_multiplier)
        .product()
}

/// Gate price after promotions, truncated to whole yen.
pub fn effective_entry_fee(entry_fee: i64, promotions: &[Promotion]) -> i64 {
    (entry_fee as f32 * entry_fee_multiplier(promotions)) as i64
}

/// Staffing adequacy outcome for one facility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffingLevel {
    /// Income multiplier in [0.2, 1.0].
    pub efficiency: f32,
    /// Whether the facility counts as open for guests.
    pub operational: bool,
}

/// Derive operational efficiency from the staffing ratio: zero staff leaves
/// a skeleton operation, understaffing interpolates between 0.5 and 1.0.
pub fn staffing_efficiency(staff_count: u32, required: u32) -> StaffingLevel {
    if required == 0 || staff_count >= required {
        return StaffingLevel {
            efficiency: 1.0,
            operational: true,
        };
    }
    if staff_count == 0 {
        return StaffingLevel {
            efficiency: 0.2,
            operational: false,
        };
    }
    StaffingLevel {
        efficiency: 0.5 + 0.5 * staff_count as f32 / required as f32,
        operational: true,
    }
}

/// Which roles count toward a facility type's staffing.
pub fn eligible_roles(kind: &FacilityKind) -> &'static [StaffRole] {
    match kind {
        FacilityKind::Restaurant { .. } => &[StaffRole::Chef, StaffRole::Server],
        FacilityKind::GiftShop { .. } => &[StaffRole::Attendant],
        FacilityKind::Accommodation { .. } => {
            &[StaffRole::Receptionist, StaffRole::Attendant, StaffRole::Cleaner]
        }
        FacilityKind::Entertainment { .. } => &[StaffRole::Attendant],
    }
}

/// Count the roster members whose role serves this facility type.
pub fn assigned_staff(facility: &Facility, roster: &StaffRoster) -> u32 {
    eligible_roles(&facility.kind)
        .iter()
        .map(|role| roster.staff_with_role(*role).count() as u32)
        .sum()
}

/// Daily income for one facility before the efficiency multiplier. Each
/// variant estimates its share of the day's guests from popularity.
pub fn facility_income(facility: &Facility, guests: u32) -> i64 {
    match &facility.kind {
        FacilityKind::Restaurant { price_tier, .. } => {
            // Popularity-derived share, at most half of all guests.
            let diners = (guests as f32 * facility.popularity / 200.0) as i64;
            diners * 1_500 * i64::from(*price_tier)
        }
        FacilityKind::GiftShop { size } => {
            // At most a third of all guests browse the shop.
            let shoppers = (guests as f32 * facility.popularity / 300.0) as i64;
            let avg_spend = 500 + facility.quality as i64 * 10 + i64::from(*size) * 500;
            shoppers * avg_spend
        }
        FacilityKind::Accommodation {
            rooms,
            room_rate,
            occupancy_rate,
            ..
        } => {
            let occupied = (*rooms as f32 * occupancy_rate / 100.0) as i64;
            occupied * room_rate
        }
        FacilityKind::Entertainment { usage_fee, .. } => {
            // At most 40% of all guests use the facility.
            let users = (guests as f32 * facility.popularity / 250.0) as i64;
            users * usage_fee
        }
    }
}

/// Sum of daily pool operating costs.
pub fn total_pool_cost(pools: &[Pool]) -> i64 {
    pools.iter().map(Pool::daily_cost).sum()
}

/// Sum of facility maintenance costs.
pub fn total_facility_maintenance(facilities: &[Facility]) -> i64 {
    facilities.iter().map(|f| f.maintenance_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use onsen_core::{promotion_catalog, AccommodationStyle, PoolSize, Staff};
    use proptest::prelude::*;

    #[test]
    fn entry_promotions_stack_multiplicatively() {
        let mut promos = promotion_catalog();
        // Weekday Special 20% entry + Couples Package 15% all.
        promos[0].active = true;
        promos[1].active = true;
        let m = entry_fee_multiplier(&promos);
        assert!((m - 0.8 * 0.85).abs() < 1e-6);
        // Dining Special targets restaurants and must not touch the gate.
        promos[4].active = true;
        let m2 = entry_fee_multiplier(&promos);
        assert!((m2 - m).abs() < 1e-6);
        assert_eq!(effective_entry_fee(2_000, &promos), 1_360);
    }

    #[test]
    fn no_promotions_means_full_price() {
        assert_eq!(entry_fee_multiplier(&[]), 1.0);
        assert_eq!(effective_entry_fee(1_000, &[]), 1_000);
    }

    #[test]
    fn efficiency_from_staffing_ratio() {
        let none = staffing_efficiency(0, 4);
        assert_eq!(none.efficiency, 0.2);
        assert!(!none.operational);
        let half = staffing_efficiency(2, 4);
        assert!((half.efficiency - 0.75).abs() < 1e-6);
        assert!(half.operational);
        let full = staffing_efficiency(4, 4);
        assert_eq!(full.efficiency, 1.0);
        assert!(full.operational);
        let over = staffing_efficiency(9, 4);
        assert_eq!(over.efficiency, 1.0);
    }

    #[test]
    fn staffing_level_roundtrips() {
        let level = staffing_efficiency(2, 4);
        let s = serde_json::to_string(&level).unwrap();
        let back: StaffingLevel = serde_json::from_str(&s).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn restaurant_income_scales_with_tier() {
        let budget = Facility::restaurant("Noodle Stand", "Japanese", 1);
        let premium = Facility::restaurant("Kaiseki House", "Japanese", 3);
        // popularity 45 → 22 diners of 100 guests; popularity 55 → 27.
        assert_eq!(facility_income(&budget, 100), 22 * 1_500);
        assert_eq!(facility_income(&premium, 100), 27 * 1_500 * 3);
    }

    #[test]
    fn accommodation_income_uses_occupied_rooms() {
        let mut stay = Facility::accommodation("Mountain Ryokan", AccommodationStyle::Mixed, 20, 2);
        if let FacilityKind::Accommodation { occupancy_rate, .. } = &mut stay.kind {
            *occupancy_rate = 75.0;
        }
        // 15 occupied rooms × ¥10,000.
        assert_eq!(facility_income(&stay, 0), 150_000);
    }

    #[test]
    fn role_mapping_counts_only_eligible_staff() {
        let restaurant = Facility::restaurant("Noodle Stand", "Japanese", 1);
        let mut roster = StaffRoster::default();
        roster.staff.push(Staff::new("Ito Emi", StaffRole::Chef, 2));
        roster.staff.push(Staff::new("Kato Kenji", StaffRole::Server, 1));
        roster.staff.push(Staff::new("Sato Yuki", StaffRole::Cleaner, 3));
        assert_eq!(assigned_staff(&restaurant, &roster), 2);
        let shop = Facility::gift_shop("Omiyage Corner", 2);
        assert_eq!(assigned_staff(&shop, &roster), 0);
    }

    #[test]
    fn pool_costs_sum() {
        let pools = vec![
            Pool::new("Moonlight Bath", PoolSize::Small, 40.0),
            Pool::new("River Stone", PoolSize::Medium, 42.0),
        ];
        // 1000 + (2000 + 100 surcharge)
        assert_eq!(total_pool_cost(&pools), 3_100);
    }

    proptest! {
        #[test]
        fn efficiency_bounded(count in 0u32..20, required in 1u32..20) {
            let level = staffing_efficiency(count, required);
            prop_assert!((0.2..=1.0).contains(&level.efficiency));
        }

        #[test]
        fn income_monotonic_in_guests(guests in 0u32..5_000) {
            let shop = Facility::gift_shop("Omiyage Corner", 2);
            let a = facility_income(&shop, guests);
            let b = facility_income(&shop, guests + 100);
            prop_assert!(b >= a);
        }

        #[test]
        fn effective_fee_never_exceeds_list_price(fee in 0i64..100_000, on in proptest::collection::vec(any::<bool>(), 5)) {
            let mut promos = promotion_catalog();
            for (p, active) in promos.iter_mut().zip(on) {
                p.active = active;
            }
            let eff = effective_entry_fee(fee, &promos);
            prop_assert!(eff <= fee);
            prop_assert!(eff >= 0);
        }
    }
}
