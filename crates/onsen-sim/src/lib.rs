#![deny(warnings)]

//! Daily advancement engine.
//!
//! [`advance_one_day`] is the sole state transition: it mutates the resort
//! aggregate in place through a fixed sequence of steps. The order is
//! load-bearing. Guest generation reads the weather and boredom computed
//! earlier the same day, settlement reads the realized guest count, and the
//! reputation update reads the visitor list produced by generation.
//!
//! All randomness is drawn from the caller-supplied source, so a seeded
//! generator makes whole runs reproducible.

use onsen_ai::{season_personality_pool, Customer};
use onsen_core::{
    event_catalog, satisfaction_band, CampaignEffect, EventDef, EventEffect, FacilityKind,
    GuestFeedback, GuestRecord, PersonalityKind, Resort, Season, SimConfig, StaffRole, Weather,
    WeatherCondition,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Advance the resort by one day with the default configuration.
pub fn advance_one_day(resort: &mut Resort, rng: &mut impl Rng) {
    advance_one_day_with(resort, &SimConfig::default(), rng);
}

/// Advance the resort by one simulated day.
pub fn advance_one_day_with(resort: &mut Resort, config: &SimConfig, rng: &mut impl Rng) {
    resort.day += 1;
    if resort.day % 90 == 0 {
        resort.season = resort.season.next();
        info!(day = resort.day, season = ?resort.season, "season changed");
    }
    update_weather(resort, rng);
    reset_daily(resort);
    process_staff(resort, rng);
    advance_marketing(resort, rng);
    update_boredom(resort);
    generate_guests(resort, rng);
    settle_finances(resort, rng);
    update_reputation(resort);
    resolve_event(resort, config.event_chance, rng);
    maintain_pools(resort, rng);
    update_occupancy(resort);
    debug!(
        day = resort.day,
        guests = resort.guests,
        money = resort.money,
        reputation = resort.reputation,
        "day complete"
    );
}

/// Run a headless multi-day session.
pub fn run_days(resort: &mut Resort, config: &SimConfig, rng: &mut impl Rng) {
    for _ in 0..config.days {
        advance_one_day_with(resort, config, rng);
    }
}

/// Per-season condition table for the cumulative-probability draw.
fn weather_table(season: Season) -> &'static [(WeatherCondition, f64)] {
    match season {
        Season::Spring => &[
            (WeatherCondition::Clear, 0.5),
            (WeatherCondition::Cloudy, 0.3),
            (WeatherCondition::Rain, 0.2),
        ],
        Season::Summer => &[
            (WeatherCondition::Clear, 0.6),
            (WeatherCondition::Cloudy, 0.2),
            (WeatherCondition::Rain, 0.15),
            (WeatherCondition::Storm, 0.05),
        ],
        Season::Autumn => &[
            (WeatherCondition::Clear, 0.4),
            (WeatherCondition::Cloudy, 0.3),
            (WeatherCondition::Rain, 0.2),
            (WeatherCondition::Fog, 0.1),
        ],
        Season::Winter => &[
            (WeatherCondition::Clear, 0.3),
            (WeatherCondition::Cloudy, 0.3),
            (WeatherCondition::Snow, 0.3),
            (WeatherCondition::Blizzard, 0.1),
        ],
    }
}

fn update_weather(resort: &mut Resort, rng: &mut impl Rng) {
    let table = weather_table(resort.season);
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    let mut condition = table[table.len() - 1].0;
    for (candidate, chance) in table {
        cumulative += chance;
        if roll <= cumulative {
            condition = *candidate;
            break;
        }
    }
    resort.weather = Weather {
        condition,
        temperature_c: resort.season.base_temperature_c() + rng.gen_range(-5..=5),
        season: resort.season,
    };
}

fn reset_daily(resort: &mut Resort) {
    resort.daily_income = 0;
    resort.daily_expenses = 0;
    resort.guests = 0;
    resort.visitors.clear();
    resort.feedback.clear();
}

/// Daily happiness wear, periodic skill training, and rare morale swings.
fn process_staff(resort: &mut Resort, rng: &mut impl Rng) {
    let day = resort.day;
    for staff in &mut resort.roster.staff {
        staff.days_worked += 1;
        staff.happiness = (staff.happiness - rng.gen_range(0..=2) as f32).clamp(0.0, 100.0);
        if staff.days_worked % 30 == 0 && rng.gen::<f32>() < 0.3 && staff.skill_level < 5 {
            staff.skill_level += 1;
            staff.recompute_salary();
            resort
                .event_log
                .push(format!("Day {day}: {} has improved their skills", staff.name));
        }
        if rng.gen::<f32>() < 0.05 {
            let swing = rng.gen_range(5.0..=15.0);
            if rng.gen::<f32>() < 0.4 {
                staff.happiness = (staff.happiness + swing).clamp(0.0, 100.0);
            } else {
                staff.happiness = (staff.happiness - swing).clamp(0.0, 100.0);
            }
        }
    }
}

/// Apply each active campaign's daily effect, then count down and drop
/// whatever has run its course.
fn advance_marketing(resort: &mut Resort, rng: &mut impl Rng) {
    let day = resort.day;
    for campaign in &mut resort.marketing.campaigns {
        match campaign.effect {
            CampaignEffect::Reputation { per_day } => {
                resort.reputation = (resort.reputation + per_day).min(100.0);
            }
            CampaignEffect::SocialMedia { per_day } => {
                resort.reputation = (resort.reputation + per_day).min(100.0);
                if rng.gen::<f32>() < 0.05 {
                    let bonus = rng.gen_range(5.0..=10.0);
                    resort.reputation = (resort.reputation + bonus).min(100.0);
                    resort
                        .event_log
                        .push(format!("Day {day}: {} went viral!", campaign.name));
                }
            }
        }
        campaign.days_remaining = campaign.days_remaining.saturating_sub(1);
        if campaign.days_remaining == 0 {
            campaign.active = false;
            resort
                .event_log
                .push(format!("Day {day}: the {} campaign has ended", campaign.name));
        }
    }
    resort.marketing.campaigns.retain(|c| c.active);
    for promotion in &mut resort.marketing.promotions {
        promotion.days_remaining = promotion.days_remaining.saturating_sub(1);
        if promotion.days_remaining == 0 {
            promotion.active = false;
        }
    }
    resort.marketing.promotions.retain(|p| p.active);
}

/// Guests tire of a resort that never builds anything: past 30 quiet days,
/// boredom climbs one point per further 10 days, capped at 30.
fn update_boredom(resort: &mut Resort) {
    let days_since = resort.day.saturating_sub(resort.last_upgrade_day);
    if days_since <= 30 {
        return;
    }
    let boredom = ((days_since - 30) / 10).min(30);
    // Nag the player once per 5 accrued points, not on every step.
    if boredom > resort.boredom_factor && boredom % 5 == 0 {
        resort.event_log.push(format!(
            "Day {}: guests are getting bored with the same old facilities",
            resort.day
        ));
        debug!(boredom, "boredom increased");
    }
    resort.boredom_factor = boredom;
}

fn generate_guests(resort: &mut Resort, rng: &mut impl Rng) {
    if resort.pools.is_empty() {
        return;
    }

    let mut potential = (resort.reputation * 2.0 * resort.season.demand_multiplier()) as i32;
    let active_campaigns = resort.marketing.campaigns.iter().filter(|c| c.active).count();
    if active_campaigns > 0 {
        potential = (potential as f32 * (1.0 + 0.2 * active_campaigns as f32)) as i32;
    }
    if resort.boredom_factor > 0 {
        potential = (potential as f32 * (1.0 - resort.boredom_factor as f32 / 100.0)) as i32;
    }
    if !resort.facilities.is_empty() {
        let closed = resort.facilities.iter().filter(|f| !f.operational).count();
        if closed > 0 {
            let share = closed as f32 / resort.facilities.len() as f32;
            potential = (potential as f32 * (1.0 - share * 0.5)) as i32;
        }
    }

    let archetypes = season_personality_pool(resort.season);
    let mut customers: Vec<Customer> = Vec::new();
    for _ in 0..potential.max(0) {
        let kind = archetypes
            .choose(rng)
            .copied()
            .unwrap_or(PersonalityKind::RelaxationSeeker);
        let mut customer = Customer::new(kind);
        if customer.will_visit(resort, rng) {
            customers.push(customer);
        }
    }

    // Reputation floor: below 30, word of mouth usually empties the day.
    if resort.reputation < 30.0 && rng.gen::<f32>() < 0.8 {
        customers.clear();
    }

    resort.guests = customers.len() as u32;
    for customer in customers.choose_multiple(rng, 5) {
        resort.feedback.push(GuestFeedback {
            personality: customer.personality,
            satisfaction: customer.satisfaction,
            band: satisfaction_band(customer.satisfaction).to_string(),
            comment: customer.feedback_comment(rng).to_string(),
        });
    }
    resort.visitors = customers
        .iter()
        .map(|c| GuestRecord {
            personality: c.personality,
            satisfaction: c.satisfaction,
        })
        .collect();
    info!(potential, guests = resort.guests, "guest generation");
}

/// Income and expenses for the day. Also re-derives each facility's
/// operational flag from staffing, which guest generation reads tomorrow.
fn settle_finances(resort: &mut Resort, rng: &mut impl Rng) {
    let guests = resort.guests;
    let fee = onsen_econ::effective_entry_fee(resort.entry_fee, &resort.marketing.promotions);
    let mut income = i64::from(guests) * fee;
    let mut expenses = onsen_econ::BASE_OPERATING_COST
        + onsen_econ::LAND_RENT
        + onsen_econ::total_pool_cost(&resort.pools);

    let staffing: Vec<u32> = resort
        .facilities
        .iter()
        .map(|f| onsen_econ::assigned_staff(f, &resort.roster))
        .collect();
    for (facility, staff_count) in resort.facilities.iter_mut().zip(staffing) {
        expenses += facility.maintenance_cost;
        let level = onsen_econ::staffing_efficiency(staff_count, facility.staff_required);
        facility.operational = level.operational;
        income += (onsen_econ::facility_income(facility, guests) as f32 * level.efficiency) as i64;
    }

    let salaries = resort.roster.total_salary();
    expenses += salaries;
    // Checked against the balance before today's takings land.
    if salaries > 0 && resort.money < salaries {
        handle_unpaid_staff(resort, rng);
    }

    resort.daily_income = income;
    resort.daily_expenses = expenses;
    resort.money += income - expenses;
    debug!(income, expenses, money = resort.money, "settlement");
}

/// Unpaid staff each lose 30 happiness, then quit outright at zero or on an
/// even coin flip.
fn handle_unpaid_staff(resort: &mut Resort, rng: &mut impl Rng) {
    let day = resort.day;
    let mut departures = Vec::new();
    resort.roster.staff.retain_mut(|staff| {
        staff.happiness = (staff.happiness - 30.0).max(0.0);
        if staff.happiness <= 0.0 || rng.gen::<f32>() < 0.5 {
            departures.push(staff.name.clone());
            return false;
        }
        true
    });
    for name in departures {
        info!(%name, "staff member quit over unpaid wages");
        resort
            .event_log
            .push(format!("Day {day}: {name} quit over unpaid wages"));
    }
}

/// Damped pull toward the day's average visitor satisfaction, plus a fixed
/// ceiling pressure above 50 that applies even on empty days.
fn update_reputation(resort: &mut Resort) {
    if !resort.visitors.is_empty() {
        let total: f32 = resort.visitors.iter().map(|v| v.satisfaction).sum();
        let average = total / resort.visitors.len() as f32;
        resort.reputation = (resort.reputation + (average - 50.0) / 8.0).clamp(0.0, 100.0);
    }
    if resort.reputation > 50.0 {
        resort.reputation -= 0.5;
    }
}

fn resolve_event(resort: &mut Resort, chance: f64, rng: &mut impl Rng) {
    if rng.gen::<f64>() >= chance {
        return;
    }
    let catalog = event_catalog();
    let Some(event) = catalog.choose(rng) else {
        return;
    };
    apply_event(resort, event, rng);
    resort.event_log.push(format!(
        "Day {}: {} - {}",
        resort.day, event.name, event.effect_description
    ));
    info!(event = %event.name, "random event");
}

fn apply_event(resort: &mut Resort, event: &EventDef, rng: &mut impl Rng) {
    match event.effect {
        EventEffect::ReputationDelta(delta) => {
            resort.reputation = (resort.reputation + delta).clamp(0.0, 100.0);
        }
        EventEffect::GuestSurge { factor } => {
            resort.guests = (resort.guests as f32 * factor) as u32;
        }
        EventEffect::PoolPopularityBoost { amount } => {
            for pool in &mut resort.pools {
                pool.popularity = (pool.popularity + amount).min(100.0);
            }
        }
        EventEffect::PlumbingIssue {
            min_cost,
            max_cost,
            cleanliness_loss,
        } => {
            resort.money -= rng.gen_range(min_cost..=max_cost);
            if let Some(pool) = resort.pools.choose_mut(rng) {
                pool.cleanliness = (pool.cleanliness - cleanliness_loss).max(0.0);
            }
        }
        EventEffect::Fine { amount } => {
            resort.money -= amount;
        }
        EventEffect::StaffConflict { min_loss, max_loss } => {
            for staff in &mut resort.roster.staff {
                let loss = rng.gen_range(min_loss..=max_loss);
                staff.happiness = (staff.happiness - loss).max(0.0);
            }
        }
        EventEffect::BloggerReview { min_swing, max_swing } => {
            let swing = rng.gen_range(min_swing..=max_swing);
            match quality_factors(resort) {
                0 | 1 => resort.reputation = (resort.reputation - swing).clamp(0.0, 100.0),
                2 => {}
                _ => resort.reputation = (resort.reputation + swing).clamp(0.0, 100.0),
            }
        }
        EventEffect::Nothing => {}
    }
}

/// How much a critical reviewer would find to praise.
fn quality_factors(resort: &Resort) -> u32 {
    let mut factors = 0;
    if !resort.pools.is_empty() {
        factors += 1;
    }
    if !resort.facilities.is_empty() {
        factors += 1;
    }
    if resort.reputation > 50.0 {
        factors += 1;
    }
    if resort.pools.iter().any(|p| p.cleanliness > 70.0) {
        factors += 1;
    }
    factors
}

/// Daily grime, cleaner restoration, and a flat top-up for anything still
/// below the hygiene threshold.
fn maintain_pools(resort: &mut Resort, rng: &mut impl Rng) {
    let cleaners: Vec<_> = resort.roster.staff_with_role(StaffRole::Cleaner).collect();
    let cleaner_skill = if cleaners.is_empty() {
        None
    } else {
        let total: u32 = cleaners.iter().map(|s| u32::from(s.skill_level)).sum();
        Some(total as f32 / cleaners.len() as f32)
    };
    for pool in &mut resort.pools {
        pool.cleanliness = (pool.cleanliness - rng.gen_range(10.0..=20.0)).max(0.0);
        if let Some(skill) = cleaner_skill {
            pool.cleanliness = (pool.cleanliness + 5.0 * skill).min(100.0);
        }
    }
    for pool in &mut resort.pools {
        if pool.cleanliness < 70.0 {
            pool.cleanliness = (pool.cleanliness + 20.0).min(100.0);
        }
    }
}

fn update_occupancy(resort: &mut Resort) {
    let reputation = resort.reputation;
    let multiplier = resort.season.occupancy_multiplier();
    for facility in &mut resort.facilities {
        let quality = facility.quality;
        if let FacilityKind::Accommodation { occupancy_rate, .. } = &mut facility.kind {
            *occupancy_rate = ((reputation + quality) / 2.0 * multiplier).min(100.0);
        }
    }
}
