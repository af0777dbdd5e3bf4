#![deny(warnings)]

//! Core domain models and invariants for the onsen resort simulation.
//!
//! This crate defines the serializable aggregate the daily engine mutates,
//! the static catalogs it consumes (ingredients, events, campaigns,
//! promotions), and the pre-validated player commands that run between days.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seasons cycle every 90 simulated days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Next season in the Spring → Summer → Autumn → Winter cycle.
    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Guest-demand multiplier. Winter is peak season for hot springs.
    pub fn demand_multiplier(self) -> f32 {
        match self {
            Season::Winter => 1.5,
            Season::Autumn => 1.2,
            Season::Spring => 1.0,
            Season::Summer => 0.7,
        }
    }

    /// Accommodation occupancy multiplier.
    pub fn occupancy_multiplier(self) -> f32 {
        match self {
            Season::Spring => 1.1,
            Season::Summer => 1.2,
            Season::Autumn => 1.3,
            Season::Winter => 1.4,
        }
    }

    /// Baseline outdoor temperature in °C before daily variation.
    pub fn base_temperature_c(self) -> i32 {
        match self {
            Season::Spring => 15,
            Season::Summer => 28,
            Season::Autumn => 18,
            Season::Winter => 5,
        }
    }
}

/// Daily weather condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    Storm,
    Fog,
    Snow,
    Blizzard,
}

/// Current weather, recomputed fully each day from the season tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub temperature_c: i32,
    pub season: Season,
}

impl Default for Weather {
    fn default() -> Self {
        Weather {
            condition: WeatherCondition::Clear,
            temperature_c: 20,
            season: Season::Spring,
        }
    }
}

impl Weather {
    /// Multiplier the weather applies to guest demand. Snow is a draw for
    /// onsen bathing; storms and blizzards keep people home.
    pub fn guest_impact(&self) -> f32 {
        let mut multiplier = match self.condition {
            WeatherCondition::Clear => 1.2,
            WeatherCondition::Cloudy => 1.0,
            WeatherCondition::Rain => 0.8,
            WeatherCondition::Storm => 0.5,
            WeatherCondition::Snow => 1.1,
            WeatherCondition::Blizzard => 0.6,
            WeatherCondition::Fog => 0.9,
        };
        if self.temperature_c > 35 || self.temperature_c < -5 {
            multiplier *= 0.7;
        }
        multiplier
    }
}

/// Pool size class; fixes capacity and recurring costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSize {
    Small,
    Medium,
    Large,
}

impl PoolSize {
    /// One-time construction cost in yen.
    pub fn construction_cost(self) -> i64 {
        match self {
            PoolSize::Small => 50_000,
            PoolSize::Medium => 100_000,
            PoolSize::Large => 200_000,
        }
    }

    /// Base daily maintenance cost in yen, before ingredients and heating.
    pub fn maintenance_cost(self) -> i64 {
        match self {
            PoolSize::Small => 1_000,
            PoolSize::Medium => 2_000,
            PoolSize::Large => 4_000,
        }
    }

    /// Bather capacity.
    pub fn capacity(self) -> u32 {
        match self {
            PoolSize::Small => 10,
            PoolSize::Medium => 25,
            PoolSize::Large => 50,
        }
    }

    /// Fee for a manual deep clean.
    pub fn cleaning_fee(self) -> i64 {
        match self {
            PoolSize::Small => 2_000,
            PoolSize::Medium => 4_000,
            PoolSize::Large => 8_000,
        }
    }
}

/// A mineral or additive dissolved in a pool. Adds recurring cost and fixed
/// popularity/satisfaction bonuses (possibly negative).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub daily_cost: i64,
    pub popularity_bonus: f32,
    pub satisfaction_bonus: f32,
    pub description: String,
}

fn ingredient(name: &str, daily_cost: i64, pop: f32, sat: f32, desc: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        daily_cost,
        popularity_bonus: pop,
        satisfaction_bonus: sat,
        description: desc.to_string(),
    }
}

/// The static catalog of bath additives.
pub fn ingredient_catalog() -> Vec<Ingredient> {
    vec![
        ingredient(
            "Sulfur",
            500,
            5.0,
            3.0,
            "Sulfur-rich waters are known for treating skin conditions.",
        ),
        ingredient(
            "Iron",
            600,
            3.0,
            5.0,
            "Iron-rich waters are said to be good for anemia and fatigue.",
        ),
        ingredient(
            "Sodium Bicarbonate",
            400,
            4.0,
            4.0,
            "These waters leave skin feeling smooth and are called 'Baking Soda Springs'.",
        ),
        ingredient(
            "Radium",
            1_000,
            10.0,
            -5.0,
            "Historically popular but now known to be harmful. High popularity but reduces satisfaction.",
        ),
        ingredient(
            "Green Tea Extract",
            800,
            8.0,
            7.0,
            "A luxurious addition that gives the water a pleasant aroma and skin benefits.",
        ),
        ingredient(
            "Sake",
            1_200,
            15.0,
            10.0,
            "Bathing in sake is a premium experience that's very popular with guests.",
        ),
        ingredient(
            "Hydrogen Carbonate",
            700,
            6.0,
            6.0,
            "Known as 'Beauty Baths' for making skin smooth and beautiful.",
        ),
        ingredient(
            "Alum",
            500,
            4.0,
            3.0,
            "Creates an astringent effect that tightens skin.",
        ),
    ]
}

/// A hot-spring pool. Cleanliness and popularity are clamped to [0,100].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub name: String,
    pub size: PoolSize,
    pub temperature_c: f32,
    pub ingredients: Vec<Ingredient>,
    pub cleanliness: f32,
    pub popularity: f32,
}

impl Pool {
    pub fn new(name: impl Into<String>, size: PoolSize, temperature_c: f32) -> Pool {
        Pool {
            name: name.into(),
            size,
            temperature_c,
            ingredients: vec![],
            cleanliness: 100.0,
            popularity: 50.0,
        }
    }

    /// Dissolve an additive; raises popularity and the daily cost.
    pub fn add_ingredient(&mut self, ing: Ingredient) {
        self.popularity = (self.popularity + ing.popularity_bonus).clamp(0.0, 100.0);
        self.ingredients.push(ing);
    }

    /// Deep clean back to spotless.
    pub fn clean(&mut self) {
        self.cleanliness = 100.0;
    }

    /// Daily operating cost: maintenance + ingredients + a heating surcharge
    /// proportional to the deviation from the 40°C optimum.
    pub fn daily_cost(&self) -> i64 {
        let ingredients: i64 = self.ingredients.iter().map(|i| i.daily_cost).sum();
        let temp_factor = (self.temperature_c - 40.0).abs() / 10.0;
        self.size.maintenance_cost() + ingredients + (500.0 * temp_factor) as i64
    }
}

/// Accommodation architectural style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccommodationStyle {
    Japanese,
    Western,
    Mixed,
}

/// Entertainment facility variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntertainmentKind {
    Karaoke,
    GameRoom,
    SpaTreatment,
    Massage,
    Theater,
}

/// Type-specific facility payload. Each variant carries the attributes its
/// daily-income formula reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FacilityKind {
    Restaurant {
        cuisine: String,
        /// 1 = budget, 2 = standard, 3 = premium.
        price_tier: u8,
    },
    GiftShop {
        /// 1 = small, 2 = medium, 3 = large.
        size: u8,
    },
    Accommodation {
        style: AccommodationStyle,
        rooms: u32,
        /// 1 = budget, 2 = standard, 3 = luxury.
        quality_level: u8,
        room_rate: i64,
        /// Percentage of rooms occupied, recomputed daily by the engine.
        occupancy_rate: f32,
    },
    Entertainment {
        kind: EntertainmentKind,
        size: u8,
        usage_fee: i64,
    },
}

/// A guest-facing facility. The operational flag is derived each day from
/// staffing adequacy during settlement, never set by hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub kind: FacilityKind,
    pub construction_cost: i64,
    pub maintenance_cost: i64,
    pub staff_required: u32,
    pub quality: f32,
    pub popularity: f32,
    pub operational: bool,
}

impl Facility {
    pub fn restaurant(name: impl Into<String>, cuisine: impl Into<String>, price_tier: u8) -> Facility {
        let tier = i64::from(price_tier);
        Facility {
            name: name.into(),
            kind: FacilityKind::Restaurant {
                cuisine: cuisine.into(),
                price_tier,
            },
            construction_cost: 200_000 * tier,
            maintenance_cost: 5_000 * tier,
            staff_required: 2 * u32::from(price_tier),
            quality: 40.0 + f32::from(price_tier) * 10.0,
            popularity: 40.0 + f32::from(price_tier) * 5.0,
            operational: true,
        }
    }

    pub fn gift_shop(name: impl Into<String>, size: u8) -> Facility {
        Facility {
            name: name.into(),
            kind: FacilityKind::GiftShop { size },
            construction_cost: 100_000 * i64::from(size),
            maintenance_cost: 2_000 * i64::from(size),
            staff_required: u32::from(size.saturating_sub(1)).max(1),
            quality: 50.0,
            popularity: 40.0 + f32::from(size) * 5.0,
            operational: true,
        }
    }

    pub fn accommodation(
        name: impl Into<String>,
        style: AccommodationStyle,
        rooms: u32,
        quality_level: u8,
    ) -> Facility {
        let level = i64::from(quality_level);
        Facility {
            name: name.into(),
            kind: FacilityKind::Accommodation {
                style,
                rooms,
                quality_level,
                room_rate: 5_000 * level,
                occupancy_rate: 50.0,
            },
            construction_cost: 500_000 + i64::from(rooms) * 50_000 * level,
            maintenance_cost: 10_000 + i64::from(rooms) * 500 * level,
            staff_required: 2 + rooms / 10,
            quality: 40.0 + f32::from(quality_level) * 15.0,
            popularity: 40.0 + f32::from(quality_level) * 10.0,
            operational: true,
        }
    }

    pub fn entertainment(name: impl Into<String>, kind: EntertainmentKind, size: u8) -> Facility {
        Facility {
            name: name.into(),
            kind: FacilityKind::Entertainment {
                kind,
                size,
                usage_fee: 1_000,
            },
            construction_cost: 150_000 * i64::from(size),
            maintenance_cost: 3_000 * i64::from(size),
            staff_required: u32::from(size),
            quality: 50.0,
            popularity: 45.0 + f32::from(size) * 5.0,
            operational: true,
        }
    }
}

/// Staff roles with fixed base daily salaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Manager,
    Receptionist,
    Attendant,
    Cleaner,
    Chef,
    Server,
    Maintenance,
    Security,
}

impl StaffRole {
    /// Base daily salary in yen for skill level 1.
    pub fn base_salary(self) -> i64 {
        match self {
            StaffRole::Manager => 5_000,
            StaffRole::Receptionist => 3_000,
            StaffRole::Attendant => 2_500,
            StaffRole::Cleaner => 2_000,
            StaffRole::Chef => 4_000,
            StaffRole::Server => 2_200,
            StaffRole::Maintenance => 3_500,
            StaffRole::Security => 3_000,
        }
    }
}

/// Salary multiplier bonus per skill level 1..=10, applied as base × (1 + m).
const SKILL_MULTIPLIERS: [f64; 10] = [0.0, 0.3, 0.7, 1.2, 2.0, 3.0, 4.2, 5.6, 7.2, 9.0];

/// An employed staff member. Happiness is clamped to [0,100]; salary is
/// derived from role and skill and recomputed on skill change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub name: String,
    pub role: StaffRole,
    pub skill_level: u8,
    pub happiness: f32,
    pub salary: i64,
    pub days_worked: u32,
}

impl Staff {
    pub fn new(name: impl Into<String>, role: StaffRole, skill_level: u8) -> Staff {
        let mut s = Staff {
            name: name.into(),
            role,
            skill_level,
            happiness: 80.0,
            salary: 0,
            days_worked: 0,
        };
        s.recompute_salary();
        s
    }

    /// Rederive salary from role and skill.
    pub fn recompute_salary(&mut self) {
        let idx = usize::from(self.skill_level.clamp(1, 10)) - 1;
        let base = self.role.base_salary() as f64;
        self.salary = (base * (1.0 + SKILL_MULTIPLIERS[idx])).round() as i64;
    }

    /// A cash bonus lifts happiness by 1 point per 100 yen.
    pub fn give_bonus(&mut self, amount: i64) {
        self.happiness = (self.happiness + (amount / 100) as f32).clamp(0.0, 100.0);
    }
}

const CANDIDATE_FIRST_NAMES: [&str; 12] = [
    "Takashi", "Yuki", "Haruka", "Kenji", "Akira", "Yumi", "Satoshi", "Emi", "Hiroshi", "Naomi",
    "Kazuki", "Ayumi",
];
const CANDIDATE_LAST_NAMES: [&str; 12] = [
    "Tanaka", "Suzuki", "Sato", "Watanabe", "Ito", "Yamamoto", "Nakamura", "Kobayashi", "Kato",
    "Yoshida", "Yamada", "Sasaki",
];
const CANDIDATE_ROLES: [StaffRole; 8] = [
    StaffRole::Manager,
    StaffRole::Receptionist,
    StaffRole::Attendant,
    StaffRole::Cleaner,
    StaffRole::Chef,
    StaffRole::Server,
    StaffRole::Maintenance,
    StaffRole::Security,
];

/// Staff-management sub-aggregate: the employed roster plus the hiring pool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffRoster {
    pub staff: Vec<Staff>,
    pub candidates: Vec<Staff>,
}

impl StaffRoster {
    pub fn new(rng: &mut impl Rng) -> StaffRoster {
        let mut roster = StaffRoster::default();
        roster.generate_candidates(5, rng);
        roster
    }

    fn generate_candidates(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let first = CANDIDATE_FIRST_NAMES.choose(rng).copied().unwrap_or("Yuki");
            let last = CANDIDATE_LAST_NAMES.choose(rng).copied().unwrap_or("Sato");
            let role = CANDIDATE_ROLES.choose(rng).copied().unwrap_or(StaffRole::Attendant);
            let skill = rng.gen_range(1..=5);
            self.candidates.push(Staff::new(format!("{last} {first}"), role, skill));
        }
    }

    /// Replace the hiring pool with 3..=7 fresh candidates.
    pub fn refresh_candidates(&mut self, rng: &mut impl Rng) {
        self.candidates.clear();
        let count = rng.gen_range(3..=7);
        self.generate_candidates(count, rng);
    }

    /// Move a candidate onto the payroll.
    pub fn hire(&mut self, candidate_index: usize) -> Option<&Staff> {
        if candidate_index >= self.candidates.len() {
            return None;
        }
        let hired = self.candidates.remove(candidate_index);
        self.staff.push(hired);
        self.staff.last()
    }

    /// Remove a staff member from the payroll.
    pub fn fire(&mut self, staff_index: usize) -> Option<Staff> {
        if staff_index >= self.staff.len() {
            return None;
        }
        Some(self.staff.remove(staff_index))
    }

    pub fn total_salary(&self) -> i64 {
        self.staff.iter().map(|s| s.salary).sum()
    }

    pub fn average_skill(&self) -> f32 {
        if self.staff.is_empty() {
            return 0.0;
        }
        let total: u32 = self.staff.iter().map(|s| u32::from(s.skill_level)).sum();
        total as f32 / self.staff.len() as f32
    }

    pub fn average_happiness(&self) -> f32 {
        if self.staff.is_empty() {
            return 0.0;
        }
        let total: f32 = self.staff.iter().map(|s| s.happiness).sum();
        total / self.staff.len() as f32
    }

    pub fn staff_with_role(&self, role: StaffRole) -> impl Iterator<Item = &Staff> {
        self.staff.iter().filter(move |s| s.role == role)
    }
}

/// Customer archetype tag. Preference vectors live in the `onsen-ai` crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityKind {
    RelaxationSeeker,
    LuxuryEnthusiast,
    HealthConscious,
    BudgetTraveler,
    TraditionalPurist,
    SocialButterfly,
}

impl PersonalityKind {
    pub const ALL: [PersonalityKind; 6] = [
        PersonalityKind::RelaxationSeeker,
        PersonalityKind::LuxuryEnthusiast,
        PersonalityKind::HealthConscious,
        PersonalityKind::BudgetTraveler,
        PersonalityKind::TraditionalPurist,
        PersonalityKind::SocialButterfly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PersonalityKind::RelaxationSeeker => "Relaxation Seeker",
            PersonalityKind::LuxuryEnthusiast => "Luxury Enthusiast",
            PersonalityKind::HealthConscious => "Health Conscious",
            PersonalityKind::BudgetTraveler => "Budget Traveler",
            PersonalityKind::TraditionalPurist => "Traditional Purist",
            PersonalityKind::SocialButterfly => "Social Butterfly",
        }
    }
}

/// What a promotion discounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionTarget {
    Entry,
    Restaurant,
    Accommodation,
    All,
}

/// A time-boxed price discount scoped to a target category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub name: String,
    pub discount_percent: u8,
    pub duration_days: u32,
    pub days_remaining: u32,
    pub target: PromotionTarget,
    pub active: bool,
}

impl Promotion {
    pub fn new(name: &str, discount_percent: u8, duration_days: u32, target: PromotionTarget) -> Promotion {
        Promotion {
            name: name.to_string(),
            discount_percent,
            duration_days,
            days_remaining: duration_days,
            target,
            active: false,
        }
    }

    /// Price multiplier while active, e.g. 0.8 for 20% off.
    pub fn discount_multiplier(&self) -> f32 {
        if self.active {
            1.0 - f32::from(self.discount_percent) / 100.0
        } else {
            1.0
        }
    }
}

/// The static catalog of promotion templates.
pub fn promotion_catalog() -> Vec<Promotion> {
    vec![
        Promotion::new("Weekday Special", 20, 14, PromotionTarget::Entry),
        Promotion::new("Couples Package", 15, 7, PromotionTarget::All),
        Promotion::new("Senior Discount", 25, 30, PromotionTarget::Entry),
        Promotion::new("Family Package", 10, 14, PromotionTarget::All),
        Promotion::new("Dining Special", 15, 10, PromotionTarget::Restaurant),
    ]
}

/// Serializable per-day campaign effect, interpreted by the engine's
/// dispatcher rather than captured in closures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CampaignEffect {
    /// Flat daily reputation gain.
    Reputation { per_day: f32 },
    /// Daily reputation gain with a small chance of going viral for a
    /// 5..=10 bonus.
    SocialMedia { per_day: f32 },
}

/// A paid, time-boxed marketing campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub cost: i64,
    pub duration_days: u32,
    pub days_remaining: u32,
    pub effect: CampaignEffect,
    pub description: String,
    pub active: bool,
}

impl Campaign {
    fn new(name: &str, cost: i64, duration_days: u32, effect: CampaignEffect, description: &str) -> Campaign {
        Campaign {
            name: name.to_string(),
            cost,
            duration_days,
            days_remaining: duration_days,
            effect,
            description: description.to_string(),
            active: false,
        }
    }
}

/// The static catalog of campaign templates.
pub fn campaign_catalog() -> Vec<Campaign> {
    vec![
        Campaign::new(
            "Local Newspaper Ad",
            5_000,
            7,
            CampaignEffect::Reputation { per_day: 0.5 },
            "Small increase in local visitors",
        ),
        Campaign::new(
            "Travel Magazine Feature",
            20_000,
            14,
            CampaignEffect::Reputation { per_day: 1.0 },
            "Moderate increase in reputation and visitors",
        ),
        Campaign::new(
            "TV Commercial",
            50_000,
            30,
            CampaignEffect::Reputation { per_day: 1.5 },
            "Significant increase in reputation and visitors",
        ),
        Campaign::new(
            "Social Media Campaign",
            15_000,
            21,
            CampaignEffect::SocialMedia { per_day: 0.7 },
            "Attracts younger visitors and increases online presence",
        ),
        Campaign::new(
            "Tourism Partnership",
            30_000,
            60,
            CampaignEffect::Reputation { per_day: 0.3 },
            "Long-term steady increase in foreign visitors",
        ),
    ]
}

/// Serializable one-shot event effect, interpreted by the engine's
/// dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventEffect {
    /// Reputation shifts by a fixed amount (clamped by the dispatcher).
    ReputationDelta(f32),
    /// Today's realized guest count is scaled up.
    GuestSurge { factor: f32 },
    /// Every pool gains popularity.
    PoolPopularityBoost { amount: f32 },
    /// A repair bill in the given range plus a cleanliness hit to one pool.
    PlumbingIssue {
        min_cost: i64,
        max_cost: i64,
        cleanliness_loss: f32,
    },
    /// A flat fine.
    Fine { amount: i64 },
    /// Every staff member loses happiness in the given range.
    StaffConflict { min_loss: f32, max_loss: f32 },
    /// Reputation swings up or down depending on resort quality factors.
    BloggerReview { min_swing: f32, max_swing: f32 },
    /// No direct effect.
    Nothing,
}

/// A random event template: narrative text plus a tagged effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub name: String,
    pub description: String,
    pub effect_description: String,
    pub effect: EventEffect,
}

fn event(name: &str, description: &str, effect_description: &str, effect: EventEffect) -> EventDef {
    EventDef {
        name: name.to_string(),
        description: description.to_string(),
        effect_description: effect_description.to_string(),
        effect,
    }
}

/// The static catalog of random events.
pub fn event_catalog() -> Vec<EventDef> {
    vec![
        event(
            "Celebrity Visit",
            "A famous celebrity has visited your onsen!",
            "Reputation increased and more guests are coming!",
            EventEffect::ReputationDelta(10.0),
        ),
        event(
            "Travel Magazine Feature",
            "Your onsen was featured in a popular travel magazine!",
            "Reputation increased significantly!",
            EventEffect::ReputationDelta(15.0),
        ),
        event(
            "Local Festival",
            "A local festival is bringing more tourists to the area!",
            "Expect more guests for the next few days!",
            EventEffect::GuestSurge { factor: 1.5 },
        ),
        event(
            "Hot Spring Quality Improved",
            "The mineral content of your hot spring has naturally improved!",
            "Guest satisfaction has increased!",
            EventEffect::PoolPopularityBoost { amount: 5.0 },
        ),
        event(
            "Plumbing Issue",
            "There's a problem with the hot spring plumbing!",
            "Repairs will cost money and temporarily reduce guest satisfaction.",
            EventEffect::PlumbingIssue {
                min_cost: 5_000,
                max_cost: 20_000,
                cleanliness_loss: 30.0,
            },
        ),
        event(
            "Health Inspection",
            "A surprise health inspection has found some issues.",
            "You must pay a fine and fix the problems.",
            EventEffect::Fine { amount: 10_000 },
        ),
        event(
            "Staff Conflict",
            "There's a conflict among your staff members.",
            "Staff happiness has decreased.",
            EventEffect::StaffConflict {
                min_loss: 5.0,
                max_loss: 15.0,
            },
        ),
        event(
            "Competing Onsen Opened",
            "A new onsen resort has opened nearby.",
            "You might see fewer guests for a while.",
            EventEffect::ReputationDelta(-5.0),
        ),
        event(
            "Travel Blogger Visit",
            "A popular travel blogger is visiting your onsen!",
            "Their review could help or hurt your reputation...",
            EventEffect::BloggerReview {
                min_swing: 5.0,
                max_swing: 10.0,
            },
        ),
        event(
            "Weather Phenomenon",
            "Unusual weather has affected the local area.",
            "This could change guest patterns temporarily.",
            EventEffect::Nothing,
        ),
    ]
}

/// One realized visitor: the satisfaction recorded at visit-decision time is
/// the value aggregated for feedback and reputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub personality: PersonalityKind,
    pub satisfaction: f32,
}

/// A sampled guest comment retained for the day's report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuestFeedback {
    pub personality: PersonalityKind,
    pub satisfaction: f32,
    pub band: String,
    pub comment: String,
}

/// Display band for a satisfaction score.
pub fn satisfaction_band(satisfaction: f32) -> &'static str {
    if satisfaction >= 80.0 {
        "Excellent"
    } else if satisfaction >= 60.0 {
        "Good"
    } else if satisfaction >= 40.0 {
        "Average"
    } else if satisfaction >= 20.0 {
        "Poor"
    } else {
        "Terrible"
    }
}

/// Active campaigns and promotions. Expired entries are dropped by the
/// engine's daily marketing step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingState {
    pub campaigns: Vec<Campaign>,
    pub promotions: Vec<Promotion>,
}

/// Simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    /// Days to advance in a headless run.
    pub days: u32,
    /// Per-day probability that one random event fires.
    pub event_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            rng_seed: 42,
            days: 30,
            event_chance: 0.2,
        }
    }
}

/// Errors from player commands. The engine itself never fails; invalid
/// inputs are rejected here before they reach it.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("not enough money: need ¥{need}, have ¥{have}")]
    InsufficientFunds { need: i64, have: i64 },
    #[error("water temperature {0}°C is outside the safe 20–50°C range")]
    TemperatureOutOfRange(f32),
    #[error("entry fee cannot be negative (got ¥{0})")]
    NegativeEntryFee(i64),
    #[error("ingredient {0:?} is already in this pool")]
    DuplicateIngredient(String),
    #[error("{0:?} is already active")]
    AlreadyActive(String),
    #[error("no such index {0}")]
    UnknownIndex(usize),
}

/// Starting capital in yen.
pub const STARTING_MONEY: i64 = 75_000;
/// Default gate price in yen.
pub const DEFAULT_ENTRY_FEE: i64 = 2_000;

/// The aggregate root. Created once at game start and mutated in place by
/// the daily engine and by the player commands below; never destroyed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    pub name: String,
    pub money: i64,
    pub day: u32,
    pub season: Season,
    pub reputation: f32,
    pub entry_fee: i64,
    pub pools: Vec<Pool>,
    pub facilities: Vec<Facility>,
    pub roster: StaffRoster,
    pub weather: Weather,
    pub marketing: MarketingState,
    pub guests: u32,
    pub daily_income: i64,
    pub daily_expenses: i64,
    pub visitors: Vec<GuestRecord>,
    pub feedback: Vec<GuestFeedback>,
    pub event_log: Vec<String>,
    pub last_upgrade_day: u32,
    pub boredom_factor: u32,
}

impl Resort {
    pub fn new(name: impl Into<String>) -> Resort {
        Resort {
            name: name.into(),
            money: STARTING_MONEY,
            day: 1,
            season: Season::Spring,
            reputation: 50.0,
            entry_fee: DEFAULT_ENTRY_FEE,
            pools: vec![],
            facilities: vec![],
            roster: StaffRoster::default(),
            weather: Weather::default(),
            marketing: MarketingState::default(),
            guests: 0,
            daily_income: 0,
            daily_expenses: 0,
            visitors: vec![],
            feedback: vec![],
            event_log: vec![],
            last_upgrade_day: 1,
            boredom_factor: 0,
        }
    }

    /// Mark a construction or upgrade: guests stop getting bored.
    pub fn record_upgrade(&mut self) {
        self.last_upgrade_day = self.day;
        self.boredom_factor = 0;
    }

    fn charge(&mut self, amount: i64) -> Result<(), CommandError> {
        if self.money < amount {
            return Err(CommandError::InsufficientFunds {
                need: amount,
                have: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    /// Build a new pool. Temperature must be within the 20–50°C safety range.
    pub fn build_pool(
        &mut self,
        name: impl Into<String>,
        size: PoolSize,
        temperature_c: f32,
    ) -> Result<(), CommandError> {
        if !(20.0..=50.0).contains(&temperature_c) {
            return Err(CommandError::TemperatureOutOfRange(temperature_c));
        }
        self.charge(size.construction_cost())?;
        self.pools.push(Pool::new(name, size, temperature_c));
        self.record_upgrade();
        Ok(())
    }

    /// Build a facility created via one of the [`Facility`] constructors.
    pub fn build_facility(&mut self, facility: Facility) -> Result<(), CommandError> {
        self.charge(facility.construction_cost)?;
        self.facilities.push(facility);
        self.record_upgrade();
        Ok(())
    }

    /// Pay for a +10 quality upgrade on a facility.
    pub fn upgrade_facility(&mut self, index: usize) -> Result<(), CommandError> {
        let quality = self
            .facilities
            .get(index)
            .ok_or(CommandError::UnknownIndex(index))?
            .quality;
        let cost = 10_000 * (quality as i64 / 10);
        self.charge(cost)?;
        let facility = &mut self.facilities[index];
        facility.quality = (facility.quality + 10.0).min(100.0);
        facility.popularity = (facility.popularity + 5.0).min(100.0);
        self.record_upgrade();
        Ok(())
    }

    /// Dissolve an ingredient into a pool. Duplicates are rejected.
    pub fn add_ingredient(&mut self, pool_index: usize, ing: Ingredient) -> Result<(), CommandError> {
        let pool = self
            .pools
            .get_mut(pool_index)
            .ok_or(CommandError::UnknownIndex(pool_index))?;
        if pool.ingredients.iter().any(|i| i.name == ing.name) {
            return Err(CommandError::DuplicateIngredient(ing.name));
        }
        pool.add_ingredient(ing);
        Ok(())
    }

    /// Pay for a manual deep clean of one pool.
    pub fn clean_pool(&mut self, pool_index: usize) -> Result<(), CommandError> {
        let fee = self
            .pools
            .get(pool_index)
            .ok_or(CommandError::UnknownIndex(pool_index))?
            .size
            .cleaning_fee();
        self.charge(fee)?;
        self.pools[pool_index].clean();
        Ok(())
    }

    /// Pay a happiness bonus to one staff member.
    pub fn give_bonus(&mut self, staff_index: usize, amount: i64) -> Result<(), CommandError> {
        if staff_index >= self.roster.staff.len() {
            return Err(CommandError::UnknownIndex(staff_index));
        }
        self.charge(amount)?;
        self.roster.staff[staff_index].give_bonus(amount);
        Ok(())
    }

    /// Set the gate price.
    pub fn set_entry_fee(&mut self, fee: i64) -> Result<(), CommandError> {
        if fee < 0 {
            return Err(CommandError::NegativeEntryFee(fee));
        }
        self.entry_fee = fee;
        Ok(())
    }

    /// Pay for and activate a campaign template from the catalog.
    pub fn launch_campaign(&mut self, mut campaign: Campaign) -> Result<(), CommandError> {
        if self.marketing.campaigns.iter().any(|c| c.name == campaign.name) {
            return Err(CommandError::AlreadyActive(campaign.name));
        }
        self.charge(campaign.cost)?;
        campaign.active = true;
        campaign.days_remaining = campaign.duration_days;
        self.marketing.campaigns.push(campaign);
        Ok(())
    }

    /// Activate a promotion template from the catalog.
    pub fn launch_promotion(&mut self, mut promotion: Promotion) -> Result<(), CommandError> {
        if self.marketing.promotions.iter().any(|p| p.name == promotion.name) {
            return Err(CommandError::AlreadyActive(promotion.name));
        }
        promotion.active = true;
        promotion.days_remaining = promotion.duration_days;
        self.marketing.promotions.push(promotion);
        Ok(())
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("water temperature {0}°C is outside the safe 20–50°C range")]
    TemperatureOutOfRange(f32),
    #[error("{field} must be within [0,100]")]
    ScaleOutOfRange { field: &'static str },
    #[error("skill level {0} is outside 1..=10")]
    SkillOutOfRange(u8),
    #[error("entry fee must be non-negative")]
    NegativeEntryFee,
}

fn in_scale(v: f32) -> bool {
    (0.0..=100.0).contains(&v)
}

/// Validate a pool's invariants.
pub fn validate_pool(pool: &Pool) -> Result<(), ValidationError> {
    if pool.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(20.0..=50.0).contains(&pool.temperature_c) {
        return Err(ValidationError::TemperatureOutOfRange(pool.temperature_c));
    }
    if !in_scale(pool.cleanliness) {
        return Err(ValidationError::ScaleOutOfRange { field: "cleanliness" });
    }
    if !in_scale(pool.popularity) {
        return Err(ValidationError::ScaleOutOfRange { field: "popularity" });
    }
    Ok(())
}

/// Validate a staff member's invariants.
pub fn validate_staff(staff: &Staff) -> Result<(), ValidationError> {
    if staff.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(1..=10).contains(&staff.skill_level) {
        return Err(ValidationError::SkillOutOfRange(staff.skill_level));
    }
    if !in_scale(staff.happiness) {
        return Err(ValidationError::ScaleOutOfRange { field: "happiness" });
    }
    Ok(())
}

/// Validate a facility's invariants.
pub fn validate_facility(facility: &Facility) -> Result<(), ValidationError> {
    if facility.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !in_scale(facility.quality) {
        return Err(ValidationError::ScaleOutOfRange { field: "quality" });
    }
    if !in_scale(facility.popularity) {
        return Err(ValidationError::ScaleOutOfRange { field: "popularity" });
    }
    if let FacilityKind::Accommodation { occupancy_rate, .. } = facility.kind {
        if !in_scale(occupancy_rate) {
            return Err(ValidationError::ScaleOutOfRange { field: "occupancy_rate" });
        }
    }
    Ok(())
}

/// Validate the whole aggregate, as the engine assumes on entry.
pub fn validate_resort(resort: &Resort) -> Result<(), ValidationError> {
    if resort.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if resort.entry_fee < 0 {
        return Err(ValidationError::NegativeEntryFee);
    }
    if !in_scale(resort.reputation) {
        return Err(ValidationError::ScaleOutOfRange { field: "reputation" });
    }
    for pool in &resort.pools {
        validate_pool(pool)?;
    }
    for facility in &resort.facilities {
        validate_facility(facility)?;
    }
    for staff in &resort.roster.staff {
        validate_staff(staff)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Pool {
        Pool::new("Moonlight Bath", PoolSize::Medium, 40.0)
    }

    #[test]
    fn serde_roundtrip_pool() {
        let mut p = pool();
        p.add_ingredient(ingredient_catalog()[0].clone());
        let s = serde_json::to_string(&p).unwrap();
        let back: Pool = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn resort_snapshot_roundtrip() {
        let mut resort = Resort::new("Yuzawa Springs");
        resort.build_pool("Moonlight Bath", PoolSize::Small, 41.0).unwrap();
        resort.roster.staff.push(Staff::new("Sato Yuki", StaffRole::Cleaner, 3));
        resort
            .build_facility(Facility::gift_shop("Omiyage Corner", 1))
            .expect_err("gift shop should be unaffordable after the pool");
        validate_resort(&resort).unwrap();
        let s = serde_json::to_string_pretty(&resort).unwrap();
        let back: Resort = serde_json::from_str(&s).unwrap();
        assert_eq!(back, resort);
    }

    #[test]
    fn salary_follows_role_and_skill() {
        let manager = Staff::new("Tanaka Akira", StaffRole::Manager, 1);
        assert_eq!(manager.salary, 5_000);
        let chef = Staff::new("Ito Emi", StaffRole::Chef, 5);
        // base 4000 × (1 + 2.0)
        assert_eq!(chef.salary, 12_000);
        let mut server = Staff::new("Kato Kenji", StaffRole::Server, 1);
        server.skill_level = 10;
        server.recompute_salary();
        assert_eq!(server.salary, 22_000);
    }

    #[test]
    fn facility_constructors_derive_costs() {
        let r = Facility::restaurant("Kaiseki House", "Japanese", 3);
        assert_eq!(r.construction_cost, 600_000);
        assert_eq!(r.maintenance_cost, 15_000);
        assert_eq!(r.staff_required, 6);
        let a = Facility::accommodation("Mountain Ryokan", AccommodationStyle::Japanese, 20, 2);
        assert_eq!(a.construction_cost, 500_000 + 20 * 50_000 * 2);
        assert_eq!(a.staff_required, 4);
        match a.kind {
            FacilityKind::Accommodation { room_rate, occupancy_rate, .. } => {
                assert_eq!(room_rate, 10_000);
                assert_eq!(occupancy_rate, 50.0);
            }
            _ => panic!("wrong kind"),
        }
    }

    #[test]
    fn pool_daily_cost_includes_heating_surcharge() {
        let p = pool();
        assert_eq!(p.daily_cost(), 2_000);
        let hot = Pool::new("Scalding Rock", PoolSize::Small, 48.0);
        // 1000 maintenance + 500 × 0.8 surcharge
        assert_eq!(hot.daily_cost(), 1_400);
    }

    #[test]
    fn build_pool_rejects_unsafe_temperature_and_short_funds() {
        let mut resort = Resort::new("Yuzawa Springs");
        assert_eq!(
            resort.build_pool("Lava Bath", PoolSize::Small, 55.0),
            Err(CommandError::TemperatureOutOfRange(55.0))
        );
        resort.money = 10_000;
        assert!(matches!(
            resort.build_pool("Moonlight Bath", PoolSize::Small, 40.0),
            Err(CommandError::InsufficientFunds { .. })
        ));
        assert!(resort.pools.is_empty());
    }

    #[test]
    fn construction_resets_boredom() {
        let mut resort = Resort::new("Yuzawa Springs");
        resort.day = 60;
        resort.boredom_factor = 20;
        resort.build_pool("Moonlight Bath", PoolSize::Small, 40.0).unwrap();
        assert_eq!(resort.boredom_factor, 0);
        assert_eq!(resort.last_upgrade_day, 60);
    }

    #[test]
    fn duplicate_campaign_rejected() {
        let mut resort = Resort::new("Yuzawa Springs");
        let campaign = campaign_catalog().remove(0);
        resort.launch_campaign(campaign.clone()).unwrap();
        assert_eq!(
            resort.launch_campaign(campaign),
            Err(CommandError::AlreadyActive("Local Newspaper Ad".to_string()))
        );
        assert_eq!(resort.marketing.campaigns.len(), 1);
        assert!(resort.marketing.campaigns[0].active);
    }

    #[test]
    fn set_entry_fee_guards_negative() {
        let mut resort = Resort::new("Yuzawa Springs");
        assert_eq!(resort.set_entry_fee(-1), Err(CommandError::NegativeEntryFee(-1)));
        resort.set_entry_fee(3_500).unwrap();
        assert_eq!(resort.entry_fee, 3_500);
    }

    #[test]
    fn roster_hires_and_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut roster = StaffRoster::new(&mut rng);
        assert_eq!(roster.candidates.len(), 5);
        roster.hire(0).unwrap();
        assert_eq!(roster.staff.len(), 1);
        assert_eq!(roster.candidates.len(), 4);
        let fired = roster.fire(0).unwrap();
        assert!(roster.staff.is_empty());
        assert!(!fired.name.is_empty());
        roster.refresh_candidates(&mut rng);
        assert!((3..=7).contains(&roster.candidates.len()));
    }

    proptest! {
        #[test]
        fn bonus_keeps_happiness_in_scale(start in 0.0f32..=100.0, amount in 0i64..1_000_000) {
            let mut s = Staff::new("Sasaki Naomi", StaffRole::Attendant, 2);
            s.happiness = start;
            s.give_bonus(amount);
            prop_assert!((0.0..=100.0).contains(&s.happiness));
        }

        #[test]
        fn ingredients_keep_popularity_in_scale(picks in proptest::collection::vec(0usize..8, 0..8)) {
            let mut p = Pool::new("Moonlight Bath", PoolSize::Large, 42.0);
            let catalog = ingredient_catalog();
            for i in picks {
                p.add_ingredient(catalog[i].clone());
            }
            prop_assert!((0.0..=100.0).contains(&p.popularity));
        }

        #[test]
        fn salary_is_monotonic_in_skill(skill in 1u8..10) {
            let a = Staff::new("A", StaffRole::Chef, skill);
            let b = Staff::new("B", StaffRole::Chef, skill + 1);
            prop_assert!(b.salary > a.salary);
        }
    }
}
