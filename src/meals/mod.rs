use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

/// Time-of-day label captured when a meal is logged. Never updated on edit.
fn clock_label(now: OffsetDateTime) -> String {
    now.format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: Uuid,
    pub timestamp: String,
    pub image_url: Option<String>,
    pub food_items: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    #[serde(default)]
    pub is_edited: bool,
}

impl MealEntry {
    pub fn new(
        food_items: impl Into<String>,
        calories: u32,
        protein: u32,
        carbs: u32,
        fat: u32,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: clock_label(OffsetDateTime::now_utc()),
            image_url,
            food_items: food_items.into(),
            calories,
            protein,
            carbs,
            fat,
            is_edited: false,
        }
    }
}

/// Partial update for an existing entry; absent fields are left untouched.
/// `id` and `timestamp` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPatch {
    #[serde(default)]
    pub food_items: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub fat: Option<u32>,
}

/// Derived sums over the current meal list. Recomputed on every read, never
/// stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// The single authoritative, newest-first list of logged meals for the
/// session.
#[derive(Debug, Default, Serialize)]
pub struct MealLog {
    entries: Vec<MealEntry>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends, keeping newest-first order.
    pub fn add(&mut self, meal: MealEntry) {
        debug!(meal_id = %meal.id, calories = meal.calories, "meal logged");
        self.entries.insert(0, meal);
    }

    /// Merges `patch` into the entry matching `id`, latching `is_edited`.
    /// Position and timestamp are preserved; an unknown id is a no-op and
    /// never creates an entry. Returns whether an entry matched.
    pub fn update(&mut self, id: Uuid, patch: MealPatch) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|m| m.id == id) else {
            debug!(meal_id = %id, "update skipped, unknown meal id");
            return false;
        };
        if let Some(food_items) = patch.food_items {
            entry.food_items = food_items;
        }
        if let Some(image_url) = patch.image_url {
            entry.image_url = Some(image_url);
        }
        if let Some(calories) = patch.calories {
            entry.calories = calories;
        }
        if let Some(protein) = patch.protein {
            entry.protein = protein;
        }
        if let Some(carbs) = patch.carbs {
            entry.carbs = carbs;
        }
        if let Some(fat) = patch.fat {
            entry.fat = fat;
        }
        entry.is_edited = true;
        debug!(meal_id = %id, "meal updated");
        true
    }

    /// Removes the entry matching `id`; unknown ids are a no-op. Returns
    /// whether an entry was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != id);
        let removed = self.entries.len() < before;
        if removed {
            debug!(meal_id = %id, "meal deleted");
        }
        removed
    }

    /// Sums every numeric field across the current list. Summation is
    /// commutative, so reordering entries never changes the result.
    pub fn totals(&self) -> DailyTotals {
        self.entries
            .iter()
            .fold(DailyTotals::default(), |acc, m| DailyTotals {
                calories: acc.calories + m.calories,
                protein: acc.protein + m.protein,
                carbs: acc.carbs + m.carbs,
                fat: acc.fat + m.fat,
            })
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&MealEntry> {
        self.entries.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry; totals read as all-zero afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod meal_log_tests {
    use super::*;

    fn meal(food: &str, calories: u32, protein: u32, carbs: u32, fat: u32) -> MealEntry {
        MealEntry::new(food, calories, protein, carbs, fat, None)
    }

    #[test]
    fn totals_over_empty_log_are_zero() {
        let log = MealLog::new();
        assert_eq!(log.totals(), DailyTotals::default());
    }

    #[test]
    fn add_prepends_and_grows_by_one() {
        let mut log = MealLog::new();
        let first = meal("oatmeal", 320, 12, 54, 6);
        let second = meal("salmon bowl", 540, 38, 42, 22);
        let second_id = second.id;

        log.add(first);
        log.add(second);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].id, second_id);
    }

    #[test]
    fn totals_sum_every_field() {
        let mut log = MealLog::new();
        log.add(meal("a", 400, 30, 40, 13));
        log.add(meal("b", 600, 45, 60, 20));

        let t = log.totals();
        assert_eq!(t.calories, 1000);
        assert_eq!(t.protein, 75);
        assert_eq!(t.carbs, 100);
        assert_eq!(t.fat, 33);
    }

    #[test]
    fn totals_are_permutation_invariant() {
        let meals = [
            meal("a", 400, 30, 40, 13),
            meal("b", 600, 45, 60, 20),
            meal("c", 510, 28, 55, 17),
        ];

        let mut forward = MealLog::new();
        for m in meals.iter().cloned() {
            forward.add(m);
        }
        let mut backward = MealLog::new();
        for m in meals.iter().rev().cloned() {
            backward.add(m);
        }

        assert_eq!(forward.totals(), backward.totals());
    }

    #[test]
    fn update_merges_fields_and_latches_is_edited() {
        let mut log = MealLog::new();
        let target = meal("salad", 250, 8, 20, 15);
        let target_id = target.id;
        let other = meal("toast", 180, 6, 30, 4);
        let other_snapshot = other.clone();
        log.add(target);
        log.add(other);

        let matched = log.update(
            target_id,
            MealPatch {
                calories: Some(300),
                ..MealPatch::default()
            },
        );
        assert!(matched);

        let updated = log.get(target_id).expect("entry still present");
        assert_eq!(updated.calories, 300);
        assert!(updated.is_edited);
        assert_eq!(updated.food_items, "salad");
        assert_eq!(log.get(other_snapshot.id), Some(&other_snapshot));
    }

    #[test]
    fn update_preserves_position_and_timestamp() {
        let mut log = MealLog::new();
        let oldest = meal("breakfast", 300, 15, 40, 9);
        let oldest_id = oldest.id;
        let oldest_ts = oldest.timestamp.clone();
        log.add(oldest);
        log.add(meal("lunch", 550, 35, 50, 20));

        log.update(
            oldest_id,
            MealPatch {
                food_items: Some("big breakfast".into()),
                ..MealPatch::default()
            },
        );

        assert_eq!(log.entries()[1].id, oldest_id);
        assert_eq!(log.entries()[1].timestamp, oldest_ts);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut log = MealLog::new();
        log.add(meal("soup", 220, 10, 24, 8));

        let matched = log.update(
            Uuid::new_v4(),
            MealPatch {
                calories: Some(999),
                ..MealPatch::default()
            },
        );

        assert!(!matched);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].calories, 220);
        assert!(!log.entries()[0].is_edited);
    }

    #[test]
    fn remove_deletes_exactly_one() {
        let mut log = MealLog::new();
        let doomed = meal("fries", 450, 5, 55, 22);
        let doomed_id = doomed.id;
        log.add(doomed);
        log.add(meal("burger", 650, 32, 45, 35));

        assert!(log.remove(doomed_id));
        assert_eq!(log.len(), 1);
        assert!(log.get(doomed_id).is_none());
    }

    #[test]
    fn remove_unknown_id_leaves_log_unchanged() {
        let mut log = MealLog::new();
        log.add(meal("wrap", 380, 22, 35, 14));

        assert!(!log.remove(Uuid::new_v4()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_resets_totals() {
        let mut log = MealLog::new();
        log.add(meal("dinner", 800, 40, 70, 35));
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.totals(), DailyTotals::default());
    }

    #[test]
    fn clock_label_is_hour_minute() {
        let ts = time::macros::datetime!(2024-05-01 09:07 UTC);
        assert_eq!(super::clock_label(ts), "09:07");
    }
}
