use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use utoipa::ToSchema;

/// A directed transfer that settles part of a debt, between display names.
#[derive(Clone, Debug, serde::Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Balance {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// Per-person position before settlement.
#[derive(Clone, Debug, serde::Serialize, ToSchema, PartialEq)]
pub struct NetBalance {
    pub user_id: String,
    pub name: String,
    pub paid: f64,
    pub owed: f64,
    /// Positive when the person is owed money, negative when they owe
    pub net: f64,
}

/// Total paid per person, keyed by display name in roster order.
///
/// Serializes as a JSON object (`{"Juan": 90.0, ...}`), which is the shape the
/// report renderer consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TotalsByPerson(Vec<(String, f64)>);

impl TotalsByPerson {
    pub(crate) fn from_entries(entries: Vec<(String, f64)>) -> Self {
        TotalsByPerson(entries)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TotalsByPerson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, total) in &self.0 {
            map.serialize_entry(name, total)?;
        }
        map.end()
    }
}

/// Everything the balance screen shows, computed from one snapshot.
#[derive(Clone, Debug, serde::Serialize, ToSchema)]
pub struct BalanceSummary {
    pub expense_count: usize,
    pub total_amount: f64,
    /// Total spend divided by roster size
    pub average: f64,
    #[schema(value_type = std::collections::HashMap<String, f64>)]
    pub totals_by_person: TotalsByPerson,
    pub balances: Vec<Balance>,
}
