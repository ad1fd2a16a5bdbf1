//! Activity data as served by `GET /activities`.
//!
//! The wire format is a JSON object mapping activity name to details. Order
//! matters (the roster renders in mapping order), so [`Activities`]
//! deserializes with a visitor that keeps entries in the order they arrive.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Details of an activity as they appear under its name on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// A named activity with its roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    fn from_wire(name: String, details: ActivityDetails) -> Self {
        Self {
            name,
            description: details.description,
            schedule: details.schedule,
            max_participants: details.max_participants,
            participants: details.participants,
        }
    }

    /// Remaining capacity. Not clamped: an over-full activity goes negative.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// The full activity collection, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activities(Vec<Activity>);

impl Activities {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self(activities)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|activity| activity.name == name)
    }

    fn upsert(&mut self, activity: Activity) {
        match self.0.iter_mut().find(|a| a.name == activity.name) {
            Some(existing) => *existing = activity,
            None => self.0.push(activity),
        }
    }
}

impl<'a> IntoIterator for &'a Activities {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for Activities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ActivitiesVisitor;

        impl<'de> Visitor<'de> for ActivitiesVisitor {
            type Value = Activities;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut activities = Activities(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    activities.upsert(Activity::from_wire(name, details));
                }
                Ok(activities)
            }
        }

        deserializer.deserialize_map(ActivitiesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_wire_order() {
        let json = r#"{
            "Zoology Club": {"description": "z", "schedule": "Mon", "max_participants": 5, "participants": []},
            "Art Club": {"description": "a", "schedule": "Tue", "max_participants": 5, "participants": []},
            "Math Club": {"description": "m", "schedule": "Wed", "max_participants": 5, "participants": []}
        }"#;
        let activities: Activities = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Zoology Club", "Art Club", "Math Club"]);
    }

    #[test]
    fn test_spots_left_can_go_negative() {
        let activity = Activity {
            name: "Chess Club".to_string(),
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@b.com".to_string(), "c@d.com".to_string()],
        };
        assert_eq!(activity.spots_left(), -1);
    }

    #[test]
    fn test_duplicate_name_keeps_first_position_last_value() {
        let json = r#"{
            "Chess Club": {"description": "old", "schedule": "Fri", "max_participants": 12},
            "Art Club": {"description": "art", "schedule": "Thu", "max_participants": 15},
            "Chess Club": {"description": "new", "schedule": "Fri", "max_participants": 12}
        }"#;
        let activities: Activities = serde_json::from_str(json).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities.iter().next().unwrap().description, "new");
        assert!(activities.get("Chess Club").unwrap().participants.is_empty());
    }

    #[test]
    fn test_rejects_non_object_payload() {
        assert!(serde_json::from_str::<Activities>("[]").is_err());
    }
}
