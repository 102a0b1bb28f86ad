use serde::ser::{Serialize, SerializeMap, Serializer};

// One extracurricular offering. Field names are the wire names of /activities.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn new(description: &str, schedule: &str, max_participants: usize) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, participants: &[&str]) -> Self {
        self.participants = participants.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn is_enrolled(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }
}

/// Owned copy of the whole store, in seed order.
///
/// Serializes as a JSON object keyed by activity name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitiesSnapshot {
    pub activities: Vec<(String, ActivityRecord)>,
}

impl ActivitiesSnapshot {
    pub fn get(&self, name: &str) -> Option<&ActivityRecord> {
        self.activities
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl Serialize for ActivitiesSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for (name, record) in &self.activities {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupConfirmation {
    pub activity: String,
    pub email: String,
}

impl SignupConfirmation {
    pub fn message(&self) -> String {
        format!("Signed up {} for {}", self.email, self.activity)
    }
}
