use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{ActivitiesSnapshot, ActivityRecord};

/// Activity table, keyed by name. Entries keep their seed order.
#[derive(Debug, Clone, Default)]
pub struct Activities {
    entries: Vec<(String, ActivityRecord)>,
}

impl Activities {
    pub fn new(entries: Vec<(String, ActivityRecord)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ActivityRecord> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActivityRecord> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActivityRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Name of the first activity whose roster holds `email`.
    pub fn enrolled_in(&self, email: &str) -> Option<&str> {
        self.iter()
            .find(|(_, record)| record.is_enrolled(email))
            .map(|(name, _)| name)
    }

    pub fn snapshot(&self) -> ActivitiesSnapshot {
        ActivitiesSnapshot {
            activities: self.entries.clone(),
        }
    }
}

/// Process-lifetime activity store. Lost on restart.
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: RwLock<Activities>,
}

pub type SharedActivityStore = Arc<ActivityStore>;

impl ActivityStore {
    pub fn new(activities: Activities) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_activities())
    }

    pub fn shared(self) -> SharedActivityStore {
        Arc::new(self)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Activities) -> R) -> R {
        f(&self.activities.read())
    }

    // Holds the write lock for the whole closure, so check-then-append is atomic.
    pub fn write<R>(&self, f: impl FnOnce(&mut Activities) -> R) -> R {
        f(&mut self.activities.write())
    }
}

pub fn seed_activities() -> Activities {
    let seed = [
        (
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            ["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        (
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            ["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        (
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            ["john@mergington.edu", "olivia@mergington.edu"],
        ),
        (
            "Soccer Team",
            "Join the soccer team and compete in inter-school tournaments",
            "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
            22,
            ["alex@mergington.edu", "james@mergington.edu"],
        ),
        (
            "Basketball Team",
            "Practice basketball and participate in local competitions",
            "Wednesdays and Fridays, 3:00 PM - 5:00 PM",
            15,
            ["luke@mergington.edu", "mason@mergington.edu"],
        ),
        (
            "Art Club",
            "Explore various art techniques and create your own masterpieces",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            ["ava@mergington.edu", "mia@mergington.edu"],
        ),
        (
            "Drama Club",
            "Learn acting skills and perform in school plays",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
            ["isabella@mergington.edu", "amelia@mergington.edu"],
        ),
        (
            "Math Club",
            "Solve challenging math problems and prepare for math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            25,
            ["ethan@mergington.edu", "logan@mergington.edu"],
        ),
        (
            "Science Club",
            "Conduct experiments and explore scientific concepts",
            "Fridays, 3:00 PM - 4:30 PM",
            20,
            ["harper@mergington.edu", "ella@mergington.edu"],
        ),
    ];

    Activities::new(
        seed.into_iter()
            .map(|(name, description, schedule, max, participants)| {
                (
                    name.to_string(),
                    ActivityRecord::new(description, schedule, max).with_participants(&participants),
                )
            })
            .collect(),
    )
}
