use tracing::{info, warn};

use crate::database::activities_repo::{Activities, ActivityStore};
use crate::error::SignupError;
use crate::models::SignupConfirmation;

pub const SCHOOL_DOMAIN: &str = "@mergington.edu";
pub const MAX_EMAIL_LEN: usize = 50;

/// Account categories that may not sign themselves up. Checked in this order.
pub const RESERVED_ROLES: [&str; 11] = [
    "teacher",
    "staff",
    "parent",
    "student",
    "alumni",
    "guest",
    "vendor",
    "contractor",
    "volunteer",
    "coach",
    "mentor",
];

/// Enrolls `email` in `activity_name`.
///
/// Rules are evaluated in a fixed order and the first failure is returned.
/// The store's write lock is held from the first lookup until the append, so
/// concurrent signups cannot push an activity past capacity or enroll the
/// same email twice. Nothing is mutated on failure.
pub fn signup(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<SignupConfirmation, SignupError> {
    let result: Result<SignupConfirmation, SignupError> = store.write(|activities| {
        validate(activities, activity_name, email)?;
        activities
            .get_mut(activity_name)
            .ok_or(SignupError::ActivityNotFound)?
            .participants
            .push(email.to_string());
        Ok(SignupConfirmation {
            activity: activity_name.to_string(),
            email: email.to_string(),
        })
    });

    match &result {
        Ok(_) => info!(activity = %activity_name, email = %email, "signup accepted"),
        Err(e) => warn!(
            activity = %activity_name,
            email = %email,
            reason = e.kind(),
            "signup rejected: {}",
            e
        ),
    }
    result
}

fn validate(activities: &Activities, activity_name: &str, email: &str) -> Result<(), SignupError> {
    let activity = activities
        .get(activity_name)
        .ok_or(SignupError::ActivityNotFound)?;

    if activity.is_enrolled(email) {
        return Err(SignupError::AlreadyEnrolled);
    }
    if activity.is_full() {
        return Err(SignupError::ActivityFull);
    }
    if !has_email_shape(email) {
        return Err(SignupError::InvalidEmailFormat);
    }
    if !email.ends_with(SCHOOL_DOMAIN) {
        return Err(SignupError::InvalidDomain);
    }
    // Unreachable after the shape check; kept so the rule list stays complete.
    if email.is_empty() {
        return Err(SignupError::EmptyEmail);
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(SignupError::EmailTooLong);
    }
    if activities.enrolled_in(email).is_some() {
        return Err(SignupError::DuplicateAcrossActivities);
    }
    if let Some(role) = reserved_role(email) {
        return Err(SignupError::ReservedRoleEmail { role });
    }
    Ok(())
}

// Needs an '@' and a '.' somewhere after the last one.
fn has_email_shape(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'))
}

fn reserved_role(email: &str) -> Option<&'static str> {
    RESERVED_ROLES.into_iter().find(|role| {
        email
            .strip_prefix(role)
            .is_some_and(|rest| rest.starts_with('@'))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::ActivityRecord;

    fn participants(store: &ActivityStore, name: &str) -> Vec<String> {
        store.read(|a| a.get(name).unwrap().participants.clone())
    }

    fn store_with(entries: Vec<(&str, ActivityRecord)>) -> ActivityStore {
        ActivityStore::new(Activities::new(
            entries
                .into_iter()
                .map(|(n, r)| (n.to_string(), r))
                .collect(),
        ))
    }

    #[test]
    fn accepts_valid_signup_and_appends_last() {
        let store = ActivityStore::seeded();
        let confirmation = signup(&store, "Chess Club", "newkid@mergington.edu").unwrap();

        assert_eq!(confirmation.activity, "Chess Club");
        assert_eq!(confirmation.email, "newkid@mergington.edu");
        let roster = participants(&store, "Chess Club");
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.last().map(String::as_str), Some("newkid@mergington.edu"));
    }

    #[test]
    fn rejection_reports_typed_error() {
        let store = ActivityStore::seeded();
        let err = signup(&store, "Chess Club", "coach@mergington.edu").unwrap_err();
        assert_eq!(err.kind(), "reserved_role_email");
        assert_eq!(err.to_string(), "Email is a coach email");
    }

    #[test]
    fn unknown_activity_is_not_found() {
        let store = ActivityStore::seeded();
        for name in ["Knitting Circle", "chess club", "", "Chess Club "] {
            assert_eq!(
                signup(&store, name, "newkid@mergington.edu"),
                Err(SignupError::ActivityNotFound),
                "{name:?}"
            );
        }
    }

    #[test]
    fn repeated_signup_is_rejected_without_state_change() {
        let store = ActivityStore::seeded();
        for _ in 0..2 {
            assert_eq!(
                signup(&store, "Chess Club", "michael@mergington.edu"),
                Err(SignupError::AlreadyEnrolled)
            );
        }
        assert_eq!(participants(&store, "Chess Club").len(), 2);
    }

    #[test]
    fn full_activity_rejects_even_invalid_emails() {
        let store = store_with(vec![(
            "Tiny Club",
            ActivityRecord::new("d", "s", 2).with_participants(&["a@mergington.edu", "b@mergington.edu"]),
        )]);
        for email in ["c@mergington.edu", "not-an-email", "", "teacher@mergington.edu"] {
            assert_eq!(
                signup(&store, "Tiny Club", email),
                Err(SignupError::ActivityFull),
                "{email:?}"
            );
        }
        assert_eq!(participants(&store, "Tiny Club").len(), 2);
    }

    #[test]
    fn malformed_emails_fail_format_check() {
        let store = ActivityStore::seeded();
        for email in ["", "newkid", "newkid@mergington", "a@b@nodot", "newkid.mergington.edu"] {
            assert_eq!(
                signup(&store, "Art Club", email),
                Err(SignupError::InvalidEmailFormat),
                "{email:?}"
            );
        }
    }

    #[test]
    fn foreign_domain_is_rejected() {
        let store = ActivityStore::seeded();
        assert_eq!(
            signup(&store, "Art Club", "newkid@gmail.com"),
            Err(SignupError::InvalidDomain)
        );
        assert_eq!(
            signup(&store, "Art Club", "newkid@mergington.edu.evil.com"),
            Err(SignupError::InvalidDomain)
        );
    }

    #[test]
    fn domain_check_precedes_length_check() {
        let store = ActivityStore::seeded();
        let email = format!("{}@school.edu", "a".repeat(49));
        assert_eq!(email.len(), 60);
        assert_eq!(
            signup(&store, "Art Club", &email),
            Err(SignupError::InvalidDomain)
        );
    }

    #[test]
    fn length_limit_is_fifty_characters() {
        let store = ActivityStore::seeded();
        let at_limit = format!("{}{}", "a".repeat(MAX_EMAIL_LEN - SCHOOL_DOMAIN.len()), SCHOOL_DOMAIN);
        let over = format!("b{at_limit}");
        assert_eq!(at_limit.len(), 50);

        assert_eq!(signup(&store, "Drama Club", &over), Err(SignupError::EmailTooLong));
        assert!(signup(&store, "Drama Club", &at_limit).is_ok());
    }

    #[test]
    fn enrollment_is_globally_unique() {
        let store = ActivityStore::seeded();
        signup(&store, "Chess Club", "a@mergington.edu").unwrap();
        assert_eq!(
            signup(&store, "Math Club", "a@mergington.edu"),
            Err(SignupError::DuplicateAcrossActivities)
        );
        assert_eq!(
            signup(&store, "Math Club", "ava@mergington.edu"),
            Err(SignupError::DuplicateAcrossActivities)
        );
        assert_eq!(participants(&store, "Math Club").len(), 2);
    }

    #[test]
    fn reserved_roles_are_rejected_with_role() {
        let store = ActivityStore::seeded();
        for role in RESERVED_ROLES {
            let email = format!("{role}@mergington.edu");
            assert_eq!(
                signup(&store, "Gym Class", &email),
                Err(SignupError::ReservedRoleEmail { role }),
            );
        }
        assert_eq!(participants(&store, "Gym Class").len(), 2);
    }

    #[test]
    fn role_must_be_the_whole_local_part() {
        let store = ActivityStore::seeded();
        assert!(signup(&store, "Gym Class", "teachers@mergington.edu").is_ok());
        assert!(signup(&store, "Soccer Team", "coach.bob@mergington.edu").is_ok());
        assert!(signup(&store, "Science Club", "bigstaff@mergington.edu").is_ok());
    }

    #[test]
    fn local_duplicate_wins_over_global_duplicate() {
        let store = ActivityStore::seeded();
        assert_eq!(
            signup(&store, "Art Club", "ava@mergington.edu"),
            Err(SignupError::AlreadyEnrolled)
        );
        assert_eq!(
            signup(&store, "Chess Club", "ava@mergington.edu"),
            Err(SignupError::DuplicateAcrossActivities)
        );
    }

    #[test]
    fn concurrent_signups_never_exceed_capacity() {
        let store = Arc::new(store_with(vec![(
            "Small Club",
            ActivityRecord::new("d", "s", 5),
        )]));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    signup(&store, "Small Club", &format!("kid{i}@mergington.edu")).is_ok()
                })
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 5);
        assert_eq!(participants(&store, "Small Club").len(), 5);
    }
}
