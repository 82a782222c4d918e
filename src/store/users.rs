//! User table operations.
//!
//! Nicknames and emails are unique case-insensitively; the casing supplied at
//! registration is what every later response carries. Forum membership
//! listing lives here too since it produces user rows.

use std::ops::Bound;

use crate::error::StoreError;
use crate::model::{NewUser, User, UserUpdate};
use crate::store::{ci_key, Created, ForumStore};

impl ForumStore {
    /// Register a user. A nickname or email collision returns the existing
    /// owners (both, when they are different users) instead of inserting.
    pub fn create_user(
        &self,
        nickname: &str,
        new_user: NewUser,
    ) -> Result<Created<User, Vec<User>>, StoreError> {
        let mut db = self.write("create_user")?;

        let nick_key = ci_key(nickname);
        let email_key = ci_key(&new_user.email);

        let mut conflicts = Vec::new();
        if let Some(existing) = db.users.get(&nick_key) {
            conflicts.push(existing.clone());
        }
        if let Some(holder_key) = db.user_emails.get(&email_key) {
            if *holder_key != nick_key {
                if let Some(holder) = db.users.get(holder_key) {
                    conflicts.push(holder.clone());
                }
            }
        }
        if !conflicts.is_empty() {
            return Ok(Created::Exists(conflicts));
        }

        let user = User {
            nickname: nickname.to_string(),
            fullname: new_user.fullname,
            about: new_user.about,
            email: new_user.email,
        };
        db.users.insert(nick_key.clone(), user.clone());
        db.user_emails.insert(email_key, nick_key);
        Ok(Created::New(user))
    }

    pub fn user_by_nickname(&self, nickname: &str) -> Result<User, StoreError> {
        let db = self.read("user_by_nickname")?;
        db.users
            .get(&ci_key(nickname))
            .cloned()
            .ok_or_else(|| StoreError::NotFoundUser {
                nickname: nickname.to_string(),
            })
    }

    /// Partial profile update. Changing the email to one held by another user
    /// fails with [`StoreError::EmailTaken`] naming the holder.
    pub fn update_user(&self, nickname: &str, update: UserUpdate) -> Result<User, StoreError> {
        let mut db = self.write("update_user")?;
        let nick_key = ci_key(nickname);
        if !db.users.contains_key(&nick_key) {
            return Err(StoreError::NotFoundUser {
                nickname: nickname.to_string(),
            });
        }

        if let Some(email) = &update.email {
            let email_key = ci_key(email);
            if let Some(holder_key) = db.user_emails.get(&email_key) {
                if *holder_key != nick_key {
                    let holder = db
                        .users
                        .get(holder_key)
                        .map(|u| u.nickname.clone())
                        .unwrap_or_default();
                    return Err(StoreError::EmailTaken { nickname: holder });
                }
            }
        }

        // Checks passed; apply the changed fields.
        if let Some(email) = &update.email {
            if let Some(user) = db.users.get(&nick_key) {
                let old_key = ci_key(&user.email);
                db.user_emails.remove(&old_key);
            }
            db.user_emails.insert(ci_key(email), nick_key.clone());
        }
        let user = db
            .users
            .get_mut(&nick_key)
            .ok_or(StoreError::Internal { op: "update_user" })?;
        if let Some(fullname) = update.fullname {
            user.fullname = fullname;
        }
        if let Some(about) = update.about {
            user.about = Some(about);
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    /// Members of a forum (thread and post authors), ordered by folded
    /// nickname. `since` is an exclusive nickname cursor in the direction of
    /// the scan.
    pub fn forum_users(
        &self,
        slug: &str,
        limit: usize,
        since: Option<&str>,
        desc: bool,
    ) -> Result<Vec<User>, StoreError> {
        let db = self.read("forum_users")?;
        let forum = db
            .forums
            .get(&ci_key(slug))
            .ok_or(StoreError::NotFoundForum)?;

        let members = &forum.members;
        let keys: Box<dyn Iterator<Item = &String>> = match (since, desc) {
            (None, false) => Box::new(members.keys()),
            (None, true) => Box::new(members.keys().rev()),
            (Some(s), false) => Box::new(
                members
                    .range((Bound::Excluded(ci_key(s)), Bound::Unbounded))
                    .map(|(k, _)| k),
            ),
            (Some(s), true) => Box::new(members.range(..ci_key(s)).rev().map(|(k, _)| k)),
        };

        Ok(keys
            .take(limit)
            .filter_map(|key| db.users.get(key).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            fullname: "Full Name".to_string(),
            about: Some("about".to_string()),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_create_preserves_casing_lookup_folds() {
        let store = ForumStore::new();
        let created = store.create_user("MixedCase", new_user("mc@example.com")).unwrap();
        assert_matches!(created, Created::New(user) if user.nickname == "MixedCase");

        let fetched = store.user_by_nickname("mixedcase").unwrap();
        assert_eq!(fetched.nickname, "MixedCase");
    }

    #[test]
    fn test_create_conflict_returns_both_holders() {
        let store = ForumStore::new();
        store.create_user("alice", new_user("alice@example.com")).unwrap();
        store.create_user("bob", new_user("bob@example.com")).unwrap();

        // Nickname of alice, email of bob: both come back.
        let created = store
            .create_user("Alice", new_user("BOB@example.com"))
            .unwrap();
        assert_matches!(created, Created::Exists(users) => {
            let nicknames: Vec<_> = users.iter().map(|u| u.nickname.as_str()).collect();
            assert_eq!(nicknames, vec!["alice", "bob"]);
        });
    }

    #[test]
    fn test_update_email_taken() {
        let store = ForumStore::new();
        store.create_user("alice", new_user("alice@example.com")).unwrap();
        store.create_user("bob", new_user("bob@example.com")).unwrap();

        let err = store
            .update_user(
                "bob",
                UserUpdate {
                    email: Some("Alice@Example.com".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::EmailTaken {
                nickname: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let store = ForumStore::new();
        store.create_user("alice", new_user("alice@example.com")).unwrap();

        let updated = store
            .update_user(
                "alice",
                UserUpdate {
                    fullname: Some("Alice Liddell".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.fullname, "Alice Liddell");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.about.as_deref(), Some("about"));
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let store = ForumStore::new();
        let err = store.user_by_nickname("ghost").unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFoundUser {
                nickname: "ghost".to_string()
            }
        );
    }
}
