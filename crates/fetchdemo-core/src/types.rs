use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A user record as served by the fixture API.
///
/// The API returns more fields (address, phone, company); only the ones the
/// demo displays are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier, absent on locally built values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Full name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact address.
    pub email: String,
}

impl User {
    /// Text shown for this user in the rendered list: `<name> - <email>`.
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.name, self.email)
    }
}

/// Body of a create-user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact address.
    pub email: String,
}

impl NewUser {
    /// Creates a draft user.
    pub fn new<T: Into<String>>(name: T, username: T, email: T) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// The user the demo creates on every run.
    #[must_use]
    pub fn sample() -> Self {
        Self::new("Leanne Graham", "Bret", "Sincere@april.biz")
    }
}

/// A post as echoed back by the fixture API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Author reference. Not checked locally.
    pub user_id: u64,
}

/// Body of a create-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Author reference.
    pub user_id: u64,
}

impl NewPost {
    /// Creates a draft post.
    pub fn new<T: Into<String>>(title: T, body: T, user_id: u64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// The post the demo creates on every run.
    #[must_use]
    pub fn sample() -> Self {
        Self::new("foo", "bar", 1)
    }
}

/// The user produced by the simulated login stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Name the user logged in with.
    pub username: String,
}

impl SessionUser {
    /// Creates a session user for `username`.
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A session user extended with profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The logged-in user this profile extends.
    #[serde(flatten)]
    pub user: SessionUser,
    /// Age in years.
    pub age: u32,
    /// Home city.
    pub city: String,
}

impl Profile {
    /// Extends `user` with profile fields.
    pub fn extend<T: Into<String>>(user: SessionUser, age: u32, city: T) -> Self {
        Self {
            user,
            age,
            city: city.into(),
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{ username: {:?}, age: {}, city: {:?} }}",
            self.user.username, self.age, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json, to_value};

    #[test]
    fn test_user_ignores_extra_fixture_fields() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "address": { "city": "Gwenborough" }
        }"#;
        let user: User = from_str(raw).unwrap();
        assert_eq!(user.id, Some(1));
        assert_eq!(user.display_line(), "Leanne Graham - Sincere@april.biz");
    }

    #[test]
    fn test_new_post_serializes_expected_fields() {
        let body = to_value(NewPost::sample()).unwrap();
        assert_eq!(body, json!({ "title": "foo", "body": "bar", "userId": 1 }));
    }

    #[test]
    fn test_new_user_serializes_expected_fields() {
        let body = to_value(NewUser::sample()).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Leanne Graham",
                "username": "Bret",
                "email": "Sincere@april.biz"
            })
        );
    }

    #[test]
    fn test_post_without_id_omits_it() {
        let post = Post {
            id: None,
            title: "foo".to_owned(),
            body: "bar".to_owned(),
            user_id: 1,
        };
        let body = to_value(&post).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["userId"], 1);
    }

    #[test]
    fn test_profile_flattens_user() {
        let profile = Profile::extend(SessionUser::new("alice"), 30, "New York");
        let body = to_value(&profile).unwrap();
        assert_eq!(
            body,
            json!({ "username": "alice", "age": 30, "city": "New York" })
        );
        assert_eq!(
            profile.to_string(),
            r#"{ username: "alice", age: 30, city: "New York" }"#
        );
    }
}
