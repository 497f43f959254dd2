//! # Validation
//!
//! Field validation expressed as pure functions returning a list of
//! human-readable messages. Callers collect every failure in one pass
//! instead of short-circuiting, so a client sees the whole picture.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{NewUser, Post};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w+\-.]+@[A-Za-z\d\-.]+\.[A-Za-z]+$").expect("email regex"));

/// Minimum plaintext password length.
pub const MIN_PASSWORD_LEN: usize = 6;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Signup-time validation. The email uniqueness probe needs the repo and is
/// appended by the account service.
pub fn validate_new_user(user: &NewUser) -> Vec<String> {
    let mut errors = Vec::new();
    if blank(&user.name) {
        errors.push("Name can't be blank".to_string());
    }
    if blank(&user.email) {
        errors.push("Email can't be blank".to_string());
    } else if !EMAIL_RE.is_match(&user.email) {
        errors.push("Email must be a valid email format".to_string());
    }
    errors.extend(validate_password(
        &user.password,
        user.password_confirmation.as_deref(),
    ));
    errors
}

/// Password rules, shared between signup and profile update. The
/// confirmation is only checked when one was supplied.
pub fn validate_password(password: &str, confirmation: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();
    if blank(password) {
        errors.push("Password can't be blank".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password is too short (minimum is {MIN_PASSWORD_LEN} characters)"
        ));
    }
    if let Some(confirmation) = confirmation {
        if confirmation != password {
            errors.push("Password confirmation doesn't match Password".to_string());
        }
    }
    errors
}

/// Validates a post candidate in full, whether freshly built or the result
/// of applying an update on top of the stored record.
pub fn validate_post(post: &Post) -> Vec<String> {
    let mut errors = Vec::new();
    if blank(&post.title) {
        errors.push("Title can't be blank".to_string());
    }
    if blank(&post.body) {
        errors.push("Body can't be blank".to_string());
    }
    if blank(&post.tags) {
        errors.push("Tags can't be blank".to_string());
    }
    if !has_at_least_one_tag(&post.tags) {
        errors.push("Tags must have at least one tag".to_string());
    }
    errors
}

pub fn validate_comment_body(body: &str) -> Vec<String> {
    if blank(body) {
        vec!["Body can't be blank".to_string()]
    } else {
        Vec::new()
    }
}

/// Tags are a comma-delimited list; at least one segment must be non-blank.
fn has_at_least_one_tag(tags: &str) -> bool {
    tags.split(',').any(|segment| !segment.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use chrono::Utc;
    use uuid::Uuid;

    fn new_user(name: &str, email: &str, password: &str, confirmation: Option<&str>) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.map(str::to_string),
            image: None,
        }
    }

    fn post(title: &str, body: &str, tags: &str) -> Post {
        Post {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        let errors = validate_new_user(&new_user("A", "a@x.com", "123456", Some("123456")));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn collects_every_failure() {
        let errors = validate_new_user(&new_user("", "not-an-email", "123", Some("456")));
        assert_eq!(
            errors,
            vec![
                "Name can't be blank",
                "Email must be a valid email format",
                "Password is too short (minimum is 6 characters)",
                "Password confirmation doesn't match Password",
            ]
        );
    }

    #[test]
    fn missing_confirmation_is_not_a_mismatch() {
        let errors = validate_new_user(&new_user("A", "a@x.com", "123456", None));
        assert!(errors.is_empty());
    }

    #[test]
    fn email_syntax() {
        for bad in ["invalidemail", "a@b", "@x.com", "a b@x.com", ""] {
            let errors = validate_new_user(&new_user("A", bad, "123456", None));
            assert!(
                errors.iter().any(|e| e.starts_with("Email")),
                "{bad:?} should fail"
            );
        }
        let errors = validate_new_user(&new_user("A", "first.last+tag@sub.domain.org", "123456", None));
        assert!(errors.is_empty());
    }

    #[test]
    fn blank_tags_fail_both_rules() {
        let errors = validate_post(&post("T", "B", "   "));
        assert_eq!(
            errors,
            vec!["Tags can't be blank", "Tags must have at least one tag"]
        );
    }

    #[test]
    fn delimiter_only_tags_fail() {
        let errors = validate_post(&post("T", "B", " , ,"));
        assert_eq!(errors, vec!["Tags must have at least one tag"]);
    }

    #[test]
    fn single_tag_is_enough() {
        assert!(validate_post(&post("T", "B", "t1")).is_empty());
        assert!(validate_post(&post("T", "B", "t1, t2")).is_empty());
    }

    #[test]
    fn blank_comment_body_fails() {
        assert_eq!(validate_comment_body("  "), vec!["Body can't be blank"]);
        assert!(validate_comment_body("Nice post!").is_empty());
    }
}
