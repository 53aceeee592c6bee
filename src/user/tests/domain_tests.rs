//! Domain-focused tests for user values and the aggregate.

use crate::user::domain::{EmailAddress, User, UserDomainError, UserId, UserRole};
use rstest::rstest;

#[rstest]
#[case("maria@example.com")]
#[case("m.silva+tag@sub.example.org")]
fn email_accepts_plausible_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid e-mail address");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@missing-local")]
#[case("missing-domain@")]
#[case("two@at@signs")]
#[case("spaced name@example.com")]
fn email_rejects_structurally_invalid_addresses(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserDomainError::InvalidEmail(raw.to_owned()))
    );
}

#[rstest]
#[case("admin", UserRole::Admin)]
#[case("editor", UserRole::Editor)]
fn role_parses_canonical_values(#[case] raw: &str, #[case] expected: UserRole) {
    assert_eq!(UserRole::try_from(raw), Ok(expected));
}

#[rstest]
fn role_rejects_unknown_values() {
    assert!(UserRole::try_from("owner").is_err());
}

#[rstest]
fn new_user_defaults_to_editor_role() {
    let email = EmailAddress::new("maria@example.com").expect("valid e-mail address");
    let user = User::new(UserId::new(), email, "Maria Silva", None).expect("valid user");

    assert_eq!(user.role(), UserRole::Editor);
}

#[rstest]
fn new_user_keeps_caller_supplied_identity() {
    let id = UserId::new();
    let email = EmailAddress::new("joao@example.com").expect("valid e-mail address");
    let user = User::new(id, email.clone(), "João", Some(UserRole::Admin)).expect("valid user");

    assert_eq!(user.id(), id);
    assert_eq!(user.email(), &email);
    assert_eq!(user.role(), UserRole::Admin);
}

#[rstest]
fn new_user_rejects_blank_name() {
    let email = EmailAddress::new("maria@example.com").expect("valid e-mail address");
    let result = User::new(UserId::new(), email, "  ", None);

    assert_eq!(result, Err(UserDomainError::EmptyName));
}

#[rstest]
fn serialized_user_exposes_no_credential_fields() {
    let email = EmailAddress::new("maria@example.com").expect("valid e-mail address");
    let user = User::new(UserId::new(), email, "Maria", None).expect("valid user");
    let json = serde_json::to_value(&user).expect("user serializes");

    let object = json.as_object().expect("user serializes to an object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, ["email", "id", "name", "role"]);
}
