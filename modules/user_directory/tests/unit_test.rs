use std::sync::Arc;

use user_directory::contract::model::*;
use user_directory::domain::ports::ListingPort;
use user_directory::gateways::UsersApiListing;
use user_directory::infra::{demo_users, SyntheticUsersApi, UuidIdGenerator};
use user_directory::{DirectoryConfig, DirectoryController};

#[test]
fn test_user_draft_roundtrip_through_record() {
    let user = User {
        id: "42".to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role: "manager".to_string(),
        status: UserStatus::Inactive,
        last_login: "2023-06-15 10:30 AM".to_string(),
    };

    let draft = user.to_draft();
    assert_eq!(draft.name, "Test User");
    assert_eq!(draft.status, UserStatus::Inactive);

    let rebuilt = User::from_draft(user.id.clone(), draft, user.last_login.clone());
    assert_eq!(rebuilt, user);
}

#[test]
fn test_user_status_parsing() {
    assert_eq!(UserStatus::parse("active"), Some(UserStatus::Active));
    assert_eq!(UserStatus::parse(" Inactive "), Some(UserStatus::Inactive));
    assert_eq!(UserStatus::parse("suspended"), None);
    assert_eq!(UserStatus::default(), UserStatus::Active);
    assert_eq!(UserStatus::Inactive.to_string(), "inactive");
}

#[test]
fn test_user_field_names() {
    for f in UserField::ALL {
        assert_eq!(UserField::parse(f.as_str()), Some(f));
    }
    assert_eq!(UserField::parse("id"), None);
    assert_eq!(UserField::parse("lastLogin"), None);
}

#[test]
fn test_directory_config_defaults() {
    let config = DirectoryConfig::default();
    assert_eq!(config.default_role, "user");
    assert_eq!(config.default_status, UserStatus::Active);
    assert_eq!(config.never_logged_in, "Never");
    assert_eq!(config.allowed_roles, vec!["admin", "manager", "user"]);
    assert!(config.role_allowed("admin"));
    assert!(!config.role_allowed("root"));
}

#[test]
fn test_directory_config_deserialization() {
    let json_config =
        r#"{"default_role": "manager", "default_status": "inactive", "allowed_roles": []}"#;
    let config: DirectoryConfig = serde_json::from_str(json_config).expect("Should deserialize");

    assert_eq!(config.default_role, "manager");
    assert_eq!(config.default_status, UserStatus::Inactive);
    assert!(config.role_allowed("anything"));
    // untouched fields keep defaults
    assert_eq!(config.never_logged_in, "Never");

    let unknown = r#"{"page_size": 10}"#;
    assert!(serde_json::from_str::<DirectoryConfig>(unknown).is_err());
}

#[tokio::test]
async fn test_gateway_lists_through_users_api() {
    let api = Arc::new(SyntheticUsersApi::demo());
    let listing = UsersApiListing::new(api.clone());

    let users = listing.fetch_resources().await.unwrap();
    assert_eq!(users, demo_users());
}

#[tokio::test]
async fn test_controller_over_synthetic_backend() {
    let api = Arc::new(SyntheticUsersApi::demo());
    let ctl = DirectoryController::new(
        Arc::new(UsersApiListing::new(api)),
        Arc::new(UuidIdGenerator),
        Arc::new(user_directory::domain::ports::NoopPublisher),
        DirectoryConfig::default(),
    );

    ctl.refresh().await.unwrap();
    assert_eq!(ctl.len(), 5);

    let managers: Vec<String> = ctl.search("MANAGER").into_iter().map(|u| u.name).collect();
    assert_eq!(managers, vec!["Jane Smith", "Michael Brown"]);
}
