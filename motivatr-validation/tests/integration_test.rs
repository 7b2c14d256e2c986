//! Integration tests for motivatr-validation

use motivatr_validation::*;

fn signup_rules() -> RuleSet {
    RuleSet::new()
        .field("name", rule_chain![Required, Min(2), Max(30), Regex::san()])
        .field("email", rule_chain![Required, Max(255), Regex::email()])
        .field("password", rule_chain![Required, Password::new()])
        .field("password_confirmation", rule_chain![Same::new("password")])
        .field("birthday", rule_chain![Required, Date])
        .field("tags", rule_chain![Max(3)])
}

#[test]
fn test_valid_signup() {
    let record = Record::new()
        .with("name", "Ada Lovelace")
        .with("email", "ada@example.com")
        .with("password", "Analytical1")
        .with("password_confirmation", "Analytical1")
        .with("birthday", "2001-12-10")
        .with("tags", vec!["math", "engines"]);

    let rules = signup_rules();
    let mut validator = Validator::new(&record, &rules);
    validator.validate().unwrap();

    assert!(!validator.failed(), "{}", validator.errors());
}

#[test]
fn test_invalid_signup_reports_one_message_per_field() {
    let record = Record::new()
        .with("name", "A")
        .with("email", "ada@")
        .with("password", "abcdefgh")
        .with("birthday", "2100-01-01")
        .with("tags", vec!["a", "b", "c", "d"]);

    let rules = signup_rules();
    let mut validator = Validator::new(&record, &rules);
    validator.validate().unwrap();

    let errors = validator.errors();
    assert_eq!(errors.len(), 6);
    assert_eq!(errors.get("name"), Some("The name field must not be less than 2 characters"));
    assert_eq!(errors.get("email"), Some("The email field format is invalid"));
    assert_eq!(
        errors.get("password"),
        Some("The password field must contain at least one upper case letter")
    );
    assert_eq!(
        errors.get("password_confirmation"),
        Some("The password_confirmation field must match password")
    );
    assert_eq!(errors.get("birthday"), Some("The birthday field format is invalid"));
    assert_eq!(errors.get("tags"), Some("The tags field must not have more than 3 items"));
}

#[test]
fn test_empty_required_field_short_circuits_internal_errors() {
    // Required fails first, so the Date rule never sees the absent value.
    let record = Record::new()
        .with("name", "Ada")
        .with("email", "ada@example.com")
        .with("password", "Analytical1")
        .with("password_confirmation", "Analytical1");

    let rules = signup_rules();
    let mut validator = Validator::new(&record, &rules);
    validator.validate().unwrap();

    assert_eq!(
        validator.errors().get("birthday"),
        Some("The birthday field is required")
    );
}

#[test]
fn test_rule_set_shared_across_threads() {
    let rules = std::sync::Arc::new(signup_rules());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = rules.clone();
            std::thread::spawn(move || {
                let record = Record::new().with("name", "x".repeat(i + 1));
                let mut validator = Validator::new(&record, &rules);
                validator.validate().unwrap();
                validator.errors().get("name").map(str::to_string)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results[0].as_deref(),
        Some("The name field must not be less than 2 characters")
    );
    assert!(results[1..].iter().all(Option::is_none));
}

#[test]
fn test_negative_container_limit_is_internal() {
    let record = Record::new().with("tags", vec!["a"]);
    let rules = RuleSet::new().field("tags", rule_chain![Min(-1)]);

    let mut validator = Validator::new(&record, &rules);
    let err = validator.validate().unwrap_err();

    assert_eq!(err.field(), "tags");
    assert!(!validator.failed());
}

#[cfg(feature = "json")]
#[test]
fn test_json_body_round_trip() {
    let body = br#"{"name": "", "email": "ada@example.com", "tags": []}"#;
    let record = Record::from_json_slice(body).unwrap();
    let rules = RuleSet::new()
        .field("name", rule_chain![Required])
        .field("email", rule_chain![Required, Regex::email()])
        .field("tags", rule_chain![Required]);

    let mut validator = Validator::new(&record, &rules);
    validator.validate().unwrap();

    assert_eq!(
        validator.errors().to_json(),
        serde_json::json!({
            "name": "The name field is required",
            "tags": "The tags field is required",
        })
    );
}
