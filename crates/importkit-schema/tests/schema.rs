//! Schema-shape tests: field order, validator order, and the fixed tail.

use importkit_model::{Field, FieldType, Validator};
use importkit_schema::{user_import_fields, user_import_settings};

fn validator_tags(field: &Field) -> Vec<&'static str> {
    field
        .validators
        .iter()
        .map(|validator| match validator {
            Validator::Required { .. } => "required",
            Validator::Unique { .. } => "unique",
            Validator::RegexMatches { .. } => "regex_matches",
        })
        .collect()
}

#[test]
fn required_email_leads_with_three_validators() {
    let fields = user_import_fields(true);

    assert_eq!(fields[0].key, "emailAddress");
    assert_eq!(fields[0].label, "Email Address");
    assert_eq!(
        validator_tags(&fields[0]),
        vec!["regex_matches", "required", "unique"]
    );
}

#[test]
fn optional_email_swaps_in_a_username() {
    let fields = user_import_fields(false);

    assert_eq!(fields[0].key, "username");
    assert_eq!(validator_tags(&fields[0]), vec!["required", "unique"]);

    assert_eq!(fields[1].key, "emailAddress");
    // email stays format- and uniqueness-checked but is not required
    assert_eq!(validator_tags(&fields[1]), vec!["regex_matches", "unique"]);

    // the username messages mirror the email ones, as shipped upstream
    assert_eq!(
        fields[0].validators[0].error_message(),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        fields[0].validators[1].error_message(),
        Some("This email is already in use")
    );
}

#[test]
fn descriptive_tail_is_identical_for_both_modes() {
    let with_email = user_import_fields(true);
    let with_username = user_import_fields(false);

    let tail_a = &with_email[1..];
    let tail_b = &with_username[2..];
    assert_eq!(tail_a.len(), 9);
    assert_eq!(tail_a, tail_b);

    let keys: Vec<&str> = tail_a.iter().map(|field| field.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "roleId",
            "fullName",
            "jobTitle",
            "personnelCode",
            "hourlyRate",
            "addressCity",
            "addressStateProvince",
            "addressCountry",
            "addressPostalCode",
        ]
    );
}

#[test]
fn role_select_preserves_the_shared_value() {
    let fields = user_import_fields(true);
    let role = fields.iter().find(|field| field.key == "roleId").expect("role field");

    assert_eq!(role.field_type, Some(FieldType::Select));
    let pairs: Vec<(&str, &str)> = role
        .options
        .iter()
        .map(|option| (option.value.as_str(), option.label.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("1", "Administrator"),
            ("2", "Manager"),
            ("3", "Technician"),
            ("4", "Logistics"),
            ("4", "Purchasing"),
        ]
    );
}

#[test]
fn fields_serialize_to_the_widget_wire_shape() {
    let fields = user_import_fields(true);
    let json = serde_json::to_value(&fields).expect("serialize fields");

    assert_eq!(json[0]["key"], "emailAddress");
    assert_eq!(json[0]["validators"][0]["validate"], "regex_matches");
    assert!(json[0]["validators"][0]["regex"].is_string());
    assert_eq!(
        json[0]["validators"][0]["error"],
        "Please enter a valid email address"
    );
    assert_eq!(json[0]["validators"][1]["validate"], "required");
    assert_eq!(json[0]["validators"][2]["validate"], "unique");

    // free-text fields serialize without type/options/validators keys
    let full_name = &json[2];
    assert_eq!(full_name["key"], "fullName");
    assert!(full_name.get("type").is_none());
    assert!(full_name.get("validators").is_none());
}

#[test]
fn settings_carry_schema_and_style() {
    let settings = user_import_settings(false);

    assert_eq!(settings.import_type, "Users");
    assert_eq!(settings.title, "Bulk User Import");
    assert!(!settings.allow_invalid_submit);
    assert!(!settings.allow_custom);
    assert!(settings.managed);
    assert_eq!(settings.fields.len(), 11);
    assert_eq!(settings.style_overrides.get("buttonHeight"), Some("3rem"));
    assert_eq!(
        settings.style_overrides.get("fontFamily"),
        Some("Muli, Helvetica, Arial, sans-serif")
    );
}
