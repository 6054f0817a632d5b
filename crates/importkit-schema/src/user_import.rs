//! The bulk user-import schema.
//!
//! Field order is part of the contract: the conditional identity fields come
//! first, followed by a fixed tail of nine descriptive fields that is
//! identical no matter how the identity block is configured.

use importkit_model::{Field, MatchMode, SelectOption, Validator};

/// Address-shaped email check. Carried unanchored; compiled with
/// [`MatchMode::default`], which anchors it to the full value.
pub const EMAIL_PATTERN: &str = r#"(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))"#;

const INVALID_EMAIL: &str = "Please enter a valid email address";
const DUPLICATE_EMAIL: &str = "This email is already in use";

/// Build the ordered user-import field list.
///
/// With `email_required` the schema leads with a single mandatory
/// `emailAddress` field. Without it, `username` becomes the mandatory
/// identity and `emailAddress` stays format- and uniqueness-checked but
/// optional. That asymmetry is intentional.
pub fn user_import_fields(email_required: bool) -> Vec<Field> {
    let mut fields = if email_required {
        vec![email_field(true)]
    } else {
        vec![username_field(), email_field(false)]
    };
    fields.extend(descriptive_fields());
    fields
}

fn email_field(required: bool) -> Field {
    let mut field = Field::new("emailAddress", "Email Address").with_validator(
        Validator::regex_matches(EMAIL_PATTERN, MatchMode::default())
            .expect("email pattern compiles")
            .with_error(INVALID_EMAIL),
    );
    if required {
        field = field.with_validator(Validator::required().with_error(INVALID_EMAIL));
    }
    field.with_validator(Validator::unique().with_error(DUPLICATE_EMAIL))
}

fn username_field() -> Field {
    Field::new("username", "Username")
        .with_validator(Validator::required().with_error(INVALID_EMAIL))
        .with_validator(Validator::unique().with_error(DUPLICATE_EMAIL))
}

fn descriptive_fields() -> Vec<Field> {
    vec![
        role_field(),
        Field::new("fullName", "Full Name"),
        Field::new("jobTitle", "Job Title"),
        Field::new("personnelCode", "Personnel Code"),
        Field::new("hourlyRate", "Hourly Rate"),
        Field::new("addressCity", "City"),
        Field::new("addressStateProvince", "State or Province"),
        Field::new("addressCountry", "Country"),
        Field::new("addressPostalCode", "Postal Code"),
    ]
}

fn role_field() -> Field {
    Field::new("roleId", "Role")
        .as_select(vec![
            SelectOption::new("1", "Administrator"),
            SelectOption::new("2", "Manager"),
            SelectOption::new("3", "Technician"),
            // the upstream role table maps both Logistics and Purchasing to "4"
            SelectOption::new("4", "Logistics"),
            SelectOption::new("4", "Purchasing"),
        ])
        .with_validator(Validator::required())
}
