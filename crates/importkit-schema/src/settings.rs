//! Assembly of the full widget-facing configuration.

use importkit_model::{ImportSettings, StyleOverrides};

use crate::user_import::user_import_fields;

/// Complete widget settings for the user import, schema included.
pub fn user_import_settings(email_required: bool) -> ImportSettings {
    ImportSettings {
        import_type: "Users".to_string(),
        title: "Bulk User Import".to_string(),
        allow_invalid_submit: false,
        allow_custom: false,
        managed: true,
        fields: user_import_fields(email_required),
        style_overrides: default_style(),
    }
}

/// The default style token set. Opaque to the core; the widget interprets
/// the tokens.
pub fn default_style() -> StyleOverrides {
    let mut style = StyleOverrides::new();
    style.set("buttonHeight", "3rem");
    style.set("borderRadius", "0.25rem");
    style.set("primaryButtonColor", "#14499a");
    style.set("primaryButtonFontColor", "#ffffff");
    style.set("secondaryButtonColor", "#f2f7ff");
    style.set("secondaryButtonFontColor", "#14499a");
    style.set("noButtonColor", "#c15716");
    style.set("yesButtonColor", "#14499a");
    style.set("invertedButtonColor", "#14499a");
    style.set("errorColor", "#b60000");
    style.set("successColor", "#23c720");
    style.set("warningColor", "#b60000");
    style.set("fontFamily", "Muli, Helvetica, Arial, sans-serif");
    style
}
