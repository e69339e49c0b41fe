use validator::{ValidationErrors, ValidationErrorsKind};

/// Codes that mean "the field is missing or empty" rather than "the value is wrong".
const PRESENCE_CODES: &[&str] = &["required", "length", "not_blank"];

/// Render validation failures as a single sentence naming the fields.
///
/// Fields failing a presence check are grouped (`name and price are required`);
/// any other failure contributes its own message, or `<field> is invalid`.
/// Parts are joined with `; ` and fields are listed alphabetically.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => Some((&**field, errs)),
            _ => None,
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut missing = Vec::new();
    let mut invalid = Vec::new();

    for (field, errs) in fields {
        if errs.iter().any(|e| PRESENCE_CODES.contains(&&*e.code)) {
            missing.push(field);
        } else if let Some(err) = errs.first() {
            invalid.push(match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            });
        }
    }

    let mut parts = Vec::new();
    match missing.as_slice() {
        [] => {}
        [one] => parts.push(format!("{} is required", one)),
        [init @ .., last] => parts.push(format!("{} and {} are required", init.join(", "), last)),
    }
    parts.extend(invalid);

    if parts.is_empty() {
        "Request validation failed".to_string()
    } else {
        parts.join("; ")
    }
}
