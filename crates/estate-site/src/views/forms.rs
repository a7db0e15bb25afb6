//! Inquiry and mandate forms, validation and the confirmation page.

use std::fmt::Write;

use estate_api::{City, FormKind, Submission};
use estate_shortcode::escape_html;

use super::{city_options, kind_options};

/// Check the fields every form requires.
///
/// # Errors
///
/// Returns one message per missing or malformed field.
pub fn validate(submission: &Submission) -> Result<(), Vec<String>> {
    let (name, email, message) = submission.contact_fields();
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Name is required".to_owned());
    }
    let email = email.trim();
    if email.is_empty() {
        errors.push("Email is required".to_owned());
    } else if !email.contains('@') {
        errors.push("Email must be a valid address".to_owned());
    }
    if message.trim().is_empty() {
        errors.push("Message is required".to_owned());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn contact_fields(out: &mut String) {
    out.push_str(concat!(
        r#"<div class="form-row">"#,
        r#"<label>Name <input type="text" name="name" required></label>"#,
        r#"<label>Surname <input type="text" name="surname"></label></div>"#,
        r#"<div class="form-row">"#,
        r#"<label>Email <input type="email" name="email" required></label>"#,
        r#"<label>Phone <input type="tel" name="phone"></label></div>"#,
    ));
}

fn listing_select(out: &mut String) {
    out.push_str(concat!(
        r#"<label>Listing <select name="listing_type">"#,
        r#"<option value="sale">Sale</option><option value="rent">Rent</option>"#,
        "</select></label>",
    ));
}

/// "Looking for a property" form posted to [`FormKind::Inquiry`].
pub(crate) fn inquiry_form(cities: &[City], out: &mut String) {
    write!(
        out,
        r#"<form class="inquiry-form" method="post" action="{}"><h3>Looking for a property?</h3>"#,
        FormKind::Inquiry.path()
    )
    .unwrap();
    contact_fields(out);
    out.push_str(r#"<div class="form-row"><label>City <select name="city_id">"#);
    city_options(cities, None, "Any city", out);
    out.push_str("</select></label>");
    listing_select(out);
    out.push_str(r#"<label>Type <select name="property_type">"#);
    kind_options(None, "Any type", out);
    out.push_str(concat!(
        "</select></label></div>",
        r#"<div class="form-row">"#,
        r#"<label>Bedrooms <input type="number" min="0" name="bedrooms"></label>"#,
        r#"<label>Min price <input type="number" min="0" name="min_price"></label>"#,
        r#"<label>Max price <input type="number" min="0" name="max_price"></label></div>"#,
        r#"<label>Message <textarea name="message" rows="4" required></textarea></label>"#,
        r#"<button type="submit">Send inquiry</button></form>"#,
    ));
}

/// "List your property with us" form posted to [`FormKind::Mandate`].
pub(crate) fn mandate_form(cities: &[City], out: &mut String) {
    write!(
        out,
        r#"<form class="mandate-form" method="post" action="{}"><h3>Sell or rent your property</h3>"#,
        FormKind::Mandate.path()
    )
    .unwrap();
    contact_fields(out);
    out.push_str(r#"<div class="form-row"><label>City <select name="city_id" required>"#);
    city_options(cities, None, "Select a city", out);
    out.push_str("</select></label>");
    listing_select(out);
    out.push_str(r#"<label>Type <select name="property_type" required>"#);
    kind_options(None, "Select a type", out);
    out.push_str(concat!(
        "</select></label></div>",
        r#"<div class="form-row">"#,
        r#"<label>Bedrooms <input type="number" min="0" name="bedrooms"></label>"#,
        r#"<label>Asking price <input type="number" min="0" name="price"></label>"#,
        r#"<label>Area (m²) <input type="number" min="0" name="square_meters"></label></div>"#,
        r#"<label>Message <textarea name="message" rows="4" required></textarea></label>"#,
        r#"<button type="submit">Submit property</button></form>"#,
    ));
}

/// Confirmation shown after a successful submission.
pub(crate) fn thank_you(message: &str, out: &mut String) {
    let message = if message.trim().is_empty() {
        "Thank you! We will get back to you shortly."
    } else {
        message
    };
    write!(
        out,
        r#"<section class="thank-you"><h1>Message sent</h1><p>{}</p><a href="/">Back to home</a></section>"#,
        escape_html(message)
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use estate_api::{ContactForm, Mandate};
    use pretty_assertions::assert_eq;

    use super::*;

    fn contact(name: &str, email: &str, message: &str) -> Submission {
        Submission::Contact(ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
            ..ContactForm::default()
        })
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(validate(&contact("Ana", "ana@example.com", "Hello")), Ok(()));
    }

    #[test]
    fn test_validate_collects_errors() {
        let errors = validate(&contact(" ", "not-an-email", "")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Name is required".to_owned(),
                "Email must be a valid address".to_owned(),
                "Message is required".to_owned(),
            ]
        );
    }

    #[test]
    fn test_validate_mandate() {
        let mandate = Submission::Mandate(Mandate {
            name: "Rui".to_owned(),
            message: "Flat in Porto".to_owned(),
            ..Mandate::default()
        });
        assert_eq!(
            validate(&mandate).unwrap_err(),
            vec!["Email is required".to_owned()]
        );
    }

    #[test]
    fn test_forms_post_to_endpoints() {
        let cities = vec![City::new(1, "Lisbon")];
        let mut out = String::new();
        inquiry_form(&cities, &mut out);
        mandate_form(&cities, &mut out);
        assert!(out.contains(r#"action="/inquiry""#));
        assert!(out.contains(r#"action="/mandate""#));
        assert!(out.contains(r#"name="square_meters""#));
        assert_eq!(out.matches(">Lisbon</option>").count(), 2);
    }

    #[test]
    fn test_thank_you_default_message() {
        let mut out = String::new();
        thank_you("", &mut out);
        assert!(out.contains("We will get back to you shortly."));
    }
}
