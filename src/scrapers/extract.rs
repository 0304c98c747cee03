use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use validator::ValidateEmail;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref BODY_SELECTOR: Selector = Selector::parse("body").unwrap();
}

/// Visible text under `<body>`, one space between text nodes
pub fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&BODY_SELECTOR)
        .flat_map(|body| body.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First email-looking string in the page body, if it is a valid address
pub fn extract_email(html: &str) -> Option<String> {
    let text = body_text(html);
    let candidate = EMAIL_REGEX.find(&text)?.as_str().to_string();

    if candidate.validate_email() {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_email_in_footer() {
        let html = r#"
            <html><head><title>Hôtel des Arts</title></head>
            <body>
                <h1>Bienvenue</h1>
                <footer><p>Contact : <a href="mailto:reservation@hoteldesarts.fr">reservation@hoteldesarts.fr</a></p></footer>
            </body></html>
        "#;

        assert_eq!(
            extract_email(html).as_deref(),
            Some("reservation@hoteldesarts.fr")
        );
    }

    #[test]
    fn ignores_addresses_outside_body() {
        let html = r#"
            <html><head><meta name="author" content="webmaster@agency.com"></head>
            <body><p>No contact details here.</p></body></html>
        "#;

        assert_eq!(extract_email(html), None);
    }

    #[test]
    fn returns_first_match_only() {
        let html = "<body><p>info@first.com</p><p>sales@second.com</p></body>";
        assert_eq!(extract_email(html).as_deref(), Some("info@first.com"));
    }

    #[test]
    fn text_nodes_do_not_run_together() {
        let html = "<body><span>Email</span><span>desk@hostel.eu</span></body>";

        assert_eq!(body_text(html), "Email desk@hostel.eu");
        assert_eq!(extract_email(html).as_deref(), Some("desk@hostel.eu"));
    }

    #[test]
    fn pipe_is_not_part_of_the_domain_suffix() {
        let html = "<body>write to a@b.c|m today</body>";
        assert_eq!(extract_email(html), None);
    }

    #[test]
    fn rejects_match_that_fails_validation() {
        // Matches the pattern but has an empty domain label
        let html = "<body>contact: front@desk..com</body>";
        assert_eq!(extract_email(html), None);
    }
}
