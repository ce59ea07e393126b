//! Server-rendered pages.
//!
//! Templates are compiled into the binary and registered once. Every page
//! shares the `header` and `footer` partials.

use handlebars::{handlebars_helper, Handlebars, RenderError, TemplateError};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::records::format_name;

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("templates/partials/header.hbs")),
    ("footer", include_str!("templates/partials/footer.hbs")),
    ("pagination", include_str!("templates/partials/pagination.hbs")),
    ("flash", include_str!("templates/partials/flash.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("templates/index.hbs")),
    ("about", include_str!("templates/about.hbs")),
    ("dashboard", include_str!("templates/dashboard.hbs")),
    ("email", include_str!("templates/email.hbs")),
    ("login", include_str!("templates/login.hbs")),
    ("users", include_str!("templates/users.hbs")),
    ("participants", include_str!("templates/participants.hbs")),
    ("events", include_str!("templates/events.hbs")),
    ("surveys", include_str!("templates/surveys.hbs")),
    ("milestones", include_str!("templates/milestones.hbs")),
    ("donations", include_str!("templates/donations.hbs")),
    ("add", include_str!("templates/add.hbs")),
    ("edit", include_str!("templates/edit.hbs")),
    ("participant_milestones", include_str!("templates/participant_milestones.hbs")),
    ("view_events", include_str!("templates/view_events.hbs")),
    ("event_surveys", include_str!("templates/event_surveys.hbs")),
    ("visitor_survey", include_str!("templates/visitor_survey.hbs")),
    ("visitor_milestone", include_str!("templates/visitor_milestone.hbs")),
    ("visitor_donate", include_str!("templates/visitor_donate.hbs")),
    ("not_found", include_str!("templates/not_found.hbs")),
];

handlebars_helper!(label: |name: str| format_name(name));
handlebars_helper!(inc: |n: i64| n + 1);
handlebars_helper!(dec: |n: i64| n - 1);

/// The template registry.
#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    /// Compiles every page and partial.
    pub fn new() -> Result<Self, TemplateError> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(false);
        hb.register_helper("format_name", Box::new(label));
        hb.register_helper("inc", Box::new(inc));
        hb.register_helper("dec", Box::new(dec));

        for (name, source) in PARTIALS {
            hb.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            hb.register_template_string(name, *source)?;
        }

        Ok(Self {
            registry: Arc::new(hb),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(name, data)
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views")
            .field("pages", &PAGES.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn views() -> Views {
        Views::new().expect("templates compile")
    }

    #[test]
    fn every_page_is_registered() {
        let views = views();
        for (name, _) in PAGES {
            assert!(views.has_page(name), "{} missing", name);
        }
    }

    #[test]
    fn header_shows_username_when_signed_in() {
        let html = views()
            .render("index", &json!({"username": "kaylee", "is_manager": true}))
            .unwrap();
        assert!(html.contains("kaylee"));
        assert!(html.contains("/logout"));
    }

    #[test]
    fn header_offers_login_when_signed_out() {
        let html = views().render("index", &json!({})).unwrap();
        assert!(html.contains("/login"));
        assert!(!html.contains("/logout"));
    }

    #[test]
    fn column_labels_use_format_name() {
        let html = views()
            .render(
                "add",
                &json!({
                    "table_name": "participant",
                    "entity_name": "Participant",
                    "columns": [
                        {"name": "participantfirstname", "is_required": true, "input": "text",
                         "is_primary": false, "is_auto_increment": false}
                    ]
                }),
            )
            .unwrap();
        assert!(html.contains("Participant First Name"));
        assert!(html.contains("name=\"participantfirstname\""));
    }

    #[test]
    fn messages_are_html_escaped() {
        let html = views()
            .render("login", &json!({"error": "<script>x</script>"}))
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn pagination_links_keep_search() {
        let html = views()
            .render(
                "participants",
                &json!({
                    "search": "ana",
                    "page_base": "/participants?search=ana&",
                    "page": {"items": [], "current_page": 2, "per_page": 10,
                             "total_records": 30, "total_pages": 3}
                }),
            )
            .unwrap();
        assert!(html.contains("/participants?search=ana&page=1"));
        assert!(html.contains("/participants?search=ana&page=3"));
        assert!(html.contains("Page 2 of 3"));
    }
}
