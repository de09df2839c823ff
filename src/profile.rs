//! Profile page: the professional profile served by `/api/profile-data`.
//!
//! Sections rendered, in order: summary, contact (already masked by the
//! backend), experience stories, skills, projects, methodology stories.

use std::sync::Arc;

use serde_json::Value;

use crate::api::Backend;
use crate::ask::ERROR_TEXT;
use crate::models::{ExperienceStory, ProfileData};
use crate::outcome::Outcome;
use crate::ui::escape::escape_html;
use crate::ui::{Feedback, Severity, Skeleton};
use crate::view::{ids, ElementId, View};

const SUMMARY_FIELDS: &[&str] = &["name", "title", "location", "summary", "elevator_pitch"];

pub struct ProfileController {
    view: Arc<dyn View>,
    backend: Arc<dyn Backend>,
    feedback: Feedback,
    body: ElementId,
}

impl ProfileController {
    pub fn new(view: Arc<dyn View>, backend: Arc<dyn Backend>, feedback: Feedback) -> Self {
        Self {
            view,
            backend,
            feedback,
            body: ElementId::new(ids::PROFILE_BODY),
        }
    }

    pub async fn load(&self) -> Outcome {
        self.feedback.status.set_status("Loading profile...");
        Skeleton::Answer.show(self.view.as_ref(), &self.body);

        let outcome = match self.backend.profile_data().await {
            Ok(profile) => {
                self.view.set_html(&self.body, &render_profile(&profile));
                self.feedback.toasts.toast("Profile loaded.", Severity::Success);
                Outcome::Done
            }
            Err(e) => {
                self.view.set_text(&self.body, ERROR_TEXT);
                self.feedback
                    .toasts
                    .toast("Could not load profile.", Severity::Error);
                Outcome::Failed(e.to_string())
            }
        };

        self.feedback.status.ready();
        outcome
    }
}

pub fn render_profile(profile: &ProfileData) -> String {
    let mut out = String::new();

    let summary: Vec<String> = SUMMARY_FIELDS
        .iter()
        .filter_map(|k| profile.personal.get(*k))
        .map(value_text)
        .filter(|s| !s.is_empty())
        .collect();
    if !summary.is_empty() {
        out.push_str(&section("Summary", &paragraphs(&summary)));
    }

    if !profile.contact.is_empty() {
        let lines: Vec<String> = profile
            .contact
            .iter()
            .map(|(k, v)| format!("{}: {}", k, value_text(v)))
            .collect();
        out.push_str(&section("Contact", &list(&lines)));
    }

    if !profile.experience_stories.is_empty() {
        let stories: String = profile.experience_stories.iter().map(render_story).collect();
        out.push_str(&section("Experience", &stories));
    }

    if let Some(obj) = profile.skills.as_object() {
        let lines: Vec<String> = obj
            .iter()
            .map(|(k, v)| format!("{}: {}", k.replace('_', " "), value_text(v)))
            .collect();
        if !lines.is_empty() {
            out.push_str(&section("Skills", &list(&lines)));
        }
    }

    if !profile.projects.is_empty() {
        let names: Vec<String> = profile
            .projects
            .iter()
            .map(|p| match p.get("name") {
                Some(name) => value_text(name),
                None => value_text(p),
            })
            .collect();
        out.push_str(&section("Projects", &list(&names)));
    }

    if !profile.methodology_stories.is_empty() {
        let line = format!(
            "{} behavioral stories available.",
            profile.methodology_stories.len()
        );
        out.push_str(&section("Methodology", &paragraphs(&[line])));
    }

    out
}

fn render_story(story: &ExperienceStory) -> String {
    let heading = [&story.role, &story.company, &story.duration]
        .iter()
        .filter_map(|f| f.as_deref())
        .collect::<Vec<_>>()
        .join(" · ");

    let parts = [
        ("Situation", &story.situation),
        ("Task", &story.task),
        ("Action", &story.action),
        ("Result", &story.result),
    ];
    let body: String = parts
        .iter()
        .filter_map(|(label, text)| {
            text.as_deref()
                .map(|t| format!("<p><em>{}:</em> {}</p>", label, escape_html(t)))
        })
        .collect();

    format!(
        r#"<article class="story"><h4>{}</h4>{}</article>"#,
        escape_html(&heading),
        body
    )
}

fn section(title: &str, inner: &str) -> String {
    format!(
        r#"<section class="profile-section"><h3>{}</h3>{}</section>"#,
        title, inner
    )
}

fn paragraphs(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("<p>{}</p>", escape_html(l)))
        .collect()
}

fn list(lines: &[String]) -> String {
    let items: String = lines
        .iter()
        .map(|l| format!("<li>{}</li>", escape_html(l)))
        .collect();
    format!("<ul>{}</ul>", items)
}

/// Flattens a JSON value into display text.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, value_text(v)))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
