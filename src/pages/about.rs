use serde::Serialize;

use super::{Rendered, Site};
use crate::config::{Achievement, Experience, Skill, SocialLink};
use crate::error::Result;

/// Skills listed in the profile side panel
const PANEL_SKILLS: usize = 6;

#[derive(Debug, Serialize)]
struct AboutPage {
    author: String,
    initial: String,
    role: String,
    tagline: String,
    story: Vec<String>,
    location: String,
    status: String,
    hobby: String,
    panel_skills: Vec<Skill>,
    skills: Vec<Skill>,
    experiences: Vec<Experience>,
    achievements: Vec<Achievement>,
    social: Vec<SocialLink>,
}

pub fn about(site: &Site) -> Result<Rendered> {
    let config = site.config;
    let about = &config.about;
    let skills = config.clamped_skills();

    let page = AboutPage {
        author: config.author.clone(),
        initial: config
            .author
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default(),
        role: about.role.clone(),
        tagline: about.tagline.clone(),
        story: about.story.clone(),
        location: about.location.clone(),
        status: about.status.clone(),
        hobby: about.hobby.clone(),
        panel_skills: skills.iter().take(PANEL_SKILLS).cloned().collect(),
        skills,
        experiences: about.experiences.clone(),
        achievements: about.achievements.clone(),
        social: config.social.clone(),
    };

    site.render("about.html", &site.t("about_title"), "/about", &page, 200)
}
