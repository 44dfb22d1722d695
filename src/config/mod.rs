//! Configuration module

mod site;

pub use site::{
    AboutConfig, Achievement, Experience, ServerConfig, SiteConfig, Skill, SocialLink,
    CONFIG_FILE,
};
