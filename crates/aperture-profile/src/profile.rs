//! Static profile contact data
//!
//! The profile screen renders fixed contact information next to the
//! avatar. Nothing in the avatar workflow mutates it; the `picture` field
//! doubles as the avatar placeholder.

use serde::{Deserialize, Serialize};

use aperture_core::DEFAULT_AVATAR_URL;

/// Contact data shown on the profile screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// ISO-8601 date of birth.
    pub birthday: String,
    pub linkedin: String,
    pub github: String,
    pub languages: Vec<String>,
    /// Remote image used while no captured avatar is persisted.
    pub picture: String,
}

impl Profile {
    /// Fixed sample profile used by demos and tests.
    pub fn sample() -> Self {
        Profile {
            name: "Alex Naismith".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Naismith".to_string(),
            email: "alex.naismith@example.com".to_string(),
            phone: "(555) 010-4477".to_string(),
            birthday: "1990-01-15T00:00:00Z".to_string(),
            linkedin: "https://www.linkedin.com/in/alex-naismith".to_string(),
            github: "https://github.com/anaismith".to_string(),
            languages: vec![
                "English - EN".to_string(),
                "Portuguese - PT".to_string(),
                "Japanese - JA".to_string(),
            ],
            picture: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::sample()
    }
}
