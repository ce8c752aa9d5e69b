use serde::{Deserialize, Serialize};

/// Role tag stored on an artist profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtistType {
    Choreographer,
    Dancer,
    Instructor,
    Trainee,
    #[default]
    #[serde(other)]
    Other,
}

impl ArtistType {
    /// Types shown on the public artist list.
    pub const PROFESSIONAL: [ArtistType; 3] = [
        ArtistType::Choreographer,
        ArtistType::Dancer,
        ArtistType::Instructor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistType::Choreographer => "choreographer",
            ArtistType::Dancer => "dancer",
            ArtistType::Instructor => "instructor",
            ArtistType::Trainee => "trainee",
            ArtistType::Other => "other",
        }
    }

    pub fn is_professional(&self) -> bool {
        Self::PROFESSIONAL.contains(self)
    }
}

impl From<&str> for ArtistType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "choreographer" => ArtistType::Choreographer,
            "dancer" => ArtistType::Dancer,
            "instructor" => ArtistType::Instructor,
            "trainee" => ArtistType::Trainee,
            _ => ArtistType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CareerType {
    Choreography,
    Performance,
    Broadcast,
    Advertisement,
    Workshop,
    #[default]
    #[serde(other)]
    Other,
}

impl CareerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerType::Choreography => "choreography",
            CareerType::Performance => "performance",
            CareerType::Broadcast => "broadcast",
            CareerType::Advertisement => "advertisement",
            CareerType::Workshop => "workshop",
            CareerType::Other => "other",
        }
    }
}

/// Public-facing artist as served by the cache.
///
/// `id` is the owning user's identifier, not the profile row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub slug: String,
    pub name_ko: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub profile_image: String,
    pub artist_type: ArtistType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub careers: Option<Vec<Career>>,
}

/// Highest position a featured career may occupy.
pub const MAX_FEATURED_POSITION: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    pub id: String,
    #[serde(rename = "type")]
    pub career_type: CareerType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_position: Option<u8>,
}

impl Career {
    /// Position in 1..=4 when the career is highlighted, `None` otherwise.
    pub fn featured_slot(&self) -> Option<u8> {
        self.featured_position
            .filter(|position| (1..=MAX_FEATURED_POSITION).contains(position))
    }

    pub fn is_featured(&self) -> bool {
        self.featured_slot().is_some()
    }
}

/// Artist profile row as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRow {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub name_ko: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub artist_type: ArtistType,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerRow {
    pub id: String,
    pub artist_id: String,
    #[serde(rename = "type", default)]
    pub career_type: CareerType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub featured_position: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<CareerRow> for Career {
    fn from(row: CareerRow) -> Self {
        Career {
            id: row.id,
            career_type: row.career_type,
            title: row.title,
            detail: row.detail.filter(|detail| !detail.trim().is_empty()),
            country: row.country.unwrap_or_default(),
            video_url: row.video_url.unwrap_or_default(),
            featured_position: row
                .featured_position
                .and_then(|position| u8::try_from(position).ok()),
        }
    }
}
