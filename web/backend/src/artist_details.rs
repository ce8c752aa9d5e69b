use crate::models::ArtistDetailResponse;
use agency_core::{Artist, CareerGroups, group_careers};

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Shapes a loaded artist for the profile page.
pub fn build_detail_response(artist: Artist) -> ArtistDetailResponse {
    let careers = artist.careers.unwrap_or_default();
    let career_count = careers.len();
    let CareerGroups { featured, regular } = group_careers(&careers);

    ArtistDetailResponse {
        id: artist.id,
        slug: artist.slug,
        name_ko: artist.name_ko,
        name_en: non_empty(artist.name_en),
        profile_image: non_empty(artist.profile_image),
        artist_type: artist.artist_type,
        featured_careers: featured,
        careers: regular,
        career_count,
    }
}
