use crate::models::{Career, CareerType, MAX_FEATURED_POSITION};
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CareerError {
    #[error("featured position {0} is outside 1..={MAX_FEATURED_POSITION}")]
    InvalidPosition(u8),
    #[error("{career_type:?} position {position} is already held by career {existing_id}")]
    PositionTaken {
        career_type: CareerType,
        position: u8,
        existing_id: String,
    },
}

/// Careers split the way the profile page shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CareerGroups {
    /// Ordered by career type, then position.
    pub featured: Vec<Career>,
    /// In the order they were fetched (newest first).
    pub regular: Vec<Career>,
}

/// Rejects a career set in which two careers of the same type share a
/// featured position, or a position falls outside 1..=4.
pub fn validate_featured(careers: &[Career]) -> Result<(), CareerError> {
    let mut taken: FxHashMap<(CareerType, u8), &str> = FxHashMap::default();

    for career in careers {
        let Some(position) = career.featured_position else {
            continue;
        };
        if !(1..=MAX_FEATURED_POSITION).contains(&position) {
            return Err(CareerError::InvalidPosition(position));
        }
        if let Some(existing_id) = taken.insert((career.career_type, position), &career.id) {
            return Err(CareerError::PositionTaken {
                career_type: career.career_type,
                position,
                existing_id: existing_id.to_string(),
            });
        }
    }

    Ok(())
}

/// Keeps the first career per (type, position) featured and turns later
/// collisions and out-of-range positions into regular careers.
///
/// Input is expected newest first, so the newest career wins a slot.
pub fn demote_collisions(careers: Vec<Career>) -> Vec<Career> {
    let mut taken: FxHashMap<(CareerType, u8), String> = FxHashMap::default();

    careers
        .into_iter()
        .map(|mut career| {
            match career.featured_slot() {
                Some(position) => {
                    if let Some(holder) = taken.get(&(career.career_type, position)) {
                        tracing::warn!(
                            career = %career.id,
                            holder = %holder,
                            position,
                            "featured position collision, showing career as regular"
                        );
                        career.featured_position = None;
                    } else {
                        taken.insert((career.career_type, position), career.id.clone());
                    }
                }
                None => career.featured_position = None,
            }
            career
        })
        .collect()
}

pub fn group_careers(careers: &[Career]) -> CareerGroups {
    let (mut featured, regular): (Vec<Career>, Vec<Career>) = demote_collisions(careers.to_vec())
        .into_iter()
        .partition(Career::is_featured);

    featured.sort_by_key(|career| (career.career_type.as_str(), career.featured_position));

    CareerGroups { featured, regular }
}
