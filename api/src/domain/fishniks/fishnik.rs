use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Fishnik {
    pub id: Uuid,
    pub name: String,
    pub year: Option<i32>,
    pub orientation: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FishnikError {
    #[error("name is required")]
    MissingName,
    #[error("name must not be blank")]
    BlankName,
    #[error("orientation must be a boolean")]
    NullOrientation,
}

/// Validated input for a fishnik that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFishnik {
    pub name: String,
    pub year: Option<i32>,
    pub orientation: bool,
}

impl NewFishnik {
    pub fn new(
        name: Option<String>,
        year: Option<i32>,
        orientation: Option<bool>,
    ) -> Result<Self, FishnikError> {
        let name = normalize_name(name.ok_or(FishnikError::MissingName)?)?;
        Ok(Self {
            name,
            year,
            orientation: orientation.unwrap_or(false),
        })
    }
}

/// Partial replacement. `None` leaves a field untouched; `year: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FishnikPatch {
    pub name: Option<String>,
    pub year: Option<Option<i32>>,
    pub orientation: Option<bool>,
}

impl FishnikPatch {
    pub fn with_name(mut self, name: Option<String>) -> Result<Self, FishnikError> {
        self.name = Some(normalize_name(name.ok_or(FishnikError::MissingName)?)?);
        Ok(self)
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_orientation(mut self, orientation: Option<bool>) -> Result<Self, FishnikError> {
        self.orientation = Some(orientation.ok_or(FishnikError::NullOrientation)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.year.is_none() && self.orientation.is_none()
    }

    pub fn apply(&self, target: &mut Fishnik) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(year) = self.year {
            target.year = year;
        }
        if let Some(orientation) = self.orientation {
            target.orientation = orientation;
        }
    }
}

fn normalize_name(raw: String) -> Result<String, FishnikError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FishnikError::BlankName);
    }
    Ok(trimmed.to_string())
}
