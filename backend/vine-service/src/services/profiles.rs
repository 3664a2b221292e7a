/// Profile service - upsert, reads and experience/education list edits
use crate::db::ProfileRepository;
use crate::error::{AppError, FieldError, Result};
use crate::models::{
    EducationRequest, ExperienceRequest, NewEducation, NewExperience, Profile, ProfileFields,
    UpsertProfileRequest,
};
use std::sync::Arc;
use uuid::Uuid;

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

fn no_profile() -> AppError {
    AppError::BadRequest(NO_PROFILE.to_string())
}

fn missing_from() -> AppError {
    AppError::Validation(vec![FieldError::new("from", "From date is required")])
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Create or update the caller's profile. Absent fields keep their stored value.
    pub async fn upsert(&self, user_id: Uuid, req: UpsertProfileRequest) -> Result<Profile> {
        let fields = ProfileFields::from(req);

        let mut errors = Vec::new();
        if fields.skills.is_none() {
            errors.push(FieldError::new("skills", "Skills is required"));
        }
        if fields.status.is_none() {
            errors.push(FieldError::new("status", "Status is required"));
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let profile = self.profiles.upsert_profile(user_id, fields).await?;
        tracing::debug!(%user_id, profile_id = %profile.id, "profile saved");
        Ok(profile)
    }

    pub async fn my_profile(&self, user_id: Uuid) -> Result<Profile> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(no_profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.list_profiles().await
    }

    pub async fn profile_by_user(&self, user_id: Uuid) -> Result<Profile> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(PROFILE_NOT_FOUND.to_string()))
    }

    /// Prepend an experience entry and return the updated profile
    pub async fn add_experience(&self, user_id: Uuid, req: ExperienceRequest) -> Result<Profile> {
        let entry = NewExperience::from_request(req).ok_or_else(missing_from)?;

        if !self.profiles.add_experience(user_id, entry).await? {
            return Err(no_profile());
        }
        self.my_profile(user_id).await
    }

    /// Remove one experience entry. An id that matches nothing leaves the profile as is.
    pub async fn remove_experience(&self, user_id: Uuid, entry_id: Uuid) -> Result<Profile> {
        self.profiles.remove_experience(user_id, entry_id).await?;
        self.my_profile(user_id).await
    }

    pub async fn add_education(&self, user_id: Uuid, req: EducationRequest) -> Result<Profile> {
        let entry = NewEducation::from_request(req).ok_or_else(missing_from)?;

        if !self.profiles.add_education(user_id, entry).await? {
            return Err(no_profile());
        }
        self.my_profile(user_id).await
    }

    pub async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<Profile> {
        self.profiles.remove_education(user_id, entry_id).await?;
        self.my_profile(user_id).await
    }

    /// Delete the caller's profile and account. Their posts stay.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        self.profiles.delete_account(user_id).await?;
        tracing::info!(%user_id, "account deleted");
        Ok(())
    }
}
