use super::ProfileRepository;
use crate::error::{AppError, Result};
use crate::models::{
    Education, Experience, NewEducation, NewExperience, Profile, ProfileFields, ProfileUser,
    SocialLinks,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_avatar: String,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: String,
    githubusername: Option<String>,
    skills: Vec<String>,
    youtube: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    profile_id: Uuid,
    #[sqlx(flatten)]
    entry: Experience,
}

#[derive(sqlx::FromRow)]
struct EducationRow {
    profile_id: Uuid,
    #[sqlx(flatten)]
    entry: Education,
}

const PROFILE_SELECT: &str = r#"
    SELECT p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
           p.company, p.website, p.location, p.bio, p.status, p.githubusername, p.skills,
           p.youtube, p.twitter, p.facebook, p.linkedin, p.instagram, p.created_at
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

fn is_missing_user(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach experience and education entries to the fetched profile rows
    async fn hydrate(&self, rows: Vec<ProfileRow>) -> Result<Vec<Profile>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let experience = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT profile_id, id, title, company, location, from_date, to_date, current, description
            FROM profile_experience
            WHERE profile_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let education = sqlx::query_as::<_, EducationRow>(
            r#"
            SELECT profile_id, id, school, degree, fieldofstudy, from_date, to_date, current, description
            FROM profile_education
            WHERE profile_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut experience_by_profile: HashMap<Uuid, Vec<Experience>> = HashMap::new();
        for row in experience {
            experience_by_profile.entry(row.profile_id).or_default().push(row.entry);
        }
        let mut education_by_profile: HashMap<Uuid, Vec<Education>> = HashMap::new();
        for row in education {
            education_by_profile.entry(row.profile_id).or_default().push(row.entry);
        }

        Ok(rows
            .into_iter()
            .map(|row| Profile {
                experience: experience_by_profile.remove(&row.id).unwrap_or_default(),
                education: education_by_profile.remove(&row.id).unwrap_or_default(),
                id: row.id,
                user: ProfileUser {
                    id: row.user_id,
                    name: row.user_name,
                    avatar: row.user_avatar,
                },
                company: row.company,
                website: row.website,
                location: row.location,
                bio: row.bio,
                status: row.status,
                githubusername: row.githubusername,
                skills: row.skills,
                social: SocialLinks {
                    youtube: row.youtube,
                    twitter: row.twitter,
                    facebook: row.facebook,
                    linkedin: row.linkedin,
                    instagram: row.instagram,
                },
                created_at: row.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn upsert_profile(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile> {
        // NULL parameters keep whatever is stored; only present fields overwrite
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (
                id, user_id, company, website, location, bio, status, githubusername, skills,
                youtube, twitter, facebook, linkedin, instagram
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, COALESCE($7, ''), $8, COALESCE($9, '{}'::text[]),
                $10, $11, $12, $13, $14
            )
            ON CONFLICT (user_id) DO UPDATE SET
                company = COALESCE($3, profiles.company),
                website = COALESCE($4, profiles.website),
                location = COALESCE($5, profiles.location),
                bio = COALESCE($6, profiles.bio),
                status = COALESCE($7, profiles.status),
                githubusername = COALESCE($8, profiles.githubusername),
                skills = COALESCE($9, profiles.skills),
                youtube = COALESCE($10, profiles.youtube),
                twitter = COALESCE($11, profiles.twitter),
                facebook = COALESCE($12, profiles.facebook),
                linkedin = COALESCE($13, profiles.linkedin),
                instagram = COALESCE($14, profiles.instagram),
                updated_at = clock_timestamp()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&fields.company)
        .bind(&fields.website)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.status)
        .bind(&fields.githubusername)
        .bind(&fields.skills)
        .bind(&fields.youtube)
        .bind(&fields.twitter)
        .bind(&fields.facebook)
        .bind(&fields.linkedin)
        .bind(&fields.instagram)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            // A token can outlive its account; the insert then trips profiles_user_id_fkey
            Err(err) if is_missing_user(&err) => {
                return Err(AppError::NotFound("User not found".to_string()))
            }
            Err(err) => return Err(err.into()),
        }

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("profile for {} vanished after upsert", user_id)))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{} WHERE p.user_id = $1", PROFILE_SELECT))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!("{} ORDER BY p.created_at DESC", PROFILE_SELECT))
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn add_experience(&self, user_id: Uuid, entry: NewExperience) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO profile_experience (
                id, profile_id, title, company, location, from_date, to_date, current, description
            )
            SELECT $2, p.id, $3, $4, $5, $6, $7, $8, $9
            FROM profiles p
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(entry.id)
        .bind(&entry.title)
        .bind(&entry.company)
        .bind(&entry.location)
        .bind(entry.from_date)
        .bind(entry.to_date)
        .bind(entry.current)
        .bind(&entry.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_experience(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM profile_experience e
            USING profiles p
            WHERE e.profile_id = p.id AND p.user_id = $1 AND e.id = $2
            "#,
        )
        .bind(user_id)
        .bind(entry_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(%user_id, %entry_id, "experience entry not found; nothing removed");
        }
        Ok(())
    }

    async fn add_education(&self, user_id: Uuid, entry: NewEducation) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO profile_education (
                id, profile_id, school, degree, fieldofstudy, from_date, to_date, current, description
            )
            SELECT $2, p.id, $3, $4, $5, $6, $7, $8, $9
            FROM profiles p
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(entry.id)
        .bind(&entry.school)
        .bind(&entry.degree)
        .bind(&entry.fieldofstudy)
        .bind(entry.from_date)
        .bind(entry.to_date)
        .bind(entry.current)
        .bind(&entry.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM profile_education e
            USING profiles p
            WHERE e.profile_id = p.id AND p.user_id = $1 AND e.id = $2
            "#,
        )
        .bind(user_id)
        .bind(entry_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(%user_id, %entry_id, "education entry not found; nothing removed");
        }
        Ok(())
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
