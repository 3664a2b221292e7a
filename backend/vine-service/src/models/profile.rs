use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Owner details attached to every profile read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(rename = "from")]
    pub from_date: NaiveDate,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    #[serde(rename = "from")]
    pub from_date: NaiveDate,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Profile as returned to clients; experience and education are newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub user: ProfileUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/profile`. Skills arrive as one comma-separated string.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,
    pub githubusername: Option<String>,
    #[validate(
        required(message = "Skills is required"),
        length(min = 1, message = "Skills is required")
    )]
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Fields to write on upsert. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated skills string into trimmed, non-empty entries
pub fn normalize_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<UpsertProfileRequest> for ProfileFields {
    fn from(req: UpsertProfileRequest) -> Self {
        Self {
            company: present(req.company),
            website: present(req.website),
            location: present(req.location),
            bio: present(req.bio),
            status: present(req.status),
            githubusername: present(req.githubusername),
            skills: req
                .skills
                .as_deref()
                .map(normalize_skills)
                .filter(|skills| !skills.is_empty()),
            youtube: present(req.youtube),
            twitter: present(req.twitter),
            facebook: present(req.facebook),
            linkedin: present(req.linkedin),
            instagram: present(req.instagram),
        }
    }
}

/// Accepts `YYYY-MM-DD`, a full RFC 3339 timestamp, or an empty string (no date)
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let raw = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EducationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "School is required"))]
    pub school: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Degree is required"))]
    pub degree: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field of study is required"))]
    pub fieldofstudy: String,
    #[serde(default, deserialize_with = "lenient_date")]
    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Experience entry ready to be prepended, id already assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from_date: NaiveDate,
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEducation {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from_date: NaiveDate,
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl NewExperience {
    /// Returns `None` when the mandatory start date is missing
    pub fn from_request(req: ExperienceRequest) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            from_date: req.from?,
            title: req.title,
            company: req.company,
            location: present(req.location),
            to_date: req.to,
            current: req.current,
            description: present(req.description),
        })
    }

    pub fn into_entry(self) -> Experience {
        Experience {
            id: self.id,
            title: self.title,
            company: self.company,
            location: self.location,
            from_date: self.from_date,
            to_date: self.to_date,
            current: self.current,
            description: self.description,
        }
    }
}

impl NewEducation {
    pub fn from_request(req: EducationRequest) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            from_date: req.from?,
            school: req.school,
            degree: req.degree,
            fieldofstudy: req.fieldofstudy,
            to_date: req.to,
            current: req.current,
            description: present(req.description),
        })
    }

    pub fn into_entry(self) -> Education {
        Education {
            id: self.id,
            school: self.school,
            degree: self.degree,
            fieldofstudy: self.fieldofstudy,
            from_date: self.from_date,
            to_date: self.to_date,
            current: self.current,
            description: self.description,
        }
    }
}
