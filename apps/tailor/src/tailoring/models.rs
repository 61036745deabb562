//! Tailored resume model — the one record passed from the model to the renderer.
//!
//! The raw reply is kept as a `serde_json::Value` for the JSON artifact.
//! Only the renderer needs the full shape; everything else reads `PostingIdentity`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::AppError;

/// Company and role extracted from the model output. Drives the output path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostingIdentity {
    pub company: String,
    pub job_title: String,
}

impl PostingIdentity {
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        serde_json::from_value(value.clone()).map_err(|e| {
            AppError::MalformedOutput(format!(
                "reply must carry string `company` and `job_title` fields: {e}"
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TailoredResume {
    pub job_title: String,
    pub meta: Meta,
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "skill_groups")]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl TailoredResume {
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        serde_json::from_value(value.clone())
            .map_err(|e| AppError::MalformedOutput(format!("tailored resume shape: {e}")))
    }
}

/// Header block: name, headline and contact details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub name: String,
    pub title: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub relocation: Option<String>,
}

impl Meta {
    /// Contact fields in display order, skipping absent or blank ones.
    pub fn contact_parts(&self) -> Vec<&str> {
        [
            &self.location,
            &self.phone,
            &self.email,
            &self.linkedin,
            &self.github,
            &self.relocation,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|s| !s.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// One labelled skills line, e.g. `languages: [Rust, Go]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub degree: String,
    pub honors: Option<String>,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    pub start: String,
    pub end: String,
}

/// Reads the `skills` object in document order.
fn skill_groups<'de, D>(deserializer: D) -> Result<Vec<SkillGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkillGroupsVisitor;

    impl<'de> Visitor<'de> for SkillGroupsVisitor {
        type Value = Vec<SkillGroup>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping skill labels to lists of skills")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut groups = Vec::new();
            while let Some((label, items)) = map.next_entry::<String, Vec<String>>()? {
                groups.push(SkillGroup { label, items });
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_map(SkillGroupsVisitor)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A complete reply in the shape the tailoring prompt asks for.
    pub fn tailored_value() -> Value {
        json!({
            "company": "Acme Robotics, Inc.",
            "job_title": "Senior Rust Engineer (Platform)",
            "meta": {
                "name": "Jane Doe",
                "title": "Systems Engineer",
                "location": "Portland, OR",
                "email": "jane@example.com",
                "github": "github.com/janedoe"
            },
            "summary": "Systems engineer with eight years building reliable backends & tooling.",
            "experience": [
                {
                    "title": "Staff Engineer",
                    "company": "Widget Co",
                    "location": "Remote",
                    "start": "Jan 2021",
                    "end": "Present",
                    "bullets": [
                        "Built a Rust ingestion service handling 40k events/s",
                        "Cut p99 latency by 35% with <zero-copy> parsing"
                    ]
                }
            ],
            "skills": {
                "languages": ["Rust", "Python"],
                "cloud infrastructure": ["AWS", "Terraform"],
                "databases": ["Postgres"]
            },
            "projects": [
                {
                    "name": "tinykv",
                    "tech": ["Rust", "Raft"],
                    "description": "Embedded replicated key-value store."
                }
            ],
            "education": [
                {
                    "degree": "B.S. Computer Science",
                    "honors": "Magna Cum Laude",
                    "institution": "State University",
                    "location": "Corvallis, OR",
                    "start": "2012",
                    "end": "2016"
                }
            ]
        })
    }
}
