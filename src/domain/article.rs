use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Normalized provider output, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCandidate {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub external_id: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub language: String,
    pub country: Option<String>,
    pub source_id: i64,
}

impl ArticleCandidate {
    pub fn new(source_id: i64, external_id: String, title: String, url: String) -> Self {
        Self {
            title,
            description: None,
            content: None,
            url,
            image_url: None,
            published_at: Utc::now(),
            external_id,
            author: None,
            category: None,
            language: "en".to_string(),
            country: None,
            source_id,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_locale(mut self, language: String, country: Option<String>) -> Self {
        self.language = language;
        self.country = country;
        self
    }
}

/// Stable external ID for providers that don't supply one
pub fn url_hash(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

/// Parse a provider timestamp, falling back to the current time
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`) and the space-separated
/// `2024-01-15 10:30:00` form, which is taken as UTC.
pub fn parse_published(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                    .map(|naive| naive.and_utc())
                    .ok()
            })
    })
    .unwrap_or_else(Utc::now)
}

/// Persisted article with resolved relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source_id: i64,
    pub external_id: String,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl Article {
    pub fn from_candidate(
        candidate: &ArticleCandidate,
        category_id: Option<i64>,
        author_id: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            title: candidate.title.clone(),
            description: candidate.description.clone(),
            content: candidate.content.clone(),
            url: candidate.url.clone(),
            image_url: candidate.image_url.clone(),
            published_at: candidate.published_at,
            source_id: candidate.source_id,
            external_id: candidate.external_id.clone(),
            author_id,
            category_id,
            language: Some(candidate.language.clone()),
            country: candidate.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// URL slug for a category name: lowercase alphanumerics joined by single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_url_hash_is_deterministic() {
        let a = url_hash("https://example.com/story");
        let b = url_hash("https://example.com/story");
        let c = url_hash("https://example.com/other");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_parse_published_rfc3339() {
        let parsed = parse_published(Some("2024-01-15T10:30:00Z"));
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_published_space_separated() {
        let parsed = parse_published(Some("2024-01-15 10:30:00"));
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_published_falls_back_to_now() {
        let before = Utc::now();
        let parsed = parse_published(Some("yesterday-ish"));
        assert!(parsed >= before);

        let parsed = parse_published(None);
        assert!(parsed >= before);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Technology"), "technology");
        assert_eq!(slugify("US News"), "us-news");
        assert_eq!(slugify("  Life & Style! "), "life-style");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_article_from_candidate_keeps_fields() {
        let candidate = ArticleCandidate::new(
            7,
            "ext-1".to_string(),
            "Title".to_string(),
            "https://example.com/a".to_string(),
        )
        .with_description(Some("Desc".to_string()))
        .with_locale("en".to_string(), Some("gb".to_string()));

        let article = Article::from_candidate(&candidate, Some(3), None);

        assert_eq!(article.id, None);
        assert_eq!(article.source_id, 7);
        assert_eq!(article.external_id, "ext-1");
        assert_eq!(article.category_id, Some(3));
        assert_eq!(article.author_id, None);
        assert_eq!(article.country.as_deref(), Some("gb"));
    }
}
