use std::collections::HashMap;

use url::Url;

use crate::database::models::Project;
use crate::database::project_store::ProjectStore;
use crate::error::ApiError;

const MAX_TITLE_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;

/// Fully specified input for creating a project. The stored image filename
/// is supplied separately by the upload boundary.
#[derive(Debug)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub github: String,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();

        check_text(&mut errors, "title", &self.title, MAX_TITLE_LEN);
        check_text(&mut errors, "description", &self.description, MAX_DESCRIPTION_LEN);
        check_not_empty(&mut errors, "category", &self.category);
        check_url(&mut errors, "link", &self.link);
        check_url(&mut errors, "github", &self.github);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation("Invalid input", Some(errors)))
        }
    }
}

/// Partial update. Absent fields are the only no-op signal: a field that is
/// present but empty fails validation, so "clear to empty string" cannot be
/// expressed through this type.
#[derive(Debug, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub github: Option<String>,
    /// Server-generated stored filename when a new file accompanied the patch
    pub image: Option<String>,
}

impl ProjectPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();

        if let Some(title) = &self.title {
            check_text(&mut errors, "title", title, MAX_TITLE_LEN);
        }
        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, MAX_DESCRIPTION_LEN);
        }
        if let Some(category) = &self.category {
            check_not_empty(&mut errors, "category", category);
        }
        if let Some(link) = &self.link {
            check_url(&mut errors, "link", link);
        }
        if let Some(github) = &self.github {
            check_url(&mut errors, "github", github);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation("Invalid input", Some(errors)))
        }
    }

    /// Merge present fields into an existing record, leaving the rest untouched
    pub fn apply(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(category) = &self.category {
            project.category = category.clone();
        }
        if let Some(link) = &self.link {
            project.link = link.clone();
        }
        if let Some(github) = &self.github {
            project.github = github.clone();
        }
        if let Some(image) = &self.image {
            project.image = image.clone();
        }
    }
}

// Limits are specified in characters, not bytes, so multibyte input inside
// the documented bounds must pass.
fn check_text(errors: &mut HashMap<String, String>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{} must not be empty", field));
    } else if value.chars().count() > max {
        errors.insert(field.to_string(), format!("{} must be at most {} characters", field, max));
    }
}

fn check_not_empty(errors: &mut HashMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{} must not be empty", field));
    }
}

fn check_url(errors: &mut HashMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{} must not be empty", field));
    } else if Url::parse(value).is_err() {
        errors.insert(field.to_string(), format!("{} must be a valid URL", field));
    }
}

/// Ids are positive integers; anything else is rejected before the store is
/// touched.
fn validate_id(id: i64) -> Result<(), ApiError> {
    if id <= 0 {
        return Err(ApiError::bad_request("id must be a positive integer"));
    }
    Ok(())
}

/// Validated create/read/update/delete over the project store. Stateless per
/// request; each call is an independent request/response cycle.
#[derive(Clone)]
pub struct ProjectService {
    store: ProjectStore,
}

impl ProjectService {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Persist a new project. The caller has already validated the input and
    /// stored the uploaded image.
    pub async fn create(&self, input: &NewProject, image: &str) -> Result<Project, ApiError> {
        let project = self
            .store
            .insert(&input.title, &input.description, image, &input.category, &input.link, &input.github)
            .await?;

        Ok(project)
    }

    /// All projects, newest first. An empty portfolio is a success, not an
    /// error.
    pub async fn find_all(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> Result<Project, ApiError> {
        validate_id(id)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))
    }

    /// Load, merge, save. There is no transaction around the sequence, so
    /// concurrent updates to the same id are last-write-wins.
    pub async fn update(&self, id: i64, patch: &ProjectPatch) -> Result<Project, ApiError> {
        validate_id(id)?;

        let mut project = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))?;

        patch.apply(&mut project);

        Ok(self.store.save(&project).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        validate_id(id)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))?;

        self.store.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_project() -> NewProject {
        NewProject {
            title: "A".to_string(),
            description: "B".to_string(),
            category: "C".to_string(),
            link: "https://x".to_string(),
            github: "https://y".to_string(),
        }
    }

    fn existing_project() -> Project {
        Project {
            id: 1,
            title: "old title".to_string(),
            description: "old description".to_string(),
            image: "old-123-456.png".to_string(),
            category: "web".to_string(),
            link: "https://example.com".to_string(),
            github: "https://github.com/example".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(new_project().validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut input = new_project();
        input.title = "  ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let mut input = new_project();
        input.title = "t".repeat(MAX_TITLE_LEN + 1);
        assert!(input.validate().is_err());

        let mut input = new_project();
        input.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn multibyte_fields_count_characters_not_bytes() {
        // 60 characters but 120 bytes; still inside the 100-character limit
        let mut input = new_project();
        input.title = "é".repeat(60);
        assert!(input.validate().is_ok());

        let mut input = new_project();
        input.title = "é".repeat(MAX_TITLE_LEN + 1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn category_has_no_length_cap() {
        let mut input = new_project();
        input.category = "c".repeat(200);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn non_url_link_is_rejected() {
        let mut input = new_project();
        input.link = "not a url".to_string();
        let err = input.validate().unwrap_err();
        match err {
            ApiError::Validation { field_errors: Some(fields), .. } => {
                assert!(fields.contains_key("link"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn patch_with_only_title_leaves_other_fields_untouched() {
        let mut project = existing_project();
        let before = project.clone();

        let patch = ProjectPatch { title: Some("X".to_string()), ..Default::default() };
        patch.apply(&mut project);

        assert_eq!(project.title, "X");
        assert_eq!(project.description, before.description);
        assert_eq!(project.category, before.category);
        assert_eq!(project.link, before.link);
        assert_eq!(project.github, before.github);
        assert_eq!(project.image, before.image);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut project = existing_project();
        let before = project.clone();

        ProjectPatch::default().apply(&mut project);

        assert_eq!(project.title, before.title);
        assert_eq!(project.image, before.image);
    }

    #[test]
    fn patch_image_overwrites_stored_filename() {
        let mut project = existing_project();

        let patch = ProjectPatch { image: Some("new-789-012.png".to_string()), ..Default::default() };
        patch.apply(&mut project);

        assert_eq!(project.image, "new-789-012.png");
    }

    #[test]
    fn patch_rejects_present_but_empty_fields() {
        let patch = ProjectPatch { description: Some(String::new()), ..Default::default() };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn non_positive_ids_fail_before_the_store() {
        assert_eq!(validate_id(0).unwrap_err().status_code(), 400);
        assert_eq!(validate_id(-3).unwrap_err().status_code(), 400);
        assert!(validate_id(1).is_ok());
    }
}
