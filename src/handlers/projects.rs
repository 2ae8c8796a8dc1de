use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::services::project::{NewProject, ProjectPatch};
use crate::state::AppState;
use crate::uploads::{self, UploadedImage};

use crate::database::models::Project;

/// Multipart fields shared by create and update. `image` is buffered in
/// memory and only written to disk once validation has passed.
#[derive(Default)]
struct ProjectForm {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    link: Option<String>,
    github: Option<String>,
    image: Option<UploadedImage>,
}

async fn read_form(multipart: &mut Multipart) -> Result<ProjectForm, ApiError> {
    let mut form = ProjectForm::default();

    while let Some(field) =
        multipart.next_field().await.map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                // A plain text part is not a file upload
                let Some(original_name) = field.file_name().map(str::to_string) else {
                    let mut errors = HashMap::new();
                    errors.insert("image".to_string(), "image must be a file upload".to_string());
                    return Err(ApiError::validation("Invalid input", Some(errors)));
                };
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?
                    .to_vec();
                form.image = Some(UploadedImage { original_name, data });
            }
            "title" | "description" | "category" | "link" | "github" => {
                let value =
                    field.text().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
                match name.as_str() {
                    "title" => form.title = Some(value),
                    "description" => form.description = Some(value),
                    "category" => form.category = Some(value),
                    "link" => form.link = Some(value),
                    "github" => form.github = Some(value),
                    _ => unreachable!(),
                }
            }
            // Unknown properties are rejected rather than silently dropped
            other => {
                let mut errors = HashMap::new();
                errors.insert(other.to_string(), format!("property {} should not exist", other));
                return Err(ApiError::validation("Invalid input", Some(errors)));
            }
        }
    }

    Ok(form)
}

impl ProjectForm {
    /// Create requires every text field to be present
    fn into_new_project(self) -> Result<(NewProject, Option<UploadedImage>), ApiError> {
        let mut errors = HashMap::new();

        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("link", &self.link),
            ("github", &self.github),
        ] {
            if value.is_none() {
                errors.insert(field.to_string(), format!("{} is required", field));
            }
        }

        if !errors.is_empty() {
            return Err(ApiError::validation("Invalid input", Some(errors)));
        }

        let input = NewProject {
            title: self.title.unwrap(),
            description: self.description.unwrap(),
            category: self.category.unwrap(),
            link: self.link.unwrap(),
            github: self.github.unwrap(),
        };

        Ok((input, self.image))
    }

    /// Update takes whatever fields were supplied
    fn into_patch(self) -> (ProjectPatch, Option<UploadedImage>) {
        (
            ProjectPatch {
                title: self.title,
                description: self.description,
                category: self.category,
                link: self.link,
                github: self.github,
                image: None,
            },
            self.image,
        )
    }
}

/// POST /projects - create a project from a multipart form with an image file
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ApiResponse<Project>, ApiError> {
    let form = read_form(&mut multipart).await?;
    let (input, image) = form.into_new_project()?;

    let image = image.ok_or_else(|| ApiError::bad_request("Image file is required"))?;

    input.validate()?;

    let stored = uploads::store_image(&state.config.uploads.dir, &image).await?;
    let project = state.projects.create(&input, &stored).await?;

    tracing::info!("Created project {} ({})", project.id, project.title);
    Ok(ApiResponse::created("Project created successfully", project))
}

/// GET /projects - all projects, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = state.projects.find_all().await?;

    let message =
        if projects.is_empty() { "No projects found" } else { "Projects fetched successfully" };

    Ok(Json(json!({
        "success": true,
        "message": message,
        "data": projects,
        "count": projects.len(),
    })))
}

/// GET /projects/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Project>, ApiError> {
    let project = state.projects.find_one(id).await?;
    Ok(ApiResponse::ok("Project fetched successfully", project))
}

/// PATCH /projects/:id - partial update; only supplied fields overwrite, and
/// a newly uploaded file replaces the stored image
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<ApiResponse<Project>, ApiError> {
    let form = read_form(&mut multipart).await?;
    let (mut patch, image) = form.into_patch();

    patch.validate()?;

    if let Some(image) = image {
        patch.image = Some(uploads::store_image(&state.config.uploads.dir, &image).await?);
    }

    let project = state.projects.update(id, &patch).await?;

    tracing::info!("Updated project {}", project.id);
    Ok(ApiResponse::ok("Project updated successfully", project))
}

/// DELETE /projects/:id - admin-role only (enforced by route middleware)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ApiError> {
    state.projects.remove(id).await?;

    tracing::info!("Deleted project {}", id);
    Ok(ApiResponse::message_only("Project deleted successfully"))
}
