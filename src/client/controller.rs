use std::sync::Arc;

use log::warn;

use crate::client::api::{ApiError, PostApi};
use crate::client::state::{EditField, PostListState};
use crate::post::post_model::{Post, PostForm};
use crate::post::post_validation::{PostRules, ValidationReport};

/// Message shown to the user: the fixed text, plus the server's reason when
/// it rejected the input.
fn failure_message(prefix: &str, err: &ApiError) -> String {
    if err.is_client_error() {
        format!("{} {}", prefix, err)
    } else {
        prefix.to_string()
    }
}

/// Drives the post list screen. Failed calls set `error_message` and leave
/// the lists as they were.
pub struct PostListController {
    api: Arc<dyn PostApi>,
    state: PostListState,
    rules: PostRules,
}

impl PostListController {
    pub fn new(api: Arc<dyn PostApi>) -> Self {
        Self {
            api,
            state: PostListState::new(),
            rules: PostRules::form(),
        }
    }

    pub fn state(&self) -> &PostListState {
        &self.state
    }

    pub async fn fetch_all(&mut self) {
        self.state.loading = true;
        match self.api.list_posts().await {
            Ok(posts) => {
                self.state.set_posts(posts);
                self.state.clear_error();
            }
            Err(e) => {
                warn!("Fetching posts failed: {}", e);
                self.state.set_error("Error fetching posts.");
            }
        }
        self.state.loading = false;
    }

    pub fn search(&mut self, term: &str) {
        self.state.search(term);
    }

    pub fn paginate(&mut self, page: usize) {
        self.state.go_to_page(page);
    }

    pub fn begin_edit(&mut self, post: &Post) {
        self.state.begin_edit(post);
    }

    pub fn edit_field(&mut self, field: EditField, value: String) -> bool {
        self.state.edit_field(field, value)
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Sends the edit draft. Returns whether the post was updated.
    pub async fn submit_edit(&mut self) -> bool {
        let Some(draft) = self.state.editing.clone() else {
            return false;
        };

        let report = self.rules.validate_edit(&draft.title, &draft.description);
        if !report.is_valid() {
            self.state.set_error(report.summary());
            return false;
        }

        match self.api.update_post(&draft.id, &draft.to_request()).await {
            Ok(updated) => {
                self.state.apply_update(updated);
                self.state.clear_error();
                true
            }
            Err(e) => {
                warn!("Updating post {} failed: {}", draft.id, e);
                self.state
                    .set_error(failure_message("Error updating post.", &e));
                false
            }
        }
    }

    /// Deletes the post. Returns whether it was removed.
    pub async fn remove(&mut self, id: &str) -> bool {
        match self.api.delete_post(id).await {
            Ok(()) => {
                self.state.apply_removal(id);
                self.state.clear_error();
                true
            }
            Err(e) => {
                warn!("Deleting post {} failed: {}", id, e);
                self.state
                    .set_error(failure_message("Error deleting post.", &e));
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPostState {
    pub loading: bool,
    pub error_message: Option<String>,
    pub field_errors: ValidationReport,
}

/// Drives the creation form.
pub struct AddPostController {
    api: Arc<dyn PostApi>,
    state: AddPostState,
    rules: PostRules,
}

impl AddPostController {
    pub fn new(api: Arc<dyn PostApi>) -> Self {
        Self {
            api,
            state: AddPostState::default(),
            rules: PostRules::form(),
        }
    }

    pub fn state(&self) -> &AddPostState {
        &self.state
    }

    /// Validates and submits the form. Nothing is sent when validation fails.
    pub async fn submit(&mut self, form: PostForm) -> Option<Post> {
        self.state.field_errors = self.rules.validate_form(&form);
        if !self.state.field_errors.is_valid() {
            return None;
        }

        self.state.loading = true;
        let result = self.api.create_post(form).await;
        self.state.loading = false;

        match result {
            Ok(post) => {
                self.state.error_message = None;
                Some(post)
            }
            Err(e) => {
                warn!("Adding post failed: {}", e);
                self.state.error_message = Some(failure_message(
                    "Error adding post. Please try again.",
                    &e,
                ));
                None
            }
        }
    }
}
