//! Client-side state of the post list screen.
//!
//! Filtering and pagination are pure functions over already-fetched posts;
//! `PostListState` only records their inputs and results.

use std::str::FromStr;

use crate::post::post_model::{Post, UpdatePostRequest};

pub const PAGE_SIZE: usize = 4;

/// Posts whose title or description contains `term`, ignoring case.
pub fn filter_posts(posts: &[Post], term: &str) -> Vec<Post> {
    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items `[page_size * (page - 1), page_size * page)` clipped to `posts`.
/// Pages are 1-based; page 0 and pages past the end are empty.
pub fn page_slice(posts: &[Post], page: usize, page_size: usize) -> &[Post] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= posts.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(posts.len());
    &posts[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    ImageUrl,
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "title" => Ok(EditField::Title),
            "description" => Ok(EditField::Description),
            "image" | "imageurl" => Ok(EditField::ImageUrl),
            other => Err(format!("Unknown field '{}'", other)),
        }
    }
}

/// The post being edited and its unsaved field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    original_image_url: String,
}

impl EditDraft {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            image_url: post.image_url.clone(),
            original_image_url: post.image_url.clone(),
        }
    }

    pub fn set(&mut self, field: EditField, value: String) {
        match field {
            EditField::Title => self.title = value,
            EditField::Description => self.description = value,
            EditField::ImageUrl => self.image_url = value,
        }
    }

    /// The image URL is only sent when it was changed.
    pub fn to_request(&self) -> UpdatePostRequest {
        UpdatePostRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: (self.image_url != self.original_image_url).then(|| self.image_url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListState {
    pub posts: Vec<Post>,
    pub filtered: Vec<Post>,
    pub search_term: String,
    pub current_page: usize,
    pub page_size: usize,
    pub editing: Option<EditDraft>,
    pub loading: bool,
    pub error_message: Option<String>,
}

impl Default for PostListState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            page_size: PAGE_SIZE,
            editing: None,
            loading: false,
            error_message: None,
        }
    }
}

impl PostListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both lists with a fresh fetch and starts over from an
    /// empty search on page 1.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.filtered = posts.clone();
        self.posts = posts;
        self.search_term.clear();
        self.current_page = 1;
    }

    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered = filter_posts(&self.posts, term);
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn visible_posts(&self) -> &[Post] {
        page_slice(&self.filtered, self.current_page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }

    /// Post at 1-based `position` on the current page.
    pub fn post_at(&self, position: usize) -> Option<&Post> {
        position
            .checked_sub(1)
            .and_then(|index| self.visible_posts().get(index))
    }

    pub fn begin_edit(&mut self, post: &Post) {
        self.editing = Some(EditDraft::from_post(post));
    }

    /// Returns `false` when no post is being edited.
    pub fn edit_field(&mut self, field: EditField, value: String) -> bool {
        match self.editing.as_mut() {
            Some(draft) => {
                draft.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn apply_update(&mut self, updated: Post) {
        for list in [&mut self.posts, &mut self.filtered] {
            if let Some(post) = list.iter_mut().find(|post| post.id == updated.id) {
                *post = updated.clone();
            }
        }
        self.editing = None;
    }

    pub fn apply_removal(&mut self, id: &str) {
        self.posts.retain(|post| post.id != id);
        self.filtered.retain(|post| post.id != id);
        self.current_page = self.current_page.min(self.total_pages().max(1));
        if self.editing.as_ref().is_some_and(|draft| draft.id == id) {
            self.editing = None;
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
