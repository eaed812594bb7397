//! Text rendering of the client screens.

use std::fmt::Write;

use crate::client::controller::AddPostState;
use crate::client::state::{EditDraft, PostListState};
use crate::post::post_model::Post;
use crate::post::post_validation::DESCRIPTION_MAX_CHARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    PostList,
    AddPost,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "/home" => Some(Route::Home),
            "/post-list" => Some(Route::PostList),
            "/add-post" => Some(Route::AddPost),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::PostList => "/post-list",
            Route::AddPost => "/add-post",
        }
    }
}

pub fn render_navbar() -> String {
    format!("MY BLOG{:>40}\n{}\n", "[home]", "=".repeat(47))
}

pub fn render_home() -> String {
    let mut out = String::new();
    out.push_str("WELCOME TO MY BLOG\n\n");
    out.push_str("Discover insightful posts, tips, and stories. Join our community of\n");
    out.push_str("readers and writers. Start exploring or share your thoughts today!\n\n");
    out.push_str("[add] Add Post    [list] See Posts\n");
    out
}

fn render_post(out: &mut String, position: usize, post: &Post) {
    let _ = writeln!(out, "{}. {}", position, post.title);
    let _ = writeln!(out, "   image: {}", post.image_url);
    let _ = writeln!(out, "   {}", post.description);
    let _ = writeln!(out, "   [edit {0}] [delete {0}]", position);
}

fn render_edit_form(out: &mut String, position: usize, draft: &EditDraft) {
    let _ = writeln!(out, "{}. editing", position);
    let _ = writeln!(out, "   title:       {}", draft.title);
    let _ = writeln!(out, "   description: {}", draft.description);
    let _ = writeln!(out, "   image:       {}", draft.image_url);
    let _ = writeln!(out, "   [set <field> <value>] [save] [cancel]");
}

pub fn render_post_list(state: &PostListState) -> String {
    let mut out = String::from("Blog Posts\n\n");
    let _ = writeln!(
        out,
        "Search posts by title or description: [{}]",
        state.search_term
    );
    out.push_str("[add] Add Post\n\n");

    if let Some(ref message) = state.error_message {
        let _ = writeln!(out, "! {}\n", message);
    }

    if state.loading {
        out.push_str("Loading...\n");
        return out;
    }

    let visible = state.visible_posts();
    if visible.is_empty() {
        out.push_str("No posts to show.\n");
    }
    for (index, post) in visible.iter().enumerate() {
        match state.editing {
            Some(ref draft) if draft.id == post.id => render_edit_form(&mut out, index + 1, draft),
            _ => render_post(&mut out, index + 1, post),
        }
        out.push('\n');
    }

    let pages: Vec<String> = (1..=state.total_pages())
        .map(|page| {
            if page == state.current_page {
                format!("<{}>", page)
            } else {
                format!("[{}]", page)
            }
        })
        .collect();
    if !pages.is_empty() {
        let _ = writeln!(out, "{}", pages.join(" "));
    }
    out
}

pub fn render_add_post(state: &AddPostState) -> String {
    let mut out = String::from("Add New Post\n\n");
    if let Some(ref message) = state.error_message {
        let _ = writeln!(out, "! {}\n", message);
    }

    for (field, label) in [
        ("title", "Title"),
        ("image", "Image (path to a jpeg or png, max 5MB)"),
        ("description", "Description"),
    ] {
        let _ = writeln!(out, "{}", label);
        if let Some(message) = state.field_errors.message_for(field) {
            let _ = writeln!(out, "  ! {}", message);
        }
    }
    let _ = writeln!(out, "(description: up to {} characters)", DESCRIPTION_MAX_CHARS);

    out.push_str(if state.loading { "Adding...\n" } else { "[Add Post]\n" });
    out
}

pub fn render_help() -> String {
    [
        "home                      show the home page",
        "list                      show the post list",
        "add                       add a new post",
        "search <term>             filter posts by title or description",
        "page <n>                  go to page n",
        "edit <n>                  edit the n-th post on the page",
        "set <field> <value>       change title, description or image while editing",
        "save | cancel             finish editing",
        "delete <n>                delete the n-th post on the page",
        "quit                      exit",
    ]
    .join("\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::post_validation::{PostRules, ValidationReport};
    use crate::post::post_model::PostForm;

    fn posts(n: usize) -> Vec<Post> {
        (1..=n)
            .map(|i| Post {
                id: format!("id-{}", i),
                title: format!("Post {}", i),
                description: format!("Description {}", i),
                image_url: format!("https://images.test/{}.png", i),
            })
            .collect()
    }

    #[test]
    fn routes_round_trip_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/post-list"), Some(Route::PostList));
        assert_eq!(Route::from_path(Route::AddPost.path()), Some(Route::AddPost));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn list_shows_current_page_and_buttons() {
        let mut state = PostListState::new();
        state.set_posts(posts(5));
        state.go_to_page(2);

        let out = render_post_list(&state);

        assert!(out.contains("1. Post 5"));
        assert!(!out.contains("Post 1\n"));
        assert!(out.contains("[1] <2>"));
    }

    #[test]
    fn list_renders_edit_form_for_edit_target_only() {
        let all = posts(2);
        let mut state = PostListState::new();
        state.set_posts(all.clone());
        state.begin_edit(&all[1]);

        let out = render_post_list(&state);

        assert!(out.contains("1. Post 1"));
        assert!(out.contains("2. editing"));
        assert!(out.contains("title:       Post 2"));
    }

    #[test]
    fn list_shows_loading_and_errors() {
        let mut state = PostListState::new();
        state.loading = true;
        state.set_error("Error fetching posts.");

        let out = render_post_list(&state);

        assert!(out.contains("! Error fetching posts."));
        assert!(out.contains("Loading..."));
    }

    #[test]
    fn add_form_shows_field_errors() {
        let state = AddPostState {
            loading: false,
            error_message: None,
            field_errors: PostRules::form().validate_form(&PostForm::default()),
        };

        let out = render_add_post(&state);

        assert!(out.contains("! Title is required"));
        assert!(out.contains("! Image is required"));
        assert!(out.contains("[Add Post]"));

        let busy = AddPostState {
            loading: true,
            error_message: None,
            field_errors: ValidationReport::default(),
        };
        assert!(render_add_post(&busy).contains("Adding..."));
    }
}
