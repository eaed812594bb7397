use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::info;

use image_blog::client::api::{HttpPostApi, PostApi};
use image_blog::client::commands::{Command, parse_command};
use image_blog::client::controller::{AddPostController, PostListController};
use image_blog::client::views::{
    Route, render_add_post, render_help, render_home, render_navbar, render_post_list,
};
use image_blog::post::post_model::PostForm;
use image_blog::uploader::image_host::ImageUpload;
use image_blog::utils::helpers::env_or;

fn prompt(label: &str) -> io::Result<()> {
    print!("{}", label);
    io::stdout().flush()
}

fn ask<I>(lines: &mut I, label: &str) -> io::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    prompt(label)?;
    match lines.next() {
        Some(line) => line,
        None => Ok(String::new()),
    }
}

fn read_image(path: &str) -> Option<ImageUpload> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    match fs::read(path) {
        Ok(data) => {
            let file_name = Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            Some(ImageUpload::from_bytes(&file_name, data))
        }
        Err(e) => {
            println!("Could not read {}: {}", path, e);
            None
        }
    }
}

fn read_form<I>(lines: &mut I) -> io::Result<PostForm>
where
    I: Iterator<Item = io::Result<String>>,
{
    let title = ask(lines, "Title: ")?;
    let image = read_image(&ask(lines, "Image path: ")?);
    let description = ask(lines, "Description: ")?;
    Ok(PostForm {
        title,
        description,
        image,
    })
}

fn show(route: Route, list: &PostListController, add: &AddPostController) {
    print!("{}", render_navbar());
    match route {
        Route::Home => print!("{}", render_home()),
        Route::PostList => print!("{}", render_post_list(list.state())),
        Route::AddPost => print!("{}", render_add_post(add.state())),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let api_url = env_or("API_URL", "http://localhost:8000/api");
    info!("Using post API at {}", api_url);

    let api: Arc<dyn PostApi> = Arc::new(HttpPostApi::new(&api_url));
    let mut list = PostListController::new(api.clone());
    let mut add = AddPostController::new(api);
    let mut route = Route::Home;

    let mut lines = io::stdin().lock().lines();
    show(route, &list, &add);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                print!("{}", render_help());
                continue;
            }
            Command::Home => route = Route::Home,
            Command::List => {
                route = Route::PostList;
                list.fetch_all().await;
            }
            Command::Add => {
                route = Route::AddPost;
                show(route, &list, &add);
                let form = read_form(&mut lines)?;
                if add.submit(form).await.is_some() {
                    println!("Post added successfully!");
                    route = Route::PostList;
                    list.fetch_all().await;
                }
            }
            Command::Search(term) => {
                route = Route::PostList;
                list.search(&term);
            }
            Command::Page(page) => {
                route = Route::PostList;
                list.paginate(page);
            }
            Command::Edit(position) => match list.state().post_at(position).cloned() {
                Some(post) => list.begin_edit(&post),
                None => println!("There is no post {} on this page", position),
            },
            Command::Set(field, value) => {
                if !list.edit_field(field, value) {
                    println!("Nothing is being edited; use 'edit <n>' first");
                }
            }
            Command::Save => {
                list.submit_edit().await;
            }
            Command::Cancel => list.cancel_edit(),
            Command::Delete(position) => match list.state().post_at(position).cloned() {
                Some(post) => {
                    let answer = ask(
                        &mut lines,
                        "Are you sure you want to delete this post? [y/N] ",
                    )?;
                    if answer.trim().eq_ignore_ascii_case("y") {
                        list.remove(&post.id).await;
                    }
                }
                None => println!("There is no post {} on this page", position),
            },
        }

        show(route, &list, &add);
    }

    Ok(())
}
