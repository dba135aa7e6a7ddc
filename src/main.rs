use colored::*;
use rcreator::{
    logger::{self, LogLevel, LoggerConfig},
    CreatorClient, CreatorConfig, CreatorError, DraftField, FormView, ImageData, Navigator,
    PostCreationForm, Preview, Route,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq)]
enum Command {
    Set(DraftField, String),
    Surprise,
    Generate,
    Share,
    Save(PathBuf),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "name" => Ok(Command::Set(DraftField::Name, rest.to_string())),
        "prompt" => Ok(Command::Set(DraftField::Prompt, rest.to_string())),
        "surprise" => Ok(Command::Surprise),
        "generate" => Ok(Command::Generate),
        "share" => Ok(Command::Share),
        "save" if !rest.is_empty() => Ok(Command::Save(PathBuf::from(rest))),
        "save" => Err("usage: save <path>".to_string()),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Records that the form asked to go back to the feed; the session ends there.
#[derive(Default)]
struct TerminalNavigator {
    left: AtomicBool,
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        log::debug!("Navigating to {}", route.path());
        self.left.store(true, Ordering::SeqCst);
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  name <text>     set your display name");
    println!("  prompt <text>   describe the image you want");
    println!("  surprise        fill in an example prompt");
    println!("  generate        create an image from the prompt");
    println!("  share           share name, prompt and image with the community");
    println!("  save <path>     write the generated image to disk");
    println!("  show            redraw the form");
    println!("  quit            leave without sharing");
}

fn render(view: &FormView) {
    println!();
    println!("{}", "Create Your Masterpiece".bold());
    println!("  Your name: {}", view.draft.name);
    println!("  Prompt:    {}", view.draft.prompt);

    match &view.preview {
        Preview::Placeholder => println!("  {}", "[ preview: no image yet ]".bright_black()),
        Preview::Image { src, alt } => match ImageData::from_data_uri(src) {
            Ok(image) => println!(
                "  [ image: {}, {} bytes ] {}",
                image.mime,
                image.bytes.len(),
                alt.italic()
            ),
            Err(_) => println!("  [ image ] {}", alt.italic()),
        },
    }
    if view.show_loader {
        println!("  {}", "⏳ working on it...".yellow());
    }

    println!("  ({})", view.generate_label.green());
    if view.submit_disabled {
        println!("  ({})", view.submit_label.bright_black());
    } else {
        println!("  ({})", view.submit_label.bright_blue());
    }
}

fn notify(error: &CreatorError) {
    if error.is_warning() {
        println!("{} {}", "⚠️ ".yellow(), error.to_string().yellow());
    } else {
        println!("{} {}", "❌".red(), error.to_string().red());
    }
}

async fn save_image(form: &PostCreationForm, path: PathBuf) -> rcreator::Result<PathBuf> {
    let draft = form.draft();
    if !draft.has_photo() {
        return Err(CreatorError::MissingPromptOrPhoto);
    }
    let image = ImageData::from_data_uri(&draft.photo)?;
    let path = if path.extension().is_none() {
        path.with_extension(image.extension())
    } else {
        path
    };

    tokio::fs::write(&path, &image.bytes)
        .await
        .map_err(|e| CreatorError::SerializationError(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = std::env::var("CREATOR_LOG_LEVEL")
        .ok()
        .and_then(|v| v.parse::<LogLevel>().ok())
        .unwrap_or(LogLevel::Info);
    let mut logger_config = LoggerConfig::new().with_level(level);
    if let Ok(path) = std::env::var("CREATOR_LOG_FILE") {
        logger_config = logger_config.with_file_output(&path);
    }
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = CreatorConfig::from_env();
    logger::log_config_info(&config);

    let client = match CreatorClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize client: {}", e);
            return Err(e.into());
        }
    };

    let navigator = Arc::new(TerminalNavigator::default());
    let form = PostCreationForm::new(Arc::new(client), navigator.clone())
        .with_image_mime(config.image_mime.clone());

    print_help();
    render(&form.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        match command {
            Command::Set(field, value) => form.update_field(field, value),
            Command::Surprise => form.request_surprise_prompt(),
            Command::Generate => {
                let task = tokio::spawn({
                    let form = form.clone();
                    async move { form.generate_image().await }
                });
                tokio::task::yield_now().await;
                render(&form.view());
                if let Err(e) = task.await? {
                    notify(&e);
                }
            }
            Command::Share => {
                if let Err(e) = form.submit_post().await {
                    notify(&e);
                }
            }
            Command::Save(path) => match save_image(&form, path).await {
                Ok(path) => println!("💾 Image saved to: {}", path.display()),
                Err(e) => notify(&e),
            },
            Command::Show => {}
            Command::Help => {
                print_help();
                continue;
            }
            Command::Quit => break,
        }

        if navigator.left.load(Ordering::SeqCst) {
            println!("{}", "🎉 Shared with the community!".green().bold());
            break;
        }
        render(&form.view());
    }

    Ok(())
}
