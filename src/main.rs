use anyhow::Result;
use clap::{Parser, Subcommand};
use pixel_avatar_generator::app::{AvatarApp, AvatarSession};
use pixel_avatar_generator::upload::UploadedImage;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pixel-avatar-generator")]
#[command(about = "Generate pixel-art avatars from photos")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe a photo without generating an avatar (two-step flow, stage one).
    Caption {
        /// Path to the photo to describe.
        photo: PathBuf,
    },
    /// Generate a pixel-art avatar.
    Avatar {
        /// Path to the photo. Optional when --caption is given.
        #[arg(required_unless_present = "caption")]
        photo: Option<PathBuf>,
        /// Use an already-inspected caption instead of captioning the photo
        /// (two-step flow, stage two).
        #[arg(long)]
        caption: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixel_avatar_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let app = match AvatarApp::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match run(app, args.command).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(app: AvatarApp, command: Command) -> pixel_avatar_generator::Result<()> {
    let mut session = AvatarSession::new(app);

    match command {
        Command::Caption { photo } => {
            session.select_photo(UploadedImage::from_path(&photo)?);
            session.run_caption().await?;
            info!("Captioned {}", photo.display());
            println!("{}", session.caption_text());
        }
        Command::Avatar { photo, caption } => {
            match caption {
                Some(text) => {
                    session.set_caption(text);
                    session.run_generate().await?;
                }
                None => {
                    // `photo` is enforced by clap when --caption is absent.
                    let path = photo.ok_or_else(|| {
                        pixel_avatar_generator::Error::Generic(
                            "A photo is required without --caption".to_string(),
                        )
                    })?;
                    session.select_photo(UploadedImage::from_path(&path)?);
                    session.run_one_click().await?;
                }
            }
            info!("Avatar ready");
            println!("{}", session.image_url());
        }
    }

    Ok(())
}
