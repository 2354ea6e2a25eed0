/// Tunebox - command-line catalog browser, player and admin console
mod config;
mod console;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use config::CliConfig;
use console::ConsoleResource;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};
use tunebox_core::{
    filter, Catalog, CollectionForm, CollectionId, ContentDesk, Identity, Notice, Submission,
    TrackForm, TrackId,
};
use tunebox_playback::{MediaTransportController, PlaybackConfig, QueueCursor};
use tunebox_server_client::{read_upload, TuneboxServerClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Width of the description column, as in the player bar
const DESCRIPTION_PREVIEW_CHARS: usize = 30;

#[derive(Parser)]
#[command(name = "tunebox")]
#[command(about = "Browse, search, play and manage a Tunebox catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (default: ./tunebox.toml if present)
    #[arg(short, long, global = true, env = "TUNEBOX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List songs
    Tracks {
        /// Only songs of this album, in album order
        #[arg(long)]
        album: Option<String>,
        /// Also show thumbnails and media URLs
        #[arg(short, long)]
        long: bool,
    },
    /// List albums
    Albums,
    /// Search songs (title or singer) and albums (title)
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Resolve a song and print its media URL
    Play {
        /// Song ID
        id: String,
        /// Play within this album instead of the whole catalog
        #[arg(long)]
        album: Option<String>,
        /// Keep going through the rest of the playlist
        #[arg(short, long)]
        follow: bool,
    },
    /// Manage albums and songs (admins only)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create an album
    AddAlbum {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Cover image
        #[arg(long)]
        thumbnail: PathBuf,
    },
    /// Upload a song
    AddSong {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        singer: String,
        /// Album ID
        #[arg(long)]
        album: Option<String>,
        /// Audio file
        file: PathBuf,
    },
    /// Attach a thumbnail to a song
    AttachThumbnail {
        /// Song ID
        id: String,
        /// Image file
        file: PathBuf,
    },
    /// Delete a song
    DeleteSong {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an album
    DeleteAlbum {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    config.validate()?;

    let client = Arc::new(TuneboxServerClient::new(config.server_config())?);
    tracing::debug!(url = %client.url().await, "Using server");

    match cli.command {
        Commands::Tracks { album, long } => list_tracks(&client, album.as_deref(), long).await?,
        Commands::Albums => list_albums(&client).await?,
        Commands::Search { query } => search(&client, &query).await?,
        Commands::Whoami => whoami(&client).await?,
        Commands::Play { id, album, follow } => {
            play(client, config.playback, &id, album.as_deref(), follow).await?;
        }
        Commands::Admin { command } => admin(client, command).await?,
    }

    Ok(())
}

async fn list_tracks(
    client: &TuneboxServerClient,
    album: Option<&str>,
    long: bool,
) -> anyhow::Result<()> {
    let tracks = client.list_tracks().await?;

    let shown: Vec<_> = match album {
        Some(album_id) => {
            let albums = client.list_collections().await?;
            let album = albums
                .iter()
                .find(|a| a.id.as_str() == album_id)
                .ok_or_else(|| anyhow!("album {} not found", album_id))?;
            album.tracks_in(&tracks)
        }
        None => tracks.iter().collect(),
    };

    for track in shown {
        println!(
            "{}\t{} - {}\t{}",
            track.id,
            track.title,
            track.artist_name,
            track.description_preview(DESCRIPTION_PREVIEW_CHARS)
        );
        if long {
            println!("\tthumbnail: {}", track.thumbnail_or_placeholder());
            println!("\tmedia:     {}", track.media_uri);
        }
    }

    Ok(())
}

async fn list_albums(client: &TuneboxServerClient) -> anyhow::Result<()> {
    for album in client.list_collections().await? {
        println!(
            "{}\t{}\t{} songs\t{}",
            album.id,
            album.title,
            album.track_ids.len(),
            album.description
        );
    }
    Ok(())
}

async fn search(client: &TuneboxServerClient, query: &str) -> anyhow::Result<()> {
    let (tracks, albums) = tokio::try_join!(client.list_tracks(), client.list_collections())?;
    let result = filter(&tracks, &albums, query);

    if result.is_empty() {
        println!("No results for \"{}\"", query.trim());
        return Ok(());
    }

    if !result.tracks.is_empty() {
        println!("Songs:");
        for track in &result.tracks {
            println!("  {}\t{} - {}", track.id, track.title, track.artist_name);
        }
    }
    if !result.collections.is_empty() {
        println!("Albums:");
        for album in &result.collections {
            println!("  {}\t{}", album.id, album.title);
        }
    }

    Ok(())
}

async fn whoami(client: &TuneboxServerClient) -> anyhow::Result<()> {
    match client.current_user().await? {
        Some(user) => {
            let role = if user.is_admin() { "admin" } else { "user" };
            match &user.email {
                Some(email) => println!("{} <{}> ({})", user.name, email, role),
                None => println!("{} ({})", user.name, role),
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

async fn play(
    client: Arc<TuneboxServerClient>,
    playback: PlaybackConfig,
    id: &str,
    album: Option<&str>,
    follow: bool,
) -> anyhow::Result<()> {
    let tracks = client.list_tracks().await?;

    let cursor = match album {
        Some(album_id) => {
            let albums = client.list_collections().await?;
            let album = albums
                .iter()
                .find(|a| a.id.as_str() == album_id)
                .ok_or_else(|| anyhow!("album {} not found", album_id))?;
            QueueCursor::from_collection(album, &tracks)
        }
        None => QueueCursor::new(tracks),
    };

    if !cursor.is_empty() && cursor.tracks().iter().all(|t| t.id.as_str() != id) {
        bail!("song {} is not in this playlist", id);
    }

    let mut controller = MediaTransportController::new(
        playback,
        ConsoleResource::default(),
        Box::new(cursor),
        client,
    );

    controller.select_track(&TrackId::new(id)).await?;
    report_track(&controller);

    if follow {
        while controller.skip_next()? {
            report_track(&controller);
        }
    }

    controller.teardown();
    Ok(())
}

fn report_track(controller: &MediaTransportController<ConsoleResource>) {
    if let Some(track) = controller.current_track() {
        tracing::info!(
            track_id = %track.id,
            title = %track.title,
            singer = %track.artist_name,
            volume = controller.state().volume,
            "Now playing"
        );
    }
}

async fn admin(client: Arc<TuneboxServerClient>, command: AdminCommand) -> anyhow::Result<()> {
    let desk = ContentDesk::open(client.as_ref(), client.clone())
        .await
        .context("cannot open the admin desk")?;
    tracing::debug!(admin = %desk.admin().name, "Admin desk open");

    match command {
        AdminCommand::AddAlbum {
            title,
            description,
            thumbnail,
        } => {
            let mut form = CollectionForm {
                title,
                description,
                thumbnail: Some(read_upload(&thumbnail).await?),
            };
            let submission = desk.submit_collection(&mut form).await;
            if let Some(album) = &submission.item {
                println!("{}", album.id);
            }
            finish(submission)
        }
        AdminCommand::AddSong {
            title,
            description,
            singer,
            album,
            file,
        } => {
            let mut form = TrackForm {
                title,
                description,
                artist_name: singer,
                collection_id: album.map(CollectionId::from),
                media: Some(read_upload(&file).await?),
            };
            let submission = desk.submit_track(&mut form).await;
            if let Some(track) = &submission.item {
                println!("{}", track.id);
            }
            finish(submission)
        }
        AdminCommand::AttachThumbnail { id, file } => {
            let thumbnail = read_upload(&file).await?;
            finish(desk.attach_thumbnail(&TrackId::new(id), thumbnail).await)
        }
        AdminCommand::DeleteSong { id, yes } => {
            if !yes && !confirm(&format!("Are you sure you want to delete song {}?", id))? {
                println!("Cancelled");
                return Ok(());
            }
            finish(desk.delete_track(&TrackId::new(id)).await)
        }
        AdminCommand::DeleteAlbum { id, yes } => {
            if !yes && !confirm(&format!("Are you sure you want to delete album {}?", id))? {
                println!("Cancelled");
                return Ok(());
            }
            finish(desk.delete_collection(&CollectionId::new(id)).await)
        }
    }
}

/// Print the notice; a failed submission becomes the command's error
fn finish<T>(submission: Submission<T>) -> anyhow::Result<()> {
    let Submission { notice, .. } = submission;
    if notice.is_success() {
        eprintln!("{}", notice.message);
        Ok(())
    } else {
        Err(notice_error(notice))
    }
}

fn notice_error(notice: Notice) -> anyhow::Error {
    match notice.detail {
        Some(detail) => anyhow!("{} ({})", notice.message, detail),
        None => anyhow!(notice.message),
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
