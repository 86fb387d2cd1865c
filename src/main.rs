use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use melodica_catalog::catalog::ArtistRepository;
use melodica_catalog::config::{AppConfig, CliConfig, FileConfig};
use melodica_catalog::{
    all_collectors, ArtistDeleter, CascadingAlbumDeleter, SqliteAnnotationStore,
    SqliteCatalogStore,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH")))]
struct CliArgs {
    /// Directory holding the catalog and annotations databases.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Path to a TOML config file; its values override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove an artist together with its albums, tracks and annotations.
    RemoveArtist {
        /// Id of the artist to remove.
        id: i64,
    },
    /// Print catalog entity counts.
    Stats,
    /// Import artists (with nested albums and tracks) from a JSON file.
    Import {
        #[clap(value_parser = parse_path)]
        file: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct ImportArtist {
    name: String,
    #[serde(default)]
    mbid: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    albums: Vec<ImportAlbum>,
}

#[derive(Debug, Deserialize)]
struct ImportAlbum {
    name: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    tracks: Vec<ImportTrack>,
}

#[derive(Debug, Deserialize)]
struct ImportTrack {
    name: String,
    #[serde(default)]
    track_number: Option<i32>,
    #[serde(default)]
    duration_sec: Option<i64>,
}

fn import_catalog(catalog: &SqliteCatalogStore, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file {:?}", file))?;
    let artists: Vec<ImportArtist> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse import file {:?}", file))?;

    for artist in &artists {
        let artist_id =
            catalog.add_artist(&artist.name, artist.mbid.as_deref(), artist.summary.as_deref())?;
        for album in &artist.albums {
            let album_id = catalog.add_album(artist_id, &album.name, album.year)?;
            for track in &album.tracks {
                catalog.add_track(album_id, &track.name, track.track_number, track.duration_sec)?;
            }
        }
    }
    info!("Imported {} artists from {:?}", artists.len(), file);
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(
        &CliConfig {
            db_dir: cli_args.db_dir.clone(),
        },
        file_config,
    )?;

    let catalog = Arc::new(SqliteCatalogStore::new(&config.catalog_db)?);
    let annotations = Arc::new(SqliteAnnotationStore::new(&config.annotations_db)?);

    match cli_args.command {
        Command::RemoveArtist { id } => {
            let Some(artist) = catalog.get_artist(id)? else {
                bail!("Artist {} not found", id);
            };

            let collectors = all_collectors(annotations.clone(), annotations.clone());
            let album_deleter = Arc::new(CascadingAlbumDeleter::new(
                catalog.clone(),
                catalog.clone(),
                collectors.clone(),
            ));
            let artist_deleter =
                ArtistDeleter::new(album_deleter, catalog.clone(), catalog.clone(), collectors);

            artist_deleter.remove(&artist)?;
            info!("Removed artist {} ({})", artist.id, artist.name);
        }
        Command::Stats => {
            let (artists, albums, tracks) = catalog.entity_counts()?;
            println!("artists: {}", artists);
            println!("albums:  {}", albums);
            println!("tracks:  {}", tracks);
        }
        Command::Import { file } => {
            import_catalog(&catalog, &file)?;
        }
    }

    Ok(())
}
