use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::client::Client;
use crate::error::Result;
use crate::models::{Photo, SourceSize};

/// Downloads the `size` variant of every photo into `dir`, in parallel.
///
/// Files are named `<id>-<size>.<ext>`. Photos without that variant are
/// skipped, and so are repeats of an id already in the batch. The bar is
/// advanced once per photo, skipped ones included.
pub fn download_photos(
    client: &Client,
    photos: &[Photo],
    size: SourceSize,
    dir: &Path,
    bar: &ProgressBar,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    // two workers must never write the same `<id>-<size>` file
    let mut seen = HashSet::new();
    let unique: Vec<&Photo> = photos.iter().filter(|photo| seen.insert(photo.id)).collect();
    let repeats = photos.len() - unique.len();
    if repeats > 0 {
        debug!(repeats, "skipping repeated photo ids");
        bar.inc(repeats as u64);
    }

    let written = unique
        .par_iter()
        .map(|photo| {
            let saved = download_one(client, photo, size, dir);
            bar.inc(1);
            saved
        })
        .collect::<Result<Vec<Option<PathBuf>>>>()?;

    let written: Vec<PathBuf> = written.into_iter().flatten().collect();
    info!(count = written.len(), dir = %dir.display(), "downloaded photos");
    Ok(written)
}

fn download_one(
    client: &Client,
    photo: &Photo,
    size: SourceSize,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let link = photo.src.get(size);
    if link.is_empty() {
        debug!(id = photo.id, %size, "no such variant, skipping");
        return Ok(None);
    }

    let body = client.fetch_bytes(link)?;
    let path = dir.join(file_name(photo.id, size, link));
    fs::write(&path, body)?;
    Ok(Some(path))
}

fn file_name(id: u64, size: SourceSize, link: &str) -> String {
    format!("{id}-{size}.{}", extension(link))
}

// CDN links carry resize parameters in the query, e.g. `.jpeg?auto=compress&h=350`
fn extension(link: &str) -> &str {
    let path = link.split(&['?', '#'][..]).next().unwrap_or(link);
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => "jpg",
    }
}
