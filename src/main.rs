use std::path::PathBuf;

use anyhow::{Context, Result};
use handsign::{Recognition, Tuning, classify_frame};

fn main() -> Result<()> {
    env_logger::init();

    let image_paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if image_paths.is_empty() {
        anyhow::bail!("usage: handsign <image> [image ...]");
    }

    let tuning = Tuning::default();
    for path in image_paths {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("failed to read frame {}", path.display()))?;

        match classify_frame(&bytes, &tuning) {
            Ok(Recognition::Letter(letter)) => {
                println!("{} -> {}", path.display(), letter.symbol());
            }
            Ok(_) => {
                println!("{} -> no gesture", path.display());
            }
            Err(err) => {
                log::warn!("could not process {}: {err}", path.display());
                println!("{} -> ?", path.display());
            }
        }
    }

    Ok(())
}
