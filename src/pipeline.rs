// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The batch build: open, patch, merge and write each variant

use crate::patch::{Hack, MgenPlus, Nerd, NotoEmoji, Patch};
use crate::{BuildConfig, FontError, Metadata, SaicaBuilder, Variant, VARIANTS};
use std::path::{Path, PathBuf};

/// Read the family texts named by `config`
pub fn metadata(config: &BuildConfig) -> Result<Metadata, FontError> {
    let mut meta = Metadata::new(config.read_copyright()?, config.read_license()?);
    meta.family = config.family.clone();
    Ok(meta)
}

/// Build one variant, returning the path written
///
/// Hack and Rounded Mgen+ are required. The symbol and emoji donors are
/// skipped with a warning if their files are absent.
pub fn build_variant(
    config: &BuildConfig,
    meta: &Metadata,
    variant: &Variant,
) -> Result<PathBuf, FontError> {
    log::info!("building {}", variant.name);

    let mut hack = Hack::open(config.source(variant.hack), variant.style)?
        .with_m_override(config.source(variant.m_override()));
    hack.patch()?;

    let mut mgen = MgenPlus::open(config.source(variant.mgen_plus), variant.style)?;
    mgen.patch()?;

    let mut nerd = open_optional(&config.source(&config.nerd), |p| Nerd::open(p))?;
    if let Some(nerd) = nerd.as_mut() {
        nerd.patch()?;
    }

    let mut emoji = open_optional(&config.source(&config.emoji), |p| NotoEmoji::open(p))?;
    if let Some(emoji) = emoji.as_mut() {
        emoji.patch()?;
    }

    let mut builder = SaicaBuilder::new(meta.clone()).build(variant);
    builder.add_font(hack.font()).add_font(mgen.font());
    if let Some(nerd) = nerd.as_ref() {
        builder.add_font(nerd.font());
    }
    if let Some(emoji) = emoji.as_ref() {
        builder.add_font(emoji.font());
    }
    let path = builder.generate(&config.dist_dir)?;

    hack.close();
    mgen.close();
    if let Some(nerd) = nerd {
        nerd.close();
    }
    if let Some(emoji) = emoji {
        emoji.close();
    }
    Ok(path)
}

/// Build all variants
pub fn build_all(config: &BuildConfig) -> Result<Vec<PathBuf>, FontError> {
    let meta = metadata(config)?;
    VARIANTS
        .iter()
        .map(|variant| build_variant(config, &meta, variant))
        .collect()
}

fn open_optional<T>(
    path: &Path,
    open: impl FnOnce(&Path) -> Result<T, FontError>,
) -> Result<Option<T>, FontError> {
    if path.exists() {
        open(path).map(Some)
    } else {
        log::warn!("{} not found; skipping", path.display());
        Ok(None)
    }
}
