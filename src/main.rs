// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! saica-build: build the Saica fonts into `dist/`

use saica::pipeline::{build_variant, metadata};
use saica::{BuildConfig, Variant, VARIANTS};
use std::error::Error;
use std::path::PathBuf;

const USAGE: &str = "\
Usage: saica-build [OPTIONS]

Options:
    --source DIR        directory holding donor fonts (default: .)
    --dist DIR          output directory (default: dist)
    --copyright FILE    copyright notice (default: COPYRIGHT)
    --license FILE      license text (default: LICENSE)
    --variant NAME      build only this variant (may be repeated)
    -h, --help          print this message

Log output is controlled by RUST_LOG (default: info).";

struct Args {
    config: BuildConfig,
    variants: Vec<&'static Variant>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut config = BuildConfig::default();
    let mut variants = vec![];

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            return Ok(None);
        }
        let mut value = || args.next().ok_or_else(|| format!("missing value for {arg}"));
        match arg.as_str() {
            "--source" => config.source_dir = PathBuf::from(value()?),
            "--dist" => config.dist_dir = PathBuf::from(value()?),
            "--copyright" => config.copyright = PathBuf::from(value()?),
            "--license" => config.license = PathBuf::from(value()?),
            "--variant" => {
                let name = value()?;
                let variant = Variant::find(&name).ok_or_else(|| format!("unknown variant {name}"))?;
                variants.push(variant);
            }
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }

    if variants.is_empty() {
        variants = VARIANTS.iter().collect();
    }
    Ok(Some(Args { config, variants }))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args(std::env::args().skip(1)).map_err(|msg| format!("{msg}\n\n{USAGE}"))?
    else {
        println!("{USAGE}");
        return Ok(());
    };

    let meta = metadata(&args.config)?;
    for variant in args.variants {
        let path = build_variant(&args.config, &meta, variant)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
