//! Identicon CLI
//!
//! Generates an identicon, previews it in the terminal and optionally saves it.
//! With --json, prints the manifest to stdout instead.
//! Returns 1 on bad arguments or an unreadable config file, 2 when generation fails.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use identicon_core::{
    render::ansi_preview,
    HashAlgorithm, Identicon, IdenticonConfig, IdenticonError, Rgb,
};

#[derive(Parser)]
#[command(name = "identicon-cli")]
#[command(about = "Identicon CLI - deterministic avatar generator")]
struct Cli {
    /// String to generate the identicon from
    input: String,

    /// Image size in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// N x N dimension of the sprite
    #[arg(short, long)]
    dim: Option<u32>,

    /// Hash algorithm: md5, sha256 or sha512
    #[arg(long)]
    hash: Option<HashAlgorithm>,

    /// (R,G,B) main color
    #[arg(short, long)]
    foreground: Option<Rgb>,

    /// (R,G,B) background color
    #[arg(short, long)]
    background: Option<Rgb>,

    /// JSON config file; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the terminal preview
    #[arg(long, alias = "dont_show")]
    dont_show: bool,

    /// Filename to save as
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the manifest as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

impl Cli {
    fn resolve_config(&self) -> Result<IdenticonConfig, IdenticonError> {
        let mut config = match &self.config {
            Some(path) => IdenticonConfig::load_from_file(path)?,
            None => IdenticonConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(dim) = self.dim {
            config.dim = dim;
        }
        if let Some(hash) = self.hash {
            config.hash = hash;
        }
        if let Some(foreground) = self.foreground {
            config.foreground = Some(foreground);
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        Ok(config)
    }
}

fn configure_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(buf, "{} [{}] {}", record.target(), record.level(), record.args())
        })
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    configure_logger(cli.log_level);

    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            report(cli.json, &e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("configuration: {:?}", config);

    let identicon = Identicon::new(config);

    if cli.json {
        return match identicon.manifest(&cli.input) {
            Ok(manifest) => {
                let output = serde_json::json!({
                    "success": true,
                    "manifest": manifest,
                });
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                report(true, &e);
                ExitCode::from(2)
            }
        };
    }

    let sprite = match identicon.derive(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            report(false, &e);
            return ExitCode::from(2);
        }
    };

    if !cli.dont_show {
        print!("{}", ansi_preview(&sprite.grid, sprite.foreground, identicon.config().background));
    }

    if let Some(path) = &cli.save {
        let img = identicon.render(&sprite);
        if let Err(e) = img.save(path) {
            report(false, &IdenticonError::from(e));
            return ExitCode::from(2);
        }
        log::info!("saved {}", path.display());
    }

    ExitCode::SUCCESS
}

fn report(json: bool, error: &IdenticonError) {
    if json {
        let output = serde_json::json!({
            "success": false,
            "error": error.to_string(),
        });
        println!("{}", output);
    } else {
        eprintln!("Error: {}", error);
    }
}
