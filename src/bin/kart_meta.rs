//! Query the offline metadata bundle from the command line.
//!
//! Resolves asset ids to display names and back, lists a whole category,
//! derives image paths, and checks whether a category dataset is present.
//! The store comes from `--store` or `KART_METADATA_PATH`.

use anyhow::{Context, Result, bail};
use kartrider::config::METADATA_PATH_ENV;
use kartrider::{Category, MetadataCatalog};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let store = match args.store {
        Some(path) => path,
        None => env::var_os(METADATA_PATH_ENV)
            .map(PathBuf::from)
            .with_context(|| format!("no metadata store: pass --store or set {METADATA_PATH_ENV}"))?,
    };
    let catalog = MetadataCatalog::open(&store)?;

    match args.command {
        Command::Name { category, id } => {
            println!("{}", catalog.name_of(&category, Some(id.as_str()))?);
        }
        Command::Id { category, name } => {
            println!("{}", catalog.id_of(&category, &name)?);
        }
        Command::List { category } => {
            for (id, name) in catalog.all_of(&category)? {
                println!("{id}\t{name}");
            }
        }
        Command::Image {
            category,
            name_or_id,
        } => {
            println!("{}", catalog.image_path_of(&name_or_id, &category)?.display());
        }
        Command::Exists { category } => {
            let present = catalog.exists(&category);
            println!("{present}");
            if !present {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Command {
    Name { category: Category, id: String },
    Id { category: Category, name: String },
    List { category: Category },
    Image { category: Category, name_or_id: String },
    Exists { category: Category },
}

#[derive(Debug)]
struct CliArgs {
    store: Option<PathBuf>,
    command: Command,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut store: Option<PathBuf> = None;
        let mut command: Option<Command> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            let next = match arg.as_str() {
                "--store" => {
                    store = Some(PathBuf::from(next_value(&mut args, "--store")?));
                    continue;
                }
                "--name" => Command::Name {
                    category: next_category(&mut args, "--name")?,
                    id: next_value(&mut args, "--name")?,
                },
                "--id" => Command::Id {
                    category: next_category(&mut args, "--id")?,
                    name: next_value(&mut args, "--id")?,
                },
                "--list" => Command::List {
                    category: next_category(&mut args, "--list")?,
                },
                "--image" => Command::Image {
                    category: next_category(&mut args, "--image")?,
                    name_or_id: next_value(&mut args, "--image")?,
                },
                "--exists" => Command::Exists {
                    category: next_category(&mut args, "--exists")?,
                },
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            };
            if command.is_some() {
                bail!("only one of --name/--id/--list/--image/--exists may be given");
            }
            command = Some(next);
        }

        let Some(command) = command else {
            bail!("missing command\n{}", usage());
        };
        Ok(CliArgs { store, command })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn next_category(
    args: &mut impl Iterator<Item = std::ffi::OsString>,
    flag: &str,
) -> Result<Category> {
    next_value(args, flag).map(|raw| Category::from_name(&raw))
}

fn usage() -> &'static str {
    "Usage: kart-meta [--store DIR] (--name CATEGORY ID | --id CATEGORY NAME | --list CATEGORY | --image CATEGORY NAME_OR_ID | --exists CATEGORY)\n\
Categories: kart, pet, track, gameType, flyingPet, character.\n"
}
