use clap::Parser;
use poem_yield::{Config, HttpTransport, LinkMap, PoetryClient};
use serde::Serialize;
use std::fmt::Display;
use std::process::ExitCode;

mod args;
use args::{Args, Command, OutputFormat};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> poem_yield::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };
    // Command-line credentials override the file
    if let (Some(user), Some(pass)) = (args.username, args.password) {
        config.username = Some(user);
        config.password = Some(pass);
    }

    ::log::info!("Using origin {}", config.origin);
    let client: PoetryClient<HttpTransport> = PoetryClient::from_config(&config)?;
    let format = args.format;

    match args.command {
        Command::Links { author, limit } => {
            print_links(&client.poem_links(&author, limit)?, format)
        }
        Command::Poems { author, limit } => print_records(&client.poems(&author, limit)?, format),
        Command::Poem { url } => print_records(&[client.poem(&url)?], format),
        Command::Author { handle } => print_records(&[client.author(&handle)?], format),
        Command::Famous { limit, links_only } => {
            if links_only {
                print_links(&client.famous_author_links(limit)?, format)
            } else {
                print_records(&client.famous_authors(limit)?, format)
            }
        }
    }
}

fn print_links(links: &LinkMap, format: OutputFormat) -> poem_yield::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(links)?),
        OutputFormat::Text => {
            for (name, url) in links.iter() {
                println!("{}\t{}", name, url);
            }
        }
    }
    Ok(())
}

fn print_records<R: Serialize + Display>(
    records: &[R],
    format: OutputFormat,
) -> poem_yield::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Text => {
            for record in records {
                println!("{}\n", record);
            }
        }
    }
    Ok(())
}
