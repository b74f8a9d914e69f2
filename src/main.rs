use foodscrape::{build_dataset, build_window, scrape_links, ScrapeConfig, ScrapeError};
use log::{error, info};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage:
  foodscrape links [QUANTITY]      crawl and save recipe links
  foodscrape dataset [QUANTITY]    crawl, extract and export the dataset
  foodscrape window START [STOP]   build the dataset from lines of the link file";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<(), ScrapeError> {
    let command = args
        .first()
        .ok_or_else(|| ScrapeError::Invalid(USAGE.to_string()))?;
    let mut config = ScrapeConfig::load()?;

    match command.as_str() {
        "links" => {
            if let Some(quantity) = parse_arg(args.get(1), "QUANTITY")? {
                config.target_quantity = Some(quantity);
            }
            let links = scrape_links(&config).await?;
            println!("{} links in {}", links.len(), config.links_file);
        }
        "dataset" => {
            if let Some(quantity) = parse_arg(args.get(1), "QUANTITY")? {
                config.target_quantity = Some(quantity);
            }
            let dataset = build_dataset(&config).await?;
            println!(
                "{} recipes written to {} ({} failed)",
                dataset.rows.len(),
                config.output.path,
                dataset.failed.len()
            );
        }
        "window" => {
            let start = parse_arg(args.get(1), "START")?
                .ok_or_else(|| ScrapeError::Invalid(USAGE.to_string()))?;
            let stop = parse_arg(args.get(2), "STOP")?;
            info!("Building dataset from link lines {}..{:?}", start, stop);
            let dataset = build_window(&config, start, stop).await?;
            println!(
                "{} recipes written to {} ({} failed)",
                dataset.rows.len(),
                config.output.path,
                dataset.failed.len()
            );
        }
        other => {
            return Err(ScrapeError::Invalid(format!(
                "unknown command '{}'\n{}",
                other, USAGE
            )))
        }
    }

    Ok(())
}

fn parse_arg(arg: Option<&String>, name: &str) -> Result<Option<usize>, ScrapeError> {
    arg.map(|value| {
        value
            .parse()
            .map_err(|_| ScrapeError::Invalid(format!("{} must be a number, got '{}'", name, value)))
    })
    .transpose()
}
