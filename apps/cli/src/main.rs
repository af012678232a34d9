mod commands;
mod config;
mod main_lib;
mod notifier;
mod render;

use commands::{Command, CommandError, HELP};
use config::Config;
use main_lib::{build_service, dispatch, init_tracing, Flow};
use tokio::io::{AsyncBufReadExt, BufReader};
use wageclock_core::TrackerServiceTrait;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let service = build_service(&config).await?;

    println!("{}", HELP);
    print!("{}", render::render_view(&service.view().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match dispatch(&service, command).await {
            Ok(Flow::Continue(output)) => {
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
            }
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    service.shutdown().await;
    tracing::info!("Bye");
    Ok(())
}
