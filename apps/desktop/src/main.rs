use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{
    reveal_update, search, submit_update, PokedexClient, PokedexView, Tone,
    DEFAULT_SERVER_URL,
};

#[derive(Parser, Debug)]
#[command(about = "Look up and edit Pokémon records from the command line")]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Print the raw record as JSON instead of the rendered view.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a record by name or pokedex number.
    Search { name: String },
    /// Look up a record, then replace its abilities and types.
    Update {
        name: String,
        /// Comma separated abilities, e.g. "fly, swim".
        #[arg(long, default_value = "")]
        abilities: String,
        /// Comma separated types.
        #[arg(long, default_value = "")]
        types: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    tracing::debug!(server_url = %args.server_url, "desktop client starting");

    let client = PokedexClient::new(&args.server_url)?;
    let mut view = PokedexView::new();

    match args.command {
        Command::Search { name } => {
            view.identifier_input = name;
            search(&mut view, &client).await;
            print_view(&view, args.json)?;
        }
        Command::Update {
            name,
            abilities,
            types,
        } => {
            view.identifier_input = name;
            search(&mut view, &client).await;
            if !view.update_trigger_visible() {
                return print_view(&view, args.json);
            }

            reveal_update(&mut view);
            view.abilities_input = abilities;
            view.types_input = types;
            submit_update(&mut view, &client).await;
            if let Some(alert) = view.alert() {
                return Err(anyhow!("{alert}"));
            }
            print_view(&view, args.json)?;
        }
    }

    Ok(())
}

fn print_view(view: &PokedexView, json: bool) -> Result<()> {
    let display = view.display();
    if display.tone() == Tone::Error {
        return Err(anyhow!("{display}"));
    }

    match (json, view.record()) {
        (true, Some(record)) => println!("{}", serde_json::to_string_pretty(record)?),
        _ => println!("{display}"),
    }
    Ok(())
}
