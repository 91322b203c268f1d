//! pokedeck CLI entry point.
//!
//! Browse the Pokémon catalogue, manage favorites and build teams from a terminal.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pokedeck::application::{DetailState, ScreenState};
use pokedeck::domain::{
    FilterCriteria, MAX_TEAM_SIZE, PokemonId, PokemonSummary, PokemonTeam, SortOrder, TypeMatch,
};
use pokedeck::infra::app_config::{
    load_config, load_config_from, render_config, save_config, save_config_to,
};
use pokedeck::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "pokedeck")]
#[command(version)]
#[command(about = "Browse Pokémon, keep favorites and build teams", long_about = None)]
struct Args {
    /// Config file (defaults to $POKEDECK_CONFIG_PATH or the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List Pokémon page by page, with optional filters
    List {
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Match against name, number or type
        #[arg(short, long)]
        search: Option<String>,

        /// Only show these types (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Only show favorites
        #[arg(long)]
        favorites: bool,

        /// id, name or name-desc
        #[arg(long, default_value = "id")]
        sort: SortOrder,

        /// Whether an item needs any or all of the selected types
        #[arg(long = "match")]
        type_match: Option<TypeMatch>,
    },

    /// Show one Pokémon in detail
    Show { id: PokemonId },

    /// Toggle a favorite
    Favorite { id: PokemonId },

    /// List favorite ids
    Favorites,

    /// Manage teams
    #[command(subcommand)]
    Team(TeamCommands),

    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TeamCommands {
    /// List all teams, most recently updated first
    List,

    Show {
        team_id: String,
    },

    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Initial members, in slot order
        #[arg(short, long = "pokemon")]
        pokemons: Vec<PokemonId>,
    },

    Rename {
        team_id: String,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    Delete {
        team_id: String,
    },

    /// Append a Pokémon to a team
    Add {
        team_id: String,
        pokemon_id: PokemonId,
    },

    Remove {
        team_id: String,
        pokemon_id: PokemonId,
    },

    /// Set the slot order; every member must be listed once
    Reorder {
        team_id: String,
        #[arg(required = true)]
        pokemon_ids: Vec<PokemonId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    if let Commands::Config { write } = args.command {
        print!("{}", render_config(&config)?);
        if write {
            let path = match args.config {
                Some(path) => {
                    save_config_to(&config, &path)?;
                    path
                }
                None => save_config(&config)?,
            };
            eprintln!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let state = AppState::new(config).context("initialize pokedeck")?;

    match args.command {
        Commands::List {
            pages,
            search,
            types,
            favorites,
            sort,
            type_match,
        } => {
            if let Some(mode) = type_match {
                state.config.write().type_match = mode;
            }
            let criteria = FilterCriteria {
                search_text: search.unwrap_or_default(),
                selected_types: types.iter().map(|t| t.trim().to_lowercase()).collect(),
                favorites_only: favorites,
            };
            list(&state, pages, criteria, sort).await
        }
        Commands::Show { id } => show(&state, id).await,
        Commands::Favorite { id } => {
            let outcome = state.detail().toggle_favorite(id).await?;
            if outcome.is_favorite {
                println!("★ #{} added to favorites", id);
            } else {
                println!("#{} removed from favorites", id);
            }
            Ok(())
        }
        Commands::Favorites => {
            let snapshot = state.favorites().all().await?;
            if snapshot.ids.is_empty() {
                println!("No favorites yet.");
            }
            for id in snapshot.ids {
                println!("#{}", id);
            }
            Ok(())
        }
        Commands::Team(command) => team(&state, command).await,
        // Handled before the database is opened.
        Commands::Config { .. } => Ok(()),
    }
}

async fn list(state: &AppState, pages: u32, criteria: FilterCriteria, sort: SortOrder) -> Result<()> {
    let mut controller = state.list_controller().await?;
    controller.load_initial();
    controller.wait_idle().await;

    for _ in 1..pages {
        if !controller.has_more() {
            break;
        }
        controller.load_more();
        controller.wait_idle().await;
    }

    controller.apply_filter(criteria);
    controller.apply_sort(sort);

    match controller.current_state() {
        ScreenState::Loading => println!("Still loading."),
        ScreenState::Empty { error } => {
            println!("No Pokémon available.");
            if let Some(error) = error {
                eprintln!("warning: {}", error);
            }
        }
        ScreenState::Error { message } => bail!(message),
        ScreenState::Success {
            items,
            has_more,
            error,
            ..
        } => {
            for item in &items {
                print_summary(item);
            }
            let window = controller.page_window();
            println!(
                "{} shown, {} of {} fetched{}",
                items.len(),
                window.offset,
                window.total_count,
                if has_more { " (more available)" } else { "" }
            );
            if let Some(error) = error {
                eprintln!("warning: {}", error);
            }
        }
    }
    Ok(())
}

async fn show(state: &AppState, id: PokemonId) -> Result<()> {
    match state.detail().load(id).await {
        DetailState::Loading => println!("Still loading."),
        DetailState::Error(message) => bail!(message),
        DetailState::Success(detail) => {
            let star = if detail.is_favorite { "★ " } else { "" };
            println!("{}#{} {}", star, detail.id, detail.name);
            println!("types:   {}", detail.types.join(", "));
            println!(
                "height:  {:.1} m   weight: {:.1} kg",
                detail.height as f32 / 10.0,
                detail.weight as f32 / 10.0
            );
            for stat in &detail.stats {
                println!("  {:<16} {:>3}", stat.name, stat.value);
            }
            let abilities: Vec<String> = detail
                .abilities
                .iter()
                .map(|a| {
                    if a.is_hidden {
                        format!("{} (hidden)", a.name)
                    } else {
                        a.name.clone()
                    }
                })
                .collect();
            println!("abilities: {}", abilities.join(", "));
            println!("moves:   {}", detail.moves.len());
            println!("image:   {}", detail.image_url);
        }
    }
    Ok(())
}

async fn team(state: &AppState, command: TeamCommands) -> Result<()> {
    let teams = state.teams();
    match command {
        TeamCommands::List => {
            let all = teams.list_teams()?;
            if all.is_empty() {
                println!("No teams yet.");
            }
            for team in &all {
                println!(
                    "{}  {:<20} {}/{}  updated {}",
                    team.id,
                    team.name,
                    team.pokemons.len(),
                    MAX_TEAM_SIZE,
                    team.updated_at
                );
            }
        }
        TeamCommands::Show { team_id } => match teams.get_team(&team_id)? {
            Some(team) => print_team(&team),
            None => bail!("Team not found: {}", team_id),
        },
        TeamCommands::Create {
            name,
            description,
            pokemons,
        } => {
            let mut members = Vec::with_capacity(pokemons.len());
            for id in pokemons {
                members.push(fetch_summary(state, id).await?);
            }
            let team = teams.create_team(&name, &description, &members)?;
            print_team(&team);
        }
        TeamCommands::Rename {
            team_id,
            name,
            description,
        } => print_team(&teams.rename_team(&team_id, &name, &description)?),
        TeamCommands::Delete { team_id } => {
            if teams.delete_team(&team_id)? {
                println!("Deleted team {}", team_id);
            } else {
                bail!("Team not found: {}", team_id);
            }
        }
        TeamCommands::Add {
            team_id,
            pokemon_id,
        } => {
            let pokemon = fetch_summary(state, pokemon_id).await?;
            print_team(&teams.add_pokemon(&team_id, &pokemon)?);
        }
        TeamCommands::Remove {
            team_id,
            pokemon_id,
        } => {
            if !teams.remove_pokemon(&team_id, pokemon_id)? {
                bail!("#{} is not in team {}", pokemon_id, team_id);
            }
            println!("Removed #{} from team {}", pokemon_id, team_id);
        }
        TeamCommands::Reorder {
            team_id,
            pokemon_ids,
        } => print_team(&teams.reorder(&team_id, &pokemon_ids)?),
    }
    Ok(())
}

async fn fetch_summary(state: &AppState, id: PokemonId) -> Result<PokemonSummary> {
    match state.detail().load(id).await {
        DetailState::Success(detail) => Ok(detail.summary()),
        DetailState::Error(message) => bail!("Could not load #{}: {}", id, message),
        DetailState::Loading => bail!("Could not load #{}", id),
    }
}

fn print_summary(item: &PokemonSummary) {
    println!(
        "{} #{:<5} {:<14} {}",
        if item.is_favorite { "★" } else { " " },
        item.id,
        item.name,
        item.types.join("/")
    );
}

fn print_team(team: &PokemonTeam) {
    println!("{} ({})", team.name, team.id);
    if !team.description.is_empty() {
        println!("  {}", team.description);
    }
    for member in &team.pokemons {
        println!(
            "  {}. #{:<5} {:<14} {}",
            member.order + 1,
            member.id,
            member.name,
            member.types.join("/")
        );
    }
}
