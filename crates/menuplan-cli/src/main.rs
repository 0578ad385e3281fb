use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "menuplan-cli", version, about = "Menuplan CLI")]
struct Cli {
    /// Skip the startup health probe and treat the backend as unreachable
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dish management
    Dish {
        #[command(subcommand)]
        action: commands::dish::DishAction,
    },
    /// Food catalogue management
    Food {
        #[command(subcommand)]
        action: commands::food::FoodAction,
    },
    /// Weekly plan management
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Shopping list
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Pending-operation sync
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = match commands::common::AppContext::build(cli.offline).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Dish { action } => commands::dish::run(&ctx, action).await,
        Commands::Food { action } => commands::food::run(&ctx, action).await,
        Commands::Plan { action } => commands::plan::run(&ctx, action).await,
        Commands::Shop { action } => commands::shop::run(&ctx, action),
        Commands::Sync { action } => commands::sync::run(&ctx, action).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
