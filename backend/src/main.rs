use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_availability::io::{create_router, AppState};
use product_availability::{
    import_flat_files, BackendSelector, ProductAvailabilityService, ProductStorage, StorageConfig,
    UserStorage,
};

#[derive(Parser, Debug)]
#[command(name = "product-availability", about = "Product availability by user city")]
struct Cli {
    /// YAML storage configuration; built-in defaults are used when omitted
    #[arg(long, env = "PRODUCT_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured backend ("csv" or "mysql")
    #[arg(long)]
    dbtype: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Print the products available to a user as JSON
    Products {
        #[arg(long)]
        user: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Copy Product.csv and User.csv from a directory into the relational store
    Import {
        #[arg(long)]
        from: PathBuf,
    },
    /// Change the price of a product
    UpdatePrice {
        #[arg(long)]
        id: String,
        #[arg(long)]
        price: u32,
    },
    /// Change the phone number of a user
    UpdatePhone {
        #[arg(long)]
        id: String,
        #[arg(long)]
        phone: String,
    },
    DeleteProduct {
        #[arg(long)]
        id: String,
    },
    DeleteUser {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let selector = match &cli.config {
        Some(path) => BackendSelector::from_config_file(path, cli.dbtype.as_deref())
            .context("Failed to load storage configuration")?,
        None => match cli.dbtype {
            Some(dbtype) => BackendSelector::new(StorageConfig::default().with_dbtype(dbtype)),
            None => BackendSelector::new(StorageConfig::default()),
        },
    };

    match cli.command {
        Command::Serve { addr } => serve(&selector, addr).await,
        Command::Products { user, category } => {
            let service = ProductAvailabilityService::from_selector(&selector)
                .await
                .context("Failed to load products and users")?;
            let products = match category {
                Some(category) => service.products_for_user_in_category(&user, &category)?,
                None => service.products_for_user(&user)?,
            };
            println!("{}", serde_json::to_string_pretty(&products)?);
            Ok(())
        }
        Command::Import { from } => {
            let summary = import_flat_files(&selector, &from)
                .await
                .with_context(|| format!("Failed to import flat files from {}", from.display()))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Command::UpdatePrice { id, price } => {
            let updated = selector.product_store()?.update_product_price(&id, price).await?;
            report(updated, "Updated", "product", &id)
        }
        Command::UpdatePhone { id, phone } => {
            let updated = selector.user_store()?.update_user_phone_number(&id, &phone).await?;
            report(updated, "Updated", "user", &id)
        }
        Command::DeleteProduct { id } => {
            let deleted = selector.product_store()?.delete_product(&id).await?;
            report(deleted, "Deleted", "product", &id)
        }
        Command::DeleteUser { id } => {
            let deleted = selector.user_store()?.delete_user(&id).await?;
            report(deleted, "Deleted", "user", &id)
        }
    }
}

async fn serve(selector: &BackendSelector, addr: SocketAddr) -> Result<()> {
    let service = ProductAvailabilityService::from_selector(selector)
        .await
        .context("Failed to load products and users")?;
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn report(found: bool, action: &str, entity: &str, id: &str) -> Result<()> {
    if found {
        info!("{} {} {}", action, entity, id);
        Ok(())
    } else {
        anyhow::bail!("No {} with id {}", entity, id)
    }
}
