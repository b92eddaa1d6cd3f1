//! harfa-admin: back-office console for the Harfa Trading catalog.
//!
//! Every command is a thin front end over the external admin API; the
//! heavy lifting (auth, storage, image handling) happens server-side.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harfa_storefront::client::CatalogBackend;
use harfa_storefront::enquiry::Enquiry;
use harfa_storefront::forms::{CategoryDraft, ImageSource, LoginForm, ProductDraft};
use harfa_storefront::models::Product;
use harfa_storefront::screens::{CategoriesScreen, ProductsScreen};
use harfa_storefront::state::{filter_by_category, search_by_name};
use harfa_storefront::{AdminApi, AppConfig, TokenStore};

#[derive(Parser, Debug)]
#[command(
    name = "harfa-admin",
    version,
    about = "Back-office console for the Harfa Trading wholesale catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the admin token locally.
    Login { email: String },

    /// Drop the stored admin token.
    Logout,

    /// Category management.
    Categories {
        #[command(subcommand)]
        command: CategoryCmd,
    },

    /// Product management.
    Products {
        #[command(subcommand)]
        command: ProductCmd,
    },

    /// Landing-page new arrivals, as curated by the backend.
    Arrivals,

    /// Show one product.
    Show { id: String },

    /// Print the WhatsApp enquiry link a customer would open for a product.
    Enquiry {
        id: String,
        /// Shop name to prefill in the message.
        #[arg(long)]
        shop: String,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryCmd {
    List,
    Add {
        name: String,
    },
    Edit {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
    /// Flip the blocked flag (soft disable, nothing is deleted).
    Block {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProductCmd {
    List {
        /// Case-insensitive name filter.
        #[arg(long)]
        search: Option<String>,
        /// Category id, or "all".
        #[arg(long)]
        category: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Category id.
        #[arg(long)]
        category: String,
        /// Image file to upload.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
    /// Flip the blocked flag.
    Block {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api = Arc::new(AdminApi::new(
        config.api_base.clone(),
        TokenStore::new(&config.token_path),
    ));

    match cli.command {
        Commands::Login { email } => {
            let password = prompt_password()?;
            api.login(&LoginForm { email, password }).await?;
            println!("Signed in. Token stored at {}", config.token_path.display());
        }
        Commands::Logout => {
            api.logout()?;
            println!("Signed out.");
        }
        Commands::Categories { command } => run_category(api, command).await?,
        Commands::Products { command } => run_product(api, command).await?,
        Commands::Arrivals => {
            let arrivals = api.new_arrivals().await?;
            print_products(&arrivals.iter().collect::<Vec<_>>());
        }
        Commands::Show { id } => {
            let p = api.product_details(&id).await?;
            println!("{:<12} {}", "id", p.id);
            println!("{:<12} {}", "name", p.name);
            println!("{:<12} {}", "category", p.category_name());
            println!("{:<12} {}", "status", p.status_label());
            println!("{:<12} {}", "image", p.image);
            println!("{:<12} {}", "description", p.description);
        }
        Commands::Enquiry { id, shop } => {
            let number = config
                .whatsapp_number
                .context("WHATSAPP_NUMBER is not set")?;
            let product = api.product_details(&id).await?;
            let enquiry = Enquiry::new(shop, product.name, number);
            println!("{}", enquiry.link()?);
        }
    }

    Ok(())
}

async fn run_category(api: Arc<AdminApi>, command: CategoryCmd) -> Result<()> {
    match command {
        CategoryCmd::List => {
            let mut screen = CategoriesScreen::new(api);
            screen.load().await;
            if let Some(err) = screen.error {
                bail!(err);
            }
            if screen.categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }
            println!("{:<26} {:<28} {}", "ID", "NAME", "STATUS");
            for c in &screen.categories {
                println!("{:<26} {:<28} {}", c.id, c.name, c.status_label());
            }
        }
        CategoryCmd::Add { name } => {
            let created = api.add_category(&CategoryDraft::new(name)).await?;
            println!("Added category {} ({})", created.name, created.id);
        }
        CategoryCmd::Edit { id, name } => {
            let updated = api.update_category(&id, &CategoryDraft::new(name)).await?;
            println!("Updated category {} ({})", updated.name, updated.id);
        }
        CategoryCmd::Delete { id } => {
            api.delete_category(&id).await?;
            println!("Deleted category {id}");
        }
        CategoryCmd::Block { id } => {
            let updated = api.toggle_category_block(&id).await?;
            println!("Category {} is now {}", updated.name, updated.status_label());
        }
    }
    Ok(())
}

async fn run_product(api: Arc<AdminApi>, command: ProductCmd) -> Result<()> {
    match command {
        ProductCmd::List { search, category } => {
            let mut screen = ProductsScreen::new(api);
            screen.load().await;
            if let Some(err) = screen.error {
                bail!(err);
            }
            let by_category: Vec<Product> =
                filter_by_category(&screen.state.products, category.as_deref())
                    .into_iter()
                    .cloned()
                    .collect();
            let rows = search_by_name(&by_category, search.as_deref().unwrap_or(""));
            print_products(&rows);
        }
        ProductCmd::Add {
            name,
            description,
            category,
            image,
        } => {
            let draft = ProductDraft {
                name,
                description,
                category_id: category,
                image: image.map_or(ImageSource::None, ImageSource::Upload),
            };
            let created = api.add_product(&draft).await?;
            println!("Added product {} ({})", created.name, created.id);
        }
        ProductCmd::Edit {
            id,
            name,
            description,
            category,
            image,
        } => {
            // prefill from the current record, then apply the overrides
            let current = api.product_details(&id).await?;
            let mut draft = ProductDraft::for_edit(&current);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(category) = category {
                draft.category_id = category;
            }
            if let Some(image) = image {
                draft.image = ImageSource::Upload(image);
            }
            let updated = api.update_product(&id, &draft).await?;
            println!("Updated product {} ({})", updated.name, updated.id);
        }
        ProductCmd::Delete { id } => {
            api.delete_product(&id).await?;
            println!("Deleted product {id}");
        }
        ProductCmd::Block { id } => {
            let current = api.product_details(&id).await?;
            api.set_product_blocked(&id, !current.is_blocked).await?;
            println!(
                "Product {} is now {}",
                current.name,
                if current.is_blocked { "Active" } else { "Blocked" }
            );
        }
    }
    Ok(())
}

fn print_products(rows: &[&Product]) {
    if rows.is_empty() {
        println!("No products found.");
        return;
    }
    println!("{:<26} {:<28} {:<20} {}", "ID", "NAME", "CATEGORY", "STATUS");
    for p in rows {
        println!(
            "{:<26} {:<28} {:<20} {}",
            p.id,
            p.name,
            p.category_name(),
            p.status_label()
        );
    }
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
