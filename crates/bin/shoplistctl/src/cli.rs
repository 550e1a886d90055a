//! Command-line surface: argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use shoplist_app::ports::ItemRepository;
use shoplist_app::services::item_service::ItemService;
use shoplist_domain::error::ShopListError;
use shoplist_domain::id::ItemId;
use shoplist_domain::item::{ItemPatch, NewItem};
use shoplist_domain::page::Page;
use shoplist_domain::price::Price;
use shoplist_domain::time::Timestamp;

#[derive(Parser, Debug)]
#[command(name = "shoplistctl")]
#[command(version)]
#[command(about = "Query and edit the shopping list", long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "shoplist.toml")]
    pub config: PathBuf,

    /// Database URL, overriding the config file and environment
    #[arg(long)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print every item
    List,

    /// Print one item
    Get { id: ItemId },

    /// Insert an item and print it with its new id
    Add {
        #[arg(long)]
        name: String,
        /// Decimal price, e.g. 4.99
        #[arg(long)]
        price: String,
        #[arg(long)]
        category: String,
        /// Mark the item as already checked off
        #[arg(long)]
        checked: bool,
        /// RFC 3339 timestamp; defaults to now
        #[arg(long)]
        date_added: Option<Timestamp>,
    },

    /// Change only the given fields of an item
    Update {
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Price>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        checked: Option<bool>,
        #[arg(long)]
        date_added: Option<Timestamp>,
    },

    /// Delete an item
    Delete { id: ItemId },

    /// Find items whose name contains TERM, ignoring case
    Search { term: String },

    /// Print one page of items in id order
    Paginate {
        /// One-based page number
        page: u32,
        /// Items per page; defaults to the configured page size
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Print items added within the last DAYS days
    AddedSince { days: u32 },

    /// Print the total price per category
    Totals,
}

/// Failures a single invocation can end with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    ShopList(#[from] ShopListError),

    #[error("failed to render output")]
    Output(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Deleted {
    deleted: ItemId,
}

/// Run `command` against `service` and return the pretty JSON to print.
///
/// # Errors
///
/// Returns [`CliError::ShopList`] for any repository failure.
pub async fn execute<R: ItemRepository>(
    service: &ItemService<R>,
    command: Command,
    default_page_size: u32,
) -> Result<String, CliError> {
    let output = match command {
        Command::List => render(&service.list_items().await?)?,
        Command::Get { id } => render(&service.get_item(id).await?)?,
        Command::Add {
            name,
            price,
            category,
            checked,
            date_added,
        } => {
            let mut builder = NewItem::builder()
                .product_name(name)
                .price(price)
                .category(category);
            if checked {
                builder = builder.checked(true);
            }
            if let Some(date_added) = date_added {
                builder = builder.date_added(date_added);
            }
            render(&service.insert_item(builder.build()?).await?)?
        }
        Command::Update {
            id,
            name,
            price,
            category,
            checked,
            date_added,
        } => {
            let patch = ItemPatch {
                product_name: name,
                price,
                category,
                checked,
                date_added,
            };
            render(&service.update_item(id, patch).await?)?
        }
        Command::Delete { id } => {
            service.delete_item(id).await?;
            render(&Deleted { deleted: id })?
        }
        Command::Search { term } => render(&service.search_items(&term).await?)?,
        Command::Paginate { page, page_size } => {
            let page = Page::with_size(page, page_size.unwrap_or(default_page_size))
                .map_err(ShopListError::from)?;
            tracing::info!(page_number = page.number(), "paginate products");
            render(&service.paginate_items(page).await?)?
        }
        Command::AddedSince { days } => render(&service.items_added_since(days).await?)?,
        Command::Totals => render(&service.total_price_by_category().await?)?,
    };
    Ok(output)
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
