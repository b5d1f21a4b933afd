//! Terminal client for the rolodex address book.

mod api_client;

use anyhow::{Context, Result};
use api_client::ApiClient;
use clap::{Parser, Subcommand};
use rolodex_core::{Contact, DetailInput, EXPORT_FILE_NAME, NewContact, ValidationPolicy};
use std::fmt::Write as _;
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "Terminal client for the rolodex address book")]
#[command(version)]
struct Cli {
    /// Server API URL
    #[arg(long, global = true, env = "ROLODEX_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts, favorites first
    List,
    /// Show one contact
    Show {
        /// Contact ID
        id: Uuid,
    },
    /// Add a contact
    Add {
        /// Contact name
        name: String,
        /// Contact method as TYPE=VALUE (repeatable, at least one)
        #[arg(short, long = "detail", value_name = "TYPE=VALUE", value_parser = parse_detail)]
        details: Vec<DetailInput>,
    },
    /// Mark a contact as favorite
    Favorite {
        /// Contact ID
        id: Uuid,
    },
    /// Remove a contact from favorites
    Unfavorite {
        /// Contact ID
        id: Uuid,
    },
    /// Delete a contact and all of its details
    Delete {
        /// Contact ID
        id: Uuid,
    },
    /// Import contacts from a spreadsheet
    Import {
        /// Workbook file (.xlsx, .xls or .ods)
        file: PathBuf,
    },
    /// Export all contacts to a spreadsheet
    Export {
        /// Output file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Check server health and version
    Health,
}

/// Parse a `TYPE=VALUE` argument.
fn parse_detail(raw: &str) -> Result<DetailInput, String> {
    let (contact_type, contact_value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=VALUE, got '{raw}'"))?;
    let detail = DetailInput::new(contact_type, contact_value).trimmed();
    if !detail.is_complete() {
        return Err(format!("both TYPE and VALUE are required, got '{raw}'"));
    }
    Ok(detail)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let Cli { server, command } = Cli::parse();
    tracing::debug!(server = %server, "Using rolodex server");
    let client = ApiClient::new(&server)?;

    match command {
        Commands::List => {
            let contacts = client.list_contacts().await?;
            print!("{}", render_contact_list(&contacts));
        }
        Commands::Show { id } => {
            let contact = client.get_contact(id).await?;
            print!("{}", render_contact(&contact));
        }
        Commands::Add { name, details } => {
            let contact = NewContact::new(name, details).normalized();
            contact
                .validate(ValidationPolicy::Strict)
                .context("refusing to send contact")?;
            let created = client.create_contact(&contact).await?;
            println!("Created contact {}", created.id);
        }
        Commands::Favorite { id } => {
            client.set_favorite(id, true).await?;
            println!("Marked {id} as favorite");
        }
        Commands::Unfavorite { id } => {
            client.set_favorite(id, false).await?;
            println!("Removed {id} from favorites");
        }
        Commands::Delete { id } => {
            client.delete_contact(id).await?;
            println!("Deleted {id}");
        }
        Commands::Import { file } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(EXPORT_FILE_NAME);
            let result = client.import_workbook(file_name, data).await?;
            println!("Imported {} contact(s)", result.imported);
            if result.skipped > 0 {
                println!("Skipped {} row(s) without a name", result.skipped);
            }
            if result.without_details > 0 {
                println!(
                    "{} contact(s) had no readable details",
                    result.without_details
                );
            }
        }
        Commands::Export { output } => {
            let data = client.export_workbook().await?;
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Exported contacts to {}", output.display());
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("Status: {}", health.status);
            println!("Server version: {}", health.version);
            println!("Client version: {}", env!("CARGO_PKG_VERSION"));

            if health.version != env!("CARGO_PKG_VERSION") {
                eprintln!(
                    "Warning: version mismatch (server: {}, client: {})",
                    health.version,
                    env!("CARGO_PKG_VERSION")
                );
            }
        }
    }

    Ok(())
}

/// Render contacts in two sections: favorites, then everyone else.
fn render_contact_list(contacts: &[Contact]) -> String {
    let (favorites, others): (Vec<&Contact>, Vec<&Contact>) =
        contacts.iter().partition(|c| c.is_favorite);

    let mut out = String::new();
    for (title, section) in [("Favorites", favorites), ("Contacts", others)] {
        let _ = writeln!(out, "{title}");
        if section.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for contact in section {
            let _ = writeln!(
                out,
                "  {} ({} contact method{})  {}",
                contact.name,
                contact.details.len(),
                if contact.details.len() == 1 { "" } else { "s" },
                contact.id
            );
            for (contact_type, contact_value) in contact.detail_pairs() {
                let _ = writeln!(out, "      {contact_type}: {contact_value}");
            }
        }
    }
    out
}

fn render_contact(contact: &Contact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:     {}", contact.name);
    let _ = writeln!(out, "ID:       {}", contact.id);
    let _ = writeln!(out, "Favorite: {}", if contact.is_favorite { "yes" } else { "no" });
    let _ = writeln!(out, "Details:");
    if contact.details.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (contact_type, contact_value) in contact.detail_pairs() {
        let _ = writeln!(out, "  {contact_type}: {contact_value}");
    }
    out
}
