use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "products-cli")]
#[command(about = "Client for the product registry service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the greeting
    Hello,
    /// List all products
    List {
        /// Name filter (currently rejected by the server)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show one product
    Get { id: String },
    /// Create a product
    Create { name: String },
    /// Rename a product
    Update { id: String, name: String },
    /// Delete a product and print the remaining list
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let products = format!("{}/products", cli.url);

    let res = match cli.command {
        Commands::Hello => {
            let res = client.get(&cli.url).send().await?;
            println!("{}", res.text().await?);
            return Ok(());
        }
        Commands::List { name } => {
            let mut req = client.get(&products);
            if let Some(name) = name {
                req = req.query(&[("name", name)]);
            }
            req.send().await?
        }
        Commands::Get { id } => client.get(format!("{}/{}", products, id)).send().await?,
        Commands::Create { name } => {
            client
                .post(&products)
                .json(&json!({ "name": name }))
                .send()
                .await?
        }
        Commands::Update { id, name } => {
            client
                .put(format!("{}/{}", products, id))
                .json(&json!({ "name": name }))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{}/{}", products, id)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
