use clap::Parser;
use qkart::config::Command;
use qkart::core::{AddOptions, CartProvider, CatalogProvider, ConfigProvider, Credentials, Notifier, Product, Session};
use qkart::utils::error::ErrorSeverity;
use qkart::utils::{logger, validation::Validate};
use qkart::{
    Authenticator, Cli, ConsoleNotifier, FileSessionStore, HttpCommerceApi, SearchDebouncer, Storefront,
    StorefrontConfig, StorefrontError,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if Path::new(&cli.config).exists() {
        match StorefrontConfig::from_file(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    } else {
        StorefrontConfig::default()
    };
    cli.apply_overrides(&mut config);

    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::debug!("Command failed: {:?}", e);

        // Local rejections were already shown as warnings by the notifier.
        if !e.is_local() {
            eprintln!("💡 {}", e.recovery_suggestion());
        }

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: Command, config: &StorefrontConfig) -> Result<(), StorefrontError> {
    let api = Arc::new(HttpCommerceApi::from_config(config)?);
    let auth = Authenticator::new(
        api.clone(),
        FileSessionStore::new(config.session_path()),
        ConsoleNotifier,
    );
    let session = auth.restore().await?;

    match &command {
        Command::Login { username, password } => {
            let session = auth.login(&Credentials::new(username, password)).await?;
            if let Some(balance) = session.balance {
                println!("💰 Wallet balance: {}", balance);
            }
            return Ok(());
        }
        Command::Register {
            username,
            password,
            confirm_password,
        } => {
            return auth
                .register(&Credentials::new(username, password), confirm_password)
                .await;
        }
        Command::Logout => {
            auth.logout().await?;
            println!("👋 Logged out");
            return Ok(());
        }
        _ => {}
    }

    let mut storefront = Storefront::new(api, ConsoleNotifier, session);
    storefront.load().await;

    match command {
        Command::Products => print_products(storefront.catalog()),
        Command::Search { text } => {
            storefront.search(&text).await;
            print_products(storefront.filtered_products());
        }
        Command::Browse => browse(&mut storefront, config.debounce_delay()).await?,
        Command::Cart => {
            require_login(storefront.session())?;
            print_cart(&storefront);
        }
        Command::Add { product_id, qty } => {
            storefront.add_to_cart(&product_id, qty, AddOptions::add_new()).await?;
            print_cart(&storefront);
        }
        Command::Update { product_id, qty } => {
            storefront
                .add_to_cart(&product_id, qty, AddOptions::update_quantity())
                .await?;
            print_cart(&storefront);
        }
        Command::Login { .. } | Command::Register { .. } | Command::Logout => {}
    }

    Ok(())
}

/// Each stdin line stands for the current content of the search box.
async fn browse<A, N>(storefront: &mut Storefront<A, N>, delay: Duration) -> Result<(), StorefrontError>
where
    A: CatalogProvider + CartProvider,
    N: Notifier,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = SearchDebouncer::new(delay, tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("🔍 Type to search (Ctrl-D to quit)");
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => debouncer.on_input(text),
                None => break,
            },
            Some(text) = rx.recv() => {
                storefront.search(&text).await;
                print_products(storefront.filtered_products());
            }
        }
    }

    // let the last keystroke settle before closing the channel
    debouncer.flush().await;
    drop(debouncer);
    while let Some(text) = rx.recv().await {
        storefront.search(&text).await;
        print_products(storefront.filtered_products());
    }

    Ok(())
}

fn require_login(session: &Session) -> Result<(), StorefrontError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        eprintln!("⚠️  {}", StorefrontError::Unauthenticated);
        Err(StorefrontError::Unauthenticated)
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for p in products {
        println!(
            "{:<18} {:<40} {:<12} ${:>8.2} {}",
            p.id,
            p.name,
            p.category,
            p.cost,
            "★".repeat(p.rating.min(5) as usize)
        );
    }
}

fn print_cart<A, N>(storefront: &Storefront<A, N>)
where
    A: CatalogProvider + CartProvider,
    N: Notifier,
{
    let items = storefront.line_items();
    if items.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }
    for item in items {
        println!(
            "{:<18} {:<40} x{:<4} ${:>8.2}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.subtotal()
        );
    }
    let summary = storefront.summary();
    println!("🛒 {} items, order total ${:.2}", summary.total_items, summary.total_value);
}
