//! Clearr Vision CLI - Inspect and drive the storefront's client-side stores.
//!
//! # Usage
//!
//! ```bash
//! # Add a reading frame to the cart
//! clearr cart add --product V004 --name Executive --price 1100 --color Silver --power +1.50
//!
//! # Show the cart with totals
//! clearr cart show
//!
//! # Record a product view and list the history
//! clearr history view --product 1515 --name "Diamond Cut" --slug diamond-cut --price 350
//! clearr history list --limit 4
//!
//! # Take the power quiz (age, usage, style)
//! clearr quiz take a3 u1 s2
//!
//! # Format an amount as taka
//! clearr --locale en format 1500
//!
//! # Preview an order for the cart
//! clearr checkout draft --first-name Rahim --last-name Uddin --phone 01712345678 \
//!     --address "House 12, Road 5, Dhanmondi" --area Dhanmondi
//!
//! # Preview a "buy now" order for one product
//! clearr checkout direct --product V004 --name Executive --price 1100 -q 2 \
//!     --color Silver --power +1.50 --customer "Rahim Uddin" --phone 01712345678 \
//!     --address "Mirpur 10" --location outside
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, update and show cart lines
//! - `history` - Record and list recently viewed products
//! - `quiz` - List questions or score a set of answers
//! - `format` - Format an amount as taka
//! - `checkout` - Cart summary and order drafts
//! - `status` - Store overview

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use clearr_core::checkout::{CheckoutCustomer, DeliveryLocation, DirectCustomer, DEFAULT_CITY};
use clearr_core::{CartItem, Locale, PowerOption, ProductId, ViewedProduct};
use clearr_storefront::telemetry::init_tracing;
use clearr_storefront::{StoreContext, StorefrontConfig};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "clearr")]
#[command(author, version, about = "Clearr Vision storefront tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Directory holding persisted store state (overrides `CLEARR_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Display locale, `en` or `bn` (overrides `CLEARR_LOCALE`)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the recently viewed history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Run the reading power quiz
    Quiz {
        #[command(subcommand)]
        action: QuizAction,
    },
    /// Format an amount as taka
    Format {
        /// Amount; non-numeric characters are ignored
        amount: String,

        /// Product-card style: Bengali digits, whole taka, symbol last
        #[arg(long)]
        compact: bool,
    },
    /// Preview checkout totals and orders
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Show a store overview
    Status,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product line (merges with an identical line)
    Add(ItemArgs),
    /// Remove a line by id
    Remove {
        /// Line id, e.g. `V004-Silver-+1.50`
        id: String,
    },
    /// Set a line's quantity (0 removes it)
    Set {
        /// Line id
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Remove every line
    Clear,
    /// List lines and totals
    Show,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Record a product view
    View(ViewArgs),
    /// List the most recent views
    List {
        /// Number of entries (default: `CLEARR_RECENT_LIMIT`)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Forget every view
    Clear,
}

#[derive(Subcommand)]
enum QuizAction {
    /// List questions and answer ids
    Questions,
    /// Score answers given in question order
    Take {
        /// Answer ids, e.g. `a3 u1 s2`
        answers: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Subtotal and total for the cart
    Summary,
    /// Order JSON for the cart
    Draft(ShippingArgs),
    /// Order JSON for a single product, bypassing the cart
    Direct {
        #[command(flatten)]
        item: ItemArgs,
        #[command(flatten)]
        customer: BuyerArgs,
    },
}

/// A product line.
#[derive(Args)]
struct ItemArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in taka
    #[arg(long)]
    price: Decimal,

    /// Quantity
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Frame color
    #[arg(long, requires = "power")]
    color: Option<String>,

    /// Lens power, e.g. `+1.50`, `Blue Cut Zero` or `Don't know power`
    #[arg(long, requires = "color")]
    power: Option<PowerOption>,

    /// Image path or URL
    #[arg(long)]
    image: Option<String>,
}

impl ItemArgs {
    fn into_item(self) -> CartItem {
        let mut item = CartItem::new(
            ProductId::new(self.product),
            self.name,
            self.price,
            self.quantity,
        );
        if let (Some(color), Some(power)) = (self.color, self.power) {
            item = item.with_variant(color, power.label());
        }
        if let Some(image) = self.image {
            item = item.with_image(image);
        }
        item
    }
}

/// A viewed product.
#[derive(Args)]
struct ViewArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// URL slug
    #[arg(long)]
    slug: String,

    /// Price in taka
    #[arg(long)]
    price: Decimal,

    /// Price before discount
    #[arg(long)]
    original_price: Option<Decimal>,

    /// Image path or URL
    #[arg(long, default_value = "")]
    image: String,

    /// Category label
    #[arg(long, default_value = "Reading Glasses")]
    category: String,
}

impl From<ViewArgs> for ViewedProduct {
    fn from(args: ViewArgs) -> Self {
        Self {
            id: ProductId::new(args.product),
            name: args.name,
            slug: args.slug,
            price: args.price,
            original_price: args.original_price,
            image: args.image,
            category: args.category,
        }
    }
}

/// Shipping details for a cart order.
#[derive(Args)]
struct ShippingArgs {
    /// First name
    #[arg(long)]
    first_name: String,

    /// Last name
    #[arg(long)]
    last_name: String,

    /// Mobile number, e.g. `01712345678` or `+8801712345678`
    #[arg(long)]
    phone: String,

    /// Full delivery address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long, default_value = DEFAULT_CITY)]
    city: String,

    /// Area or thana
    #[arg(long)]
    area: String,
}

impl From<ShippingArgs> for CheckoutCustomer {
    fn from(args: ShippingArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            address: args.address,
            city: args.city,
            area: args.area,
        }
    }
}

/// Customer and delivery details for a product-page order.
#[derive(Args)]
struct BuyerArgs {
    /// Customer name
    #[arg(long = "customer")]
    customer_name: String,

    /// Mobile number, e.g. `01712345678`
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Delivery location: `inside` or `outside` Dhaka
    #[arg(short, long, default_value = "inside")]
    location: DeliveryLocation,
}

impl BuyerArgs {
    fn into_parts(self) -> (DirectCustomer, DeliveryLocation) {
        let customer = DirectCustomer {
            name: self.customer_name,
            phone: self.phone,
            address: self.address,
        };
        (customer, self.location)
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Commands that never touch the stores skip loading them.
    match cli.command {
        Commands::Quiz { action } => {
            match action {
                QuizAction::Questions => commands::quiz::questions(&mut out)?,
                QuizAction::Take { answers } => {
                    commands::quiz::take(&mut out, &answers)?;
                }
            }
            return Ok(());
        }
        Commands::Format { amount, compact } => {
            commands::format::amount(&mut out, &amount, config.locale, compact)?;
            return Ok(());
        }
        command => run_with_stores(command, &config, &mut out)?,
    }
    Ok(())
}

fn run_with_stores(
    command: Commands,
    config: &StorefrontConfig,
    out: &mut impl std::io::Write,
) -> Result<(), commands::CommandError> {
    let mut context = StoreContext::from_config(config);

    match command {
        Commands::Cart { action } => match action {
            CartAction::Add(item) => commands::cart::add(&mut context, out, item.into_item())?,
            CartAction::Remove { id } => commands::cart::remove(&mut context, out, &id)?,
            CartAction::Set { id, quantity } => {
                commands::cart::set_quantity(&mut context, out, &id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&mut context, out)?,
            CartAction::Show => commands::cart::show(&context, out)?,
        },
        Commands::History { action } => match action {
            HistoryAction::View(product) => {
                commands::history::view(&mut context, out, product.into())?;
            }
            HistoryAction::List { limit } => commands::history::list(&context, out, limit)?,
            HistoryAction::Clear => commands::history::clear(&mut context, out)?,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary => {
                commands::checkout::summary(&context, out)?;
            }
            CheckoutAction::Draft(shipping) => {
                commands::checkout::draft(&context, out, shipping.into(), Utc::now())?;
            }
            CheckoutAction::Direct { item, customer } => {
                let (customer, location) = customer.into_parts();
                commands::checkout::draft_direct(out, &item.into_item(), customer, location)?;
            }
        },
        Commands::Status => commands::status::show(&mut context, out)?,
        Commands::Quiz { .. } | Commands::Format { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cart_add_builds_variant_line() {
        let cli = Cli::try_parse_from([
            "clearr", "cart", "add", "--product", "V004", "--name", "Executive", "--price",
            "1100", "--color", "Silver", "--power", "+1.50", "-q", "2",
        ])
        .unwrap();

        let Commands::Cart {
            action: CartAction::Add(args),
        } = cli.command
        else {
            panic!("expected cart add");
        };
        let item = args.into_item();
        assert_eq!(item.id.as_str(), "V004-Silver-+1.50");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, Decimal::from(1100));
    }

    #[test]
    fn test_color_requires_power() {
        let result = Cli::try_parse_from([
            "clearr", "cart", "add", "--product", "V004", "--name", "Executive", "--price",
            "1100", "--color", "Silver",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_and_location() {
        let cli = Cli::try_parse_from([
            "clearr", "checkout", "direct", "--locale", "en", "--product", "V004", "--name",
            "Executive", "--price", "1100", "--customer", "Rahim", "--phone", "01712345678",
            "--address", "Mirpur 10", "-l", "outside",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::En));

        let Commands::Checkout {
            action: CheckoutAction::Direct { customer, .. },
        } = cli.command
        else {
            panic!("expected checkout direct");
        };
        let (customer, location) = customer.into_parts();
        assert_eq!(customer.name, "Rahim");
        assert_eq!(location, DeliveryLocation::OutsideDhaka);
    }

    #[test]
    fn test_cart_draft_defaults_city() {
        let cli = Cli::try_parse_from([
            "clearr", "checkout", "draft", "--first-name", "Rahim", "--last-name", "Uddin",
            "--phone", "01712345678", "--address", "House 12, Road 5", "--area", "Dhanmondi",
        ])
        .unwrap();

        let Commands::Checkout {
            action: CheckoutAction::Draft(args),
        } = cli.command
        else {
            panic!("expected checkout draft");
        };
        let customer = CheckoutCustomer::from(args);
        assert_eq!(customer.city, "dhaka");
        assert_eq!(customer.full_name(), "Rahim Uddin");
    }

    #[test]
    fn test_cart_draft_requires_area() {
        let result = Cli::try_parse_from([
            "clearr", "checkout", "draft", "--first-name", "Rahim", "--last-name", "Uddin",
            "--phone", "01712345678", "--address", "House 12, Road 5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_power() {
        let result = Cli::try_parse_from([
            "clearr", "cart", "add", "--product", "V004", "--name", "Executive", "--price",
            "1100", "--color", "Silver", "--power", "+9.00",
        ]);
        assert!(result.is_err());
    }
}
