//! Database seeding tool
//!
//! Wipes and repopulates the storefront collections with sample data for
//! local development.

use clap::Command;
use mongodb::bson::DateTime;
use shopit_rs::auth::password::hash_password;
use shopit_rs::config::Config;
use shopit_rs::models::{Category, Product, ProductImage, Role, User};
use shopit_rs::storage::Store;
use shopit_rs::utils::error::Result;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let matches = Command::new("Storefront Seeder")
        .version(shopit_rs::VERSION)
        .about("Wipe and repopulate the storefront collections with sample data")
        .subcommand(Command::new("products").about("Seed only the products collection"))
        .subcommand(Command::new("users").about("Seed only the users collection"))
        .get_matches();

    let config = match Config::from_file("config/storefront.yaml").await {
        Ok(config) => config,
        Err(_) => Config::from_env()?,
    };

    let store = Store::connect(&config.database).await?;
    store.ensure_indexes().await?;

    match matches.subcommand_name() {
        Some("products") => seed_products(&store).await?,
        Some("users") => seed_users(&store).await?,
        _ => {
            seed_products(&store).await?;
            seed_users(&store).await?;
        }
    }

    Ok(())
}

async fn seed_products(store: &Store) -> Result<()> {
    let deleted = store.wipe_products().await?;
    info!("Products are deleted ({} removed)", deleted);

    let products = sample_products();
    let inserted = store.insert_products(&products).await?;
    info!("All products are added ({} inserted)", inserted);

    Ok(())
}

async fn seed_users(store: &Store) -> Result<()> {
    let deleted = store.wipe_users().await?;
    info!("Users are deleted ({} removed)", deleted);

    for user in sample_users()? {
        store.create_user(&user).await?;
    }
    info!("All users are added");

    Ok(())
}

fn product(
    name: &str,
    price: f64,
    description: &str,
    category: Category,
    brand: &str,
    stock: i32,
    image_id: &str,
) -> Product {
    Product {
        id: None,
        name: name.to_string(),
        price,
        description: description.to_string(),
        ratings: 0.0,
        images: vec![ProductImage {
            public_id: format!("products/{}", image_id),
            url: format!("https://res.example.com/products/{}.jpg", image_id),
        }],
        category,
        brand: brand.to_string(),
        stock,
        num_of_reviews: 0,
        reviews: vec![],
        created_at: DateTime::now(),
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        product(
            "Kookaburra Kahuna Pro Cricket Bat",
            189.99,
            "Grade one English willow with an extended sweet spot for back-foot play.",
            Category::Cricket,
            "Kookaburra",
            12,
            "kahuna-pro",
        ),
        product(
            "Adidas Al Rihla Match Football",
            44.5,
            "FIFA Quality Pro certified thermally bonded match ball, size 5.",
            Category::Football,
            "Adidas",
            30,
            "al-rihla",
        ),
        product(
            "Wilson A2000 Infield Glove",
            279.95,
            "Pro Stock leather 11.5 inch infield glove with dual welting.",
            Category::Baseball,
            "Wilson",
            8,
            "a2000-infield",
        ),
        product(
            "Speedo Fastskin Racing Goggles",
            59.0,
            "Low-profile hydrodynamic racing goggles with mirrored lenses.",
            Category::Swimming,
            "Speedo",
            45,
            "fastskin-goggles",
        ),
        product(
            "Yonex Astrox 99 Pro Racket",
            249.0,
            "Head-heavy badminton racket tuned for steep attacking smashes.",
            Category::Badminton,
            "Yonex",
            15,
            "astrox-99",
        ),
        product(
            "Titleist Pro V1 Golf Balls (Dozen)",
            54.99,
            "Tour-proven urethane cover with penetrating flight and drop-and-stop control.",
            Category::Golf,
            "Titleist",
            60,
            "pro-v1",
        ),
    ]
}

fn sample_users() -> Result<Vec<User>> {
    let mut admin = User::new(
        "Site Admin".to_string(),
        "admin@shopit.example".to_string(),
        hash_password("admin12345")?,
    );
    admin.role = Role::Admin;

    let shopper = User::new(
        "Jane Shopper".to_string(),
        "jane@shopit.example".to_string(),
        hash_password("shopper12345")?,
    );

    Ok(vec![admin, shopper])
}
