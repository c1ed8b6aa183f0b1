//! Demo chef seed script
//!
//! Resets and seeds one demo chef:
//! - profile, a handful of cold and hot dishes and one banquet menu
//! - lunch opened for the next `--days` days (today included)
//! - prints a chef bearer token for the API
//!
//! Usage:
//!   DATABASE_URL=... JWT_SECRET=... ./seed-demo --days 14

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use uuid::Uuid;

use banquet_api::{
    config::Config,
    db,
    middleware::auth::issue_access_token,
    models::{
        auth::{ChefId, UserRole},
        availability::TimeSlot,
        chef::UpsertChefProfileRequest,
        dish::{CreateDishRequest, DishCategory},
        menu::CreateMenuRequest,
    },
    services::{
        availability::AvailabilityService, chefs::ChefService, dishes::DishService,
        menu::MenuService,
    },
};

const DEMO_CHEF_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0001);

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed a demo chef with dishes, a menu and open lunch slots")]
struct Args {
    /// Number of days, starting today, to open for lunch
    #[arg(long, default_value_t = 14)]
    days: i64,

    /// Display name of the demo chef
    #[arg(long, default_value = "Chef Demo")]
    chef_name: String,
}

const DISHES: [(&str, DishCategory); 6] = [
    ("Smashed cucumber salad", DishCategory::Cold),
    ("Drunken chicken", DishCategory::Cold),
    ("Braised pork belly", DishCategory::Hot),
    ("Steamed sea bass", DishCategory::Hot),
    ("Kung pao chicken", DishCategory::Hot),
    ("Stir-fried greens", DishCategory::Hot),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;

    println!("=== Seed Demo Chef ===");

    // 1. Clean the previous demo data
    for table in ["orders", "availability", "menus", "dishes"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE chef_id = $1"))
            .bind(DEMO_CHEF_ID)
            .execute(&pool)
            .await
            .with_context(|| format!("Failed to clean {table}"))?;
    }

    let chef = ChefId(DEMO_CHEF_ID);

    // 2. Profile
    ChefService::upsert_profile(
        &pool,
        chef,
        &UpsertChefProfileRequest {
            name: args.chef_name.clone(),
            bio: "Home banquets for family celebrations.".into(),
            phone: "13800000000".into(),
            address: "Riverside district".into(),
            is_active: Some(true),
        },
    )
    .await?;
    println!("  Chef: {} ({})", args.chef_name, DEMO_CHEF_ID);

    // 3. Dishes and menu
    let menu = MenuService::create(
        &pool,
        chef,
        &CreateMenuRequest {
            name: "Family banquet".into(),
            dish_count: DISHES.len() as i32,
            price_cents: 128_800,
            description: "Two cold dishes and four hot dishes.".into(),
        },
    )
    .await?;

    for (name, category) in DISHES {
        let dish = DishService::create(
            &pool,
            chef,
            &CreateDishRequest { name: name.into(), category, image_url: None },
        )
        .await?;
        MenuService::add_item(&pool, chef, menu.id, dish.id).await?;
    }
    println!("  Menu: {} with {} dishes", menu.name, DISHES.len());

    // 4. Open lunch for the coming days
    let today = config.today();
    for offset in 0..args.days {
        let date = today + Duration::days(offset);
        AvailabilityService::toggle(&pool, chef, date, TimeSlot::Lunch, true, today).await?;
    }
    println!("  Opened lunch for {} days from {}", args.days, today);

    let token = issue_access_token(&config.jwt_secret, DEMO_CHEF_ID, UserRole::Chef, Duration::days(30))?;
    println!("  Share link: {}/share/{}", config.app_base_url, DEMO_CHEF_ID);
    println!("  Chef token (30 days):\n{token}");

    Ok(())
}
