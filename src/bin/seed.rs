use wishlists_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::seed,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState { orm };

    let ids = seed(&state).await?;
    println!("Seed completed. Wishlists: {ids:?}");
    Ok(())
}
