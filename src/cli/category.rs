use restomenu_meal::category::{CategoryInput, Command, Query};

pub async fn add(config: restomenu::config::Config, name: String) -> anyhow::Result<()> {
    let pool = restomenu::create_pool(&config.database.url, 1).await?;
    let command = Command(restomenu_shared::State::single(pool));

    let id = command.create(CategoryInput { name: name.to_owned() }).await?;

    tracing::info!(category = id, "category {name} added");

    Ok(())
}

pub async fn list(config: restomenu::config::Config) -> anyhow::Result<()> {
    let pool = restomenu::create_pool(&config.database.url, 1).await?;

    for category in Query(pool).all().await? {
        println!("{}\t{}", category.id, category.name);
    }

    Ok(())
}
