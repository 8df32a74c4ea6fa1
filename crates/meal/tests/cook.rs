use restomenu_meal::cook::CookInput;
use temp_dir::TempDir;

mod helpers;

fn input(first_name: &str, last_name: &str) -> CookInput {
    CookInput {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        about: "Fifteen years behind the pass.".to_owned(),
        position: "Chef".to_owned(),
    }
}

#[tokio::test]
async fn test_cook_lifecycle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let cmd = state.cook();

    let err = cmd.create(input("John", "Doe"), None).await.unwrap_err();
    assert!(matches!(err, restomenu_shared::Error::Validate(_)));
    assert!(cmd.query().all().await?.is_empty());

    let id = cmd
        .create(input("John", "Doe"), Some(helpers::png()))
        .await?;
    cmd.create(input("Albert", "Smith"), Some(helpers::png()))
        .await?;

    let cooks = cmd.query().all().await?;
    let names = cooks.iter().map(|c| c.full_name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["John Doe", "Albert Smith"]);
    assert!(cooks[0].image.starts_with("cooker/"));

    cmd.update(&id, input("Johnny", "Doe"), None).await?;
    let cook = cmd.query().find(&id).await?.unwrap();
    assert_eq!(cook.full_name(), "Johnny Doe");
    assert_eq!(cook.image, cooks[0].image);

    cmd.delete(&id).await?;
    assert!(cmd.query().find(&id).await?.is_none());
    assert_eq!(cmd.query().all().await?.len(), 1);

    let err = cmd.delete(&id).await.unwrap_err();
    assert_eq!(err.to_string(), "cook not found");

    Ok(())
}
