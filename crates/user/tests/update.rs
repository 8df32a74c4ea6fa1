use restomenu_user::{LoginInput, UpdateInput};
use temp_dir::TempDir;

mod helpers;

fn input(id: &str, username: &str) -> UpdateInput {
    UpdateInput {
        id: id.to_owned(),
        username: username.to_owned(),
        email: None,
        password: None,
        password_confirm: None,
    }
}

#[tokio::test]
async fn test_update_own_profile() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = restomenu_user::Command(state);

    let id = helpers::create_user(&cmd, "john.doe").await?;
    let john = cmd.find(&id).await?.unwrap();

    cmd.update(&john, input(&id, "johnny")).await?;

    let user = cmd.find(&id).await?.unwrap();
    assert_eq!(user.username, "johnny");
    assert_eq!(user.email, None);

    // blank password keeps the current one
    cmd.login(LoginInput {
        username: "johnny".to_owned(),
        password: "my_password".to_owned(),
    })
    .await?;

    cmd.update(
        &john,
        UpdateInput {
            password: Some("new_password".to_owned()),
            password_confirm: Some("new_password".to_owned()),
            ..input(&id, "johnny")
        },
    )
    .await?;

    cmd.login(LoginInput {
        username: "johnny".to_owned(),
        password: "new_password".to_owned(),
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_update_permissions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = restomenu_user::Command(state);

    let ids = helpers::create_users(&cmd, vec!["john.doe", "albert", "admin"]).await?;
    let john = cmd.find(&ids[0]).await?.unwrap();

    let err = cmd
        .update(&john, input(&ids[1], "albert2"))
        .await
        .unwrap_err();
    assert!(matches!(err, restomenu_shared::Error::Forbidden));

    let err = cmd
        .update(&john, input(&ids[0], "albert"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "A user with that username already exists.");

    cmd.set_superuser("admin", true).await?;
    let admin = cmd.find(&ids[2]).await?.unwrap();
    assert!(admin.is_superuser);

    cmd.update(&admin, input(&ids[1], "albert2")).await?;
    assert_eq!(cmd.find(&ids[1]).await?.unwrap().username, "albert2");

    cmd.set_superuser("admin", false).await?;
    assert!(!cmd.find(&ids[2]).await?.unwrap().is_superuser);

    let err = cmd.set_superuser("nobody", true).await.unwrap_err();
    assert_eq!(err.to_string(), "user not found");

    Ok(())
}

#[tokio::test]
async fn test_update_password_mismatch() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = restomenu_user::Command(state);

    let id = helpers::create_user(&cmd, "john.doe").await?;
    let john = cmd.find(&id).await?.unwrap();

    for (password, password_confirm) in [
        (Some("new_password"), Some("other_password")),
        (Some("new_password"), None),
    ] {
        let err = cmd
            .update(
                &john,
                UpdateInput {
                    password: password.map(str::to_owned),
                    password_confirm: password_confirm.map(str::to_owned),
                    ..input(&id, "johnny")
                },
            )
            .await
            .unwrap_err();

        let restomenu_shared::Error::Validate(errors) = err else {
            panic!("expected a validation error, got {err}");
        };
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["password_confirm"][0].code, "must_match");
    }

    let user = cmd.find(&id).await?.unwrap();
    assert_eq!(user.username, "john.doe");

    cmd.login(LoginInput {
        username: "john.doe".to_owned(),
        password: "my_password".to_owned(),
    })
    .await?;

    Ok(())
}
