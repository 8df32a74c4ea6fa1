use axum::http::StatusCode;

mod common;

use common::{TestApp, body_string, location, png, setup_test_app};

const COOK: [(&str, &str); 4] = [
    ("first_name", "Gordon"),
    ("last_name", "Ramsay"),
    ("position", "Head chef"),
    ("about", "Twenty years in the kitchen"),
];

async fn create_cook(app: &TestApp) -> String {
    let admin = app.create_user("cook_admin", true).await.unwrap();
    let response = app
        .post_multipart("/team/create", Some(&admin), &COOK, Some(png()))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    app.cook_query().all().await.unwrap()[0].id.to_owned()
}

#[tokio::test]
async fn test_team_list() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    create_cook(&app).await;

    let response = app.get("/team", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Gordon Ramsay"));
    assert!(body.contains("Head chef"));

    Ok(())
}

#[tokio::test]
async fn test_team_permissions() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let id = create_cook(&app).await;
    let john = app.create_user("john", false).await?;

    for uri in [
        "/team/create".to_owned(),
        format!("/team/{id}/update"),
        format!("/team/{id}/delete"),
    ] {
        let response = app.get(&uri, None).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(location(&response).starts_with("/users/login?next="));

        let response = app.get(&uri, Some(&john)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let response = app
        .post_form(&format!("/team/{id}/delete"), Some(&john), &[])
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.cook_query().find(&id).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_create_cook_errors() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let admin = app.create_user("admin", true).await?;

    let response = app
        .post_multipart("/team/create", Some(&admin), &COOK, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This field is required."));

    let response = app
        .post_multipart(
            "/team/create",
            Some(&admin),
            &[("first_name", "Gordon"), ("last_name", ""), ("position", "")],
            Some(png()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(app.cook_query().all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_cook() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let id = create_cook(&app).await;
    let admin = app.create_user("admin", true).await?;

    let response = app.get(&format!("/team/{id}/update"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Gordon"));

    let response = app
        .post_multipart(
            &format!("/team/{id}/update"),
            Some(&admin),
            &[
                ("first_name", "Gordon"),
                ("last_name", "Ramsay"),
                ("position", "Owner"),
                ("about", ""),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/team");

    let cook = app.cook_query().find(&id).await?.unwrap();
    assert_eq!(cook.position, "Owner");
    assert_eq!(cook.image, "cooker/test_image.png");

    let response = app.get(&format!("/team/{id}/delete"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_form(&format!("/team/{id}/delete"), Some(&admin), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/team");
    assert!(app.cook_query().find(&id).await?.is_none());

    let response = app.get("/team/unknown/update", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
