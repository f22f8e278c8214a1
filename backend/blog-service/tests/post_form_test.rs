//! Post form submissions: creation with image upload, editing in place,
//! and the redirect-to-login contract for unauthenticated attempts.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use blog_service::db::post_repo;
use blog_service::routes::configure_routes;
use common::{location, multipart_form, session_cookie, TestApp, SMALL_GIF};

#[actix_web::test]
async fn create_post_from_form() {
    let ctx = TestApp::spawn().await;
    let user = ctx.create_user("brother").await;
    let group = ctx.create_group("Test group", "test_group").await;
    let token = ctx.force_login(&user).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(ctx.config.clone()))
            .app_data(web::Data::new(ctx.storage.clone()))
            .configure(configure_routes),
    )
    .await;

    let posts_before = post_repo::count_posts(&ctx.pool).await.unwrap();

    let (content_type, body) = multipart_form(
        &[("text", "Test post text"), ("group", "test_group")],
        Some(("image", "small.gif", "image/gif", SMALL_GIF)),
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/create")
            .cookie(session_cookie(&token))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/brother");
    assert_eq!(
        post_repo::count_posts(&ctx.pool).await.unwrap(),
        posts_before + 1
    );

    let created = post_repo::find_posts_by_author(&ctx.pool, user.id, 1, 0)
        .await
        .unwrap()
        .pop()
        .expect("created post");
    assert_eq!(created.text, "Test post text");
    assert_eq!(created.author_id, user.id);
    assert_eq!(created.group_id, Some(group.id));

    let image_path = created.image_path.expect("image recorded on post");
    let stored = std::fs::read(ctx.storage.absolute_path(&image_path)).expect("stored image file");
    assert_eq!(stored, SMALL_GIF);
}

#[actix_web::test]
async fn edit_post_from_form() {
    let ctx = TestApp::spawn().await;
    let user = ctx.create_user("brother").await;
    let token = ctx.force_login(&user).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(ctx.config.clone()))
            .app_data(web::Data::new(ctx.storage.clone()))
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_form(&[("text", "Test post text")], None);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/create")
            .cookie(session_cookie(&token))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let posts_after_create = post_repo::count_posts(&ctx.pool).await.unwrap();
    let post = post_repo::find_posts_by_author(&ctx.pool, user.id, 1, 0)
        .await
        .unwrap()
        .pop()
        .expect("created post");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit", post.id))
            .cookie(session_cookie(&token))
            .set_form([("text", "New test post text")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}", post.id));

    let edited = post_repo::find_post_by_id(&ctx.pool, post.id)
        .await
        .unwrap()
        .expect("post still present");
    assert_eq!(edited.text, "New test post text");
    assert_eq!(
        post_repo::count_posts(&ctx.pool).await.unwrap(),
        posts_after_create
    );
}

#[actix_web::test]
async fn unauthenticated_create_redirects_to_login() {
    let ctx = TestApp::spawn().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(ctx.config.clone()))
            .app_data(web::Data::new(ctx.storage.clone()))
            .configure(configure_routes),
    )
    .await;

    let posts_before = post_repo::count_posts(&ctx.pool).await.unwrap();

    let (content_type, body) = multipart_form(&[("text", "Test post text")], None);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/create")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/auth/login?next=%2Fposts%2Fcreate");
    assert_eq!(
        post_repo::count_posts(&ctx.pool).await.unwrap(),
        posts_before
    );
}
