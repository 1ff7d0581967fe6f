use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, test, web};

use netdesk::middleware::RedirectUnauthorized;

#[actix_web::test]
async fn anonymous_request_is_sent_to_signin() {
    let app = test::init_service(App::new().wrap(RedirectUnauthorized).route(
        "/customers",
        web::get().to(|| async { HttpResponse::Unauthorized().finish() }),
    ))
    .await;

    let req = test::TestRequest::get().uri("/customers").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn other_statuses_pass_through_untouched() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized)
            .route(
                "/ok",
                web::get().to(|| async { HttpResponse::Ok().body("rows") }),
            )
            .route(
                "/missing",
                web::get().to(|| async { HttpResponse::NotFound().finish() }),
            ),
    )
    .await;

    let ok = test::call_service(&app, test::TestRequest::get().uri("/ok").to_request()).await;
    assert_eq!(ok.status(), StatusCode::OK);

    let missing =
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
