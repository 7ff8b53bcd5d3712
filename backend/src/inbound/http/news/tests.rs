//! Tests for news HTTP handlers.

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::UserId;
use crate::domain::news::BAD_WORDS_WARNING;
use crate::domain::ports::CommentRepository;
use crate::inbound::http::test_utils::{session_cookie, test_login_request};
use crate::test_support::{Scenario, test_app};

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

macro_rules! logged_in {
    ($app:expr, $user:expr) => {{
        let res = actix_test::call_service(&$app, test_login_request($user).to_request()).await;
        session_cookie(&res)
    }};
}

#[actix_web::test]
async fn home_lists_newest_first_up_to_page_size() {
    let scenario = Scenario::new().with_page_size(2);
    scenario.news_item("Старая", date(1)).await;
    scenario.news_item("Новая", date(3)).await;
    scenario.news_item("Средняя", date(2)).await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/news/").to_request())
            .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let titles: Vec<_> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Новая", "Средняя"]);
}

#[rstest]
#[case::anonymous(false)]
#[case::reader(true)]
#[actix_web::test]
async fn detail_offers_form_to_logged_in_readers(#[case] logged_in: bool) {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;

    let mut request = actix_test::TestRequest::get().uri(&format!("/news/{}/", item.id()));
    if logged_in {
        request = request.cookie(logged_in!(app, &UserId::random()));
    }
    let res = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("form").is_some(), logged_in);
}

#[actix_web::test]
async fn detail_lists_comments_oldest_first() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let author = scenario.author();
    scenario.comment(item.id(), &author, "первый").await;
    scenario.comment(item.id(), &author, "второй").await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/news/{}/", item.id()))
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(res).await;
    let texts: Vec<_> = body
        .get("comments")
        .and_then(Value::as_array)
        .expect("comments array")
        .iter()
        .filter_map(|comment| comment.get("text").and_then(Value::as_str))
        .collect();
    assert_eq!(texts, vec!["первый", "второй"]);
}

#[rstest]
#[case("/news/999/")]
#[case("/news/not-a-number/")]
#[actix_web::test]
async fn unknown_news_is_not_found(#[case] path: &str) {
    let scenario = Scenario::new();
    let app = actix_test::init_service(test_app(scenario.http_state())).await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn anonymous_comment_redirects_and_creates_nothing() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let path = format!("/news/{}/", item.id());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&path)
            .set_form([("text", "Текст комментария")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(format!("/auth/login/?next={path}").as_str()));
    assert_eq!(scenario.comment_count().await, 0);
}

#[actix_web::test]
async fn comment_is_posted_and_redirects_to_thread() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let reader = scenario.author();
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let cookie = logged_in!(app, &reader);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/news/{}/", item.id()))
            .cookie(cookie)
            .set_form([("text", "Текст комментария")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        location(&res),
        Some(format!("/news/{}/#comments", item.id()).as_str())
    );
    let thread = scenario
        .comments
        .list_for_news(item.id())
        .await
        .expect("thread");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].author(), &reader);
    assert_eq!(thread[0].text(), "Текст комментария");
}

#[actix_web::test]
async fn banned_word_is_rejected_with_warning() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let cookie = logged_in!(app, &UserId::random());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/news/{}/", item.id()))
            .cookie(cookie)
            .set_json(json!({ "text": "Какой-то текст, редиска, еще текст" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.pointer("/details/fieldErrors/text/0"),
        Some(&json!(BAD_WORDS_WARNING))
    );
    assert_eq!(scenario.comment_count().await, 0);
}

#[rstest]
#[case("/news/edit_comment/{}/")]
#[case("/news/delete_comment/{}/")]
#[actix_web::test]
async fn comment_pages_are_hidden_from_other_users(#[case] template: &str) {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let author = scenario.author();
    let comment = scenario.comment(item.id(), &author, "Текст").await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let path = template.replace("{}", &comment.id().to_string());

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&path).to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::FOUND);

    let stranger = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&path)
            .cookie(logged_in!(app, &UserId::random()))
            .to_request(),
    )
    .await;
    assert_eq!(stranger.status(), StatusCode::NOT_FOUND);

    let owner = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&path)
            .cookie(logged_in!(app, &author))
            .to_request(),
    )
    .await;
    assert_eq!(owner.status(), StatusCode::OK);
}

#[actix_web::test]
async fn author_edits_comment() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let author = scenario.author();
    let comment = scenario.comment(item.id(), &author, "Текст").await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let cookie = logged_in!(app, &author);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/news/edit_comment/{}/", comment.id()))
            .cookie(cookie)
            .set_form([("text", "Обновлённый текст")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        location(&res),
        Some(format!("/news/{}/#comments", item.id()).as_str())
    );
    let stored = scenario
        .comments
        .find_by_id(comment.id())
        .await
        .expect("lookup")
        .expect("comment kept");
    assert_eq!(stored.text(), "Обновлённый текст");
    assert_eq!(stored.created(), comment.created());
}

#[rstest]
#[case::post(actix_test::TestRequest::post())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn author_deletes_comment(#[case] request: actix_test::TestRequest) {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let author = scenario.author();
    let comment = scenario.comment(item.id(), &author, "Текст").await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let cookie = logged_in!(app, &author);

    let res = actix_test::call_service(
        &app,
        request
            .uri(&format!("/news/delete_comment/{}/", comment.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        location(&res),
        Some(format!("/news/{}/#comments", item.id()).as_str())
    );
    assert_eq!(scenario.comment_count().await, 0);
}

#[actix_web::test]
async fn stranger_cannot_delete_comment() {
    let scenario = Scenario::new();
    let item = scenario.news_item("Новость", date(1)).await;
    let comment = scenario.comment(item.id(), &scenario.author(), "Текст").await;
    let app = actix_test::init_service(test_app(scenario.http_state())).await;
    let cookie = logged_in!(app, &UserId::random());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/news/delete_comment/{}/", comment.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(scenario.comment_count().await, 1);
}
