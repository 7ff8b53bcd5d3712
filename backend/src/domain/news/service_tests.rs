//! Tests for the news service.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::{
    BAD_WORDS, BAD_WORDS_WARNING, Comment, CommentId, CommentText, NewComment, NewNewsItem,
    NewsId, NewsItem, NewsService,
};
use crate::domain::ports::{
    CommentsCommand, MockCommentRepository, MockNewsRepository, NewsQuery, NewsRepositoryError,
};
use crate::domain::{Actor, ErrorCode, UserId};
use crate::test_support::MutableClock;

type Service = NewsService<MockNewsRepository, MockCommentRepository>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn make_service(
    news: MockNewsRepository,
    comments: MockCommentRepository,
    now: DateTime<Utc>,
) -> Service {
    NewsService::new(
        Arc::new(news),
        Arc::new(comments),
        Arc::new(MutableClock::new(now)),
    )
}

fn news_item(id: u64) -> NewsItem {
    NewsItem::new(
        NewsId::new(id),
        NewNewsItem {
            title: format!("Новость {id}"),
            text: "Просто текст.".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
        },
    )
}

fn news_exists() -> MockNewsRepository {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id()
        .returning(|id| Ok(Some(news_item(id.get()))));
    news
}

fn stored_comment(author: &UserId, now: DateTime<Utc>) -> Comment {
    Comment::new(
        CommentId::new(9),
        NewComment {
            news: NewsId::new(1),
            author: author.clone(),
            text: CommentText::new("Текст комментария").expect("clean text"),
            created: now,
        },
    )
}

#[rstest]
#[case(10)]
#[case(3)]
#[tokio::test]
async fn home_page_requests_one_page(#[case] page_size: usize, now: DateTime<Utc>) {
    let mut news = MockNewsRepository::new();
    news.expect_latest()
        .with(eq(page_size))
        .times(1)
        .returning(|limit| Ok((1..=limit as u64).map(news_item).collect()));

    let service =
        make_service(news, MockCommentRepository::new(), now).with_page_size(page_size);
    let items = service.home_page().await.expect("home page");

    assert_eq!(items.len(), page_size);
}

#[rstest]
#[tokio::test]
async fn home_page_maps_connection_failures(now: DateTime<Utc>) {
    let mut news = MockNewsRepository::new();
    news.expect_latest()
        .return_once(|_| Err(NewsRepositoryError::connection("refused")));

    let error = make_service(news, MockCommentRepository::new(), now)
        .home_page()
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[case::anonymous(Actor::Anonymous, false)]
#[case::reader(Actor::User(UserId::random()), true)]
#[tokio::test]
async fn detail_offers_form_to_logged_in_readers(
    now: DateTime<Utc>,
    #[case] actor: Actor,
    #[case] has_form: bool,
) {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_list_for_news()
        .with(eq(NewsId::new(1)))
        .returning(|_| Ok(Vec::new()));

    let detail = make_service(news_exists(), comments, now)
        .news_detail(&actor, NewsId::new(1))
        .await
        .expect("detail");

    assert_eq!(detail.news.id(), NewsId::new(1));
    assert_eq!(detail.form.is_some(), has_form);
}

#[rstest]
#[tokio::test]
async fn detail_of_unknown_news_is_not_found(now: DateTime<Utc>) {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().returning(|_| Ok(None));

    let error = make_service(news, MockCommentRepository::new(), now)
        .news_detail(&Actor::Anonymous, NewsId::new(404))
        .await
        .expect_err("missing news");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn submit_stamps_comment_with_clock_time(now: DateTime<Utc>) {
    let author = UserId::random();
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .withf(move |comment| comment.created == now && comment.news == NewsId::new(1))
        .times(1)
        .returning(|comment| Ok(Comment::new(CommentId::new(1), comment.clone())));

    let comment = make_service(news_exists(), comments, now)
        .submit(&Actor::User(author.clone()), NewsId::new(1), "Текст комментария")
        .await
        .expect("submitted");

    assert_eq!(comment.author(), &author);
    assert_eq!(comment.created(), now);
}

#[rstest]
#[tokio::test]
async fn submit_rejects_each_banned_word(now: DateTime<Utc>) {
    for word in BAD_WORDS {
        let mut comments = MockCommentRepository::new();
        comments.expect_insert().times(0);

        let error = make_service(news_exists(), comments, now)
            .submit(
                &Actor::User(UserId::random()),
                NewsId::new(1),
                &format!("Какой-то текст, {word}, еще текст"),
            )
            .await
            .expect_err("banned word");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.field_errors("text"), vec![BAD_WORDS_WARNING]);
    }
}

#[rstest]
#[tokio::test]
async fn anonymous_submit_creates_nothing(now: DateTime<Utc>) {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().times(0);
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().times(0);

    let error = make_service(news, comments, now)
        .submit(&Actor::Anonymous, NewsId::new(1), "Текст комментария")
        .await
        .expect_err("anonymous");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn owner_can_update_comment(now: DateTime<Utc>) {
    let author = UserId::random();
    let existing = stored_comment(&author, now);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    comments
        .expect_update_text()
        .times(1)
        .returning(move |id, text| {
            Ok(Comment::new(
                id,
                NewComment {
                    news: NewsId::new(1),
                    author: UserId::random(),
                    text: text.clone(),
                    created: now,
                },
            ))
        });

    let updated = make_service(MockNewsRepository::new(), comments, now)
        .update(&Actor::User(author), CommentId::new(9), "Обновлённый комментарий")
        .await
        .expect("updated");

    assert_eq!(updated.text(), "Обновлённый комментарий");
}

#[rstest]
#[tokio::test]
async fn update_with_banned_word_keeps_old_text(now: DateTime<Utc>) {
    let author = UserId::random();
    let existing = stored_comment(&author, now);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    comments.expect_update_text().times(0);

    let error = make_service(MockNewsRepository::new(), comments, now)
        .update(&Actor::User(author), CommentId::new(9), "Редиска")
        .await
        .expect_err("banned word");

    assert_eq!(error.field_errors("text"), vec![BAD_WORDS_WARNING]);
}

#[rstest]
#[tokio::test]
async fn non_owner_cannot_delete_comment(now: DateTime<Utc>) {
    let existing = stored_comment(&UserId::random(), now);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    comments.expect_delete().times(0);

    let error = make_service(MockNewsRepository::new(), comments, now)
        .delete(&Actor::User(UserId::random()), CommentId::new(9))
        .await
        .expect_err("non-owner");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owner_can_delete_comment(now: DateTime<Utc>) {
    let author = UserId::random();
    let existing = stored_comment(&author, now);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    comments
        .expect_delete()
        .with(eq(CommentId::new(9)))
        .times(1)
        .return_once(|_| Ok(true));

    let removed = make_service(MockNewsRepository::new(), comments, now)
        .delete(&Actor::User(author), CommentId::new(9))
        .await
        .expect("deleted");

    assert_eq!(removed.news(), NewsId::new(1));
}
