//! Listing filter precedence and pagination over the HTTP adapter.

mod support_notes;

use actix_web::http::Method;
use rstest::{fixture, rstest};

use backend::domain::DEFAULT_NOTE_MAX_LENGTH;
use support_notes::{World, at, titles};

/// alice writes on 1, 2 and 3 March; bob writes on 2 March.
#[fixture]
async fn seeded() -> World {
    let world = World::new(DEFAULT_NOTE_MAX_LENGTH);
    world.account("alice").await;
    world.account("bob_").await;

    for (day, hour, who, title) in [
        (1, 9, "alice", "a1"),
        (2, 10, "alice", "a2"),
        (2, 11, "bob_", "b2"),
        (3, 9, "alice", "a3"),
    ] {
        world.clock.set(at(day, hour));
        let cookie = world.signin(who).await;
        world.note(&cookie, title).await;
    }
    world.clock.set(at(3, 12));
    world
}

#[rstest]
#[case::user_range("username=alice&start_date=2024-03-01&end_date=2024-03-02", &["a2", "a1"])]
#[case::range("start_date=2024-03-02&end_date=2024-03-03", &["a3", "b2", "a2"])]
#[case::user_day("username=bob_&date=2024-03-02", &["b2"])]
#[case::day("date=2024-03-02", &["b2", "a2"])]
#[case::user("username=alice", &["a3", "a2", "a1"])]
#[case::all("", &["a3", "b2", "a2", "a1"])]
#[case::range_beats_date("date=2024-03-01&start_date=2024-03-02&end_date=2024-03-03", &["a3", "b2", "a2"])]
#[case::lone_start_is_ignored("start_date=2024-03-03", &["a3", "b2", "a2", "a1"])]
#[case::blank_values_are_absent("username=&date=", &["a3", "b2", "a2", "a1"])]
#[case::second_page("page=2&limit=2", &["a2", "a1"])]
#[case::user_second_page("username=alice&page=2&limit=2", &["a1"])]
#[case::past_the_end("page=3&limit=2", &[])]
#[actix_web::test]
async fn filters_select_and_page(
    #[future] seeded: World,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let world = seeded.await;
    let reader = world.signin("bob_").await;

    let (status, body) = world
        .call(Method::GET, &format!("/notes?{query}"), Some(&reader), None)
        .await;
    assert_eq!(status, 200, "query {query}");
    assert_eq!(titles(&body), expected, "query {query}");
}

#[rstest]
#[case::date("date=03/01/2024", "date")]
#[case::start("start_date=yesterday&end_date=2024-03-02", "start_date")]
#[case::end("start_date=2024-03-01&end_date=2024-02-30", "end_date")]
#[actix_web::test]
async fn malformed_dates_name_the_field(
    #[future] seeded: World,
    #[case] query: &str,
    #[case] field: &str,
) {
    let world = seeded.await;
    let reader = world.signin("alice").await;
    let calls_before = world.notes.list_calls();

    let (status, body) = world
        .call(Method::GET, &format!("/notes?{query}"), Some(&reader), None)
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "invalid_date_format");
    assert_eq!(world.notes.list_calls(), calls_before);
}
